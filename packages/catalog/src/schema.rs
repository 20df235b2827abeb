//! Per-variant field schemas.
//!
//! A schema tells the editing surface which fields a variant exposes, what
//! kind of input each one takes, and which fields hold sub-lists (with the
//! template a new list item starts from).

use pagekit_common::{ConfigPath, PathSegment};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    LongText,
    Number,
    Toggle,
    Url,
    /// Asset URL chosen through the media picker
    Image,
    Choice(&'static [&'static str]),
    /// `ctaType` / `ctaUrl` / `anchorWidgetId` / `target` group
    Cta,
    /// Ordered list of structured records
    List {
        item_fields: &'static [FieldSchema],
        /// Items carry a stable `id` used only as a render key
        keyed: bool,
        template: fn() -> Value,
    },
    /// Ordered list of plain strings
    StringList,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Must be present and non-null in every config of this variant
    pub required: bool,
}

impl FieldSchema {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, FieldKind::List { .. } | FieldKind::StringList)
    }
}

/// Find the schema entry addressed by `path`.
///
/// Accepts `field`, `list.N`, `list.N.field` and `list.N.sublist` shapes.
/// The CTA group is addressed through its concrete keys (`ctaUrl`, ...).
pub fn resolve_field<'a>(fields: &'a [FieldSchema], path: &ConfigPath) -> Option<&'a FieldSchema> {
    let mut current_fields = fields;
    let mut current: Option<&FieldSchema> = None;

    for segment in path.segments() {
        match segment {
            PathSegment::Field(name) => {
                let found = current_fields
                    .iter()
                    .find(|f| f.name == name)
                    .or_else(|| cta_member(current_fields, name))?;
                current = Some(found);
                current_fields = match found.kind {
                    FieldKind::List { item_fields, .. } => item_fields,
                    _ => &[],
                };
            }
            PathSegment::Index(_) => {
                // Only lists are indexable
                if !current.map(FieldSchema::is_list).unwrap_or(false) {
                    return None;
                }
            }
        }
    }

    current
}

pub const CTA_KEYS: [&str; 5] = ["ctaType", "ctaUrl", "buttonUrl", "anchorWidgetId", "target"];

fn cta_member<'a>(fields: &'a [FieldSchema], name: &str) -> Option<&'a FieldSchema> {
    if !CTA_KEYS.contains(&name) {
        return None;
    }
    fields.iter().find(|f| matches!(f.kind, FieldKind::Cta))
}

/// Item template for the list field addressed by `path`
pub fn list_template(fields: &[FieldSchema], path: &ConfigPath) -> Option<Value> {
    match resolve_field(fields, path)?.kind {
        FieldKind::List { template, .. } => Some(template()),
        FieldKind::StringList => Some(Value::String(String::new())),
        _ => None,
    }
}
