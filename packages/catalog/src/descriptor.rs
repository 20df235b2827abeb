use crate::schema::FieldSchema;
use pagekit_common::ConfigMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Palette group a variant is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Header,
    Content,
    Media,
    SocialProof,
    Conversion,
    Layout,
}

impl Category {
    /// Palette order
    pub const ALL: [Category; 6] = [
        Category::Header,
        Category::Content,
        Category::Media,
        Category::SocialProof,
        Category::Conversion,
        Category::Layout,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Header => "Header",
            Category::Content => "Content",
            Category::Media => "Media",
            Category::SocialProof => "Social Proof",
            Category::Conversion => "Conversion",
            Category::Layout => "Layout",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Closed set of widget variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    Hero,
    Text,
    Faq,
    Steps,
    Checklist,
    Ingredients,
    Image,
    Gallery,
    Video,
    Testimonials,
    Reviews,
    AuthorBio,
    Pricing,
    Comparison,
    CountdownTimer,
    CtaBanner,
    LeadForm,
    Spacer,
}

impl VariantKind {
    pub const ALL: [VariantKind; 18] = [
        VariantKind::Hero,
        VariantKind::Text,
        VariantKind::Faq,
        VariantKind::Steps,
        VariantKind::Checklist,
        VariantKind::Ingredients,
        VariantKind::Image,
        VariantKind::Gallery,
        VariantKind::Video,
        VariantKind::Testimonials,
        VariantKind::Reviews,
        VariantKind::AuthorBio,
        VariantKind::Pricing,
        VariantKind::Comparison,
        VariantKind::CountdownTimer,
        VariantKind::CtaBanner,
        VariantKind::LeadForm,
        VariantKind::Spacer,
    ];

    /// Serialized tag stored in `BlockInstance.type`
    pub fn tag(self) -> &'static str {
        match self {
            VariantKind::Hero => "hero",
            VariantKind::Text => "text",
            VariantKind::Faq => "faq",
            VariantKind::Steps => "steps",
            VariantKind::Checklist => "checklist",
            VariantKind::Ingredients => "ingredients",
            VariantKind::Image => "image",
            VariantKind::Gallery => "gallery",
            VariantKind::Video => "video",
            VariantKind::Testimonials => "testimonials",
            VariantKind::Reviews => "reviews",
            VariantKind::AuthorBio => "author-bio",
            VariantKind::Pricing => "pricing",
            VariantKind::Comparison => "comparison",
            VariantKind::CountdownTimer => "countdown-timer",
            VariantKind::CtaBanner => "cta-banner",
            VariantKind::LeadForm => "lead-form",
            VariantKind::Spacer => "spacer",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for VariantKind {
    type Err = crate::CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| crate::CatalogError::UnknownVariant(s.to_string()))
    }
}

/// Catalog entry for one variant
#[derive(Debug, Clone)]
pub struct VariantDescriptor {
    pub kind: VariantKind,
    pub display_name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Total default-config factory
    pub default_config: fn() -> ConfigMap,
    /// Editable fields, in panel order
    pub fields: &'static [FieldSchema],
}

impl VariantDescriptor {
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}
