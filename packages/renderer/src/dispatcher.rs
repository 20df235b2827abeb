//! # Rendering Dispatcher
//!
//! Maps an enabled widget to its rendered node by variant tag.
//!
//! Rendering is total: a disabled widget renders nothing, an unknown tag
//! renders nothing and is reported, and every config decodes (absent or
//! malformed fields take their defaults). One bad widget never stops the
//! rest of the page.

use crate::context::PageContext;
use crate::variants::render_variant;
use crate::vdom::VNode;
use pagekit_catalog::{Catalog, VariantConfig};
use pagekit_common::{ConfigMap, CtaTarget};
use pagekit_editor::BlockInstance;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The widget's type tag is not in the catalog
    UnknownVariant,
    /// A CTA anchors to a widget that is not on the rendered page
    DanglingAnchor,
}

/// Recoverable condition found while rendering a page
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDiagnostic {
    pub kind: DiagnosticKind,
    pub block_id: String,
    pub message: String,
}

impl RenderDiagnostic {
    fn unknown_variant(block: &BlockInstance) -> Self {
        Self {
            kind: DiagnosticKind::UnknownVariant,
            block_id: block.id.clone(),
            message: format!("Unknown widget type {:?}; skipped", block.block_type()),
        }
    }

    fn dangling_anchor(block: &BlockInstance, target: &str) -> Self {
        Self {
            kind: DiagnosticKind::DanglingAnchor,
            block_id: block.id.clone(),
            message: format!("Button anchors to missing widget {:?}", target),
        }
    }
}

/// Output of rendering a whole page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub nodes: Vec<VNode>,
    pub diagnostics: Vec<RenderDiagnostic>,
}

pub struct Renderer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Renderer<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Render one widget. `None` for disabled widgets and unknown types.
    pub fn render(&self, block: &BlockInstance, ctx: &PageContext) -> Option<VNode> {
        self.dispatch(block, ctx).ok().flatten()
    }

    fn dispatch(&self, block: &BlockInstance, ctx: &PageContext) -> Result<Option<VNode>, RenderDiagnostic> {
        if !block.enabled {
            return Ok(None);
        }

        let descriptor = match self.catalog.describe(block.block_type()) {
            Ok(descriptor) => descriptor,
            Err(_) => {
                warn!(id = %block.id, block_type = %block.block_type(), "Skipping widget of unknown type");
                return Err(RenderDiagnostic::unknown_variant(block));
            }
        };

        let config = VariantConfig::decode(descriptor.kind, &block.config);
        let tag = descriptor.tag();

        let section = VNode::element("section")
            .with_attr("id", block.anchor_id())
            .with_attr("class", format!("widget widget-{}", tag))
            .with_attr("data-widget-type", tag)
            .with_children(render_variant(&config, ctx, &block.id));

        Ok(Some(section))
    }

    /// Render every widget in position order
    pub fn render_page(&self, blocks: &[BlockInstance], ctx: &PageContext) -> RenderedPage {
        let mut ordered: Vec<&BlockInstance> = blocks.iter().collect();
        ordered.sort_by_key(|block| block.position);

        let mut page = RenderedPage::default();
        let mut rendered_ids = HashSet::new();

        for block in &ordered {
            match self.dispatch(block, ctx) {
                Ok(Some(node)) => {
                    rendered_ids.insert(block.id.as_str());
                    page.nodes.push(node);
                }
                Ok(None) => {}
                Err(diagnostic) => page.diagnostics.push(diagnostic),
            }
        }

        for block in ordered.iter().filter(|b| rendered_ids.contains(b.id.as_str())) {
            for target in anchor_targets(&block.config) {
                let anchor = CtaTarget::Anchor {
                    widget_id: target.clone(),
                };
                if anchor.is_dangling(|id| rendered_ids.contains(id)) {
                    warn!(id = %block.id, target = %target, "CTA anchors to a widget that is not rendered");
                    page.diagnostics.push(RenderDiagnostic::dangling_anchor(block, &target));
                }
            }
        }

        info!(
            widgets = page.nodes.len(),
            diagnostics = page.diagnostics.len(),
            "Rendered page"
        );
        page
    }
}

/// Anchor targets of the widget's own CTA and of CTAs on its list items
fn anchor_targets(config: &ConfigMap) -> Vec<String> {
    let mut groups: Vec<&ConfigMap> = vec![config];
    for value in config.values() {
        if let Value::Array(items) = value {
            groups.extend(items.iter().filter_map(Value::as_object));
        }
    }

    groups
        .into_iter()
        .filter(|group| group.contains_key("ctaType"))
        .filter_map(|group| match CtaTarget::normalize(group) {
            CtaTarget::Anchor { widget_id } => Some(widget_id),
            CtaTarget::External { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(id: &str, tag: &str, config: serde_json::Value) -> BlockInstance {
        let config = match config {
            Value::Object(map) => map,
            _ => ConfigMap::new(),
        };
        BlockInstance::new(id, tag, config)
    }

    #[test]
    fn test_section_wrapper() {
        let catalog = Catalog::builtin();
        let renderer = Renderer::new(&catalog);

        let node = renderer
            .render(&block("abc", "spacer", json!({})), &PageContext::default())
            .unwrap();

        assert_eq!(node.tag(), Some("section"));
        assert_eq!(node.attr("id"), Some("widget-abc"));
        assert_eq!(node.attr("class"), Some("widget widget-spacer"));
        assert_eq!(node.attr("data-widget-type"), Some("spacer"));
    }

    #[test]
    fn test_disabled_renders_nothing() {
        let catalog = Catalog::builtin();
        let renderer = Renderer::new(&catalog);

        let mut hero = block("h", "hero", json!({}));
        hero.enabled = false;
        assert!(renderer.render(&hero, &PageContext::default()).is_none());
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let catalog = Catalog::builtin();
        let renderer = Renderer::new(&catalog);
        assert!(renderer
            .render(&block("x", "marquee", json!({})), &PageContext::default())
            .is_none());
    }

    #[test]
    fn test_anchor_targets_include_list_items() {
        let config = json!({
            "ctaType": "external",
            "tiers": [
                { "ctaType": "anchor", "anchorWidgetId": "form" },
                { "name": "no cta" }
            ]
        });
        assert_eq!(anchor_targets(config.as_object().unwrap()), vec!["form".to_string()]);
    }
}
