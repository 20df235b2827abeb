//! # Call-to-action resolution
//!
//! Many widgets carry a button whose destination is stored loosely in their
//! config:
//!
//! ```text
//! { ctaType: "anchor" | "external", ctaUrl?, buttonUrl?, anchorWidgetId?, target? }
//! ```
//!
//! [`CtaTarget::normalize`] turns that shape into a discriminated union once,
//! at the boundary, and [`CtaTarget::resolve`] maps the union to an `href`
//! and a link target. [`resolve_cta`] chains the two.
//!
//! ## Precedence
//!
//! 1. `ctaType == "anchor"` with a non-empty `anchorWidgetId` scrolls to
//!    `#widget-{id}` and always stays in the same tab.
//! 2. Otherwise `ctaUrl`, then the legacy `buttonUrl`, then `"#"`.
//!    A string counts as present even when empty.

use crate::ConfigMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// DOM id prefix every rendered widget is exposed under
pub const ANCHOR_PREFIX: &str = "widget-";

/// Placeholder href when no destination is configured
pub const PLACEHOLDER_HREF: &str = "#";

/// Where a link opens
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum LinkTarget {
    #[default]
    SameTab,
    NewTab,
    /// Any other browsing context name
    Named(String),
}

impl LinkTarget {
    pub fn as_str(&self) -> &str {
        match self {
            LinkTarget::SameTab => "_self",
            LinkTarget::NewTab => "_blank",
            LinkTarget::Named(name) => name,
        }
    }

    /// Interpret a stored `target` value; unknown values are kept verbatim
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "_self" => LinkTarget::SameTab,
            "_blank" => LinkTarget::NewTab,
            other => LinkTarget::Named(other.to_string()),
        }
    }
}

impl From<String> for LinkTarget {
    fn from(raw: String) -> Self {
        LinkTarget::parse(&raw)
    }
}

impl From<LinkTarget> for String {
    fn from(target: LinkTarget) -> Self {
        target.as_str().to_string()
    }
}

/// Normalized call-to-action destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CtaTarget {
    /// Scroll to another widget on the same page
    Anchor {
        #[serde(rename = "widgetId")]
        widget_id: String,
    },

    /// Navigate elsewhere
    External { url: String, target: LinkTarget },
}

/// Output of CTA resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCta {
    pub href: String,
    pub target: LinkTarget,
}

impl CtaTarget {
    /// Read the loose config shape. Never fails.
    pub fn normalize(config: &ConfigMap) -> Self {
        let is_anchor = config.get("ctaType").and_then(Value::as_str) == Some("anchor");
        let anchor_id = config
            .get("anchorWidgetId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());

        if let (true, Some(widget_id)) = (is_anchor, anchor_id) {
            return CtaTarget::Anchor {
                widget_id: widget_id.to_string(),
            };
        }

        let url = string_field(config, "ctaUrl")
            .or_else(|| string_field(config, "buttonUrl"))
            .unwrap_or(PLACEHOLDER_HREF)
            .to_string();

        let target = string_field(config, "target")
            .map(LinkTarget::parse)
            .unwrap_or_default();

        CtaTarget::External { url, target }
    }

    pub fn resolve(&self) -> ResolvedCta {
        match self {
            CtaTarget::Anchor { widget_id } => ResolvedCta {
                href: format!("#{}{}", ANCHOR_PREFIX, widget_id),
                target: LinkTarget::SameTab,
            },
            CtaTarget::External { url, target } => ResolvedCta {
                href: url.clone(),
                target: target.clone(),
            },
        }
    }

    /// Anchor pointing at a widget id that `exists` does not know about
    pub fn is_dangling(&self, exists: impl Fn(&str) -> bool) -> bool {
        match self {
            CtaTarget::Anchor { widget_id } => !exists(widget_id),
            CtaTarget::External { .. } => false,
        }
    }

    /// Write the canonical loose shape back into a config.
    ///
    /// The legacy `buttonUrl` is dropped so it can never shadow the new value.
    pub fn write_into(&self, config: &mut ConfigMap) {
        config.remove("buttonUrl");
        match self {
            CtaTarget::Anchor { widget_id } => {
                config.insert("ctaType".into(), Value::from("anchor"));
                config.insert("anchorWidgetId".into(), Value::from(widget_id.as_str()));
                config.remove("target");
            }
            CtaTarget::External { url, target } => {
                config.insert("ctaType".into(), Value::from("external"));
                config.insert("ctaUrl".into(), Value::from(url.as_str()));
                config.insert("target".into(), Value::from(target.as_str()));
                config.remove("anchorWidgetId");
            }
        }
    }
}

fn string_field<'a>(config: &'a ConfigMap, key: &str) -> Option<&'a str> {
    config.get(key).and_then(Value::as_str)
}

/// Resolve a widget's CTA fields to a navigable destination
pub fn resolve_cta(config: &ConfigMap) -> ResolvedCta {
    CtaTarget::normalize(config).resolve()
}
