//! # Pagekit Common
//!
//! Leaf building blocks shared by every pagekit crate:
//!
//! - [`path`]: generic get/set over an untyped widget configuration
//! - [`cta`]: call-to-action normalization and resolution
//! - [`id_generator`]: fresh identifiers for widgets and list items
//!
//! Everything in this crate is total: malformed configuration never
//! produces a panic or an error from `get`, `set` or `resolve_cta`.

pub mod cta;
pub mod error;
pub mod id_generator;
pub mod path;
pub mod result;

pub use cta::{resolve_cta, CtaTarget, LinkTarget, ResolvedCta, ANCHOR_PREFIX};
pub use error::*;
pub use id_generator::IdGenerator;
pub use path::{ConfigPath, PathSegment};
pub use result::*;

/// Untyped widget configuration (field name → JSON value)
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;
