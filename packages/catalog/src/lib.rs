//! # Pagekit Catalog
//!
//! The closed set of widget variants a page can be composed from.
//!
//! Each variant has a [`VariantDescriptor`]: tag, display name, palette
//! category, a total default-config factory and a field schema for the
//! editing panels. [`VariantConfig`] is the typed view renderers read.
//!
//! ## Usage
//!
//! ```rust
//! use pagekit_catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let defaults = catalog.default_config("countdown-timer").unwrap();
//! assert_eq!(defaults["timer"], 15);
//! ```

mod descriptor;
mod registry;
pub mod schema;
pub mod variants;

pub use descriptor::{Category, VariantDescriptor, VariantKind};
pub use registry::{Catalog, CatalogError, CatalogResult};
pub use schema::{FieldKind, FieldSchema};
pub use variants::VariantConfig;
