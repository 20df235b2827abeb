//! # Pagekit Renderer
//!
//! Turns a page's widgets into a virtual DOM and HTML.
//!
//! ```text
//! BlockInstance[] ──Renderer::render_page──▶ RenderedPage { nodes, diagnostics }
//!                                                 │
//!                                      to_html / to_html_document
//!                                                 ▼
//!                                               HTML
//! ```
//!
//! Every rendered widget is wrapped in a `<section id="widget-{id}">`, the
//! anchor that in-page CTA links resolve to.
//!
//! ## Usage
//!
//! ```rust
//! use pagekit_catalog::Catalog;
//! use pagekit_editor::BlockInstance;
//! use pagekit_renderer::{to_html, HtmlOptions, PageContext, Renderer};
//!
//! let catalog = Catalog::builtin();
//! let spacer = BlockInstance::new("s1", "spacer", catalog.default_config("spacer").unwrap());
//!
//! let page = Renderer::new(&catalog).render_page(&[spacer], &PageContext::default());
//! let html = to_html(&page.nodes, &HtmlOptions::compact());
//! assert!(html.starts_with("<section"));
//! ```

mod context;
mod dispatcher;
mod html;
mod variants;
mod vdom;

pub use context::PageContext;
pub use dispatcher::{DiagnosticKind, RenderDiagnostic, RenderedPage, Renderer};
pub use html::{escape_html, to_html, to_html_document, HtmlOptions};
pub use vdom::VNode;
