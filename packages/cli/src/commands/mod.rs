pub mod catalog;
pub mod edit;
pub mod init;
pub mod pages;
pub mod project;
pub mod render;
pub mod upload;

pub use catalog::{catalog, CatalogArgs};
pub use edit::{
    cta, duplicate, edit_list, insert, move_widget, remove, reorder, set, toggle, CtaArgs,
    EditListArgs, InsertArgs, MoveArgs, ReorderArgs, SetArgs, WidgetArgs,
};
pub use init::{init, InitArgs};
pub use pages::{list, new_page, ListArgs, NewArgs};
pub use render::{render, RenderArgs};
pub use upload::{upload, UploadArgs};
