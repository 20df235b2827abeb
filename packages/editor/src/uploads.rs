//! Bulk image uploads into a sub-list.
//!
//! Uploads run concurrently; each finished image becomes a new list item as
//! soon as it completes. A failed upload is logged and counted, never
//! aborting the rest of the batch.

use async_trait::async_trait;
use pagekit_catalog::schema::{resolve_field, FieldKind, FieldSchema};
use pagekit_common::ConfigPath;
use serde_json::{Map, Value};
use thiserror::Error;

/// One file to upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Upload of {file_name} rejected: {reason}")]
    Rejected { file_name: String, reason: String },

    #[error("Upload transport failed: {0}")]
    Transport(String),
}

/// Asset storage the editor uploads into
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Store the file and return its public URL
    async fn upload(&self, request: UploadRequest) -> Result<String, UploadError>;
}

/// Result of a bulk upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// URLs appended to the list, in completion order
    pub added: Vec<String>,
    pub failed: usize,
}

impl UploadReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Build the list item for an uploaded image.
///
/// Uses the list's item template and writes the URL into its first image
/// field; plain string lists get the URL itself.
pub(crate) fn uploaded_item(fields: &[FieldSchema], list_path: &ConfigPath, url: &str) -> Value {
    match resolve_field(fields, list_path).map(|f| f.kind) {
        Some(FieldKind::List {
            item_fields, template, ..
        }) => {
            let mut item = match template() {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            let image_key = item_fields
                .iter()
                .find(|f| matches!(f.kind, FieldKind::Image))
                .map(|f| f.name)
                .unwrap_or("url");
            item.insert(image_key.to_string(), Value::from(url));
            Value::Object(item)
        }
        Some(FieldKind::StringList) => Value::from(url),
        _ => {
            let mut item = Map::new();
            item.insert("url".to_string(), Value::from(url));
            Value::Object(item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_catalog::Catalog;
    use serde_json::json;

    #[test]
    fn test_gallery_item_gets_url() {
        let catalog = Catalog::builtin();
        let gallery = catalog.describe("gallery").unwrap();
        let path = ConfigPath::parse("images").unwrap();

        let item = uploaded_item(gallery.fields, &path, "https://cdn/x.png");
        assert_eq!(item["url"], json!("https://cdn/x.png"));
        assert_eq!(item["alt"], json!(""));
    }

    #[test]
    fn test_review_item_uses_image_field() {
        let catalog = Catalog::builtin();
        let reviews = catalog.describe("reviews").unwrap();
        let path = ConfigPath::parse("reviews").unwrap();

        let item = uploaded_item(reviews.fields, &path, "face.png");
        assert_eq!(item["image"], json!("face.png"));
        assert_eq!(item["name"], json!("Reviewer"));
    }
}
