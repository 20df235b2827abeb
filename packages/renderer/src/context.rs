use serde::{Deserialize, Serialize};

/// Site-level information a widget may fall back to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageContext {
    pub site_name: String,

    /// Used by widgets whose own image is empty
    pub brand_image_url: Option<String>,

    /// Namespaces lead-capture forms
    pub site_id: String,
}

impl PageContext {
    pub fn new(site_name: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            brand_image_url: None,
            site_id: site_id.into(),
        }
    }

    pub fn with_brand_image(mut self, url: impl Into<String>) -> Self {
        self.brand_image_url = Some(url.into());
        self
    }

    /// `own` when non-empty, otherwise the brand image
    pub fn image_or_brand<'a>(&'a self, own: &'a str) -> Option<&'a str> {
        if !own.is_empty() {
            return Some(own);
        }
        self.brand_image_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_fallback() {
        let ctx = PageContext::new("Acme", "acme").with_brand_image("logo.png");
        assert_eq!(ctx.image_or_brand("me.jpg"), Some("me.jpg"));
        assert_eq!(ctx.image_or_brand(""), Some("logo.png"));
        assert_eq!(PageContext::default().image_or_brand(""), None);
    }
}
