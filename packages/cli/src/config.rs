use pagekit_renderer::{HtmlOptions, PageContext};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagekit.config.json";

/// Pagekit configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<page>.json` per page
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Directory uploaded images are copied into
    #[serde(default = "default_media_dir")]
    pub media_dir: String,

    #[serde(default)]
    pub site_name: String,

    /// Namespaces lead-capture forms
    #[serde(default = "default_site_id")]
    pub site_id: String,

    /// Fallback image for widgets without their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_image_url: Option<String>,

    #[serde(default = "default_true")]
    pub pretty_html: bool,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_media_dir() -> String {
    "media".to_string()
}

fn default_site_id() -> String {
    "site".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    pub fn get_media_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.media_dir)
    }

    pub fn page_context(&self) -> PageContext {
        PageContext {
            site_name: self.site_name.clone(),
            brand_image_url: self.brand_image_url.clone(),
            site_id: self.site_id.clone(),
        }
    }

    pub fn html_options(&self) -> HtmlOptions {
        if self.pretty_html {
            HtmlOptions::default()
        } else {
            HtmlOptions::compact()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            media_dir: default_media_dir(),
            site_name: String::new(),
            site_id: default_site_id(),
            brand_image_url: None,
            pretty_html: true,
            log_level: default_log_level(),
        }
    }
}
