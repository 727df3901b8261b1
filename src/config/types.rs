use serde::Deserialize;

/// Main configuration structure for Folio
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Which part of the catalog to harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root address of the catalog site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Listing category number (the `55` in `/l55/3/`)
    pub category: u32,

    /// First listing page to visit (1-based)
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Last listing page to visit, inclusive. `None` walks until the catalog
    /// signals that no more pages exist.
    #[serde(rename = "end-page")]
    pub end_page: Option<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tululu.org".to_string(),
            category: 55,
            start_page: 1,
            end_page: None,
        }
    }
}

/// User agent identification and request limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Folio".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            timeout_secs: 30,
        }
    }
}

/// Where harvested data lands on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON dataset file
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,

    /// Folder for downloaded cover images
    #[serde(rename = "image-folder")]
    pub image_folder: String,

    /// Folder for downloaded book texts
    #[serde(rename = "text-folder")]
    pub text_folder: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: "book_list.json".to_string(),
            image_folder: "images".to_string(),
            text_folder: "books".to_string(),
        }
    }
}

/// Static site rendering options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page template; the built-in layout is used when the file is missing
    #[serde(rename = "template-path")]
    pub template_path: String,

    /// Folder the rendered pages are written to
    #[serde(rename = "static-folder")]
    pub static_folder: String,

    /// Number of books per rendered page
    #[serde(rename = "page-size")]
    pub page_size: usize,

    /// File name prefix of rendered pages (`index` gives `index1.html`, ...)
    #[serde(rename = "page-prefix")]
    pub page_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template_path: "template.html".to_string(),
            static_folder: "static".to_string(),
            page_size: 10,
            page_prefix: "index".to_string(),
        }
    }
}
