use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How the appearance image gallery is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryMode {
    /// Every appearance entry that carries an image link
    All,
    /// Only the last non-empty image link seen
    LastOnly,
}

/// Optional behaviour of the search page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Offer the "has image" checkbox and send `has_image` with each request
    #[serde(default = "default_true")]
    pub image_filter: bool,

    /// Render the package insert / box image links section
    #[serde(default = "default_true")]
    pub introductions: bool,

    /// Image gallery behaviour
    #[serde(default = "default_gallery")]
    pub gallery: GalleryMode,
}

impl Features {
    /// Image filter, document links and a full gallery
    pub fn full() -> Self {
        Self {
            image_filter: true,
            introductions: true,
            gallery: GalleryMode::All,
        }
    }

    /// The reduced page: no filter, no document links, a single image
    pub fn basic() -> Self {
        Self {
            image_filter: false,
            introductions: false,
            gallery: GalleryMode::LastOnly,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::full()
    }
}

/// Configuration for the search client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the search endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Enabled page features
    #[serde(default)]
    pub features: Features,

    /// Maximum number of cached result pages (unbounded when absent)
    #[serde(default)]
    pub cache_capacity: Option<usize>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Page holding the search elements, used in WebDriver mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(&default_endpoint())
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            features: Features::default(),
            cache_capacity: None,
            webdriver_url: default_webdriver_url(),
            page_url: None,
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply `SEARCH_ENDPOINT` and `WEBDRIVER_URL` overrides from the environment
    pub fn apply_env(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("SEARCH_ENDPOINT") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_gallery() -> GalleryMode {
    GalleryMode::All
}

/// Default value for endpoint
fn default_endpoint() -> String {
    "http://localhost:5000/search".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}
