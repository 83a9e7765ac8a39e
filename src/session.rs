use crate::backends::HttpBackend;
use crate::cache::ResultCache;
use crate::client::SearchClient;
use crate::config::{ClientConfig, Features};
use crate::document::{Document, MemoryDocument, WebDriverDocument};
use std::error::Error;
use std::path::Path;

/// Builder wiring configuration, backend and document into a [`SearchClient`]
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ClientConfig,
}

impl Session {
    /// Create a session builder for the given search endpoint
    pub fn new(endpoint: &str) -> Self {
        Self {
            config: ClientConfig::new(endpoint),
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, Box<dyn Error>> {
        let config = ClientConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Apply configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, Box<dyn Error>> {
        let config = ClientConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Override the search endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.config.endpoint = endpoint.to_string();
        self
    }

    /// Override the enabled features
    pub fn with_features(mut self, features: Features) -> Self {
        self.config.features = features;
        self
    }

    /// Bound the result cache; `None` keeps it unbounded
    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Use a WebDriver server at `url`
    pub fn with_webdriver(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Open this page instead of the built-in shell in WebDriver mode
    pub fn with_page_url(mut self, url: &str) -> Self {
        self.config.page_url = Some(url.to_string());
        self
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Self {
        self.config = self.config.apply_env();
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a client that renders into an in-memory page
    pub async fn connect_memory(
        self,
    ) -> Result<SearchClient<HttpBackend, MemoryDocument>, Box<dyn Error>> {
        self.connect_with(MemoryDocument::new()).await
    }

    /// Build a client that renders into a browser page over WebDriver
    pub async fn connect_webdriver(
        self,
    ) -> Result<SearchClient<HttpBackend, WebDriverDocument>, Box<dyn Error>> {
        let document = WebDriverDocument::connect(&self.config).await?;
        self.connect_with(document).await
    }

    /// Build a client around any document
    pub async fn connect_with<D: Document>(
        self,
        document: D,
    ) -> Result<SearchClient<HttpBackend, D>, Box<dyn Error>> {
        let backend = HttpBackend::new(&self.config.endpoint)?;
        let cache = ResultCache::new(self.config.cache_capacity);

        ::log::info!(
            "Search client for {} (features: {:?}, cache capacity: {:?})",
            self.config.endpoint,
            self.config.features,
            self.config.cache_capacity
        );

        let mut client = SearchClient::new(backend, document, self.config.features, cache);
        client.initialize().await?;
        Ok(client)
    }
}
