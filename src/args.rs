use clap::Parser;
use drug_search::{ClientConfig, Features};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drug-search")]
#[command(about = "Interactive client for the drug registry search service")]
#[command(version)]
pub struct Args {
    /// Query to run right away
    pub query: Option<String>,

    /// Search endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Basic page: no image filter, no document links, single image
    #[arg(long)]
    pub basic: bool,

    /// Maximum number of cached result pages (unbounded if omitted)
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Mirror the page into a browser through this WebDriver server
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Page to open in WebDriver mode instead of the built-in one
    #[arg(long, requires = "webdriver")]
    pub page_url: Option<String>,
}

impl Args {
    /// Resolve the effective configuration: file, then environment, then flags
    pub fn client_config(&self) -> Result<ClientConfig, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.apply_env();

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.basic {
            config.features = Features::basic();
        }
        if self.cache_capacity.is_some() {
            config.cache_capacity = self.cache_capacity;
        }
        if let Some(webdriver) = &self.webdriver {
            config.webdriver_url = webdriver.clone();
        }
        if let Some(page_url) = &self.page_url {
            config.page_url = Some(page_url.clone());
        }
        Ok(config)
    }
}
