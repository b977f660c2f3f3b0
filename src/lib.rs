// Re-export modules
pub mod config;
pub mod errors;
pub mod extract;
pub mod orchestrator;
pub mod output;
pub mod pagination;
pub mod records;
pub mod selectors;
pub mod session;
pub mod waiter;

// Re-export commonly used types for convenience
pub use errors::ScrapeError;
pub use records::{PropertyRecord, ScrapeResult};

use crate::config::ScraperConfig;

/// Main builder for scraping the listings behind one catalog URL
pub struct Listings {
    config: ScraperConfig,
}

impl Listings {
    /// Create a new Listings builder for the given catalog URL
    pub fn new(start_url: &str) -> Self {
        Self {
            config: ScraperConfig::new(start_url),
        }
    }

    /// Cap the number of result pages visited
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = Some(max_pages);
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Set the contact address used by the flat output shape
    pub fn with_contact_email(mut self, contact_email: &str) -> Self {
        self.config.contact_email = contact_email.to_string();
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ScraperConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = serde_json::from_str(config_str)?;
        Ok(self.with_config(config))
    }

    /// Run the scrape and return the accumulated records
    pub async fn run(mut self) -> Result<ScrapeResult, ScrapeError> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        orchestrator::run(&self.config).await
    }
}
