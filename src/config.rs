use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// URL of the page carrying the embedded inventory widget
    pub start_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Maximum number of result pages to visit (None scrapes everything
    /// up to the safety ceiling)
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Host the widget frame's source URL must contain
    #[serde(default = "default_frame_host")]
    pub frame_host: String,

    /// Marker the widget frame's source URL must contain
    #[serde(default = "default_frame_marker")]
    pub frame_marker: String,

    /// Contact address written into the flat output shape
    #[serde(default)]
    pub contact_email: String,

    /// Settle/scroll timing knobs
    #[serde(default)]
    pub wait: WaitProfile,
}

impl ScraperConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            webdriver_url: default_webdriver_url(),
            max_pages: None,
            frame_host: default_frame_host(),
            frame_marker: default_frame_marker(),
            contact_email: String::new(),
            wait: WaitProfile::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Timing profile for settling and traversing dynamically rendered pages.
/// The defaults are deliberately generous: the widget renders client-side
/// with no observable completion signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitProfile {
    /// Budget for the structural (document body) wait, seconds
    #[serde(default = "default_body_timeout_secs")]
    pub body_timeout_secs: u64,

    /// Polling interval for bounded waits, milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Fixed delay after structural presence, seconds
    #[serde(default = "default_render_delay_secs")]
    pub render_delay_secs: u64,

    /// Bound for one loading indicator to disappear, seconds
    #[serde(default = "default_indicator_timeout_secs")]
    pub indicator_timeout_secs: u64,

    /// Pause after each scroll-to-bottom, seconds
    #[serde(default = "default_scroll_pause_secs")]
    pub scroll_pause_secs: u64,

    /// Ceiling on grow-scroll attempts
    #[serde(default = "default_max_scroll_attempts")]
    pub max_scroll_attempts: u32,

    /// Number of steps in the deterministic scroll pass
    #[serde(default = "default_scroll_steps")]
    pub scroll_steps: u32,

    /// Pause at each step of the deterministic scroll pass, seconds
    #[serde(default = "default_step_pause_secs")]
    pub step_pause_secs: u64,

    /// Delay after initial navigation before the first settle, seconds
    #[serde(default = "default_initial_settle_secs")]
    pub initial_settle_secs: u64,

    /// Delay after entering the widget frame, seconds
    #[serde(default = "default_frame_settle_secs")]
    pub frame_settle_secs: u64,

    /// Delay after activating a pagination control, seconds
    #[serde(default = "default_advance_settle_secs")]
    pub advance_settle_secs: u64,

    /// Pause after scrolling a listing into view, milliseconds
    #[serde(default = "default_element_pause_ms")]
    pub element_pause_ms: u64,

    /// Courtesy delay between result pages, seconds
    #[serde(default = "default_page_delay_secs")]
    pub page_delay_secs: u64,
}

impl Default for WaitProfile {
    fn default() -> Self {
        Self {
            body_timeout_secs: default_body_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            render_delay_secs: default_render_delay_secs(),
            indicator_timeout_secs: default_indicator_timeout_secs(),
            scroll_pause_secs: default_scroll_pause_secs(),
            max_scroll_attempts: default_max_scroll_attempts(),
            scroll_steps: default_scroll_steps(),
            step_pause_secs: default_step_pause_secs(),
            initial_settle_secs: default_initial_settle_secs(),
            frame_settle_secs: default_frame_settle_secs(),
            advance_settle_secs: default_advance_settle_secs(),
            element_pause_ms: default_element_pause_ms(),
            page_delay_secs: default_page_delay_secs(),
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default host of the embedded inventory widget
fn default_frame_host() -> String {
    "buildout.com".to_string()
}

/// Default marker in the widget frame source URL
fn default_frame_marker() -> String {
    "inventory".to_string()
}

fn default_body_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_render_delay_secs() -> u64 {
    10
}

fn default_indicator_timeout_secs() -> u64 {
    30
}

fn default_scroll_pause_secs() -> u64 {
    2
}

fn default_max_scroll_attempts() -> u32 {
    10
}

fn default_scroll_steps() -> u32 {
    5
}

fn default_step_pause_secs() -> u64 {
    1
}

fn default_initial_settle_secs() -> u64 {
    5
}

fn default_frame_settle_secs() -> u64 {
    3
}

fn default_advance_settle_secs() -> u64 {
    3
}

fn default_element_pause_ms() -> u64 {
    500
}

fn default_page_delay_secs() -> u64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::new("https://example.com/properties/");

        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.frame_host, "buildout.com");
        assert_eq!(config.frame_marker, "inventory");
        assert_eq!(config.max_pages, None);
        assert_eq!(config.wait.render_delay_secs, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ScraperConfig = serde_json::from_str(
            r#"{ "start_url": "https://example.com/", "max_pages": 3, "wait": { "render_delay_secs": 1 } }"#,
        )
        .unwrap();

        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.wait.render_delay_secs, 1);
        assert_eq!(config.wait.body_timeout_secs, 30);
        assert_eq!(config.frame_host, "buildout.com");
    }
}
