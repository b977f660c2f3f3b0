use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder};
use serde_json::Value;

use crate::errors::ScrapeError;

/// Endpoints tried when the configured WebDriver URL is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Connect to the WebDriver instance, falling back to the common local
/// endpoints when the configured one refuses a session
pub async fn connect(webdriver_url: &str) -> Result<Client, ScrapeError> {
    let mut last_error = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue; // Skip if it's the same as the one we already tried
        }

        ::log::info!("trying fallback WebDriver URL: {}", url);
        match ClientBuilder::native().connect(url).await {
            Ok(client) => {
                ::log::debug!("connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
            Err(e) => {
                // Don't log errors for fallbacks to avoid log spam
                last_error = e;
            }
        }
    }

    ::log::error!("failed to connect to any WebDriver server");
    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(ScrapeError::Connect(last_error))
}

/// Close the session, logging rather than propagating a failed teardown
pub async fn close(client: Client) {
    if let Err(e) = client.close().await {
        ::log::warn!("failed to close browser session: {}", e);
    } else {
        ::log::info!("browser session closed");
    }
}

/// Run a page script against one element (`arguments[0]`).
/// Errors are stringified: callers treat them as best-effort signals.
pub async fn execute_on_element(
    client: &Client,
    script: &str,
    element: &Element,
) -> Result<Value, String> {
    let arg = serde_json::to_value(element).map_err(|e| e.to_string())?;
    client
        .execute(script, vec![arg])
        .await
        .map_err(|e| e.to_string())
}
