use crate::config::WaitProfile;
use crate::selectors::Scope;
use fantoccini::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Loading spinners/overlays whose disappearance marks a view as rendered
const LOADING_INDICATORS: &[&str] = &[
    ".loading",
    ".spinner",
    ".loader",
    "[class*='loading']",
    "[class*='spinner']",
    "[class*='loader']",
    ".overlay",
    ".modal-backdrop",
];

/// Brings a freshly navigated or freshly paginated view to a stable,
/// fully rendered state before extraction.
///
/// Settling never fails: every bounded wait degrades to "continue anyway"
/// with a logged warning, because the target site's dynamic content is
/// allowed to be incomplete.
pub struct LoadWaiter {
    profile: WaitProfile,
}

impl LoadWaiter {
    pub fn new(profile: WaitProfile) -> Self {
        Self { profile }
    }

    /// Block until the view is considered stable
    pub async fn settle(&self, client: &Client) {
        self.wait_for_body(client).await;

        ::log::info!(
            "waiting {}s for client-side rendering",
            self.profile.render_delay_secs
        );
        sleep(Duration::from_secs(self.profile.render_delay_secs)).await;

        self.wait_for_indicators_to_clear(client).await;
        self.scroll_to_load(client).await;

        // scrolling can trigger a fresh round of loading indicators
        self.wait_for_indicators_to_clear(client).await;
    }

    /// Bounded wait for the minimal structural marker to exist
    async fn wait_for_body(&self, client: &Client) {
        let deadline = Instant::now() + Duration::from_secs(self.profile.body_timeout_secs);

        loop {
            match client.query("body").await {
                Ok(nodes) if !nodes.is_empty() => return,
                Ok(_) => {}
                Err(e) => ::log::debug!("structural probe failed: {}", e),
            }

            if Instant::now() >= deadline {
                ::log::warn!("page load timeout - continuing anyway");
                return;
            }
            sleep(Duration::from_millis(self.profile.poll_interval_ms)).await;
        }
    }

    /// Poll for the disappearance of every known loading indicator.
    /// A still-present indicator after its bound is logged, not fatal.
    async fn wait_for_indicators_to_clear(&self, client: &Client) {
        for &selector in LOADING_INDICATORS {
            let present = match client.query(selector).await {
                Ok(nodes) => !nodes.is_empty(),
                Err(e) => {
                    ::log::debug!("indicator probe '{}' failed: {}", selector, e);
                    continue;
                }
            };
            if !present {
                continue;
            }

            ::log::info!("waiting for loading indicator to disappear: {}", selector);
            let deadline =
                Instant::now() + Duration::from_secs(self.profile.indicator_timeout_secs);

            loop {
                sleep(Duration::from_millis(self.profile.poll_interval_ms)).await;

                match client.query(selector).await {
                    Ok(nodes) if nodes.is_empty() => {
                        ::log::info!("loading completed");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        ::log::debug!("indicator probe '{}' failed: {}", selector, e);
                        break;
                    }
                }

                if Instant::now() >= deadline {
                    ::log::warn!(
                        "timeout waiting for loading indicator to disappear: {}",
                        selector
                    );
                    break;
                }
            }
        }
    }

    /// Trigger lazy loading by scrolling: grow the page until its height
    /// stops changing, run a deterministic step-wise pass, then return to
    /// the top so extraction starts from a known viewport state.
    async fn scroll_to_load(&self, client: &Client) {
        let Some(mut last_height) = self.scroll_height(client).await else {
            ::log::debug!("could not read scroll height - skipping scroll pass");
            return;
        };
        ::log::debug!("initial page height: {}px", last_height);

        for attempt in 0..self.profile.max_scroll_attempts {
            if self
                .run_script(client, "window.scrollTo(0, document.body.scrollHeight);")
                .await
                .is_none()
            {
                return;
            }
            ::log::debug!("scrolled to bottom (attempt {})", attempt + 1);
            sleep(Duration::from_secs(self.profile.scroll_pause_secs)).await;

            let Some(new_height) = self.scroll_height(client).await else {
                break;
            };
            if new_height == last_height {
                ::log::debug!("no new content loaded, scrolling complete");
                break;
            }
            last_height = new_height;
        }

        self.run_script(client, "window.scrollTo(0, 0);").await;
        sleep(Duration::from_secs(self.profile.step_pause_secs)).await;

        // step-wise pass to force any viewport-triggered rendering
        if let Some(height) = self.scroll_height(client).await {
            let steps = self.profile.scroll_steps.max(1) as i64;
            let step_size = height / steps;
            if step_size > 0 {
                for i in 1..=steps {
                    let script = format!("window.scrollTo(0, {});", step_size * i);
                    self.run_script(client, &script).await;
                    sleep(Duration::from_secs(self.profile.step_pause_secs)).await;
                }
            }
        }

        self.run_script(client, "window.scrollTo(0, 0);").await;
        sleep(Duration::from_secs(self.profile.step_pause_secs)).await;
    }

    async fn scroll_height(&self, client: &Client) -> Option<i64> {
        let value = self
            .run_script(client, "return document.body.scrollHeight;")
            .await?;
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            other => {
                ::log::debug!("unexpected scroll height value: {}", other);
                None
            }
        }
    }

    /// Run a page script, degrading failures to a debug log
    async fn run_script(&self, client: &Client, script: &str) -> Option<Value> {
        match client.execute(script, Vec::new()).await {
            Ok(value) => Some(value),
            Err(e) => {
                ::log::debug!("page script failed: {}", e);
                None
            }
        }
    }
}
