use crate::config::WaitProfile;
use crate::records::PaginationInfo;
use crate::selectors;
use crate::session;
use crate::waiter::LoadWaiter;
use fantoccini::Client;
use fantoccini::elements::Element;
use regex::Regex;
use std::time::Duration;
use tokio::time::sleep;

/// Hard upper bound on pages visited in one run, independent of anything
/// the site reports about itself
pub const PAGE_SAFETY_CEILING: u32 = 20;

/// The control marking the page currently shown
const ACTIVE_PAGE_SELECTORS: &[&str] = &[".js-paginate-btn.active"];

/// Candidate pagination controls
const PAGINATION_BUTTON_SELECTORS: &[&str] = &[
    ".js-paginate-btn",
    ".page-link",
    ".pagination a",
    ".pager a",
    "[class*='page']",
];

/// Candidate results-range summaries
const RANGE_SELECTORS: &[&str] = &[
    ".js-pagination-container",
    ".pagination-info",
    ".results-info",
    "[class*='pagination']",
    "[class*='results']",
];

/// Candidate total-results summaries
const TOTAL_SELECTORS: &[&str] = &[
    ".js-total-container",
    ".total-results",
    ".results-total",
    "[class*='total']",
];

/// Outcome of one attempt to move to the next result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The active-page indicator moved forward to this page
    Advanced(u32),

    /// No control for the next page exists; the catalog is exhausted
    NoFurtherPages,

    /// The control was activated but the indicator did not move forward.
    /// Terminal for the run: repeated clicking on a stuck control does
    /// not converge.
    Stalled,
}

/// Walks the catalog's own pagination control.
///
/// The page counter is always read back from the DOM rather than tracked
/// locally, so it self-corrects when an activation silently fails.
pub struct PaginationController {
    advance_settle: Duration,
}

impl PaginationController {
    pub fn new(profile: &WaitProfile) -> Self {
        Self {
            advance_settle: Duration::from_secs(profile.advance_settle_secs),
        }
    }

    /// Read the active-page indicator; defaults to 1 whenever it cannot
    /// be found or parsed
    pub async fn current_page(&self, client: &Client) -> u32 {
        match selectors::resolve_first(client, ACTIVE_PAGE_SELECTORS).await {
            Ok(Some(active)) => match active.text().await {
                Ok(text) => parse_page_label(&text).unwrap_or(1),
                Err(e) => {
                    ::log::debug!("could not read the active page label: {}", e);
                    1
                }
            },
            Ok(None) => 1,
            Err(e) => {
                ::log::debug!("could not locate the active page control: {}", e);
                1
            }
        }
    }

    /// Activate the control for the next page and verify the move took
    pub async fn advance(&self, client: &Client, waiter: &LoadWaiter) -> Advance {
        let current = self.current_page(client).await;
        let target = current + 1;

        let button = match self.find_page_button(client, target).await {
            Ok(button) => button,
            Err(e) => {
                ::log::warn!("pagination lookup failed: {}", e);
                return Advance::NoFurtherPages;
            }
        };
        let Some(button) = button else {
            ::log::info!("no control for page {} - reached the last page", target);
            return Advance::NoFurtherPages;
        };

        ::log::info!("navigating from page {} to page {}", current, target);
        if let Err(e) = session::execute_on_element(client, "arguments[0].click();", &button).await
        {
            ::log::warn!("could not activate the page {} control: {}", target, e);
            return Advance::Stalled;
        }

        sleep(self.advance_settle).await;
        waiter.settle(client).await;

        let landed = self.current_page(client).await;
        if landed > current {
            ::log::info!("successfully navigated to page {}", landed);
            Advance::Advanced(landed)
        } else {
            ::log::warn!("page indicator did not advance after activation");
            Advance::Stalled
        }
    }

    /// Best-effort read of the results summary. Every sub-read defaults
    /// independently; nothing here can fail a run.
    pub async fn totals_estimate(&self, client: &Client) -> PaginationInfo {
        let mut info = PaginationInfo::default();

        match selectors::resolve_first(client, RANGE_SELECTORS).await {
            Ok(Some(range)) => {
                if let Ok(text) = range.text().await {
                    info.current_range = text.trim().to_string();
                    ::log::info!("results range: {}", info.current_range);
                }
            }
            Ok(None) => {}
            Err(e) => ::log::debug!("results-range read failed: {}", e),
        }

        match selectors::resolve_first(client, TOTAL_SELECTORS).await {
            Ok(Some(total)) => {
                if let Ok(text) = total.text().await {
                    if let Some(count) = parse_total_listings(&text) {
                        info.total_listings = count;
                    }
                }
            }
            Ok(None) => {}
            Err(e) => ::log::debug!("total-results read failed: {}", e),
        }

        if let Some(max_page) = self.max_page_label(client).await {
            info.total_pages = max_page;
        }

        ::log::info!(
            "found {} total listings across {} pages",
            info.total_listings,
            info.total_pages
        );
        info
    }

    /// Highest numeric label visible in the pagination control
    async fn max_page_label(&self, client: &Client) -> Option<u32> {
        let resolution = match selectors::resolve(client, PAGINATION_BUTTON_SELECTORS).await {
            Ok(resolution) => resolution,
            Err(e) => {
                ::log::debug!("pagination-control read failed: {}", e);
                return None;
            }
        };

        let mut max_page = None;
        for button in &resolution.nodes {
            if let Ok(text) = button.text().await {
                if let Some(page) = parse_page_label(&text) {
                    max_page = Some(max_page.map_or(page, |m: u32| m.max(page)));
                }
            }
        }
        max_page
    }

    /// Locate the control whose label is exactly the requested page number
    async fn find_page_button(
        &self,
        client: &Client,
        page: u32,
    ) -> Result<Option<Element>, fantoccini::error::CmdError> {
        let resolution = selectors::resolve(client, PAGINATION_BUTTON_SELECTORS).await?;

        for button in resolution.nodes {
            let label = match button.text().await {
                Ok(text) => text,
                Err(e) => {
                    ::log::debug!("unreadable pagination control skipped: {}", e);
                    continue;
                }
            };
            if parse_page_label(&label) == Some(page) {
                return Ok(Some(button));
            }
        }
        Ok(None)
    }
}

/// Derive the page ceiling for a run: the requested cap when one was
/// given, else the discovered page count, but never past the safety
/// ceiling even when the discovery is wrong
pub fn page_ceiling(max_pages: Option<u32>, discovered_pages: u32) -> u32 {
    max_pages.unwrap_or(discovered_pages).min(PAGE_SAFETY_CEILING)
}

/// Parse a pagination-control label; "Next"/"..." style controls are None
fn parse_page_label(label: &str) -> Option<u32> {
    label.trim().parse().ok()
}

/// Pull the listing count out of the human-readable "1 - 10 out of 47
/// listings" phrase; anything unparseable is swallowed
fn parse_total_listings(text: &str) -> Option<u64> {
    let re = Regex::new(r"(?i)out of\s+([\d,]+)\s+listings").unwrap();
    let digits = re.captures(text)?.get(1)?.as_str().replace(',', "");
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label_parsing() {
        assert_eq!(parse_page_label(" 3 "), Some(3));
        assert_eq!(parse_page_label("12"), Some(12));
        assert_eq!(parse_page_label("Next"), None);
        assert_eq!(parse_page_label("»"), None);
        assert_eq!(parse_page_label(""), None);
    }

    #[test]
    fn test_total_listings_parsing() {
        assert_eq!(parse_total_listings("1 - 10 out of 47 listings"), Some(47));
        assert_eq!(parse_total_listings("Out Of 1,234 Listings"), Some(1234));
        assert_eq!(parse_total_listings("47 listings"), None);
        assert_eq!(parse_total_listings("out of many listings"), None);
        assert_eq!(parse_total_listings(""), None);
    }

    #[test]
    fn test_page_ceiling_prefers_the_explicit_cap() {
        assert_eq!(page_ceiling(Some(3), 8), 3);
        assert_eq!(page_ceiling(None, 8), 8);
    }

    #[test]
    fn test_page_ceiling_holds_against_misreported_totals() {
        assert_eq!(page_ceiling(None, 9999), PAGE_SAFETY_CEILING);
        assert_eq!(page_ceiling(Some(9999), 2), PAGE_SAFETY_CEILING);
    }
}
