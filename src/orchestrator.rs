use crate::config::ScraperConfig;
use crate::errors::ScrapeError;
use crate::extract;
use crate::pagination::{Advance, PaginationController, page_ceiling};
use crate::records::{PropertyRecord, ScrapeResult};
use crate::selectors::{self, Scope};
use crate::session;
use crate::waiter::LoadWaiter;
use chrono::Local;
use fantoccini::Client;
use std::time::Duration;
use tokio::time::sleep;

/// Candidate listing containers, most specific first
const LISTING_CONTAINER_SELECTORS: &[&str] = &[
    ".grid-item",
    ".property-item",
    ".listing-item",
    ".property-card",
    "div[class*='property']",
    "div[class*='listing']",
    "a[href*='property']",
    ".col-md-6",
    ".property",
    ".listing",
];

/// Run a full scrape: navigate, enter the inventory widget, walk every
/// reachable result page, and assemble the accumulated records.
///
/// The browser session is released on every exit path, including the
/// missing-frame precondition failure.
pub async fn run(config: &ScraperConfig) -> Result<ScrapeResult, ScrapeError> {
    let client = session::connect(&config.webdriver_url).await?;

    let outcome = drive(&client, config).await;
    session::close(client).await;

    outcome
}

/// Everything between session setup and teardown
async fn drive(client: &Client, config: &ScraperConfig) -> Result<ScrapeResult, ScrapeError> {
    ::log::info!("starting scrape from: {}", config.start_url);
    client.goto(&config.start_url).await?;

    ::log::info!("allowing the page to initialize");
    sleep(Duration::from_secs(config.wait.initial_settle_secs)).await;

    let waiter = LoadWaiter::new(config.wait.clone());
    waiter.settle(client).await;

    let frame = enter_widget_frame(client, config).await?;
    sleep(Duration::from_secs(config.wait.frame_settle_secs)).await;

    let paginator = PaginationController::new(&config.wait);
    let totals = paginator.totals_estimate(&frame).await;
    let ceiling = page_ceiling(config.max_pages, totals.total_pages);
    ::log::info!("visiting at most {} page(s)", ceiling);

    let mut records: Vec<PropertyRecord> = Vec::new();
    let mut visited = 0;

    while visited < ceiling {
        visited += 1;
        waiter.settle(&frame).await;

        if ::log::log_enabled!(::log::Level::Debug) {
            log_page_structure(&frame).await;
        }

        let listings = match selectors::resolve(&frame, LISTING_CONTAINER_SELECTORS).await {
            Ok(resolution) => resolution,
            Err(e) => {
                ::log::warn!("listing lookup failed: {}", e);
                break;
            }
        };
        if listings.is_empty() {
            // not an error: the page is simply exhausted
            ::log::warn!("no listing containers found on page visit {}", visited);
            break;
        }

        let current_page = paginator.current_page(&frame).await;
        ::log::info!(
            "found {} listings on page {} using selector '{}'",
            listings.nodes.len(),
            current_page,
            listings.selector.unwrap_or("")
        );

        for (index, node) in listings.nodes.iter().enumerate() {
            ::log::info!("extracting listing {}/{}", index + 1, listings.nodes.len());

            // best-effort: an unscrollable listing is still extracted
            if let Err(e) = session::execute_on_element(
                &frame,
                "arguments[0].scrollIntoView({block: 'center'});",
                node,
            )
            .await
            {
                ::log::debug!("could not scroll listing into view: {}", e);
            }
            sleep(Duration::from_millis(config.wait.element_pause_ms)).await;

            let mut record = extract::extract(node).await;
            record.page_number = current_page;
            record.scraped_at = Local::now();
            records.push(record);
        }
        ::log::info!("total listings scraped so far: {}", records.len());

        if visited >= ceiling {
            break;
        }
        match paginator.advance(&frame, &waiter).await {
            Advance::Advanced(_) => {
                sleep(Duration::from_secs(config.wait.page_delay_secs)).await;
            }
            Advance::NoFurtherPages | Advance::Stalled => break,
        }
    }

    if let Err(e) = frame.clone().enter_parent_frame().await {
        ::log::debug!("could not leave the widget frame: {}", e);
    }

    ::log::info!("scrape finished with {} records", records.len());
    Ok(ScrapeResult::new(records))
}

/// Locate and enter the embedded inventory widget. The sole hard
/// precondition of a run: without the frame there is no data source.
async fn enter_widget_frame(
    client: &Client,
    config: &ScraperConfig,
) -> Result<Client, ScrapeError> {
    ::log::info!("looking for the embedded inventory frame");

    for frame in client.query("iframe").await? {
        let src = match frame.attr("src").await {
            Ok(src) => src.unwrap_or_default(),
            Err(e) => {
                ::log::debug!("skipping unreadable frame: {}", e);
                continue;
            }
        };

        if src.contains(&config.frame_host) && src.contains(&config.frame_marker) {
            ::log::info!("entering inventory frame: {}", src);
            frame.enter_frame().await?;
            return Ok(client.clone());
        }
    }

    Err(ScrapeError::FrameNotFound {
        host: config.frame_host.clone(),
    })
}

/// Debug probe: log how many nodes each candidate container selector
/// currently matches, to ease selector upkeep when the markup shifts
async fn log_page_structure(scope: &Client) {
    for &selector in LISTING_CONTAINER_SELECTORS {
        match scope.query(selector).await {
            Ok(nodes) if !nodes.is_empty() => {
                ::log::debug!("{} node(s) match '{}'", nodes.len(), selector);
            }
            Ok(_) => {}
            Err(e) => ::log::debug!("probe '{}' failed: {}", selector, e),
        }
    }
}
