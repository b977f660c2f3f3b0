use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel used for text fields that could not be resolved
pub const UNKNOWN: &str = "Unknown";

/// One extracted listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Canonical link target for the listing (absent if no anchor resolved)
    pub url: Option<String>,

    /// Token parsed out of the url's propertyId query parameter
    pub property_id: Option<String>,

    /// Listing title/address ("Unknown" if no title-bearing node matched)
    pub title: String,

    /// Cover image source (absolute URLs only)
    pub image_url: Option<String>,

    /// Alt text of the cover image
    pub image_alt: Option<String>,

    /// Raw normalized text of the type banner ("Unknown" if absent)
    pub listing_type: String,

    /// Whether the listing is offered for lease
    pub for_lease: bool,

    /// Whether the listing is offered for sale
    pub for_sale: bool,

    /// Brochure/flyer link, when one resolved
    pub pdf_url: Option<String>,

    /// Street address ("Unknown" if the candidate text looked like a price)
    pub location: String,

    /// Auxiliary text fragments near the listing, in document order
    pub secondary_info: Vec<String>,

    /// Key/value pairs from the detail table, patched with heuristics
    pub details: HashMap<String, String>,

    /// Result page the listing was extracted from
    pub page_number: u32,

    /// When the listing was extracted
    pub scraped_at: DateTime<Local>,

    /// Set (never thrown) when extraction hit an unrecoverable condition;
    /// the other fields keep whatever values were reached
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extraction_error: Option<String>,
}

impl PropertyRecord {
    /// Create a record with every field at its typed default/sentinel
    pub fn new() -> Self {
        Self {
            url: None,
            property_id: None,
            title: UNKNOWN.to_string(),
            image_url: None,
            image_alt: None,
            listing_type: UNKNOWN.to_string(),
            for_lease: true,
            for_sale: false,
            pdf_url: None,
            location: UNKNOWN.to_string(),
            secondary_info: Vec::new(),
            details: HashMap::new(),
            page_number: 1,
            scraped_at: Local::now(),
            extraction_error: None,
        }
    }
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Results-summary state read from the rendered pagination control.
/// Transient: recomputed on each page visit, never tracked locally.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationInfo {
    /// Total listing count advertised by the results summary
    pub total_listings: u64,

    /// Human-readable range text ("1 - 10 out of 47 listings")
    pub current_range: String,

    /// Highest page number visible in the pagination control
    pub total_pages: u32,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            total_listings: 0,
            current_range: String::new(),
            total_pages: 1,
        }
    }
}

/// Provenance attached to a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeMetadata {
    /// When the run finished
    pub scraped_at: DateTime<Local>,

    /// Number of records in the run
    pub total_properties: usize,

    /// Version tag of the scraper that produced the file
    pub scraper_version: String,
}

/// Everything a run produced, assembled once at the end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub metadata: ScrapeMetadata,
    pub properties: Vec<PropertyRecord>,
}

impl ScrapeResult {
    /// Assemble a result from the accumulated records
    pub fn new(properties: Vec<PropertyRecord>) -> Self {
        Self {
            metadata: ScrapeMetadata {
                scraped_at: Local::now(),
                total_properties: properties.len(),
                scraper_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            properties,
        }
    }
}
