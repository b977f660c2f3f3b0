use crate::records::UNKNOWN;
use url::Url;

/// Marker separating a listing URL from its property token
const PROPERTY_ID_MARKER: &str = "propertyId=";

/// Prefixes marking a secondary-information fragment as a price or
/// availability string rather than an address
const PRICE_LIKE_PREFIXES: [&str; 3] = ["$", "Call", "Available"];

/// Accept only scheme-qualified absolute URLs; relative hrefs and
/// javascript: pseudo-links are treated as misses
pub fn accept_absolute_url(href: &str) -> Option<String> {
    let href = href.trim();
    let parsed = Url::parse(href).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(href.to_string()),
        _ => None,
    }
}

/// Parse the property token out of a listing URL.
/// Everything after the first `propertyId=` marker is the token.
pub fn property_id(url: &str) -> Option<String> {
    let (_, token) = url.split_once(PROPERTY_ID_MARKER)?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Listing-type classification derived from the banner text
#[derive(Debug, Clone, PartialEq)]
pub struct ListingKind {
    pub listing_type: String,
    pub for_lease: bool,
    pub for_sale: bool,
}

/// Classify the type banner. `LEASE` and `SALE` are matched independently
/// and may both hold; a missing or keyword-free banner falls back to
/// for-lease, the dominant state in this catalog.
pub fn classify_listing_type(banner: Option<&str>) -> ListingKind {
    let normalized = banner
        .map(|text| text.trim().to_uppercase())
        .filter(|text| !text.is_empty());

    let Some(text) = normalized else {
        return ListingKind {
            listing_type: UNKNOWN.to_string(),
            for_lease: true,
            for_sale: false,
        };
    };

    let mut for_lease = text.contains("LEASE");
    let mut for_sale = text.contains("SALE");

    if text.contains("BOTH") {
        for_lease = true;
        for_sale = true;
    }
    if !for_lease && !for_sale {
        for_lease = true;
    }

    ListingKind {
        listing_type: text,
        for_lease,
        for_sale,
    }
}

/// Whether a secondary-information fragment reads like a price or
/// availability string rather than an address
pub fn looks_like_price(text: &str) -> bool {
    PRICE_LIKE_PREFIXES
        .iter()
        .any(|prefix| text.starts_with(prefix))
}

/// Pick the listing location: the first secondary-information fragment
/// that does not look like a price, else the sentinel
pub fn pick_location(fragments: &[String]) -> String {
    fragments
        .iter()
        .find(|text| !looks_like_price(text))
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Fragments that carry no information and are dropped during collection
pub fn is_placeholder(text: &str) -> bool {
    text.is_empty() || text == "-"
}

/// Whether an anchor href points at a brochure document
pub fn is_brochure_href(href: &str) -> bool {
    let lower = href.to_lowercase();
    lower.contains(".pdf") || lower.contains("brochure")
}
