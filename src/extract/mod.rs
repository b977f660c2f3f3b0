pub mod details;
pub mod fields;

#[cfg(test)]
mod tests;

use crate::records::PropertyRecord;
use crate::selectors::{self, Scope};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use std::collections::HashMap;

/// Candidate anchors when the obvious descendant link is missing
const ANCHOR_FALLBACKS: &[&str] = &["a[href*='property']", "a[href*='listing']", "a[href*='detail']"];

/// Candidate cover images, most specific first
const IMAGE_SELECTORS: &[&str] = &["img.image-cover", "img", ".property-image img", ".listing-image img"];

/// Candidate listing-type banners
const BANNER_SELECTORS: &[&str] = &[".list-item-banner", "[class*='banner']", "[class*='type']"];

/// Candidate title/address nodes
const TITLE_SELECTORS: &[&str] = &[
    "h5.mb-0",
    "h5",
    "h4",
    "h3",
    ".title",
    ".property-title",
    ".listing-title",
    "[class*='title']",
];

/// Candidate brochure links
const PDF_SELECTORS: &[&str] = &[
    "a[href*='.pdf']",
    "a[href*='brochure']",
    "a[href*='flyer']",
    "a[title*='PDF']",
    "a[title*='Brochure']",
];

/// Auxiliary text fragments shown next to a listing
const SECONDARY_INFO_SELECTORS: &[&str] = &[".secondary-information"];

/// The hover-overlay detail table
const DETAIL_TABLE_SELECTORS: &[&str] = &["table.mt-2", "table"];

/// Convert one listing node into a structured record.
///
/// A field whose chain resolves nothing keeps its typed default; only a
/// failure of the node itself (detached mid-extraction, session lost) stops
/// the walk, and even then the record is returned with the fields populated
/// so far and `extraction_error` set. This function never fails.
pub async fn extract(node: &Element) -> PropertyRecord {
    let mut record = PropertyRecord::new();

    if let Err(e) = populate(node, &mut record).await {
        ::log::error!("listing node failed mid-extraction: {}", e);
        record.extraction_error = Some(e.to_string());
    }

    record
}

/// Fill the record field by field; each chain is independent of the others
async fn populate(node: &Element, record: &mut PropertyRecord) -> Result<(), CmdError> {
    record.url = extract_url(node).await?;
    record.property_id = record.url.as_deref().and_then(fields::property_id);

    if let Some((src, alt)) = extract_image(node).await? {
        record.image_url = Some(src);
        record.image_alt = alt;
    }

    let kind = fields::classify_listing_type(extract_banner_text(node).await?.as_deref());
    record.listing_type = kind.listing_type;
    record.for_lease = kind.for_lease;
    record.for_sale = kind.for_sale;

    if let Some(title) = extract_title(node).await? {
        record.title = title;
    }

    record.pdf_url = extract_pdf_url(node).await?;

    record.secondary_info = extract_secondary_info(node).await?;
    record.location = fields::pick_location(&record.secondary_info);

    record.details = extract_detail_table(node).await?;
    details::apply_secondary_heuristics(&mut record.details, &record.secondary_info);

    Ok(())
}

/// First anchor-like descendant, or the node itself when it is the anchor.
/// Only scheme-qualified absolute URLs are accepted.
async fn extract_url(node: &Element) -> Result<Option<String>, CmdError> {
    if let Some(anchor) = selectors::resolve_first(node, &["a"]).await? {
        if let Some(href) = anchor.attr("href").await? {
            if let Some(url) = fields::accept_absolute_url(&href) {
                return Ok(Some(url));
            }
        }
    }

    // the listing container itself may be the link
    if node.tag_name().await?.eq_ignore_ascii_case("a") {
        if let Some(href) = node.attr("href").await? {
            if let Some(url) = fields::accept_absolute_url(&href) {
                return Ok(Some(url));
            }
        }
    }

    if let Some(anchor) = selectors::resolve_first(node, ANCHOR_FALLBACKS).await? {
        if let Some(href) = anchor.attr("href").await? {
            return Ok(fields::accept_absolute_url(&href));
        }
    }

    Ok(None)
}

/// Cover image source and alt text; relative sources are a miss
async fn extract_image(node: &Element) -> Result<Option<(String, Option<String>)>, CmdError> {
    let Some(img) = selectors::resolve_first(node, IMAGE_SELECTORS).await? else {
        return Ok(None);
    };

    let Some(src) = img.attr("src").await? else {
        return Ok(None);
    };
    let Some(src) = fields::accept_absolute_url(&src) else {
        return Ok(None);
    };

    Ok(Some((src, img.attr("alt").await?)))
}

/// Raw text of the listing-type banner, if one resolves
async fn extract_banner_text(node: &Element) -> Result<Option<String>, CmdError> {
    let Some(banner) = selectors::resolve_first(node, BANNER_SELECTORS).await? else {
        return Ok(None);
    };
    Ok(Some(banner.text().await?))
}

/// First title-bearing descendant with non-empty trimmed text
async fn extract_title(node: &Element) -> Result<Option<String>, CmdError> {
    let resolution = selectors::resolve(node, TITLE_SELECTORS).await?;

    for candidate in &resolution.nodes {
        let text = candidate.text().await?;
        let text = text.trim();
        if !text.is_empty() {
            return Ok(Some(text.to_string()));
        }
    }

    Ok(None)
}

/// First anchor whose href points at a brochure document
async fn extract_pdf_url(node: &Element) -> Result<Option<String>, CmdError> {
    let resolution = selectors::resolve(node, PDF_SELECTORS).await?;

    for candidate in &resolution.nodes {
        if let Some(href) = candidate.attr("href").await? {
            if fields::is_brochure_href(&href) {
                return Ok(Some(href));
            }
        }
    }

    Ok(None)
}

/// Every non-placeholder secondary-information text, in document order
async fn extract_secondary_info(node: &Element) -> Result<Vec<String>, CmdError> {
    let resolution = selectors::resolve(node, SECONDARY_INFO_SELECTORS).await?;

    let mut fragments = Vec::new();
    for element in &resolution.nodes {
        let text = element.text().await?;
        let text = text.trim();
        if !fields::is_placeholder(text) {
            fragments.push(text.to_string());
        }
    }

    Ok(fragments)
}

/// Detail-table pass: one key/value pair per row with at least two cells.
/// A malformed row is skipped on its own; it never fails the table pass.
async fn extract_detail_table(node: &Element) -> Result<HashMap<String, String>, CmdError> {
    let mut table_details = HashMap::new();

    let Some(table) = selectors::resolve_first(node, DETAIL_TABLE_SELECTORS).await? else {
        ::log::debug!("no detail table found for listing");
        return Ok(table_details);
    };

    for row in table.query("tr").await? {
        match read_detail_row(&row).await {
            Ok(Some((key, value))) => {
                table_details.insert(key, value);
            }
            Ok(None) => {}
            Err(e) => {
                ::log::debug!("skipping malformed detail row: {}", e);
            }
        }
    }

    Ok(table_details)
}

async fn read_detail_row(row: &Element) -> Result<Option<(String, String)>, CmdError> {
    let cells = row.query("td").await?;
    if cells.len() < 2 {
        return Ok(None);
    }

    let key = details::normalize_detail_key(&cells[0].text().await?);
    let value = cells[1].text().await?.trim().to_string();
    Ok(Some((key, value)))
}
