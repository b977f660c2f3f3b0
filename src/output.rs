use crate::errors::ScrapeError;
use crate::records::{PropertyRecord, ScrapeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// On-disk shape of a result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{ "metadata": ..., "properties": [...] }`; round-trips losslessly
    Wrapped,

    /// A bare array of flattened records with the legacy field set
    Flat,
}

/// One record in the flat shape. The field names are a stable external
/// contract; do not rename them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub name: String,
    pub email: String,
    pub item_url: String,
    pub pdf_url: String,
    pub for_lease: bool,
    pub for_sale: bool,
    pub date: String,
    pub time: String,
    pub property: String,
    pub location: String,
    pub listing_type: String,
    pub image_url: String,
    pub property_details: HashMap<String, String>,
}

impl FlatRecord {
    /// Flatten a record; `contact_email` fills the shape's email column
    pub fn from_record(record: &PropertyRecord, contact_email: &str) -> Self {
        Self {
            name: record.title.clone(),
            email: contact_email.to_string(),
            item_url: record.url.clone().unwrap_or_default(),
            pdf_url: record.pdf_url.clone().unwrap_or_default(),
            for_lease: record.for_lease,
            for_sale: record.for_sale,
            date: record.scraped_at.format("%Y-%m-%d").to_string(),
            time: record.scraped_at.format("%H:%M:%S").to_string(),
            property: record.title.clone(),
            location: record.location.clone(),
            listing_type: record.listing_type.clone(),
            image_url: record.image_url.clone().unwrap_or_default(),
            property_details: record.details.clone(),
        }
    }
}

/// Persist a finished run in the requested shape
pub fn write_result<P: AsRef<Path>>(
    path: P,
    result: &ScrapeResult,
    format: OutputFormat,
    contact_email: &str,
) -> Result<(), ScrapeError> {
    let json = match format {
        OutputFormat::Wrapped => serde_json::to_string_pretty(result)?,
        OutputFormat::Flat => {
            let flat: Vec<FlatRecord> = result
                .properties
                .iter()
                .map(|record| FlatRecord::from_record(record, contact_email))
                .collect();
            serde_json::to_string_pretty(&flat)?
        }
    };

    fs::write(&path, json)?;
    ::log::info!(
        "saved {} properties to {}",
        result.properties.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Read back a wrapped-shape result file
pub fn load_result<P: AsRef<Path>>(path: P) -> Result<ScrapeResult, ScrapeError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScrapeResult {
        let mut first = PropertyRecord::new();
        first.url = Some("https://example.com/p/?propertyId=12-sale".to_string());
        first.property_id = Some("12-sale".to_string());
        first.title = "605 Athena Drive".to_string();
        first.location = "Athens, GA 30605".to_string();
        first.listing_type = "FOR SALE".to_string();
        first.for_lease = false;
        first.for_sale = true;
        first
            .details
            .insert("available_space".to_string(), "5,000 SF".to_string());

        let second = PropertyRecord::new();

        ScrapeResult::new(vec![first, second])
    }

    #[test]
    fn test_wrapped_shape_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");

        let result = sample_result();
        write_result(&path, &result, OutputFormat::Wrapped, "").unwrap();
        let reloaded = load_result(&path).unwrap();

        assert_eq!(reloaded.properties.len(), 2);
        assert_eq!(reloaded, result);
    }

    #[test]
    fn test_flat_shape_field_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");

        let result = sample_result();
        write_result(&path, &result, OutputFormat::Flat, "agent@example.com").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let flat: Vec<FlatRecord> = serde_json::from_str(&contents).unwrap();

        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].name, "605 Athena Drive");
        assert_eq!(flat[0].property, "605 Athena Drive");
        assert_eq!(flat[0].email, "agent@example.com");
        assert_eq!(flat[0].item_url, "https://example.com/p/?propertyId=12-sale");
        assert!(flat[0].for_sale);
        assert!(!flat[0].for_lease);
        assert_eq!(flat[0].property_details["available_space"], "5,000 SF");

        // misses flatten to empty strings, never to nulls
        assert_eq!(flat[1].item_url, "");
        assert_eq!(flat[1].pdf_url, "");
        assert_eq!(flat[1].name, "Unknown");
    }

    #[test]
    fn test_flat_shape_is_a_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");

        write_result(&path, &sample_result(), OutputFormat::Flat, "").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(value.is_array());

        let first = &value[0];
        for field in [
            "name",
            "email",
            "item_url",
            "pdf_url",
            "for_lease",
            "for_sale",
            "date",
            "time",
            "property",
            "location",
            "listing_type",
            "image_url",
            "property_details",
        ] {
            assert!(first.get(field).is_some(), "missing field {}", field);
        }
    }
}
