use crate::extract::fields;
use crate::records::UNKNOWN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls_only() {
        assert_eq!(
            fields::accept_absolute_url("https://example.com/listing?propertyId=12"),
            Some("https://example.com/listing?propertyId=12".to_string())
        );
        assert_eq!(
            fields::accept_absolute_url("http://example.com/a"),
            Some("http://example.com/a".to_string())
        );

        // Relative hrefs and pseudo-links are misses
        assert_eq!(fields::accept_absolute_url("/listing/12"), None);
        assert_eq!(fields::accept_absolute_url("listing.html"), None);
        assert_eq!(fields::accept_absolute_url("javascript:void(0)"), None);
        assert_eq!(fields::accept_absolute_url(""), None);
    }

    #[test]
    fn test_property_id_from_url() {
        assert_eq!(
            fields::property_id("https://example.com/p/?propertyId=1417234-sale"),
            Some("1417234-sale".to_string())
        );

        // Everything after the marker is the token, trailing params included
        assert_eq!(
            fields::property_id("https://example.com/p/?propertyId=99&tab=map"),
            Some("99&tab=map".to_string())
        );

        assert_eq!(fields::property_id("https://example.com/p/"), None);
        assert_eq!(fields::property_id("https://example.com/p/?propertyId="), None);
    }

    #[test]
    fn test_listing_type_inference() {
        let lease = fields::classify_listing_type(Some("FOR LEASE"));
        assert!(lease.for_lease);
        assert!(!lease.for_sale);
        assert_eq!(lease.listing_type, "FOR LEASE");

        let sale = fields::classify_listing_type(Some("FOR SALE"));
        assert!(sale.for_sale);
        assert!(!sale.for_lease);

        let both = fields::classify_listing_type(Some("LEASE / SALE"));
        assert!(both.for_lease);
        assert!(both.for_sale);

        let both_keyword = fields::classify_listing_type(Some("BOTH"));
        assert!(both_keyword.for_lease);
        assert!(both_keyword.for_sale);

        // Banner text is normalized before matching
        let lower = fields::classify_listing_type(Some("  for lease  "));
        assert!(lower.for_lease);
        assert_eq!(lower.listing_type, "FOR LEASE");
    }

    #[test]
    fn test_listing_type_default_is_lease() {
        let absent = fields::classify_listing_type(None);
        assert_eq!(absent.listing_type, UNKNOWN);
        assert!(absent.for_lease);
        assert!(!absent.for_sale);

        let empty = fields::classify_listing_type(Some("   "));
        assert_eq!(empty.listing_type, UNKNOWN);
        assert!(empty.for_lease);
        assert!(!empty.for_sale);

        // A banner with neither keyword still defaults to lease
        let odd = fields::classify_listing_type(Some("NEW"));
        assert_eq!(odd.listing_type, "NEW");
        assert!(odd.for_lease);
        assert!(!odd.for_sale);
    }

    #[test]
    fn test_location_skips_price_like_fragments() {
        let fragments = vec![
            "$12.50/SF/YR".to_string(),
            "Call Agent".to_string(),
            "Available Now".to_string(),
            "Athens, GA 30605".to_string(),
        ];
        assert_eq!(fields::pick_location(&fragments), "Athens, GA 30605");
    }

    #[test]
    fn test_location_sentinel_when_everything_is_price_like() {
        let fragments = vec!["$1,000/mo".to_string(), "Call Agent".to_string()];
        assert_eq!(fields::pick_location(&fragments), UNKNOWN);

        assert_eq!(fields::pick_location(&[]), UNKNOWN);
    }

    #[test]
    fn test_placeholder_fragments() {
        assert!(fields::is_placeholder(""));
        assert!(fields::is_placeholder("-"));
        assert!(!fields::is_placeholder("10,000 SF"));
    }

    #[test]
    fn test_brochure_href() {
        assert!(fields::is_brochure_href("https://cdn.example.com/flyer.PDF"));
        assert!(fields::is_brochure_href("https://example.com/brochure/12"));
        assert!(!fields::is_brochure_href("https://example.com/listing/12"));
    }
}
