use crate::extract::details;
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_normalize_detail_key() {
        assert_eq!(details::normalize_detail_key("Building Size"), "building_size");
        assert_eq!(details::normalize_detail_key("  Lot Size  "), "lot_size");
        assert_eq!(details::normalize_detail_key("PRICE"), "price");
    }

    #[test]
    fn test_heuristics_fill_vacant_keys() {
        let mut details_map = HashMap::new();
        details::apply_secondary_heuristics(
            &mut details_map,
            &fragments(&["10,000 SF", "Call Agent", "3 Spaces", "25,000 SF Bldg", "Warehouse"]),
        );

        assert_eq!(details_map["available_space"], "10,000 SF");
        assert_eq!(details_map["price"], "Call Agent");
        assert_eq!(details_map["number_of_spaces"], "3 Spaces");
        assert_eq!(details_map["building_size"], "25,000 SF Bldg");
        assert_eq!(details_map["property_type"], "Warehouse");
    }

    #[test]
    fn test_table_values_are_never_overwritten() {
        let mut details_map = HashMap::new();
        details_map.insert("available_space".to_string(), "5,000 SF".to_string());

        details::apply_secondary_heuristics(&mut details_map, &fragments(&["12,000 SF"]));

        assert_eq!(details_map["available_space"], "5,000 SF");
    }

    #[test]
    fn test_earlier_fragments_win() {
        let mut details_map = HashMap::new();
        details::apply_secondary_heuristics(
            &mut details_map,
            &fragments(&["10,000 SF", "20,000 SF"]),
        );

        assert_eq!(details_map["available_space"], "10,000 SF");
    }

    #[test]
    fn test_one_heuristic_per_fragment() {
        // "sf" wins for this fragment even though "bldg" also appears,
        // so the building-size key stays vacant
        let mut details_map = HashMap::new();
        details::apply_secondary_heuristics(&mut details_map, &fragments(&["25,000 SF Bldg"]));

        assert_eq!(details_map["available_space"], "25,000 SF Bldg");
        assert!(!details_map.contains_key("building_size"));
    }

    #[test]
    fn test_property_type_requires_exact_vocabulary_match() {
        let mut details_map = HashMap::new();
        details::apply_secondary_heuristics(
            &mut details_map,
            &fragments(&["Industrial", "Office Park"]),
        );

        assert_eq!(details_map["property_type"], "Industrial");

        let mut partial = HashMap::new();
        details::apply_secondary_heuristics(&mut partial, &fragments(&["Office Park"]));
        assert!(!partial.contains_key("property_type"));
    }
}
