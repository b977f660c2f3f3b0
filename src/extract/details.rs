use std::collections::HashMap;

/// Exact (case-insensitive) fragment values classified as a property type
const PROPERTY_TYPE_VOCAB: [&str; 5] =
    ["manufacturing", "office", "warehouse", "retail", "industrial"];

/// Normalize a detail-table key: trimmed, lower-cased, spaces replaced
pub fn normalize_detail_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

/// Patch `details` with values inferred from the secondary-information
/// fragments. Per fragment the first applicable heuristic wins, and a
/// heuristic only applies while its key is still vacant: values from the
/// detail table or an earlier fragment are never overwritten.
pub fn apply_secondary_heuristics(details: &mut HashMap<String, String>, fragments: &[String]) {
    for fragment in fragments {
        let lower = fragment.to_lowercase();

        if lower.contains("sf") && !details.contains_key("available_space") {
            details.insert("available_space".to_string(), fragment.clone());
        } else if lower.contains("call agent") && !details.contains_key("price") {
            details.insert("price".to_string(), fragment.clone());
        } else if lower.contains("spaces") && !details.contains_key("number_of_spaces") {
            details.insert("number_of_spaces".to_string(), fragment.clone());
        } else if lower.contains("bldg") && !details.contains_key("building_size") {
            details.insert("building_size".to_string(), fragment.clone());
        } else if PROPERTY_TYPE_VOCAB.contains(&lower.as_str())
            && !details.contains_key("property_type")
        {
            details.insert("property_type".to_string(), fragment.clone());
        }
    }
}
