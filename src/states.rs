// 🗺️ US State Codes - immutable, process-wide lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Returned when a name is not one of the 50 states
pub const STATE_NOT_FOUND: &str = "State not found";

const STATE_CODES: [(&str, &str); 50] = [
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

static STATE_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATE_CODES.iter().copied().collect());

/// Map a state name to its 2-letter code; case-insensitive, whitespace-trimmed.
/// Never fails: unknown names map to [`STATE_NOT_FOUND`].
pub fn state_code(name: &str) -> &'static str {
    let key = name.trim().to_lowercase();
    STATE_LOOKUP.get(key.as_str()).copied().unwrap_or(STATE_NOT_FOUND)
}
