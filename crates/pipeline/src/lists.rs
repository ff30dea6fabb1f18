//! Helpers for the delimiter-separated list columns of the dumps.

/// Split a comma separated column into an ordered list.
///
/// A null column stays null. An empty string gives a single empty element,
/// callers downstream have to tolerate that.
pub fn split_list(value: Option<&str>) -> Option<Vec<String>> {
    value.map(|s| s.split(',').map(str::to_string).collect())
}

/// Parse the `characters` column of title.principals.
///
/// IMDb writes it as a JSON array of strings (`["Self","Host"]`). Anything
/// that is not valid JSON is kept as a single-element list.
pub fn parse_characters(value: Option<&str>) -> Option<Vec<String>> {
    let raw = value?;
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(list) => Some(list),
        Err(_) => Some(vec![raw.to_string()]),
    }
}
