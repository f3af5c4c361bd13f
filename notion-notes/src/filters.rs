//! Database query filter builders.

use serde_json::{Value, json};

pub const TITLE_PROPERTY: &str = "Name";
pub const ARCHIVED_PROPERTY: &str = "Archived";
pub const PROJECT_PROPERTY: &str = "Project";
pub const STATUS_PROPERTY: &str = "Status";

/// Title contains `text`
pub fn title_contains(text: &str) -> Value {
    json!({
        "property": TITLE_PROPERTY,
        "title": { "contains": text }
    })
}

/// `Archived = false`, or nothing when archived records are wanted too
pub fn archived(include_archived: bool) -> Option<Value> {
    if include_archived {
        return None;
    }
    Some(json!({
        "property": ARCHIVED_PROPERTY,
        "checkbox": { "equals": false }
    }))
}

/// Relation `property` contains the page `id`
pub fn relation_contains(property: &str, id: &str) -> Value {
    json!({
        "property": property,
        "relation": { "contains": id }
    })
}

/// AND together whichever filters are present
pub fn combine(filters: impl IntoIterator<Item = Option<Value>>) -> Option<Value> {
    let mut valid: Vec<Value> = filters.into_iter().flatten().collect();
    match valid.len() {
        0 => None,
        1 => valid.pop(),
        _ => Some(json!({ "and": valid })),
    }
}
