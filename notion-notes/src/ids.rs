//! Page / database identifier normalisation.

use crate::error::{NotesError, Result};
use regex::Regex;
use std::sync::LazyLock;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{12}$").unwrap()
});
static TRAILING_HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9a-f]{32})$").unwrap());

/// Normalise an id, or a page URL ending in one, to the dashed lowercase form.
pub fn normalize_id(input: &str) -> Result<String> {
    let input = input.trim();

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        let parsed = url::Url::parse(input)
            .map_err(|e| NotesError::invalid(format!("Invalid page URL '{}': {}", input, e)))?;
        let last = parsed
            .path_segments()
            .and_then(|mut segs| segs.next_back())
            .unwrap_or_default()
            .to_string();
        match TRAILING_HEX_RE.captures(&last) {
            Some(cap) => cap[1].to_string(),
            None => last,
        }
    } else {
        input.to_string()
    };

    if !UUID_RE.is_match(&candidate) {
        return Err(NotesError::invalid(format!(
            "Invalid id '{}': expected 32 hex digits",
            input
        )));
    }

    let hex: String = candidate
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    Ok(format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    ))
}
