//! Copy remote blocks into creation payloads.
//!
//! Rich text is carried over as-is (annotations and links included) rather
//! than going through `ContentBlock`, which only keeps plain text.

use super::{DEFAULT_CODE_LANGUAGE, external_image_url, wire_block};
use serde_json::{Value, json};

/// Block types that cannot be recreated through the API.
pub const DROPPED_KINDS: &[&str] = &[
    "child_page",
    "child_database",
    "unsupported",
    "embed",
    "bookmark",
    "file",
    "pdf",
];

/// Block types whose payload is a rich-text array.
pub const RICH_TEXT_KINDS: &[&str] = &[
    "paragraph",
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
    "to_do",
    "toggle",
    "quote",
    "callout",
];

/// Convert blocks read from one page into blocks that can be appended to another.
///
/// Unsupported kinds and uploaded images are dropped; order is otherwise kept.
pub fn blocks_to_wire_format(blocks: &[Value]) -> Vec<Value> {
    blocks.iter().filter_map(convert_block).collect()
}

fn convert_block(block: &Value) -> Option<Value> {
    let kind = block.get("type").and_then(Value::as_str)?;
    if DROPPED_KINDS.contains(&kind) {
        return None;
    }

    let data = block.get(kind).unwrap_or(&Value::Null);
    let rich_text = data.get("rich_text").cloned().unwrap_or_else(|| json!([]));

    if RICH_TEXT_KINDS.contains(&kind) {
        let mut payload = json!({ "rich_text": rich_text });
        if kind == "to_do" {
            payload["checked"] = json!(data.get("checked").and_then(Value::as_bool).unwrap_or(false));
        }
        return Some(wire_block(kind, payload));
    }

    match kind {
        "code" => {
            let language = data
                .get("language")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_CODE_LANGUAGE);
            Some(wire_block(
                "code",
                json!({ "rich_text": rich_text, "language": language }),
            ))
        }
        "divider" => Some(wire_block("divider", json!({}))),
        "image" => external_image_url(data).map(|url| {
            wire_block(
                "image",
                json!({ "type": "external", "external": { "url": url } }),
            )
        }),
        _ => None,
    }
}
