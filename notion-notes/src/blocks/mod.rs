//! Content blocks: the typed body of a note.
//!
//! Markdown is parsed into `ContentBlock`s (markdown.rs), blocks are turned
//! into the API's creation payload here, remote content is copied between
//! pages without re-parsing (wire.rs), and blocks render back to text for
//! reading (render.rs).

pub mod markdown;
pub mod render;
pub mod wire;

pub use markdown::parse_markdown_to_blocks;
pub use render::{RenderMode, render_blocks, render_summary, render_text};
pub use wire::blocks_to_wire_format;

use notion_notes_types::BlockSummary;
use serde_json::{Value, json};

/// Language recorded for fenced code without a tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

/// Longest text the API accepts in a single rich-text run.
pub const MAX_RICH_TEXT_LEN: usize = 2000;

/// One unit of note content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph(String),
    Heading1(String),
    Heading2(String),
    Heading3(String),
    BulletItem(String),
    NumberedItem(String),
    Code { language: String, text: String },
    Divider,
    Quote(String),
    Callout(String),
    Toggle(String),
    ToDo { text: String, checked: bool },
    /// Externally hosted image
    Image { url: String },
    /// Remote block this client can show but never writes back
    /// (child pages, bookmarks, uploaded files and images, ...)
    Unsupported { kind: String },
}

impl ContentBlock {
    /// The API's name for this block type.
    pub fn wire_type(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading1(_) => "heading_1",
            Self::Heading2(_) => "heading_2",
            Self::Heading3(_) => "heading_3",
            Self::BulletItem(_) => "bulleted_list_item",
            Self::NumberedItem(_) => "numbered_list_item",
            Self::Code { .. } => "code",
            Self::Divider => "divider",
            Self::Quote(_) => "quote",
            Self::Callout(_) => "callout",
            Self::Toggle(_) => "toggle",
            Self::ToDo { .. } => "to_do",
            Self::Image { .. } => "image",
            Self::Unsupported { kind } => kind,
        }
    }

    /// Plain text content; empty for dividers, images and unsupported blocks.
    pub fn text(&self) -> &str {
        match self {
            Self::Paragraph(t)
            | Self::Heading1(t)
            | Self::Heading2(t)
            | Self::Heading3(t)
            | Self::BulletItem(t)
            | Self::NumberedItem(t)
            | Self::Quote(t)
            | Self::Callout(t)
            | Self::Toggle(t) => t,
            Self::Code { text, .. } | Self::ToDo { text, .. } => text,
            Self::Divider | Self::Image { .. } | Self::Unsupported { .. } => "",
        }
    }

    /// Text shown when a block is summarised or listed.
    pub fn display_text(&self) -> String {
        match self {
            Self::Divider => "---".to_string(),
            Self::Image { url } => format!("[Image: {}]", url),
            Self::Unsupported { kind } => format!("[{} block]", kind),
            other => other.text().to_string(),
        }
    }

    pub fn summary(&self) -> BlockSummary {
        let (language, checked) = match self {
            Self::Code { language, .. } => (Some(language.clone()), None),
            Self::ToDo { checked, .. } => (None, Some(*checked)),
            _ => (None, None),
        };
        BlockSummary {
            block_type: self.wire_type().to_string(),
            text: self.display_text(),
            language,
            checked,
        }
    }

    /// Read a block object returned by the API.
    pub fn from_wire(block: &Value) -> Self {
        let kind = block.get("type").and_then(Value::as_str).unwrap_or("unknown");
        let payload = block.get(kind).unwrap_or(&Value::Null);
        let text = || plain_text(payload.get("rich_text").unwrap_or(&Value::Null));

        match kind {
            "paragraph" => Self::Paragraph(text()),
            "heading_1" => Self::Heading1(text()),
            "heading_2" => Self::Heading2(text()),
            "heading_3" => Self::Heading3(text()),
            "bulleted_list_item" => Self::BulletItem(text()),
            "numbered_list_item" => Self::NumberedItem(text()),
            "quote" => Self::Quote(text()),
            "callout" => Self::Callout(text()),
            "toggle" => Self::Toggle(text()),
            "to_do" => Self::ToDo {
                text: text(),
                checked: payload.get("checked").and_then(Value::as_bool).unwrap_or(false),
            },
            "code" => Self::Code {
                language: payload
                    .get("language")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_CODE_LANGUAGE)
                    .to_string(),
                text: text(),
            },
            "divider" => Self::Divider,
            "image" => match external_image_url(payload) {
                Some(url) => Self::Image {
                    url: url.to_string(),
                },
                None => Self::Unsupported {
                    kind: "image".to_string(),
                },
            },
            other => Self::Unsupported {
                kind: other.to_string(),
            },
        }
    }

    /// Creation payload for this block, `None` for unsupported blocks.
    pub fn to_wire(&self) -> Option<Value> {
        let kind = self.wire_type();
        let payload = match self {
            Self::Divider => json!({}),
            Self::Code { language, text } => json!({
                "rich_text": rich_text(text),
                "language": language,
            }),
            Self::ToDo { text, checked } => json!({
                "rich_text": rich_text(text),
                "checked": checked,
            }),
            Self::Image { url } => json!({
                "type": "external",
                "external": { "url": url },
            }),
            Self::Unsupported { .. } => return None,
            other => json!({ "rich_text": rich_text(other.text()) }),
        };
        Some(wire_block(kind, payload))
    }
}

/// Wrap a type-specific payload in the API's block envelope.
pub fn wire_block(kind: &str, payload: Value) -> Value {
    json!({
        "object": "block",
        "type": kind,
        kind: payload,
    })
}

/// Build rich-text runs for `text`, split to respect the per-run limit.
pub fn rich_text(text: &str) -> Value {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return json!([text_run("")]);
    }
    let runs: Vec<Value> = chars
        .chunks(MAX_RICH_TEXT_LEN)
        .map(|chunk| text_run(&chunk.iter().collect::<String>()))
        .collect();
    Value::Array(runs)
}

fn text_run(content: &str) -> Value {
    json!({ "type": "text", "text": { "content": content } })
}

/// Concatenate the plain text of a rich-text array.
///
/// Falls back to `text.content` for runs built locally, which carry no
/// `plain_text`.
pub fn plain_text(rich_text: &Value) -> String {
    rich_text
        .as_array()
        .map(|runs| {
            runs.iter()
                .filter_map(|run| {
                    run.get("plain_text")
                        .or_else(|| run.get("text").and_then(|t| t.get("content")))
                        .and_then(Value::as_str)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// URL of an image payload hosted outside the workspace.
pub fn external_image_url(payload: &Value) -> Option<&str> {
    payload
        .get("external")
        .and_then(|e| e.get("url"))
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_reads_rich_text() {
        let block = json!({
            "type": "heading_2",
            "heading_2": { "rich_text": [
                { "plain_text": "Hello " },
                { "plain_text": "world" }
            ]}
        });
        assert_eq!(
            ContentBlock::from_wire(&block),
            ContentBlock::Heading2("Hello world".to_string())
        );
    }

    #[test]
    fn test_from_wire_to_do_and_code_defaults() {
        let todo = json!({"type": "to_do", "to_do": {"rich_text": [{"plain_text": "ship"}]}});
        assert_eq!(
            ContentBlock::from_wire(&todo),
            ContentBlock::ToDo {
                text: "ship".to_string(),
                checked: false
            }
        );

        let code = json!({"type": "code", "code": {"rich_text": []}});
        assert_eq!(
            ContentBlock::from_wire(&code),
            ContentBlock::Code {
                language: "plain text".to_string(),
                text: String::new()
            }
        );
    }

    #[test]
    fn test_from_wire_images() {
        let external = json!({"type": "image", "image": {"type": "external", "external": {"url": "https://x/y.png"}}});
        assert_eq!(
            ContentBlock::from_wire(&external),
            ContentBlock::Image {
                url: "https://x/y.png".to_string()
            }
        );

        let hosted = json!({"type": "image", "image": {"type": "file", "file": {"url": "https://s3/tmp.png"}}});
        assert_eq!(
            ContentBlock::from_wire(&hosted).display_text(),
            "[image block]"
        );
    }

    #[test]
    fn test_from_wire_unknown_kind() {
        let block = json!({"type": "child_page", "child_page": {"title": "Sub"}});
        let parsed = ContentBlock::from_wire(&block);
        assert_eq!(parsed.display_text(), "[child_page block]");
        assert!(parsed.to_wire().is_none());
    }

    #[test]
    fn test_to_wire_shapes() {
        let code = ContentBlock::Code {
            language: "rust".to_string(),
            text: "fn main() {}".to_string(),
        }
        .to_wire()
        .unwrap();
        assert_eq!(code["type"], "code");
        assert_eq!(code["code"]["language"], "rust");
        assert_eq!(code["code"]["rich_text"][0]["text"]["content"], "fn main() {}");

        let divider = ContentBlock::Divider.to_wire().unwrap();
        assert_eq!(divider, json!({"object": "block", "type": "divider", "divider": {}}));
    }

    #[test]
    fn test_rich_text_splits_long_text() {
        let long = "a".repeat(MAX_RICH_TEXT_LEN * 2 + 5);
        let runs = rich_text(&long);
        let runs = runs.as_array().unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(plain_text(&Value::Array(runs.clone())), long);
    }

    #[test]
    fn test_summary_fields() {
        let s = ContentBlock::ToDo {
            text: "x".to_string(),
            checked: true,
        }
        .summary();
        assert_eq!(s.block_type, "to_do");
        assert_eq!(s.checked, Some(true));
        assert_eq!(s.language, None);
        assert_eq!(ContentBlock::Divider.summary().text, "---");
    }
}
