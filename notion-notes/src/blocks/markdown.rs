//! Line-oriented markdown → `ContentBlock` parser.
//!
//! Deliberately small: one block per line except fenced code, no inline
//! formatting, no nesting.

use super::{ContentBlock, DEFAULT_CODE_LANGUAGE};
use regex::Regex;
use std::sync::LazyLock;

const CODE_FENCE: &str = "```";

static NUMBERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s(.*)$").unwrap());

/// Parse markdown-like text into blocks, in document order.
///
/// Blank lines separate nothing and never become empty paragraphs. An
/// unterminated code fence swallows the rest of the input.
pub fn parse_markdown_to_blocks(text: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut lines = text.split('\n');

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if let Some(tag) = trimmed.strip_prefix(CODE_FENCE) {
            let language = match tag.trim() {
                "" => DEFAULT_CODE_LANGUAGE,
                lang => lang,
            }
            .to_string();

            let mut code = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim() == CODE_FENCE {
                    break;
                }
                code.push(inner);
            }

            blocks.push(ContentBlock::Code {
                language,
                text: code.join("\n"),
            });
            continue;
        }

        let block = if let Some(rest) = line.strip_prefix("# ") {
            ContentBlock::Heading1(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("## ") {
            ContentBlock::Heading2(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("### ") {
            ContentBlock::Heading3(rest.to_string())
        } else if let Some(rest) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            ContentBlock::BulletItem(rest.to_string())
        } else if let Some(cap) = NUMBERED_ITEM_RE.captures(line) {
            ContentBlock::NumberedItem(cap[1].to_string())
        } else if matches!(trimmed, "---" | "***" | "___") {
            ContentBlock::Divider
        } else if !trimmed.is_empty() {
            ContentBlock::Paragraph(line.to_string())
        } else {
            continue;
        };

        blocks.push(block);
    }

    blocks
}
