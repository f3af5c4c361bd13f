//! Block → text rendering for `read-note`.

use super::ContentBlock;
use notion_notes_types::NoteContent;

/// Characters kept by summary rendering before the ellipsis.
pub const SUMMARY_LIMIT: usize = 500;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Structured per-block listing
    Full,
    /// Markdown-like text
    TextOnly,
    /// First 500 characters of all text
    Summary,
}

/// Render blocks in the requested mode.
pub fn render_blocks(blocks: &[ContentBlock], mode: RenderMode) -> NoteContent {
    match mode {
        RenderMode::Full => NoteContent::Full {
            block_count: blocks.len(),
            blocks: blocks.iter().map(ContentBlock::summary).collect(),
        },
        RenderMode::TextOnly => NoteContent::Text {
            text: render_text(blocks),
        },
        RenderMode::Summary => NoteContent::Summary {
            summary: render_summary(blocks),
        },
    }
}

/// Markdown-like rendering, blocks separated by a blank line.
///
/// Numbered items always render as `1. `; the source numerals are not
/// kept on the remote side.
pub fn render_text(blocks: &[ContentBlock]) -> String {
    let lines: Vec<String> = blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Heading1(t) => Some(format!("# {}", t)),
            ContentBlock::Heading2(t) => Some(format!("## {}", t)),
            ContentBlock::Heading3(t) => Some(format!("### {}", t)),
            ContentBlock::Code { language, text } => {
                Some(format!("```{}\n{}\n```", language, text))
            }
            ContentBlock::BulletItem(t) => Some(format!("- {}", t)),
            ContentBlock::NumberedItem(t) => Some(format!("1. {}", t)),
            ContentBlock::Divider => Some("---".to_string()),
            other => Some(other.display_text()).filter(|t| !t.is_empty()),
        })
        .collect();

    lines.join("\n\n")
}

/// All block texts joined by spaces, cut at `SUMMARY_LIMIT` characters.
pub fn render_summary(blocks: &[ContentBlock]) -> String {
    let full = blocks
        .iter()
        .map(ContentBlock::display_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(&full, SUMMARY_LIMIT)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_markers() {
        let blocks = vec![
            ContentBlock::Heading1("T".to_string()),
            ContentBlock::Heading3("S".to_string()),
            ContentBlock::NumberedItem("third".to_string()),
            ContentBlock::Code {
                language: "python".to_string(),
                text: "print(1)".to_string(),
            },
            ContentBlock::Divider,
            ContentBlock::Quote("quoted".to_string()),
            ContentBlock::ToDo {
                text: "task".to_string(),
                checked: true,
            },
            ContentBlock::Paragraph(String::new()),
        ];
        assert_eq!(
            render_text(&blocks),
            "# T\n\n### S\n\n1. third\n\n```python\nprint(1)\n```\n\n---\n\nquoted\n\ntask"
        );
    }

    #[test]
    fn test_render_text_placeholders() {
        let blocks = vec![
            ContentBlock::Image {
                url: "https://img/a.png".to_string(),
            },
            ContentBlock::Unsupported {
                kind: "bookmark".to_string(),
            },
        ];
        assert_eq!(
            render_text(&blocks),
            "[Image: https://img/a.png]\n\n[bookmark block]"
        );
    }

    #[test]
    fn test_summary_truncates_at_limit() {
        let blocks = vec![
            ContentBlock::Paragraph("a".repeat(300)),
            ContentBlock::Paragraph("b".repeat(299)),
        ];
        // 300 + 1 space + 299 = 600 characters
        let summary = render_summary(&blocks);
        assert_eq!(summary.chars().count(), SUMMARY_LIMIT + ELLIPSIS.len());
        assert!(summary.ends_with("..."));
        assert!(summary.starts_with(&"a".repeat(300)));
    }

    #[test]
    fn test_summary_short_text_untouched() {
        let text = "x".repeat(400);
        let blocks = vec![ContentBlock::Paragraph(text.clone())];
        assert_eq!(render_summary(&blocks), text);
    }

    #[test]
    fn test_summary_exactly_at_limit_untouched() {
        let text = "y".repeat(SUMMARY_LIMIT);
        assert_eq!(
            render_summary(&[ContentBlock::Paragraph(text.clone())]),
            text
        );
    }

    #[test]
    fn test_summary_counts_characters_not_bytes() {
        let text = "é".repeat(SUMMARY_LIMIT + 10);
        let summary = render_summary(&[ContentBlock::Paragraph(text)]);
        assert_eq!(summary, format!("{}...", "é".repeat(SUMMARY_LIMIT)));
    }

    #[test]
    fn test_summary_skips_empty_blocks() {
        let blocks = vec![
            ContentBlock::Paragraph("one".to_string()),
            ContentBlock::Paragraph(String::new()),
            ContentBlock::Divider,
            ContentBlock::BulletItem("two".to_string()),
        ];
        assert_eq!(render_summary(&blocks), "one --- two");
    }

    #[test]
    fn test_render_full_lists_every_block() {
        let blocks = vec![
            ContentBlock::Heading2("h".to_string()),
            ContentBlock::Unsupported {
                kind: "pdf".to_string(),
            },
        ];
        match render_blocks(&blocks, RenderMode::Full) {
            NoteContent::Full { block_count, blocks } => {
                assert_eq!(block_count, 2);
                assert_eq!(blocks[1].text, "[pdf block]");
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }
}
