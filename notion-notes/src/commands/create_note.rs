use super::read_content;
use crate::blocks::parse_markdown_to_blocks;
use crate::client::{Collection, Record, RecordStore, paging};
use crate::error::{NotesError, Result};
use notion_notes_types::{CreateNoteResult, CreatedContent, CreatedNote};
use std::path::PathBuf;

/// Create a new note, unrelated to any project
#[derive(Debug, Clone, clap::Args)]
pub struct CreateNoteArgs {
    /// Title of the new note
    #[arg(long)]
    pub title: String,

    /// Markdown content
    #[arg(long)]
    pub content: Option<String>,

    /// File with markdown content
    #[arg(long)]
    pub content_file: Option<PathBuf>,
}

pub async fn create_note(
    store: &dyn RecordStore,
    args: &CreateNoteArgs,
) -> Result<CreateNoteResult> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(NotesError::invalid("Title is required"));
    }

    let content = read_content(args.content.as_deref(), args.content_file.as_deref())?;
    let blocks: Vec<_> = content
        .as_deref()
        .map(parse_markdown_to_blocks)
        .unwrap_or_default()
        .iter()
        .filter_map(|b| b.to_wire())
        .collect();

    let (page, written) =
        paging::create_with_blocks(store, Collection::Notes, title, blocks).await?;
    let created = Record::from_page(&page)?;
    log::info!("[Create] '{}' -> {} ({} blocks)", title, created.id, written);

    Ok(CreateNoteResult {
        action: "create".to_string(),
        note: CreatedNote {
            id: created.id,
            name: title.to_string(),
            url: created.url.unwrap_or_default(),
        },
        content: CreatedContent {
            blocks_created: written,
        },
    })
}
