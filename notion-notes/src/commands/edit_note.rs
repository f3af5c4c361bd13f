use super::{fetch_record, read_content, resolve_note_id};
use crate::blocks::parse_markdown_to_blocks;
use crate::client::{RecordStore, paging};
use crate::error::{NotesError, Result};
use notion_notes_types::{EditChanges, EditNoteResult, NoteRef};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EditAction {
    /// Add content after the existing blocks
    #[default]
    Append,
    /// Remove every block, then add the content
    Replace,
    /// Remove every block
    Clear,
}

impl EditAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Replace => "replace",
            Self::Clear => "clear",
        }
    }
}

/// Append to, replace or clear a note's content
#[derive(Debug, Clone, clap::Args)]
pub struct EditNoteArgs {
    /// Note id or URL
    #[arg(long)]
    pub id: Option<String>,

    /// Note name to search for
    #[arg(long)]
    pub name: Option<String>,

    /// Narrow the name search to this project
    #[arg(long)]
    pub project_name: Option<String>,

    #[arg(long, value_enum, default_value_t = EditAction::Append)]
    pub action: EditAction,

    /// Markdown content to add
    #[arg(long)]
    pub content: Option<String>,

    /// File with markdown content to add
    #[arg(long)]
    pub content_file: Option<PathBuf>,
}

pub async fn edit_note(store: &dyn RecordStore, args: &EditNoteArgs) -> Result<EditNoteResult> {
    let content = read_content(args.content.as_deref(), args.content_file.as_deref())?;
    let content = match (args.action, content) {
        (EditAction::Clear, Some(_)) => {
            log::warn!("[Edit] Ignoring content for the clear action");
            None
        }
        (EditAction::Clear, None) => None,
        (_, Some(c)) if args.content_file.is_some() || !c.is_empty() => Some(c),
        _ => {
            return Err(NotesError::invalid(
                "Either --content or --content-file must be provided for this action",
            ));
        }
    };

    let note_id = resolve_note_id(
        store,
        args.id.as_deref(),
        args.name.as_deref(),
        args.project_name.as_deref(),
        false,
    )
    .await?;
    let note = fetch_record(store, &note_id).await?;

    let blocks: Vec<_> = content
        .as_deref()
        .map(parse_markdown_to_blocks)
        .unwrap_or_default()
        .iter()
        .filter_map(|b| b.to_wire())
        .collect();

    let blocks_removed = match args.action {
        EditAction::Append => 0,
        EditAction::Replace | EditAction::Clear => {
            let removed = paging::delete_all_children(store, &note.id).await?;
            log::info!("[Edit] Removed {} blocks from '{}'", removed, note.title);
            removed
        }
    };

    let blocks_added = match args.action {
        EditAction::Clear => 0,
        EditAction::Append | EditAction::Replace => {
            paging::append_batched(store, &note.id, blocks).await?
        }
    };

    Ok(EditNoteResult {
        action: args.action.as_str().to_string(),
        note: NoteRef {
            id: note.id,
            name: note.title,
        },
        changes: EditChanges {
            blocks_added,
            blocks_removed,
        },
    })
}
