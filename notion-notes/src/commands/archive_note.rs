use super::{fetch_record, resolve_note_id};
use crate::client::RecordStore;
use crate::error::Result;
use crate::filters::ARCHIVED_PROPERTY;
use notion_notes_types::{ArchiveNoteResult, NoteRef};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ArchiveAction {
    #[default]
    Archive,
    Unarchive,
}

/// Archive or unarchive a note
#[derive(Debug, Clone, clap::Args)]
pub struct ArchiveNoteArgs {
    /// Note id or URL
    #[arg(long)]
    pub id: Option<String>,

    /// Note name to search for
    #[arg(long)]
    pub name: Option<String>,

    /// Narrow the name search to this project
    #[arg(long)]
    pub project_name: Option<String>,

    #[arg(long, value_enum, default_value_t = ArchiveAction::Archive)]
    pub action: ArchiveAction,
}

pub async fn archive_note(
    store: &dyn RecordStore,
    args: &ArchiveNoteArgs,
) -> Result<ArchiveNoteResult> {
    let archive = args.action == ArchiveAction::Archive;
    let action = if archive { "archive" } else { "unarchive" };

    // Unarchiving has to be able to find archived notes by name.
    let note_id = resolve_note_id(
        store,
        args.id.as_deref(),
        args.name.as_deref(),
        args.project_name.as_deref(),
        !archive,
    )
    .await?;
    let note = fetch_record(store, &note_id).await?;
    let note_ref = NoteRef {
        id: note.id.clone(),
        name: note.title.clone(),
    };

    if note.archived == archive {
        return Ok(ArchiveNoteResult {
            action: action.to_string(),
            note: note_ref,
            status: "no_change".to_string(),
            archived: None,
            message: format!(
                "Note is already {}",
                if archive { "archived" } else { "not archived" }
            ),
        });
    }

    store
        .update_properties(
            &note.id,
            json!({ ARCHIVED_PROPERTY: { "checkbox": archive } }),
        )
        .await?;
    log::info!("[Archive] '{}' archived={}", note.title, archive);

    Ok(ArchiveNoteResult {
        action: action.to_string(),
        note: note_ref,
        status: "updated".to_string(),
        archived: Some(archive),
        message: format!(
            "Note successfully {}",
            if archive { "archived" } else { "unarchived" }
        ),
    })
}
