use super::{fetch_record, project_title, resolve_note_id};
use crate::blocks::{ContentBlock, RenderMode, render_blocks};
use crate::client::{RecordStore, paging};
use crate::error::Result;
use notion_notes_types::{NoteDetails, ReadNoteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReadFormat {
    /// Metadata plus every block
    #[default]
    Full,
    /// Markdown-like text
    TextOnly,
    /// First 500 characters
    Summary,
}

impl From<ReadFormat> for RenderMode {
    fn from(format: ReadFormat) -> Self {
        match format {
            ReadFormat::Full => RenderMode::Full,
            ReadFormat::TextOnly => RenderMode::TextOnly,
            ReadFormat::Summary => RenderMode::Summary,
        }
    }
}

/// Read the content of a note
#[derive(Debug, Clone, clap::Args)]
pub struct ReadNoteArgs {
    /// Note id or URL
    #[arg(long)]
    pub id: Option<String>,

    /// Note name to search for
    #[arg(long)]
    pub name: Option<String>,

    /// Narrow the name search to this project
    #[arg(long)]
    pub project_name: Option<String>,

    #[arg(long, value_enum, default_value_t = ReadFormat::Full)]
    pub format: ReadFormat,
}

pub async fn read_note(store: &dyn RecordStore, args: &ReadNoteArgs) -> Result<ReadNoteResult> {
    let note_id = resolve_note_id(
        store,
        args.id.as_deref(),
        args.name.as_deref(),
        args.project_name.as_deref(),
        false,
    )
    .await?;

    let note = fetch_record(store, &note_id).await?;

    let project = match (args.format, note.project_ids.first()) {
        (ReadFormat::TextOnly, _) => None,
        (_, Some(pid)) => Some(project_title(store, pid).await),
        (_, None) => Some(None),
    };

    let raw = paging::fetch_all_children(store, &note.id).await?;
    let blocks: Vec<ContentBlock> = raw.iter().map(ContentBlock::from_wire).collect();
    log::debug!("[Read] '{}' has {} blocks", note.title, blocks.len());

    let full = args.format == ReadFormat::Full;
    let details = NoteDetails {
        id: note.id,
        name: note.title,
        project,
        created: note.created.filter(|_| full),
        updated: note.updated.filter(|_| full),
        archived: full.then_some(note.archived),
    };

    Ok(ReadNoteResult {
        note: details,
        content: render_blocks(&blocks, args.format.into()),
    })
}
