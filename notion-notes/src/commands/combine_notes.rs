use super::fetch_record;
use crate::blocks::{ContentBlock, blocks_to_wire_format};
use crate::client::{Collection, Record, RecordStore, paging};
use crate::error::{NotesError, Result};
use crate::filters::ARCHIVED_PROPERTY;
use crate::ids::normalize_id;
use notion_notes_types::{CombineNotesResult, CombineTarget, SourceNote};
use serde_json::{Value, json};

/// Most notes one combine may read.
pub const MAX_SOURCE_NOTES: usize = 5;

/// Merge several notes into a new note or an existing one
#[derive(Debug, Clone, clap::Args)]
pub struct CombineNotesArgs {
    /// Ids or URLs of the notes to combine, in order
    #[arg(long, num_args = 1.., required = true)]
    pub source_ids: Vec<String>,

    /// Append into this existing note
    #[arg(long)]
    pub target_id: Option<String>,

    /// Create a new note with this title
    #[arg(long)]
    pub create_new: Option<String>,

    /// Do not add a heading with each source's title
    #[arg(long)]
    pub no_preserve_titles: bool,

    /// Leave the source notes unarchived
    #[arg(long)]
    pub no_archive: bool,

    /// Do not put a divider between sources
    #[arg(long)]
    pub no_separator: bool,
}

enum Target {
    Existing(String),
    New(String),
}

struct Source {
    id: String,
    title: String,
    blocks: Vec<Value>,
}

fn target_of(args: &CombineNotesArgs) -> Result<Target> {
    let create_new = args.create_new.as_deref().map(str::trim);
    match (args.target_id.as_deref(), create_new) {
        (Some(_), Some(_)) => Err(NotesError::invalid(
            "Cannot use both --target-id and --create-new. Choose one.",
        )),
        (Some(id), None) => Ok(Target::Existing(normalize_id(id)?)),
        (None, Some("")) => Err(NotesError::invalid("Title for --create-new must not be empty")),
        (None, Some(title)) => Ok(Target::New(title.to_string())),
        (None, None) => Err(NotesError::invalid(
            "Either --target-id or --create-new must be provided",
        )),
    }
}

fn source_ids(args: &CombineNotesArgs) -> Result<Vec<String>> {
    if args.source_ids.is_empty() {
        return Err(NotesError::invalid("At least one source note ID is required"));
    }
    if args.source_ids.len() > MAX_SOURCE_NOTES {
        return Err(NotesError::invalid(format!(
            "Maximum {} notes can be combined at once",
            MAX_SOURCE_NOTES
        )));
    }
    args.source_ids.iter().map(|id| normalize_id(id)).collect()
}

/// Assemble the blocks written to the target.
fn combined_blocks(sources: &[Source], preserve_titles: bool, separate: bool) -> Vec<Value> {
    let mut out = Vec::new();

    for (i, source) in sources.iter().enumerate() {
        if preserve_titles {
            out.extend(ContentBlock::Heading2(source.title.clone()).to_wire());
        }
        out.extend(blocks_to_wire_format(&source.blocks));
        if separate && i + 1 < sources.len() {
            out.extend(ContentBlock::Divider.to_wire());
        }
    }

    out
}

pub async fn combine_notes(
    store: &dyn RecordStore,
    args: &CombineNotesArgs,
) -> Result<CombineNotesResult> {
    let ids = source_ids(args)?;
    let target = target_of(args)?;
    if let Target::Existing(target_id) = &target {
        if ids.contains(target_id) {
            return Err(NotesError::invalid(
                "The target note cannot also be one of the source notes",
            ));
        }
    }

    let mut sources = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            store.pace().await;
        }
        let record = fetch_record(store, id).await?;
        let blocks = paging::fetch_all_children(store, &record.id).await?;
        log::info!("[Combine] Read '{}' ({} blocks)", record.title, blocks.len());
        sources.push(Source {
            id: record.id,
            title: record.title,
            blocks,
        });
    }

    let blocks = combined_blocks(&sources, !args.no_preserve_titles, !args.no_separator);
    if blocks.is_empty() {
        return Err(NotesError::invalid(
            "No content found in source notes to combine",
        ));
    }
    let blocks_combined = blocks.len();
    store.pace().await;

    let (action, target_note, blocks_written) = match target {
        Target::New(title) => {
            let (page, written) =
                paging::create_with_blocks(store, Collection::Notes, &title, blocks).await?;
            let created = Record::from_page(&page)?;
            let target = CombineTarget {
                id: created.id,
                name: title,
                url: created.url,
            };
            ("create_combined", target, written)
        }
        Target::Existing(id) => {
            let written = paging::append_batched(store, &id, blocks).await?;
            let name = match fetch_record(store, &id).await {
                Ok(record) => record.title,
                Err(e) => {
                    log::warn!("[Combine] Could not read target title {}: {}", id, e);
                    "Unknown".to_string()
                }
            };
            let target = CombineTarget { id, name, url: None };
            ("append_combined", target, written)
        }
    };
    log::info!(
        "[Combine] Wrote {} blocks to '{}'",
        blocks_written,
        target_note.name
    );

    let mut archived_sources = Vec::new();
    let mut archive_failures = Vec::new();
    if !args.no_archive {
        for source in &sources {
            store.pace().await;
            let patch = json!({ ARCHIVED_PROPERTY: { "checkbox": true } });
            match store.update_properties(&source.id, patch).await {
                Ok(_) => archived_sources.push(source.id.clone()),
                Err(e) => {
                    log::warn!("[Combine] Failed to archive source {}: {}", source.id, e);
                    archive_failures.push(source.id.clone());
                }
            }
        }
    }

    Ok(CombineNotesResult {
        action: action.to_string(),
        target_note,
        source_notes: sources
            .into_iter()
            .map(|s| SourceNote {
                id: s.id,
                title: s.title,
            })
            .collect(),
        blocks_combined,
        blocks_written,
        blocks_added: (action == "append_combined").then_some(blocks_written),
        archived_sources,
        archive_failures,
    })
}
