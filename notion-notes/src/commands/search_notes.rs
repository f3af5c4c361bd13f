use super::{ProjectNames, project_title};
use crate::client::{Collection, RecordStore, paging, records};
use crate::error::{NotesError, Result};
use crate::filters::{self, PROJECT_PROPERTY};
use crate::ids::normalize_id;
use crate::resolver::{NameQuery, resolve};
use notion_notes_types::{NoteHit, SearchNotesResult};

/// Search notes by title keyword
#[derive(Debug, Clone, clap::Args)]
pub struct SearchNotesArgs {
    /// Search term for note titles
    #[arg(long)]
    pub query: String,

    /// Only notes of this project (id or URL)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Only notes of this project (name)
    #[arg(long)]
    pub project_name: Option<String>,

    /// Include archived notes
    #[arg(long)]
    pub include_archived: bool,

    /// Maximum results
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

pub async fn search_notes(
    store: &dyn RecordStore,
    args: &SearchNotesArgs,
) -> Result<SearchNotesResult> {
    if args.limit == 0 {
        return Err(NotesError::invalid("--limit must be at least 1"));
    }

    // The user asked for this project, so failing to find it is an error here.
    let project = match (&args.project_id, &args.project_name) {
        (Some(id), _) => {
            let id = normalize_id(id)?;
            let name = project_title(store, &id).await;
            store.pace().await;
            Some((id, name))
        }
        (None, Some(name)) => {
            let project = resolve(store, Collection::Projects, &NameQuery::new(name)).await?;
            store.pace().await;
            Some((project.id, Some(project.title)))
        }
        (None, None) => None,
    };

    let filter = filters::combine([
        Some(filters::title_contains(&args.query)),
        filters::archived(args.include_archived),
        project
            .as_ref()
            .map(|(id, _)| filters::relation_contains(PROJECT_PROPERTY, id)),
    ]);

    let pages = paging::query_all(store, Collection::Notes, filter, args.limit).await?;
    let found = records(&pages)?;
    log::info!("[Search] '{}' matched {} notes", args.query, found.len());

    let mut names = ProjectNames::default();
    let mut notes = Vec::with_capacity(found.len());
    for note in found {
        let project_name = match note.project_ids.first() {
            Some(pid) => names.get(store, pid).await,
            None => None,
        };
        notes.push(NoteHit {
            id: note.id,
            name: note.title,
            project_name,
            created: note.created,
            archived: note.archived,
        });
    }

    Ok(SearchNotesResult {
        query: args.query.clone(),
        project: project.and_then(|(_, name)| name),
        include_archived: args.include_archived,
        count: notes.len(),
        notes,
    })
}
