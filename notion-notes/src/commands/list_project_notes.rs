use super::project_title;
use crate::client::{Collection, RecordStore, paging, records};
use crate::error::{NotesError, Result};
use crate::filters::{self, PROJECT_PROPERTY};
use crate::ids::normalize_id;
use crate::resolver::{NameQuery, resolve};
use notion_notes_types::{ProjectNote, ProjectNotesResult, ProjectRef};

/// List every note of one project
#[derive(Debug, Clone, clap::Args)]
pub struct ListProjectNotesArgs {
    /// Project id or URL
    #[arg(long)]
    pub project_id: Option<String>,

    /// Project name
    #[arg(long)]
    pub project_name: Option<String>,

    /// Include archived notes
    #[arg(long)]
    pub include_archived: bool,

    /// Maximum results
    #[arg(long, default_value_t = 100)]
    pub limit: usize,
}

pub async fn list_project_notes(
    store: &dyn RecordStore,
    args: &ListProjectNotesArgs,
) -> Result<ProjectNotesResult> {
    if args.limit == 0 {
        return Err(NotesError::invalid("--limit must be at least 1"));
    }

    let project = match (&args.project_id, &args.project_name) {
        (Some(id), _) => {
            let id = normalize_id(id)?;
            let name = project_title(store, &id)
                .await
                .unwrap_or_else(|| "Unknown".to_string());
            ProjectRef { id, name }
        }
        (None, Some(name)) => {
            let found = resolve(store, Collection::Projects, &NameQuery::new(name)).await?;
            ProjectRef {
                id: found.id,
                name: found.title,
            }
        }
        (None, None) => {
            return Err(NotesError::invalid(
                "Either --project-id or --project-name must be provided",
            ));
        }
    };
    store.pace().await;

    let filter = filters::combine([
        Some(filters::relation_contains(PROJECT_PROPERTY, &project.id)),
        filters::archived(args.include_archived),
    ]);
    let pages = paging::query_all(store, Collection::Notes, filter, args.limit).await?;

    let notes: Vec<ProjectNote> = records(&pages)?
        .into_iter()
        .map(|n| ProjectNote {
            id: n.id,
            name: n.title,
            created: n.created,
            updated: n.updated,
            archived: n.archived,
        })
        .collect();
    log::info!("[List] Project '{}' has {} notes", project.name, notes.len());

    Ok(ProjectNotesResult {
        project,
        include_archived: args.include_archived,
        count: notes.len(),
        notes,
    })
}
