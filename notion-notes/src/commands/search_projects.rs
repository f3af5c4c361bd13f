use crate::client::{Collection, MAX_PAGE_SIZE, RecordStore, records};
use crate::error::{NotesError, Result};
use crate::filters;
use notion_notes_types::{ProjectHit, SearchProjectsResult};

/// Search projects by name
#[derive(Debug, Clone, clap::Args)]
pub struct SearchProjectsArgs {
    /// Project name to search for
    #[arg(long)]
    pub name: String,

    /// Require a case-insensitive exact match
    #[arg(long)]
    pub exact: bool,

    /// Include archived projects
    #[arg(long)]
    pub include_archived: bool,

    /// Maximum results
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

pub async fn search_projects(
    store: &dyn RecordStore,
    args: &SearchProjectsArgs,
) -> Result<SearchProjectsResult> {
    if args.limit == 0 {
        return Err(NotesError::invalid("--limit must be at least 1"));
    }

    let filter = filters::combine([
        Some(filters::title_contains(&args.name)),
        filters::archived(args.include_archived),
    ]);

    let page = store
        .query(
            Collection::Projects,
            filter,
            args.limit.min(MAX_PAGE_SIZE),
            None,
        )
        .await?;
    let mut found = records(&page.results)?;

    if args.exact {
        let wanted = args.name.to_lowercase();
        found.retain(|p| p.title.to_lowercase() == wanted);
    }
    found.truncate(args.limit);

    if found.is_empty() {
        return Err(NotesError::NotFound {
            collection: Collection::Projects.label(),
            query: args.name.clone(),
        });
    }

    let projects: Vec<ProjectHit> = found
        .into_iter()
        .map(|p| ProjectHit {
            id: p.id,
            name: p.title,
            status: p.status,
            archived: p.archived,
        })
        .collect();

    Ok(SearchProjectsResult {
        query: args.name.clone(),
        exact_match: args.exact,
        include_archived: args.include_archived,
        count: projects.len(),
        projects,
    })
}
