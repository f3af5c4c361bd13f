//! One module per subcommand. Each takes a `RecordStore` and its parsed
//! arguments and returns the `data` payload of the success envelope.

pub mod archive_note;
pub mod combine_notes;
pub mod create_note;
pub mod edit_note;
pub mod list_project_notes;
pub mod read_note;
pub mod search_notes;
pub mod search_projects;
pub mod validate;

use crate::client::{Collection, Record, RecordStore};
use crate::error::{NotesError, Result};
use crate::ids::normalize_id;
use crate::resolver::{NameQuery, resolve};
use std::collections::HashMap;
use std::path::Path;

/// Pick the note to operate on from `--id` or `--name` (+ `--project-name`).
pub(crate) async fn resolve_note_id(
    store: &dyn RecordStore,
    id: Option<&str>,
    name: Option<&str>,
    project_name: Option<&str>,
    include_archived: bool,
) -> Result<String> {
    if let Some(id) = id.filter(|s| !s.trim().is_empty()) {
        return normalize_id(id);
    }

    match name.filter(|s| !s.trim().is_empty()) {
        Some(name) => {
            let query = NameQuery::new(name)
                .scoped(project_name.map(str::to_string))
                .including_archived(include_archived);
            let note = resolve(store, Collection::Notes, &query).await?;
            log::info!("[Resolver] '{}' -> {} ({})", name, note.title, note.id);
            store.pace().await;
            Ok(note.id)
        }
        None => Err(NotesError::invalid("Either --id or --name must be provided")),
    }
}

/// Fetch and parse a page.
pub(crate) async fn fetch_record(store: &dyn RecordStore, id: &str) -> Result<Record> {
    let page = store.get_page(id).await?;
    Record::from_page(&page)
}

/// Title of a project page, or `None` if it cannot be fetched.
pub(crate) async fn project_title(store: &dyn RecordStore, id: &str) -> Option<String> {
    match fetch_record(store, id).await {
        Ok(record) => Some(record.title),
        Err(e) => {
            log::warn!("[Notion] Could not look up project {}: {}", id, e);
            None
        }
    }
}

/// Project titles looked up at most once per invocation.
#[derive(Default)]
pub(crate) struct ProjectNames {
    cache: HashMap<String, Option<String>>,
}

impl ProjectNames {
    pub async fn get(&mut self, store: &dyn RecordStore, id: &str) -> Option<String> {
        if let Some(name) = self.cache.get(id) {
            return name.clone();
        }
        let name = project_title(store, id).await;
        self.cache.insert(id.to_string(), name.clone());
        store.pace().await;
        name
    }
}

/// Content from `--content` or `--content-file` (the file wins).
pub(crate) fn read_content(
    content: Option<&str>,
    content_file: Option<&Path>,
) -> Result<Option<String>> {
    match content_file {
        Some(path) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|source| NotesError::Io {
                context: format!("Failed to read content file {}", path.display()),
                source,
            }),
        None => Ok(content.map(str::to_string)),
    }
}
