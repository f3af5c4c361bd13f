use crate::client::{FixedDelay, NotionClient, RecordStore};
use crate::commands::{
    archive_note::{ArchiveNoteArgs, archive_note},
    combine_notes::{CombineNotesArgs, combine_notes},
    create_note::{CreateNoteArgs, create_note},
    edit_note::{EditNoteArgs, edit_note},
    list_project_notes::{ListProjectNotesArgs, list_project_notes},
    read_note::{ReadNoteArgs, read_note},
    search_notes::{SearchNotesArgs, search_notes},
    search_projects::{SearchProjectsArgs, search_projects},
    validate::{check_connectivity, validate},
};
use crate::config::Config;
use crate::error::{NotesError, Result};
use clap::{Parser, Subcommand};
use notion_notes_types::ValidationReport;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "notion-notes",
    version,
    about = "Search, read and edit notes in a Notion workspace"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find notes whose title contains a query
    SearchNotes(SearchNotesArgs),

    /// Find projects by name
    SearchProjects(SearchProjectsArgs),

    /// List every note of one project
    ListProjectNotes(ListProjectNotesArgs),

    /// Read a note's content
    ReadNote(ReadNoteArgs),

    /// Create a note from markdown
    CreateNote(CreateNoteArgs),

    /// Append to, replace or clear a note
    EditNote(EditNoteArgs),

    /// Archive or unarchive a note
    ArchiveNote(ArchiveNoteArgs),

    /// Merge up to five notes into one
    CombineNotes(CombineNotesArgs),

    /// Check configuration and API access
    Validate,
}

fn to_data<T: Serialize>(payload: T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|e| NotesError::malformed(format!("cannot serialize result: {}", e)))
}

fn report_result(report: ValidationReport) -> Result<Value> {
    let value = to_data(&report)?;
    if report.passed() {
        Ok(value)
    } else {
        Err(NotesError::ValidationFailed(value))
    }
}

/// Run one command against an existing store.
///
/// `Validate` only performs the connectivity half here; local configuration
/// is checked by `run`.
pub async fn dispatch(command: &Command, store: &dyn RecordStore) -> Result<Value> {
    match command {
        Command::SearchNotes(args) => to_data(search_notes(store, args).await?),
        Command::SearchProjects(args) => to_data(search_projects(store, args).await?),
        Command::ListProjectNotes(args) => to_data(list_project_notes(store, args).await?),
        Command::ReadNote(args) => to_data(read_note(store, args).await?),
        Command::CreateNote(args) => to_data(create_note(store, args).await?),
        Command::EditNote(args) => to_data(edit_note(store, args).await?),
        Command::ArchiveNote(args) => to_data(archive_note(store, args).await?),
        Command::CombineNotes(args) => to_data(combine_notes(store, args).await?),
        Command::Validate => {
            let mut report = ValidationReport::default();
            check_connectivity(store, &mut report).await;
            report_result(report)
        }
    }
}

/// Load configuration, build the HTTP client and run the command.
pub async fn run(command: &Command) -> Result<Value> {
    if let Command::Validate = command {
        return report_result(validate().await);
    }

    let config = Config::from_env()?;
    log::debug!(
        "[Config] notes={} projects={} pause={:?}",
        config.notes_db_id,
        config.projects_db_id,
        config.rate_limit
    );
    let client = NotionClient::new(&config, Arc::new(FixedDelay::new(config.rate_limit)));
    dispatch(command, &client).await
}
