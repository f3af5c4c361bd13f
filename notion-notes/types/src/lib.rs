//! Shared types for the notion-notes CLI: the output envelope and the JSON
//! payload of every subcommand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =====================================================
// Output Envelope
// =====================================================

/// The single JSON document every subcommand prints.
///
/// Other tooling parses this shape, so field names and the
/// skip-when-absent rules must stay stable.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn err(msg: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
            details,
        }
    }
}

// =====================================================
// Search / List Payloads
// =====================================================

/// A note returned by `search-notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteHit {
    pub id: String,
    pub name: String,
    pub project_name: Option<String>,
    pub created: Option<String>,
    pub archived: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchNotesResult {
    pub query: String,
    /// Project the search was scoped to, if any
    pub project: Option<String>,
    pub include_archived: bool,
    pub count: usize,
    pub notes: Vec<NoteHit>,
}

/// A project returned by `search-projects`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHit {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub archived: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchProjectsResult {
    pub query: String,
    pub exact_match: bool,
    pub include_archived: bool,
    pub count: usize,
    pub projects: Vec<ProjectHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// A note returned by `list-project-notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectNote {
    pub id: String,
    pub name: String,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub archived: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectNotesResult {
    pub project: ProjectRef,
    pub include_archived: bool,
    pub count: usize,
    pub notes: Vec<ProjectNote>,
}

// =====================================================
// Read Payloads
// =====================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRef {
    pub id: String,
    pub name: String,
}

/// Flattened view of one content block, as shown by `read-note --format full`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteDetails {
    pub id: String,
    pub name: String,
    /// Outer `None` omits the key; `Some(None)` writes `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Body of a note in whichever format was requested
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteContent {
    Full {
        block_count: usize,
        blocks: Vec<BlockSummary>,
    },
    Text {
        text: String,
    },
    Summary {
        summary: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadNoteResult {
    pub note: NoteDetails,
    pub content: NoteContent,
}

// =====================================================
// Mutation Payloads
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedNote {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedContent {
    pub blocks_created: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteResult {
    pub action: String,
    pub note: CreatedNote,
    pub content: CreatedContent,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditChanges {
    pub blocks_added: usize,
    pub blocks_removed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditNoteResult {
    pub action: String,
    pub note: NoteRef,
    pub changes: EditChanges,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArchiveNoteResult {
    pub action: String,
    pub note: NoteRef,
    /// `updated` or `no_change`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceNote {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CombineTarget {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CombineNotesResult {
    /// `create_combined` or `append_combined`
    pub action: String,
    pub target_note: CombineTarget,
    pub source_notes: Vec<SourceNote>,
    /// Blocks assembled from the sources (titles and separators included)
    pub blocks_combined: usize,
    /// Blocks actually written to the target
    pub blocks_written: usize,
    /// Append mode only; same count as `blocks_written`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_added: Option<usize>,
    pub archived_sources: Vec<String>,
    pub archive_failures: Vec<String>,
}

// =====================================================
// Validation Payload
// =====================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<CheckResult>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty() && self.checks.iter().all(|c| c.passed)
    }
}
