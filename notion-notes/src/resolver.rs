//! Name resolution: turn a fuzzy name into exactly one record.
//!
//! Every subcommand that accepts `--name` / `--project-name` goes through
//! `resolve`, so the matching policy lives only here:
//!
//! 1. an optional scope name is resolved first; if that fails the lookup
//!    continues unscoped
//! 2. a case-insensitive exact title match wins, however many others matched
//! 3. otherwise several candidates are ambiguous (up to 5 names reported)
//! 4. a single candidate is the answer
//! 5. no candidates is not-found

use crate::client::{Collection, Record, RecordStore, records};
use crate::error::{NotesError, Result};
use crate::filters;
use async_trait::async_trait;
use serde_json::Value;

/// Most candidate names reported back on an ambiguous match.
pub const MAX_AMBIGUOUS_MATCHES: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct NameQuery {
    pub search_text: String,
    /// Name of a record in the scope collection (a project, for notes)
    pub scope_name: Option<String>,
    pub include_archived: bool,
}

impl NameQuery {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Default::default()
        }
    }

    pub fn scoped(mut self, scope_name: Option<String>) -> Self {
        self.scope_name = scope_name.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn including_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }
}

/// Supplies one bounded page of candidates for a filter.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch_candidates(
        &self,
        collection: Collection,
        filter: Option<Value>,
        page_size: usize,
    ) -> Result<Vec<Record>>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> CandidateSource for S {
    async fn fetch_candidates(
        &self,
        collection: Collection,
        filter: Option<Value>,
        page_size: usize,
    ) -> Result<Vec<Record>> {
        let page = self.query(collection, filter, page_size, None).await?;
        let mut found = records(&page.results)?;
        found.truncate(page_size);
        Ok(found)
    }
}

/// Resolve `query` to a single record of `collection`.
pub async fn resolve<S: CandidateSource + ?Sized>(
    source: &S,
    collection: Collection,
    query: &NameQuery,
) -> Result<Record> {
    let scope_filter = match (&query.scope_name, collection.scope()) {
        (Some(scope_name), Some((scope_collection, relation))) => {
            match resolve_unscoped(source, scope_collection, scope_name, false, None).await {
                Ok(scope) => {
                    log::debug!(
                        "[Resolver] Scoping {} lookup to '{}' ({})",
                        collection.label(),
                        scope.title,
                        scope.id
                    );
                    Some(filters::relation_contains(relation, &scope.id))
                }
                Err(e) => {
                    log::warn!(
                        "[Resolver] Could not resolve '{}' ({}); searching all {}",
                        scope_name,
                        e,
                        collection.label()
                    );
                    None
                }
            }
        }
        (Some(scope_name), None) => {
            log::warn!(
                "[Resolver] {} cannot be scoped; ignoring '{}'",
                collection.label(),
                scope_name
            );
            None
        }
        (None, _) => None,
    };

    resolve_unscoped(
        source,
        collection,
        &query.search_text,
        query.include_archived,
        scope_filter,
    )
    .await
}

async fn resolve_unscoped<S: CandidateSource + ?Sized>(
    source: &S,
    collection: Collection,
    search_text: &str,
    include_archived: bool,
    scope_filter: Option<Value>,
) -> Result<Record> {
    let filter = filters::combine([
        Some(filters::title_contains(search_text)),
        filters::archived(include_archived),
        scope_filter,
    ]);

    let candidates = source
        .fetch_candidates(collection, filter, collection.lookup_page_size())
        .await?;

    select_candidate(collection, search_text, candidates)
}

/// Apply the matching policy to a candidate list.
pub fn select_candidate(
    collection: Collection,
    search_text: &str,
    candidates: Vec<Record>,
) -> Result<Record> {
    let mut candidates = candidates;
    let wanted = search_text.to_lowercase();
    if let Some(exact) = candidates
        .iter()
        .position(|r| r.title.to_lowercase() == wanted)
    {
        return Ok(candidates.swap_remove(exact));
    }

    match candidates.len() {
        0 => Err(NotesError::NotFound {
            collection: collection.label(),
            query: search_text.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(NotesError::Ambiguous {
            collection: collection.label(),
            query: search_text.to_string(),
            matches: candidates
                .into_iter()
                .take(MAX_AMBIGUOUS_MATCHES)
                .map(|r| r.title)
                .collect(),
        }),
    }
}
