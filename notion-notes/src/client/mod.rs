//! Record store, the remote workspace as the rest of the crate sees it.
//!
//! `RecordStore` is one request per method; paging, batching and pacing
//! live in `paging` so every store implementation gets them for free.

pub mod notion;
pub mod paging;
pub mod rate_limit;

pub use notion::NotionClient;
pub use rate_limit::{FixedDelay, NoDelay, RateLimiter};

use crate::blocks::plain_text;
use crate::error::{NotesError, Result};
use crate::filters::{ARCHIVED_PROPERTY, PROJECT_PROPERTY, STATUS_PROPERTY, TITLE_PROPERTY};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Most blocks the API accepts in one create/append call.
pub const MAX_BLOCKS_PER_REQUEST: usize = 100;

/// Largest page the API returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// The two databases this client works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Notes,
    Projects,
}

impl Collection {
    /// Plural noun used in messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Projects => "projects",
        }
    }

    /// The collection that can narrow a name lookup, and the relation property linking them.
    pub fn scope(self) -> Option<(Collection, &'static str)> {
        match self {
            Self::Notes => Some((Self::Projects, PROJECT_PROPERTY)),
            Self::Projects => None,
        }
    }

    /// Candidates considered when resolving a name.
    pub fn lookup_page_size(self) -> usize {
        match self {
            Self::Notes => 20,
            Self::Projects => 10,
        }
    }
}

/// One page of query or children results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryPage {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl QueryPage {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| NotesError::malformed(format!("list response: {}", e)))
    }
}

/// A database page reduced to the properties this client reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub title: String,
    /// The `Archived` checkbox property
    pub archived: bool,
    pub project_ids: Vec<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub url: Option<String>,
}

impl Record {
    pub fn from_page(page: &Value) -> Result<Self> {
        let id = page
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| NotesError::malformed("page without an id"))?
            .to_string();
        let props = page.get("properties").unwrap_or(&Value::Null);
        let str_field = |key: &str| page.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            id,
            title: extract_title(page),
            archived: props
                .get(ARCHIVED_PROPERTY)
                .and_then(|p| p.get("checkbox"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            project_ids: props
                .get(PROJECT_PROPERTY)
                .and_then(|p| p.get("relation"))
                .and_then(Value::as_array)
                .map(|rels| {
                    rels.iter()
                        .filter_map(|r| r.get("id").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            status: props
                .get(STATUS_PROPERTY)
                .filter(|p| p.get("type").and_then(Value::as_str) == Some("status"))
                .map(|p| {
                    p.get("status")
                        .and_then(|s| s.get("name"))
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown")
                        .to_string()
                }),
            created: str_field("created_time"),
            updated: str_field("last_edited_time"),
            url: str_field("url"),
        })
    }
}

/// Title of a page, `"Untitled"` when missing or empty.
pub fn extract_title(page: &Value) -> String {
    let title = page
        .get("properties")
        .and_then(|p| p.get(TITLE_PROPERTY))
        .and_then(|t| t.get("title"))
        .map(plain_text)
        .unwrap_or_default();

    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title
    }
}

/// Parse every page in a result list.
pub fn records(pages: &[Value]) -> Result<Vec<Record>> {
    pages.iter().map(Record::from_page).collect()
}

/// The remote service, one call per method. Nothing here retries.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One page of a filtered database query.
    async fn query(
        &self,
        collection: Collection,
        filter: Option<Value>,
        page_size: usize,
        start_cursor: Option<String>,
    ) -> Result<QueryPage>;

    async fn get_page(&self, id: &str) -> Result<Value>;

    /// Create a page with a title, `Archived = false` and up to 100 blocks.
    async fn create_page(
        &self,
        collection: Collection,
        title: &str,
        children: Vec<Value>,
    ) -> Result<Value>;

    async fn update_properties(&self, id: &str, properties: Value) -> Result<Value>;

    /// One page (up to 100) of a block's children.
    async fn list_children(&self, block_id: &str, start_cursor: Option<String>)
    -> Result<QueryPage>;

    /// Append up to 100 blocks.
    async fn append_children(&self, block_id: &str, children: Vec<Value>) -> Result<()>;

    async fn delete_block(&self, block_id: &str) -> Result<()>;

    /// The integration user behind the token.
    async fn current_user(&self) -> Result<Value>;

    /// Wait before the next call in a sequence.
    async fn pace(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> Value {
        json!({
            "object": "page",
            "id": "n1",
            "created_time": "2026-01-01T00:00:00.000Z",
            "last_edited_time": "2026-01-02T00:00:00.000Z",
            "archived": false,
            "url": "https://www.notion.so/n1",
            "properties": {
                "Name": { "type": "title", "title": [
                    { "plain_text": "Weekly " }, { "plain_text": "Review" }
                ]},
                "Archived": { "type": "checkbox", "checkbox": true },
                "Project": { "type": "relation", "relation": [{ "id": "p1" }, { "id": "p2" }] },
                "Status": { "type": "status", "status": { "name": "Doing" } }
            }
        })
    }

    #[test]
    fn test_record_from_page() {
        let r = Record::from_page(&page()).unwrap();
        assert_eq!(r.id, "n1");
        assert_eq!(r.title, "Weekly Review");
        assert!(r.archived);
        // The service-level trash flag is not the checkbox.
        let trashed = Record::from_page(&json!({
            "id": "t", "archived": true, "properties": {}
        }))
        .unwrap();
        assert!(!trashed.archived);
        assert_eq!(r.project_ids, vec!["p1", "p2"]);
        assert_eq!(r.status.as_deref(), Some("Doing"));
        assert_eq!(r.updated.as_deref(), Some("2026-01-02T00:00:00.000Z"));
    }

    #[test]
    fn test_record_defaults() {
        let r = Record::from_page(&json!({ "id": "x", "properties": {} })).unwrap();
        assert_eq!(r.title, "Untitled");
        assert!(!r.archived);
        assert!(r.project_ids.is_empty());
        assert!(r.status.is_none());
    }

    #[test]
    fn test_record_requires_id() {
        assert!(matches!(
            Record::from_page(&json!({ "properties": {} })),
            Err(NotesError::MalformedRemoteData(_))
        ));
    }

    #[test]
    fn test_query_page_from_value() {
        let page = QueryPage::from_value(json!({
            "results": [{ "id": "a" }],
            "has_more": true,
            "next_cursor": "c2"
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("c2"));

        assert!(QueryPage::from_value(json!({ "results": 3 })).is_err());
    }
}
