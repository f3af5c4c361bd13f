//! In-memory `RecordStore` used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_notes::blocks::ContentBlock;
use notion_notes::client::{NoDelay, QueryPage, RateLimiter};
use notion_notes::{Collection, NotesError, RecordStore, Result};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Id in the dashed form `normalize_id` produces.
pub fn page_id(n: u32) -> String {
    format!("{:08x}-0000-4000-8000-{:012x}", n, n)
}

#[derive(Default)]
struct State {
    /// Insertion-ordered pages
    pages: Vec<(Collection, Value)>,
    children: HashMap<String, Vec<Value>>,
    next_id: u32,
    fail_updates: HashSet<String>,
    fail_user: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub queries: usize,
    pub creates: usize,
    /// Size of each append call
    pub appends: Vec<usize>,
    pub deletes: usize,
    pub updates: usize,
    /// Read from the store's limiter
    pub pauses: usize,
    pub list_children: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    calls: Mutex<Calls>,
    limiter: NoDelay,
}

fn title_of(page: &Value) -> String {
    page["properties"]["Name"]["title"]
        .as_array()
        .map(|runs| {
            runs.iter()
                .filter_map(|r| r["plain_text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn matches(page: &Value, filter: &Value) -> bool {
    if let Some(all) = filter.get("and").and_then(Value::as_array) {
        return all.iter().all(|f| matches(page, f));
    }
    let prop = &page["properties"][filter["property"].as_str().unwrap_or_default()];

    if let Some(cond) = filter.get("title") {
        let needle = cond["contains"].as_str().unwrap_or_default().to_lowercase();
        return title_of(page).to_lowercase().contains(&needle);
    }
    if let Some(cond) = filter.get("checkbox") {
        return prop["checkbox"].as_bool().unwrap_or(false) == cond["equals"].as_bool().unwrap();
    }
    if let Some(cond) = filter.get("relation") {
        return prop["relation"]
            .as_array()
            .is_some_and(|rels| rels.iter().any(|r| r["id"] == cond["contains"]));
    }
    false
}

fn paginate(items: Vec<Value>, page_size: usize, cursor: Option<String>) -> QueryPage {
    let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
    let end = (start + page_size).min(items.len());
    let has_more = end < items.len();
    QueryPage {
        results: items[start..end].to_vec(),
        has_more,
        next_cursor: has_more.then(|| end.to_string()),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(state: &mut State) -> String {
        state.next_id += 1;
        page_id(state.next_id)
    }

    fn insert(&self, collection: Collection, title: &str, properties: Value) -> String {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        let mut props = json!({
            "Name": { "type": "title", "title": [{ "plain_text": title }] },
            "Archived": { "type": "checkbox", "checkbox": false }
        });
        if let (Some(props), Some(extra)) = (props.as_object_mut(), properties.as_object()) {
            props.extend(extra.clone());
        }
        let page = json!({
            "object": "page",
            "id": id,
            "created_time": "2026-03-01T09:00:00.000Z",
            "last_edited_time": "2026-03-02T09:00:00.000Z",
            "url": format!("https://www.notion.so/{}", id.replace('-', "")),
            "properties": props
        });
        state.pages.push((collection, page));
        state.children.insert(id.clone(), Vec::new());
        id
    }

    pub fn add_project(&self, name: &str) -> String {
        self.insert(
            Collection::Projects,
            name,
            json!({ "Status": { "type": "status", "status": { "name": "In progress" } } }),
        )
    }

    pub fn add_note(&self, title: &str) -> String {
        self.insert(Collection::Notes, title, json!({}))
    }

    /// A note related to `project`.
    pub fn add_note_in(&self, title: &str, project: &str) -> String {
        self.insert(
            Collection::Notes,
            title,
            json!({ "Project": { "type": "relation", "relation": [{ "id": project }] } }),
        )
    }

    pub fn add_blocks(&self, id: &str, blocks: &[ContentBlock]) {
        let wire: Vec<Value> = blocks.iter().filter_map(ContentBlock::to_wire).collect();
        self.push_children(id, wire);
    }

    pub fn add_raw_blocks(&self, id: &str, blocks: Vec<Value>) {
        self.push_children(id, blocks);
    }

    fn push_children(&self, id: &str, blocks: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        let mut with_ids = Vec::with_capacity(blocks.len());
        for mut block in blocks {
            block["id"] = json!(Self::next_id(&mut state));
            with_ids.push(block);
        }
        state
            .children
            .entry(id.to_string())
            .or_default()
            .extend(with_ids);
    }

    pub fn set_archived(&self, id: &str, archived: bool) {
        let mut state = self.state.lock().unwrap();
        if let Some((_, page)) = state.pages.iter_mut().find(|(_, p)| p["id"] == id) {
            page["properties"]["Archived"]["checkbox"] = json!(archived);
        }
    }

    pub fn fail_updates_for(&self, id: &str) {
        self.state.lock().unwrap().fail_updates.insert(id.to_string());
    }

    pub fn fail_current_user(&self) {
        self.state.lock().unwrap().fail_user = true;
    }

    pub fn is_archived(&self, id: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .pages
            .iter()
            .find(|(_, p)| p["id"] == id)
            .map(|(_, p)| p["properties"]["Archived"]["checkbox"] == true)
            .unwrap_or(false)
    }

    pub fn children_of(&self, id: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .children
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn blocks_of(&self, id: &str) -> Vec<ContentBlock> {
        self.children_of(id)
            .iter()
            .map(ContentBlock::from_wire)
            .collect()
    }

    pub fn calls(&self) -> Calls {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.pauses = self.limiter.pauses();
        calls
    }

    fn record(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.calls.lock().unwrap());
    }
}

fn not_found(id: &str) -> NotesError {
    NotesError::transport(format!("Failed to fetch page {}", id), "HTTP 404 Not Found")
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query(
        &self,
        collection: Collection,
        filter: Option<Value>,
        page_size: usize,
        start_cursor: Option<String>,
    ) -> Result<QueryPage> {
        self.record(|c| c.queries += 1);
        let state = self.state.lock().unwrap();
        let hits: Vec<Value> = state
            .pages
            .iter()
            .filter(|(c, _)| *c == collection)
            .filter(|(_, p)| filter.as_ref().is_none_or(|f| matches(p, f)))
            .map(|(_, p)| p.clone())
            .collect();
        Ok(paginate(hits, page_size, start_cursor))
    }

    async fn get_page(&self, id: &str) -> Result<Value> {
        let state = self.state.lock().unwrap();
        state
            .pages
            .iter()
            .find(|(_, p)| p["id"] == id)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| not_found(id))
    }

    async fn create_page(
        &self,
        collection: Collection,
        title: &str,
        children: Vec<Value>,
    ) -> Result<Value> {
        assert!(children.len() <= 100, "create called with {} blocks", children.len());
        self.record(|c| c.creates += 1);
        let id = self.insert(collection, title, json!({}));
        self.push_children(&id, children);
        self.get_page(&id).await
    }

    async fn update_properties(&self, id: &str, properties: Value) -> Result<Value> {
        self.record(|c| c.updates += 1);
        {
            let mut state = self.state.lock().unwrap();
            if state.fail_updates.contains(id) {
                return Err(NotesError::transport(
                    format!("Failed to update page {}", id),
                    "HTTP 409: Conflict occurred while saving",
                ));
            }
            let (_, page) = state
                .pages
                .iter_mut()
                .find(|(_, p)| p["id"] == id)
                .ok_or_else(|| not_found(id))?;
            if let (Some(props), Some(patch)) =
                (page["properties"].as_object_mut(), properties.as_object())
            {
                props.extend(patch.clone());
            }
        }
        self.get_page(id).await
    }

    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<String>,
    ) -> Result<QueryPage> {
        self.record(|c| c.list_children += 1);
        let children = self
            .state
            .lock()
            .unwrap()
            .children
            .get(block_id)
            .cloned()
            .ok_or_else(|| not_found(block_id))?;
        Ok(paginate(children, 100, start_cursor))
    }

    async fn append_children(&self, block_id: &str, children: Vec<Value>) -> Result<()> {
        assert!(children.len() <= 100, "append called with {} blocks", children.len());
        if !self.state.lock().unwrap().children.contains_key(block_id) {
            return Err(not_found(block_id));
        }
        self.record(|c| c.appends.push(children.len()));
        self.push_children(block_id, children);
        Ok(())
    }

    async fn delete_block(&self, block_id: &str) -> Result<()> {
        self.record(|c| c.deletes += 1);
        let mut state = self.state.lock().unwrap();
        for blocks in state.children.values_mut() {
            if let Some(pos) = blocks.iter().position(|b| b["id"] == block_id) {
                blocks.remove(pos);
                return Ok(());
            }
        }
        Err(not_found(block_id))
    }

    async fn current_user(&self) -> Result<Value> {
        if self.state.lock().unwrap().fail_user {
            return Err(NotesError::transport(
                "API request failed",
                "HTTP 401 Unauthorized: API token is invalid.",
            ));
        }
        Ok(json!({ "object": "user", "type": "bot", "name": "Notes Bot" }))
    }

    async fn pace(&self) {
        self.limiter.pause().await;
    }
}
