//! Typed HTTP client for the Notion REST API.

use super::{Collection, QueryPage, RateLimiter, RecordStore};
use crate::config::Config;
use crate::error::{NotesError, Result};
use crate::filters::{ARCHIVED_PROPERTY, TITLE_PROPERTY};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Reads and small writes
pub const LIGHT_TIMEOUT: Duration = Duration::from_secs(10);
/// Page creation and block appends
pub const HEAVY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
enum Weight {
    Light,
    Heavy,
}

pub struct NotionClient {
    base_url: String,
    token: String,
    api_version: String,
    notes_db_id: String,
    projects_db_id: String,
    client: Client,
    limiter: Arc<dyn RateLimiter>,
    light_timeout: Duration,
    heavy_timeout: Duration,
}

// ── Notion API request bodies ───────────────────────

#[derive(Debug, Serialize)]
struct QueryBody {
    page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct AppendBody {
    children: Vec<Value>,
}

// ── Client impl ─────────────────────────────────────

impl NotionClient {
    pub fn new(config: &Config, limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            api_version: config.api_version.clone(),
            notes_db_id: config.notes_db_id.clone(),
            projects_db_id: config.projects_db_id.clone(),
            client: Client::new(),
            limiter,
            light_timeout: LIGHT_TIMEOUT,
            heavy_timeout: HEAVY_TIMEOUT,
        }
    }

    /// Override the per-call timeouts.
    pub fn with_timeouts(mut self, light: Duration, heavy: Duration) -> Self {
        self.light_timeout = light;
        self.heavy_timeout = heavy;
        self
    }

    fn database_id(&self, collection: Collection) -> &str {
        match collection {
            Collection::Notes => &self.notes_db_id,
            Collection::Projects => &self.projects_db_id,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, req: RequestBuilder, weight: Weight) -> RequestBuilder {
        let timeout = match weight {
            Weight::Light => self.light_timeout,
            Weight::Heavy => self.heavy_timeout,
        };
        req.bearer_auth(&self.token)
            .header("Notion-Version", &self.api_version)
            .timeout(timeout)
    }

    /// Send a request and decode the JSON body, mapping failures to `NotesError`.
    async fn send(&self, req: RequestBuilder, context: &str) -> Result<Value> {
        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                NotesError::transport(context, "request timed out")
            } else {
                NotesError::transport(context, e)
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            log::debug!("[Notion] {} -> HTTP {}: {}", context, status, body);
            return Err(NotesError::transport(
                context,
                format!("HTTP {}: {}", status, api_error_message(&body)),
            ));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| NotesError::malformed(format!("{}: {}", context, e)))
    }
}

/// Pull the service's `message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[async_trait]
impl RecordStore for NotionClient {
    async fn query(
        &self,
        collection: Collection,
        filter: Option<Value>,
        page_size: usize,
        start_cursor: Option<String>,
    ) -> Result<QueryPage> {
        let body = QueryBody {
            page_size,
            filter,
            start_cursor,
        };
        let url = self.url(&format!("databases/{}/query", self.database_id(collection)));
        log::debug!("[Notion] Querying {} (page_size={})", collection.label(), page_size);

        let req = self.authed(self.client.post(url).json(&body), Weight::Light);
        let value = self.send(req, "API request failed").await?;
        QueryPage::from_value(value)
    }

    async fn get_page(&self, id: &str) -> Result<Value> {
        let req = self.authed(self.client.get(self.url(&format!("pages/{}", id))), Weight::Light);
        self.send(req, &format!("Failed to fetch page {}", id)).await
    }

    async fn create_page(
        &self,
        collection: Collection,
        title: &str,
        children: Vec<Value>,
    ) -> Result<Value> {
        let mut body = json!({
            "parent": { "database_id": self.database_id(collection) },
            "properties": {
                TITLE_PROPERTY: {
                    "title": [{ "type": "text", "text": { "content": title } }]
                },
                ARCHIVED_PROPERTY: { "checkbox": false }
            }
        });
        if !children.is_empty() {
            body["children"] = Value::Array(children);
        }

        log::info!("[Notion] Creating page '{}' in {}", title, collection.label());
        let req = self.authed(self.client.post(self.url("pages")).json(&body), Weight::Heavy);
        self.send(req, "Failed to create note").await
    }

    async fn update_properties(&self, id: &str, properties: Value) -> Result<Value> {
        let body = json!({ "properties": properties });
        let req = self.authed(
            self.client.patch(self.url(&format!("pages/{}", id))).json(&body),
            Weight::Light,
        );
        self.send(req, &format!("Failed to update page {}", id)).await
    }

    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<String>,
    ) -> Result<QueryPage> {
        let mut req = self
            .client
            .get(self.url(&format!("blocks/{}/children", block_id)))
            .query(&[("page_size", super::MAX_PAGE_SIZE.to_string())]);
        if let Some(cursor) = start_cursor {
            req = req.query(&[("start_cursor", cursor)]);
        }

        let value = self
            .send(
                self.authed(req, Weight::Light),
                &format!("Failed to fetch blocks for {}", block_id),
            )
            .await?;
        QueryPage::from_value(value)
    }

    async fn append_children(&self, block_id: &str, children: Vec<Value>) -> Result<()> {
        log::debug!("[Notion] Appending {} blocks to {}", children.len(), block_id);
        let body = AppendBody { children };
        let req = self.authed(
            self.client
                .patch(self.url(&format!("blocks/{}/children", block_id)))
                .json(&body),
            Weight::Heavy,
        );
        self.send(req, "Failed to append blocks").await?;
        Ok(())
    }

    async fn delete_block(&self, block_id: &str) -> Result<()> {
        let req = self.authed(
            self.client.delete(self.url(&format!("blocks/{}", block_id))),
            Weight::Light,
        );
        self.send(req, "Failed to delete block").await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<Value> {
        let req = self.authed(self.client.get(self.url("users/me")), Weight::Light);
        self.send(req, "Cannot connect to Notion API").await
    }

    async fn pace(&self) {
        self.limiter.pause().await;
    }
}
