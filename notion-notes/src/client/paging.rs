//! Multi-call sequences over a `RecordStore`: paging, batching, bulk delete.
//!
//! Each sequence paces itself between calls; pages are accumulated in memory.

use super::{Collection, MAX_BLOCKS_PER_REQUEST, MAX_PAGE_SIZE, RecordStore};
use crate::error::Result;
use serde_json::Value;

/// Run a query to exhaustion, stopping early once `limit` results are in.
pub async fn query_all(
    store: &dyn RecordStore,
    collection: Collection,
    filter: Option<Value>,
    limit: usize,
) -> Result<Vec<Value>> {
    let page_size = limit.clamp(1, MAX_PAGE_SIZE);
    let mut results = Vec::new();
    let mut cursor = None;

    loop {
        let page = store
            .query(collection, filter.clone(), page_size, cursor)
            .await?;
        results.extend(page.results);

        if !page.has_more || results.len() >= limit || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
        store.pace().await;
    }

    results.truncate(limit);
    Ok(results)
}

/// Every child block of a page, across all result pages.
pub async fn fetch_all_children(store: &dyn RecordStore, block_id: &str) -> Result<Vec<Value>> {
    let mut blocks = Vec::new();
    let mut cursor = None;

    loop {
        let page = store.list_children(block_id, cursor).await?;
        blocks.extend(page.results);

        if !page.has_more || page.next_cursor.is_none() {
            break;
        }
        cursor = page.next_cursor;
        store.pace().await;
    }

    Ok(blocks)
}

/// Append blocks in batches of 100; returns how many were appended.
pub async fn append_batched(
    store: &dyn RecordStore,
    block_id: &str,
    blocks: Vec<Value>,
) -> Result<usize> {
    let mut added = 0;
    for chunk in blocks.chunks(MAX_BLOCKS_PER_REQUEST) {
        store.append_children(block_id, chunk.to_vec()).await?;
        added += chunk.len();
        store.pace().await;
    }
    Ok(added)
}

/// Create a page with its first 100 blocks and append the rest.
///
/// Returns the created page and the number of blocks written. Not atomic:
/// if an append fails the page stays behind, partially filled.
pub async fn create_with_blocks(
    store: &dyn RecordStore,
    collection: Collection,
    title: &str,
    mut blocks: Vec<Value>,
) -> Result<(Value, usize)> {
    let remaining = if blocks.len() > MAX_BLOCKS_PER_REQUEST {
        blocks.split_off(MAX_BLOCKS_PER_REQUEST)
    } else {
        Vec::new()
    };
    let initial = blocks.len();

    let page = store.create_page(collection, title, blocks).await?;

    let mut written = initial;
    if !remaining.is_empty() {
        let id = super::Record::from_page(&page)?.id;
        store.pace().await;
        written += append_batched(store, &id, remaining).await?;
    }

    Ok((page, written))
}

/// Delete every child block of a page; returns how many were removed.
pub async fn delete_all_children(store: &dyn RecordStore, block_id: &str) -> Result<usize> {
    let blocks = fetch_all_children(store, block_id).await?;
    let mut removed = 0;

    for block in &blocks {
        let Some(id) = block.get("id").and_then(Value::as_str) else {
            log::warn!("[Notion] Skipping child block without an id under {}", block_id);
            continue;
        };
        store.delete_block(id).await?;
        removed += 1;
        store.pace().await;
    }

    Ok(removed)
}
