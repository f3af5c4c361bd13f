//! Notes and projects in a Notion workspace, driven from the command line.
//!
//! Two pieces carry the logic: `blocks` converts between markdown-ish text
//! and the block representation, and `resolver` turns a human-typed name into
//! exactly one record. Everything in `commands` is orchestration over those
//! and a `RecordStore`.

pub mod blocks;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod ids;
pub mod output;
pub mod resolver;

pub use client::{Collection, Record, RecordStore};
pub use error::{NotesError, Result};
