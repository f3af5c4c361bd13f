use crate::error::{NotesError, Result};
use crate::ids;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Bearer token; wins over the credentials file when set.
    pub const NOTION_TOKEN: &str = "NOTION_TOKEN";
    /// Path of the `KEY=value` file holding `NOTION_TOKEN=`.
    pub const CREDENTIALS_FILE: &str = "NOTES_CREDENTIALS_FILE";
    pub const NOTES_DB_ID: &str = "NOTES_DB_ID";
    pub const PROJECTS_DB_ID: &str = "PROJECTS_DB_ID";
    pub const BASE_URL: &str = "NOTION_BASE_URL";
    pub const API_VERSION: &str = "NOTION_API_VERSION";
    /// Pause inserted between consecutive calls to the same collection.
    pub const RATE_LIMIT_MS: &str = "NOTES_RATE_LIMIT_MS";
}

/// Default values
pub mod defaults {
    pub const CREDENTIALS_FILE: &str = "/etc/keep-to-notion/env.conf";
    pub const BASE_URL: &str = "https://api.notion.com/v1";
    pub const API_VERSION: &str = "2022-06-28";
    pub const RATE_LIMIT_MS: u64 = 300;
    pub const NOTES_DB_PLACEHOLDER: &str = "YOUR_NOTES_DATABASE_ID_HERE";
    pub const PROJECTS_DB_PLACEHOLDER: &str = "YOUR_PROJECTS_DATABASE_ID_HERE";
}

/// Everything a client needs to talk to the workspace.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub notes_db_id: String,
    pub projects_db_id: String,
    pub base_url: String,
    pub api_version: String,
    pub rate_limit: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: notion_token()?,
            notes_db_id: notes_db_id()?,
            projects_db_id: projects_db_id()?,
            base_url: base_url(),
            api_version: api_version(),
            rate_limit: rate_limit(),
        })
    }
}

/// Get the credentials file path
pub fn credentials_file() -> PathBuf {
    env::var(env_vars::CREDENTIALS_FILE)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(defaults::CREDENTIALS_FILE))
}

/// Resolve the bearer token: environment first, then the credentials file.
pub fn notion_token() -> Result<String> {
    if let Ok(token) = env::var(env_vars::NOTION_TOKEN) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }
    load_token(&credentials_file())
}

/// Read `NOTION_TOKEN=` from a credentials file.
pub fn load_token(path: &Path) -> Result<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(NotesError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Err(e) => {
            return Err(NotesError::Config(format!(
                "Cannot read {}: {}",
                path.display(),
                e
            )));
        }
    };

    parse_token(&contents).ok_or_else(|| {
        NotesError::Config(format!("NOTION_TOKEN not found in {}", path.display()))
    })
}

/// Find the first non-empty `NOTION_TOKEN=` value in `KEY=value` text.
pub fn parse_token(contents: &str) -> Option<String> {
    contents
        .lines()
        .filter_map(|line| line.strip_prefix("NOTION_TOKEN="))
        .map(|v| v.trim().trim_matches('"').to_string())
        .find(|v| !v.is_empty())
}

/// Get the Notes database id
pub fn notes_db_id() -> Result<String> {
    database_id(env_vars::NOTES_DB_ID, defaults::NOTES_DB_PLACEHOLDER)
}

/// Get the Projects database id
pub fn projects_db_id() -> Result<String> {
    database_id(env_vars::PROJECTS_DB_ID, defaults::PROJECTS_DB_PLACEHOLDER)
}

fn database_id(var: &str, placeholder: &str) -> Result<String> {
    let raw = env::var(var).unwrap_or_default();
    let raw = raw.trim();
    if raw.is_empty() || raw == placeholder {
        return Err(NotesError::Config(format!(
            "{} is not configured. Set it to your database id.",
            var
        )));
    }
    ids::normalize_id(raw)
        .map_err(|_| NotesError::Config(format!("{} is not a valid database id: {}", var, raw)))
}

/// Get the API base URL (no trailing slash)
pub fn base_url() -> String {
    env::var(env_vars::BASE_URL)
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| defaults::BASE_URL.to_string())
}

/// Get the `Notion-Version` header value
pub fn api_version() -> String {
    env::var(env_vars::API_VERSION).unwrap_or_else(|_| defaults::API_VERSION.to_string())
}

/// Get the inter-call pause
pub fn rate_limit() -> Duration {
    let ms = env::var(env_vars::RATE_LIMIT_MS)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults::RATE_LIMIT_MS);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_token() {
        let conf = "# keep-to-notion\nOTHER=1\nNOTION_TOKEN=secret_abc \n";
        assert_eq!(parse_token(conf), Some("secret_abc".to_string()));
        assert_eq!(parse_token("NOTION_TOKEN=\nFOO=bar"), None);
        assert_eq!(parse_token(""), None);
    }

    #[test]
    fn test_load_token_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NOTION_TOKEN=ntn_123").unwrap();
        assert_eq!(load_token(file.path()).unwrap(), "ntn_123");
    }

    #[test]
    fn test_load_token_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_token(&dir.path().join("env.conf")).unwrap_err();
        assert!(err.to_string().starts_with("Config file not found"));
    }

    #[test]
    fn test_load_token_without_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SOMETHING_ELSE=1").unwrap();
        let err = load_token(file.path()).unwrap_err();
        assert!(err.to_string().contains("NOTION_TOKEN not found"));
    }

    #[test]
    fn test_placeholder_database_id_rejected() {
        let err = database_id("NOTES_DB_ID_TEST_UNSET_VAR", "PLACEHOLDER").unwrap_err();
        assert!(matches!(err, NotesError::Config(_)));
    }
}
