//! Configuration and connectivity checks.

use crate::client::{Collection, FixedDelay, NotionClient, RecordStore};
use crate::config::{self, Config};
use notion_notes_types::{CheckResult, ValidationReport};
use std::sync::Arc;

fn record(report: &mut ValidationReport, name: &str, outcome: Result<String, String>) {
    let (passed, message) = match outcome {
        Ok(msg) => (true, msg),
        Err(msg) => {
            report.errors.push(format!("{}: {}", name, msg));
            (false, msg)
        }
    };
    report.checks.push(CheckResult {
        name: name.to_string(),
        passed,
        message: Some(message),
    });
}

/// Check local configuration, then talk to the API if that succeeded.
pub async fn validate() -> ValidationReport {
    let mut report = ValidationReport::default();

    let token = config::notion_token();
    record(
        &mut report,
        "credentials",
        token
            .as_ref()
            .map(|_| "NOTION_TOKEN found".to_string())
            .map_err(|e| e.to_string()),
    );

    let notes = config::notes_db_id();
    record(
        &mut report,
        "notes_database_id",
        notes
            .as_ref()
            .map(|id| format!("Notes database {}", id))
            .map_err(|e| e.to_string()),
    );

    let projects = config::projects_db_id();
    record(
        &mut report,
        "projects_database_id",
        projects
            .as_ref()
            .map(|id| format!("Projects database {}", id))
            .map_err(|e| e.to_string()),
    );

    if std::env::var(config::env_vars::NOTION_TOKEN).is_err() {
        report
            .warnings
            .push("NOTION_TOKEN not set in the environment; using the credentials file".into());
    }

    let (Ok(token), Ok(notes_db_id), Ok(projects_db_id)) = (token, notes, projects) else {
        report
            .warnings
            .push("Skipping API checks until configuration is fixed".to_string());
        return report;
    };

    let config = Config {
        token,
        notes_db_id,
        projects_db_id,
        base_url: config::base_url(),
        api_version: config::api_version(),
        rate_limit: config::rate_limit(),
    };
    let client = NotionClient::new(&config, Arc::new(FixedDelay::new(config.rate_limit)));
    check_connectivity(&client, &mut report).await;
    report
}

/// Token accepted, and both databases answer a one-row query.
pub async fn check_connectivity(store: &dyn RecordStore, report: &mut ValidationReport) {
    let user = store.current_user().await.map(|user| {
        let name = user
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("integration");
        format!("Authenticated as {}", name)
    });
    let authenticated = user.is_ok();
    record(report, "api_token", user.map_err(|e| e.to_string()));
    if !authenticated {
        return;
    }

    for collection in [Collection::Notes, Collection::Projects] {
        store.pace().await;
        let outcome = store
            .query(collection, None, 1, None)
            .await
            .map(|_| format!("{} database is accessible", collection.label()))
            .map_err(|e| e.to_string());
        record(report, &format!("{}_database", collection.label()), outcome);
    }
}
