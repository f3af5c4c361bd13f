//! The single JSON document written to stdout.

use crate::error::{NotesError, Result};
use notion_notes_types::Envelope;
use serde_json::Value;
use std::io::Write;

/// Envelope and process exit code for an operation's outcome.
pub fn envelope_for(outcome: Result<Value>) -> (Envelope<Value>, i32) {
    match outcome {
        Ok(data) => (Envelope::ok(data), 0),
        Err(e) => (error_envelope(&e), 1),
    }
}

pub fn error_envelope(err: &NotesError) -> Envelope<Value> {
    Envelope::err(err.to_string(), err.details())
}

/// Pretty-print the envelope on stdout. Non-ASCII text is written as-is.
pub fn emit(envelope: &Envelope<Value>) {
    let rendered = serde_json::to_string_pretty(envelope).unwrap_or_else(|e| {
        format!(
            "{{\"success\": false, \"error\": \"Failed to serialize output: {}\"}}",
            e
        )
    });
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", rendered) {
        log::error!("[Output] Failed to write to stdout: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let (env, code) = envelope_for(Ok(json!({ "count": 2 })));
        assert_eq!(code, 0);
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": true, "data": { "count": 2 } })
        );
    }

    #[test]
    fn test_ambiguous_envelope_has_matches() {
        let err = NotesError::Ambiguous {
            collection: "projects",
            query: "web".to_string(),
            matches: vec!["Website".to_string(), "Webhooks".to_string()],
        };
        let (env, code) = envelope_for(Err(err));
        assert_eq!(code, 1);
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["details"]["matches"], json!(["Website", "Webhooks"]));
        assert!(v.get("data").is_none());
    }

    #[test]
    fn test_validation_failure_carries_report() {
        let report = json!({ "checks": [], "errors": ["credentials: missing"], "warnings": [] });
        let (env, code) = envelope_for(Err(NotesError::ValidationFailed(report.clone())));
        assert_eq!(code, 1);
        assert_eq!(env.error.as_deref(), Some("Validation failed"));
        assert_eq!(env.details, Some(report));
    }

    #[test]
    fn test_non_ascii_preserved() {
        let (env, _) = envelope_for(Ok(json!({ "name": "Café ☕" })));
        let rendered = serde_json::to_string_pretty(&env).unwrap();
        assert!(rendered.contains("Café ☕"));
    }
}
