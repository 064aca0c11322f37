//! Public output types for vercel-env command responses.
//!
//! These are the shapes serialized into the JSON envelope when the CLI runs
//! with `--json`, and returned to library callers of the batch procedures.

use serde::Serialize;

// ============================================================================
// Bulk Operations (for commands that process multiple items)
// ============================================================================

/// Standardized bulk execution result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult<T: Serialize> {
    pub action: String,
    pub target: String,
    pub dry_run: bool,
    pub results: Vec<ItemOutcome<T>>,
    pub summary: BulkSummary,
}

/// Outcome for a single item in a bulk operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome<T: Serialize> {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(flatten)]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of bulk operation results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl<T: Serialize> ItemOutcome<T> {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

impl<T: Serialize> BulkResult<T> {
    pub fn new(action: impl Into<String>, target: impl Into<String>, dry_run: bool) -> Self {
        Self {
            action: action.into(),
            target: target.into(),
            dry_run,
            results: Vec::new(),
            summary: BulkSummary::default(),
        }
    }

    pub fn record_success(&mut self, id: String, result: T) {
        self.summary.total += 1;
        self.summary.succeeded += 1;
        self.results.push(ItemOutcome {
            id,
            result: Some(result),
            error: None,
        });
    }

    pub fn record_failure(&mut self, id: String, result: Option<T>, error: String) {
        self.summary.total += 1;
        self.summary.failed += 1;
        self.results.push(ItemOutcome {
            id,
            result,
            error: Some(error),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tracks_recorded_items() {
        let mut bulk: BulkResult<String> = BulkResult::new("env.add", "production", false);
        bulk.record_success("A".to_string(), "ok".to_string());
        bulk.record_failure("B".to_string(), None, "boom".to_string());

        assert_eq!(
            bulk.summary,
            BulkSummary {
                total: 2,
                succeeded: 1,
                failed: 1,
            }
        );
        assert!(bulk.results[0].succeeded());
        assert!(!bulk.results[1].succeeded());
    }

    #[test]
    fn failed_item_serializes_error() {
        let mut bulk: BulkResult<serde_json::Value> = BulkResult::new("env.rm", "preview", true);
        bulk.record_failure("B".to_string(), None, "missing".to_string());

        let json = serde_json::to_value(&bulk).unwrap();
        assert_eq!(json["dryRun"], true);
        assert_eq!(json["results"][0]["id"], "B");
        assert_eq!(json["results"][0]["error"], "missing");
        assert_eq!(json["summary"]["failed"], 1);
    }
}
