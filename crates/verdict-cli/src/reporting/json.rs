//! Machine-readable summary

use super::millis;
use serde_json::{json, Value};
use verdict_core::TestSummary;

/// One JSON object describing the whole run
pub fn summary_json(summary: &TestSummary) -> Value {
    let results: Vec<_> = summary
        .results()
        .iter()
        .map(|r| {
            json!({
                "name": r.name(),
                "passed": r.passed(),
                "error": r.error(),
                "duration_ms": millis(r.duration()),
            })
        })
        .collect();

    json!({
        "tests": summary.total(),
        "passed": summary.passed(),
        "failed": summary.failed(),
        "results": results,
    })
}
