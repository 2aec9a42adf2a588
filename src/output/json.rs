//! JSON output reporter

use std::io::Write;

use serde::Serialize;

use crate::engine::{LintRun, LinterOutcome};
use crate::output::{JsonReporter, ReportError, Reporter};
use crate::rules::Lint;

#[derive(Serialize)]
struct JsonReport<'a> {
    lint_count: usize,
    lints: Vec<&'a Lint>,
    outcomes: &'a [LinterOutcome],
}

impl Reporter for JsonReporter {
    /// Lints are written in the same order as the text report.
    fn emit(&self, run: &LintRun, out: &mut dyn Write) -> Result<(), ReportError> {
        let report = JsonReport {
            lint_count: run.lints.len(),
            lints: run.lints.sorted(),
            outcomes: &run.outcomes,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_helpers::sample_run;

    fn emit(run: &LintRun) -> serde_json::Value {
        let mut out = Vec::new();
        JsonReporter.emit(run, &mut out).expect("emit");
        serde_json::from_slice(&out).expect("parse json")
    }

    #[test]
    fn lints_are_sorted_and_tagged() {
        let parsed = emit(&sample_run());
        assert_eq!(parsed["lint_count"], 4);

        let lints = parsed["lints"].as_array().expect("lints array");
        assert_eq!(lints[0]["linter_id"], "table-cycle");
        assert_eq!(lints[0]["subject"]["scope"], "catalog");
        assert_eq!(lints[0]["value"], true);
        assert_eq!(lints[1]["subject"]["table"]["name"], "audit_log");
        assert_eq!(lints[1]["severity"], "high");
        assert!(lints[1].get("value").is_none());
    }

    #[test]
    fn object_subjects_carry_kind_and_name() {
        let parsed = emit(&sample_run());
        let redundant = parsed["lints"]
            .as_array()
            .expect("lints array")
            .iter()
            .find(|l| l["linter_id"] == "redundant-indexes")
            .expect("redundant index lint");
        assert_eq!(redundant["subject"]["object"]["kind"], "index");
        assert_eq!(redundant["subject"]["object"]["name"], "idx_orders_customer");
    }

    #[test]
    fn outcomes_are_included() {
        let parsed = emit(&sample_run());
        let outcomes = parsed["outcomes"].as_array().expect("outcomes array");
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[4]["status"]["status"], "skipped");
        assert_eq!(outcomes[4]["status"]["reason"], "no database connection");
    }

    #[test]
    fn empty_run_is_valid_json() {
        let parsed = emit(&LintRun::default());
        assert_eq!(parsed["lint_count"], 0);
        assert!(parsed["lints"].as_array().expect("array").is_empty());
    }
}
