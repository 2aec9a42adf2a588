//! Output reporters for different formats
//!
//! Supports human-readable text and JSON output.

use std::io::Write;

use thiserror::Error;

use crate::engine::LintRun;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Trait for output format reporters.
pub trait Reporter {
    /// Write the lints (and, where the format carries them, linter
    /// outcomes) of one run.
    fn emit(&self, run: &LintRun, out: &mut dyn Write) -> Result<(), ReportError>;
}

/// Lints grouped by subject, catalog first, most severe first in each
/// group.
pub struct TextReporter;

/// The whole run as one pretty-printed JSON document.
pub struct JsonReporter;

/// Reporter for a configured format name. `None` for unknown formats.
pub fn reporter_for(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "text" => Some(Box::new(TextReporter)),
        "json" => Some(Box::new(JsonReporter)),
        _ => None,
    }
}

pub mod json;
pub mod text;

#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::catalog::TableRef;
    use crate::engine::{LintRun, LinterOutcome, LinterStatus};
    use crate::rules::{Lint, LintObject, LintSubject, LintValue, LinterId, Severity};

    /// A small run with a catalog lint, two tables and one failed linter.
    pub fn sample_run() -> LintRun {
        let mut run = LintRun::default();
        let orders = TableRef::new("public", "orders");
        run.lints.add(Lint::new(
            LinterId::TableWithNoRemarks,
            Severity::Low,
            "should have remarks",
            None,
            LintSubject::Table {
                table: orders.clone(),
                object: None,
            },
        ));
        run.lints.add(Lint::new(
            LinterId::RedundantIndexes,
            Severity::High,
            "redundant index",
            Some(LintValue::Text("idx_orders_customer".into())),
            LintSubject::Table {
                table: orders,
                object: Some(LintObject::Index("idx_orders_customer".into())),
            },
        ));
        run.lints.add(Lint::new(
            LinterId::TableWithNoPrimaryKey,
            Severity::High,
            "no primary key",
            None,
            LintSubject::Table {
                table: TableRef::new("public", "audit_log"),
                object: None,
            },
        ));
        run.lints.add(Lint::new(
            LinterId::TableCycle,
            Severity::High,
            "cycles in table relationships",
            Some(LintValue::Bool(true)),
            LintSubject::Catalog,
        ));
        for (id, status, count) in [
            (LinterId::TableWithNoRemarks, LinterStatus::Completed, 1),
            (LinterId::RedundantIndexes, LinterStatus::Completed, 1),
            (LinterId::TableWithNoPrimaryKey, LinterStatus::Completed, 1),
            (LinterId::TableCycle, LinterStatus::Completed, 1),
            (
                LinterId::TableEmpty,
                LinterStatus::Skipped("no database connection".into()),
                0,
            ),
        ] {
            run.outcomes.push(LinterOutcome {
                linter_id: id,
                status,
                lint_count: count,
                exceeds_threshold: false,
            });
        }
        run
    }
}
