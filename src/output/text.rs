//! Human-readable text output reporter
//!
//! ```text
//! public.orders
//!   HIGH     [redundant-indexes] redundant index: idx_orders_customer
//!   LOW      [table-with-no-remarks] should have remarks
//! ```

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::Write;

use crate::catalog::TableRef;
use crate::engine::{LintRun, LinterStatus};
use crate::output::{ReportError, Reporter, TextReporter};
use crate::rules::Lint;

/// Format the run: one block per subject, then linters that did not
/// complete, then a count.
fn format_run(run: &LintRun) -> String {
    let mut groups: BTreeMap<Option<&TableRef>, Vec<&Lint>> = BTreeMap::new();
    for lint in run.lints.sorted() {
        groups.entry(lint.subject.table()).or_default().push(lint);
    }

    // Writing to a String cannot fail.
    let mut buf = String::new();
    for (table, mut lints) in groups {
        lints.sort_by_key(|l| Reverse(l.severity));
        match table {
            Some(table) => {
                let _ = writeln!(buf, "{table}");
            }
            None => buf.push_str("catalog\n"),
        }
        for lint in lints {
            let _ = writeln!(buf, "  {:<8} {}", lint.severity.label(), lint);
        }
        buf.push('\n');
    }

    for outcome in &run.outcomes {
        let id = outcome.linter_id;
        match &outcome.status {
            LinterStatus::Completed => {}
            LinterStatus::Skipped(reason) => {
                let _ = writeln!(buf, "skipped {id}: {reason}");
            }
            LinterStatus::ConfigurationFailed(reason) => {
                let _ = writeln!(buf, "not configured {id}: {reason}");
            }
            LinterStatus::Failed(reason) => {
                let _ = writeln!(buf, "failed {id}: {reason}");
            }
        }
        if outcome.exceeds_threshold {
            let _ = writeln!(
                buf,
                "{id} exceeded its threshold with {} lint(s)",
                outcome.lint_count
            );
        }
    }

    let _ = writeln!(buf, "{} lint(s)", run.lints.len());
    buf
}

impl Reporter for TextReporter {
    fn emit(&self, run: &LintRun, out: &mut dyn Write) -> Result<(), ReportError> {
        out.write_all(format_run(run).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
