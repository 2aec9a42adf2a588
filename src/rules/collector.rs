use std::cmp::Reverse;

use serde::Serialize;

use crate::catalog::TableRef;
use crate::rules::{Lint, LintSubject};

/// Append-only, ordered sink for lints.
///
/// Lints are kept in the order they were added. [`LintCollector::sorted`]
/// gives the reporting order without touching the stored sequence.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LintCollector {
    lints: Vec<Lint>,
}

impl LintCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, lint: Lint) {
        self.lints.push(lint);
    }

    /// Move every lint of `other` to the end of this collector.
    pub fn extend(&mut self, other: LintCollector) {
        self.lints.extend(other.lints);
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lint> {
        self.lints.iter()
    }

    pub fn for_table<'a>(&'a self, table: &'a TableRef) -> impl Iterator<Item = &'a Lint> + 'a {
        self.lints
            .iter()
            .filter(move |l| l.subject.table() == Some(table))
    }

    pub fn for_catalog(&self) -> impl Iterator<Item = &Lint> {
        self.lints
            .iter()
            .filter(|l| l.subject == LintSubject::Catalog)
    }

    /// Lints ordered by subject, then severity (most severe first), then
    /// linter id, then message.
    pub fn sorted(&self) -> Vec<&Lint> {
        let mut lints: Vec<&Lint> = self.lints.iter().collect();
        lints.sort_by(|a, b| {
            (&a.subject, Reverse(a.severity), a.linter_id.as_str(), &a.message).cmp(&(
                &b.subject,
                Reverse(b.severity),
                b.linter_id.as_str(),
                &b.message,
            ))
        });
        lints
    }

    pub fn into_vec(self) -> Vec<Lint> {
        self.lints
    }
}

impl<'a> IntoIterator for &'a LintCollector {
    type Item = &'a Lint;
    type IntoIter = std::slice::Iter<'a, Lint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{LinterId, Severity};

    fn lint(id: LinterId, severity: Severity, table: Option<&str>, message: &str) -> Lint {
        let subject = match table {
            Some(name) => LintSubject::Table {
                table: TableRef::new("public", name),
                object: None,
            },
            None => LintSubject::Catalog,
        };
        Lint::new(id, severity, message, None, subject)
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut collector = LintCollector::new();
        collector.add(lint(LinterId::TableWithNoRemarks, Severity::Low, Some("b"), "x"));
        collector.add(lint(LinterId::TableCycle, Severity::High, None, "y"));
        let messages: Vec<_> = collector.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["x", "y"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut collector = LintCollector::new();
        let l = lint(LinterId::TableWithNoRemarks, Severity::Low, Some("t"), "same");
        collector.add(l.clone());
        collector.add(l);
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_sorted_by_subject_then_severity_desc() {
        let mut collector = LintCollector::new();
        collector.add(lint(LinterId::TableWithNoRemarks, Severity::Low, Some("b"), "low b"));
        collector.add(lint(LinterId::TableWithNoPrimaryKey, Severity::High, Some("b"), "high b"));
        collector.add(lint(LinterId::TableWithNoRemarks, Severity::Low, Some("a"), "low a"));
        collector.add(lint(LinterId::TableCycle, Severity::High, None, "catalog"));

        let messages: Vec<_> = collector
            .sorted()
            .into_iter()
            .map(|l| l.message.as_str())
            .collect();
        assert_eq!(messages, vec!["catalog", "low a", "high b", "low b"]);
    }

    #[test]
    fn test_for_table_and_for_catalog() {
        let mut collector = LintCollector::new();
        collector.add(lint(LinterId::TableWithNoRemarks, Severity::Low, Some("a"), "a"));
        collector.add(lint(LinterId::TableWithNoRemarks, Severity::Low, Some("b"), "b"));
        collector.add(lint(LinterId::TableCycle, Severity::High, None, "c"));

        let a = TableRef::new("public", "a");
        assert_eq!(collector.for_table(&a).count(), 1);
        assert_eq!(collector.for_catalog().count(), 1);
    }

    #[test]
    fn test_extend_appends() {
        let mut first = LintCollector::new();
        first.add(lint(LinterId::TableCycle, Severity::High, None, "1"));
        let mut second = LintCollector::new();
        second.add(lint(LinterId::TableCycle, Severity::High, None, "2"));
        first.extend(second);
        let messages: Vec<_> = first.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["1", "2"]);
    }
}
