use std::fmt;

use serde::Serialize;

use crate::catalog::TableRef;
use crate::rules::{LinterId, Severity};

/// Optional typed payload attached to a lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LintValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for LintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintValue::Bool(b) => write!(f, "{b}"),
            LintValue::Integer(n) => write!(f, "{n}"),
            LintValue::Text(s) => f.write_str(s),
            LintValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for LintValue {
    fn from(value: bool) -> Self {
        LintValue::Bool(value)
    }
}

impl From<i64> for LintValue {
    fn from(value: i64) -> Self {
        LintValue::Integer(value)
    }
}

impl From<String> for LintValue {
    fn from(value: String) -> Self {
        LintValue::Text(value)
    }
}

impl From<&str> for LintValue {
    fn from(value: &str) -> Self {
        LintValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for LintValue {
    fn from(value: Vec<String>) -> Self {
        LintValue::List(value)
    }
}

/// A named object inside a table that a lint points at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum LintObject {
    Column(String),
    Index(String),
    ForeignKey(String),
}

impl LintObject {
    pub fn name(&self) -> &str {
        match self {
            LintObject::Column(n) | LintObject::Index(n) | LintObject::ForeignKey(n) => n,
        }
    }
}

impl fmt::Display for LintObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintObject::Column(n) => write!(f, "column {n}"),
            LintObject::Index(n) => write!(f, "index {n}"),
            LintObject::ForeignKey(n) => write!(f, "foreign key {n}"),
        }
    }
}

/// What a lint is about: the catalog as a whole or one table.
///
/// Declaration order puts catalog lints ahead of table lints when sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum LintSubject {
    Catalog,
    Table {
        table: TableRef,
        #[serde(skip_serializing_if = "Option::is_none")]
        object: Option<LintObject>,
    },
}

impl LintSubject {
    pub fn table(&self) -> Option<&TableRef> {
        match self {
            LintSubject::Catalog => None,
            LintSubject::Table { table, .. } => Some(table),
        }
    }
}

impl fmt::Display for LintSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSubject::Catalog => f.write_str("catalog"),
            LintSubject::Table { table, .. } => write!(f, "{table}"),
        }
    }
}

/// A single finding. Immutable once created; never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lint {
    pub linter_id: LinterId,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<LintValue>,
    pub subject: LintSubject,
}

impl Lint {
    pub fn new(
        linter_id: LinterId,
        severity: Severity,
        message: impl Into<String>,
        value: Option<LintValue>,
        subject: LintSubject,
    ) -> Self {
        Self {
            linter_id,
            severity,
            message: message.into(),
            value,
            subject,
        }
    }

    pub fn is_catalog_lint(&self) -> bool {
        self.subject == LintSubject::Catalog
    }

    /// Value text for display. Boolean values carry no information beyond
    /// the message itself and are hidden.
    pub fn value_text(&self) -> Option<String> {
        match &self.value {
            None | Some(LintValue::Bool(_)) => None,
            Some(v) => Some(v.to_string()),
        }
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.linter_id, self.message)?;
        if let Some(value) = self.value_text() {
            write!(f, ": {value}")?;
        }
        Ok(())
    }
}
