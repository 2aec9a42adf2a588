use serde::Serialize;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::rules::{LinterProvider, LinterRun, Severity};

use super::{
    catalog_sql, column_types, foreign_key_mismatch, foreign_key_self_reference,
    foreign_key_with_no_indexes, null_columns_in_index, null_intended_columns, redundant_indexes,
    table_all_nullable_columns, table_cycle, table_empty, table_sql,
    table_with_badly_named_columns, table_with_incrementing_columns, table_with_no_indexes,
    table_with_no_primary_key, table_with_no_remarks, table_with_no_surrogate_primary_key,
    table_with_primary_key_not_first, table_with_quoted_names, table_with_single_column,
    useless_surrogate_key,
};

/// Strongly-typed linter identifier.
///
/// The kebab-case name is stable: it appears in every lint and is how
/// linters are addressed in configuration. Match statements are exhaustive,
/// so adding a variant forces a severity, description and factory entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum LinterId {
    // Relationships
    /// Cycles in foreign key relationships.
    TableCycle,
    /// Indexes whose columns extend another index's columns.
    RedundantIndexes,
    /// Foreign keys not covered by any index.
    ForeignKeyWithNoIndexes,
    /// Foreign key column type differs from the referenced column.
    ForeignKeyMismatch,
    /// Foreign key column that references itself.
    ForeignKeySelfReference,

    // Column groups
    /// Same column name with different data types across tables.
    ColumnTypes,
    /// Column name series such as `item1`, `item2`.
    TableWithIncrementingColumns,

    // Configured SQL
    /// Per-table SQL check from configuration.
    TableSql,
    /// Catalog-wide SQL check from configuration.
    CatalogSql,
    /// Tables with no rows.
    TableEmpty,

    // Table design
    TableWithNoIndexes,
    TableWithNoPrimaryKey,
    TableWithNoSurrogatePrimaryKey,
    TableWithNoRemarks,
    TableWithSingleColumn,
    TableWithPrimaryKeyNotFirst,
    TableWithQuotedNames,
    TableAllNullableColumns,

    // Column design
    NullColumnsInIndex,
    NullIntendedColumns,
    UselessSurrogateKey,
    TableWithBadlyNamedColumns,
}

impl LinterId {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for LinterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LinterId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for LinterId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown linter id '{s}'")))
    }
}

// `FromStr` is derived via `EnumString` from the kebab-case names.

impl LinterProvider for LinterId {
    fn id(&self) -> Self {
        *self
    }

    fn default_severity(&self) -> Severity {
        match self {
            Self::ForeignKeySelfReference => Severity::Critical,

            Self::TableCycle
            | Self::RedundantIndexes
            | Self::ForeignKeyMismatch
            | Self::TableWithNoPrimaryKey => Severity::High,

            Self::ForeignKeyWithNoIndexes
            | Self::ColumnTypes
            | Self::TableWithIncrementingColumns
            | Self::TableSql
            | Self::CatalogSql
            | Self::TableWithNoIndexes
            | Self::TableWithQuotedNames
            | Self::TableWithBadlyNamedColumns => Severity::Medium,

            Self::TableEmpty
            | Self::TableWithNoSurrogatePrimaryKey
            | Self::TableWithNoRemarks
            | Self::TableWithSingleColumn
            | Self::TableWithPrimaryKeyNotFirst
            | Self::TableAllNullableColumns
            | Self::NullColumnsInIndex
            | Self::NullIntendedColumns
            | Self::UselessSurrogateKey => Severity::Low,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::TableCycle => table_cycle::DESCRIPTION,
            Self::RedundantIndexes => redundant_indexes::DESCRIPTION,
            Self::ForeignKeyWithNoIndexes => foreign_key_with_no_indexes::DESCRIPTION,
            Self::ForeignKeyMismatch => foreign_key_mismatch::DESCRIPTION,
            Self::ForeignKeySelfReference => foreign_key_self_reference::DESCRIPTION,
            Self::ColumnTypes => column_types::DESCRIPTION,
            Self::TableWithIncrementingColumns => table_with_incrementing_columns::DESCRIPTION,
            Self::TableSql => table_sql::DESCRIPTION,
            Self::CatalogSql => catalog_sql::DESCRIPTION,
            Self::TableEmpty => table_empty::DESCRIPTION,
            Self::TableWithNoIndexes => table_with_no_indexes::DESCRIPTION,
            Self::TableWithNoPrimaryKey => table_with_no_primary_key::DESCRIPTION,
            Self::TableWithNoSurrogatePrimaryKey => table_with_no_surrogate_primary_key::DESCRIPTION,
            Self::TableWithNoRemarks => table_with_no_remarks::DESCRIPTION,
            Self::TableWithSingleColumn => table_with_single_column::DESCRIPTION,
            Self::TableWithPrimaryKeyNotFirst => table_with_primary_key_not_first::DESCRIPTION,
            Self::TableWithQuotedNames => table_with_quoted_names::DESCRIPTION,
            Self::TableAllNullableColumns => table_all_nullable_columns::DESCRIPTION,
            Self::NullColumnsInIndex => null_columns_in_index::DESCRIPTION,
            Self::NullIntendedColumns => null_intended_columns::DESCRIPTION,
            Self::UselessSurrogateKey => useless_surrogate_key::DESCRIPTION,
            Self::TableWithBadlyNamedColumns => table_with_badly_named_columns::DESCRIPTION,
        }
    }

    fn explain(&self) -> &'static str {
        match self {
            Self::TableCycle => table_cycle::EXPLAIN,
            Self::RedundantIndexes => redundant_indexes::EXPLAIN,
            Self::ForeignKeyWithNoIndexes => foreign_key_with_no_indexes::EXPLAIN,
            Self::ForeignKeyMismatch => foreign_key_mismatch::EXPLAIN,
            Self::ForeignKeySelfReference => foreign_key_self_reference::EXPLAIN,
            Self::ColumnTypes => column_types::EXPLAIN,
            Self::TableWithIncrementingColumns => table_with_incrementing_columns::EXPLAIN,
            Self::TableSql => table_sql::EXPLAIN,
            Self::CatalogSql => catalog_sql::EXPLAIN,
            Self::TableEmpty => table_empty::EXPLAIN,
            Self::TableWithNoIndexes => table_with_no_indexes::EXPLAIN,
            Self::TableWithNoPrimaryKey => table_with_no_primary_key::EXPLAIN,
            Self::TableWithNoSurrogatePrimaryKey => table_with_no_surrogate_primary_key::EXPLAIN,
            Self::TableWithNoRemarks => table_with_no_remarks::EXPLAIN,
            Self::TableWithSingleColumn => table_with_single_column::EXPLAIN,
            Self::TableWithPrimaryKeyNotFirst => table_with_primary_key_not_first::EXPLAIN,
            Self::TableWithQuotedNames => table_with_quoted_names::EXPLAIN,
            Self::TableAllNullableColumns => table_all_nullable_columns::EXPLAIN,
            Self::NullColumnsInIndex => null_columns_in_index::EXPLAIN,
            Self::NullIntendedColumns => null_intended_columns::EXPLAIN,
            Self::UselessSurrogateKey => useless_surrogate_key::EXPLAIN,
            Self::TableWithBadlyNamedColumns => table_with_badly_named_columns::EXPLAIN,
        }
    }

    fn new_linter(&self) -> Box<dyn LinterRun> {
        match self {
            Self::TableCycle => Box::new(table_cycle::TableCycle),
            Self::RedundantIndexes => Box::new(redundant_indexes::RedundantIndexes),
            Self::ForeignKeyWithNoIndexes => {
                Box::new(foreign_key_with_no_indexes::ForeignKeyWithNoIndexes)
            }
            Self::ForeignKeyMismatch => Box::new(foreign_key_mismatch::ForeignKeyMismatch),
            Self::ForeignKeySelfReference => {
                Box::new(foreign_key_self_reference::ForeignKeySelfReference)
            }
            Self::ColumnTypes => Box::new(column_types::ColumnTypes),
            Self::TableWithIncrementingColumns => {
                Box::new(table_with_incrementing_columns::TableWithIncrementingColumns)
            }
            Self::TableSql => Box::new(table_sql::TableSql::default()),
            Self::CatalogSql => Box::new(catalog_sql::CatalogSql::default()),
            Self::TableEmpty => Box::new(table_empty::TableEmpty),
            Self::TableWithNoIndexes => Box::new(table_with_no_indexes::TableWithNoIndexes),
            Self::TableWithNoPrimaryKey => Box::new(table_with_no_primary_key::TableWithNoPrimaryKey),
            Self::TableWithNoSurrogatePrimaryKey => {
                Box::new(table_with_no_surrogate_primary_key::TableWithNoSurrogatePrimaryKey)
            }
            Self::TableWithNoRemarks => Box::new(table_with_no_remarks::TableWithNoRemarks),
            Self::TableWithSingleColumn => {
                Box::new(table_with_single_column::TableWithSingleColumn)
            }
            Self::TableWithPrimaryKeyNotFirst => {
                Box::new(table_with_primary_key_not_first::TableWithPrimaryKeyNotFirst)
            }
            Self::TableWithQuotedNames => Box::new(table_with_quoted_names::TableWithQuotedNames),
            Self::TableAllNullableColumns => {
                Box::new(table_all_nullable_columns::TableAllNullableColumns)
            }
            Self::NullColumnsInIndex => Box::new(null_columns_in_index::NullColumnsInIndex),
            Self::NullIntendedColumns => Box::new(null_intended_columns::NullIntendedColumns),
            Self::UselessSurrogateKey => Box::new(useless_surrogate_key::UselessSurrogateKey),
            Self::TableWithBadlyNamedColumns => {
                Box::new(table_with_badly_named_columns::TableWithBadlyNamedColumns::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_linter_id_display_round_trip() {
        for id in LinterId::iter() {
            let s = id.to_string();
            let parsed: LinterId = s.parse().unwrap_or_else(|_| panic!("failed to parse {s}"));
            assert_eq!(id, parsed, "round-trip failed for {s}");
            assert_eq!(id.as_str(), s.as_str());
        }
        assert_eq!(LinterId::iter().count(), 22);
    }

    #[test]
    fn test_linter_id_names_are_kebab_case() {
        assert_eq!(LinterId::TableCycle.as_str(), "table-cycle");
        assert_eq!(
            LinterId::ForeignKeyWithNoIndexes.as_str(),
            "foreign-key-with-no-indexes"
        );
        assert_eq!(LinterId::TableSql.as_str(), "table-sql");
        assert_eq!(
            LinterId::TableWithPrimaryKeyNotFirst.as_str(),
            "table-with-primary-key-not-first"
        );
    }

    #[test]
    fn test_linter_id_from_str_unknown() {
        assert!("no-such-linter".parse::<LinterId>().is_err());
        assert!("TableCycle".parse::<LinterId>().is_err());
        assert!("".parse::<LinterId>().is_err());
    }

    #[test]
    fn test_linter_id_serialize_json() {
        let json = serde_json::to_string(&LinterId::RedundantIndexes).expect("serialize");
        assert_eq!(json, "\"redundant-indexes\"");
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(
            LinterId::ForeignKeySelfReference.default_severity(),
            Severity::Critical
        );
        assert_eq!(LinterId::ForeignKeyMismatch.default_severity(), Severity::High);
        assert_eq!(LinterId::ColumnTypes.default_severity(), Severity::Medium);
        assert_eq!(LinterId::TableWithNoRemarks.default_severity(), Severity::Low);
    }
}
