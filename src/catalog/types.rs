//! Catalog types
//!
//! The catalog is the crawled, read-only snapshot of a database's schemas,
//! tables, columns and constraints. Linters only ever borrow it.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CatalogData")]
pub struct Catalog {
    schemas: Vec<Schema>,
    /// Lookup: table reference → (schema position, table position).
    #[serde(skip)]
    table_index: HashMap<TableRef, (usize, usize)>,
}

/// Wire shape of a catalog snapshot; converted through [`Catalog::new`] so
/// that table schema names and the lookup index are always consistent.
#[derive(Deserialize)]
struct CatalogData {
    #[serde(default)]
    schemas: Vec<Schema>,
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        Catalog::new(data.schemas)
    }
}

impl Catalog {
    pub fn new(mut schemas: Vec<Schema>) -> Self {
        let mut table_index = HashMap::new();
        for (s, schema) in schemas.iter_mut().enumerate() {
            for (t, table) in schema.tables.iter_mut().enumerate() {
                table.schema = schema.name.clone();
                table_index.insert(table.table_ref(), (s, t));
            }
        }
        Self {
            schemas,
            table_index,
        }
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// All tables and views, schema by schema, in crawl order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.schemas.iter().flat_map(|s| s.tables.iter())
    }

    pub fn table(&self, table_ref: &TableRef) -> Option<&Table> {
        let &(s, t) = self.table_index.get(table_ref)?;
        self.schemas.get(s)?.tables.get(t)
    }

    /// Resolve a column reference. `None` for columns of tables that were not
    /// crawled (partial objects at the edge of the catalog).
    pub fn column(&self, column_ref: &ColumnRef) -> Option<&Column> {
        self.table(&column_ref.table)?
            .get_column(&column_ref.column)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Identity of a table: schema plus name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: &str, name: &str) -> Self {
        Self {
            schema: schema.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.schema.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.schema, self.name)
        }
    }
}

/// A column addressed through its owning table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: TableRef,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: TableRef, column: &str) -> Self {
        Self {
            table,
            column: column.to_string(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableType {
    #[default]
    #[serde(rename = "TABLE")]
    Table,
    #[serde(rename = "VIEW")]
    View,
    #[serde(rename = "MATERIALIZED VIEW")]
    MaterializedView,
    #[serde(rename = "SYSTEM TABLE")]
    SystemTable,
    #[serde(rename = "GLOBAL TEMPORARY")]
    GlobalTemporary,
    #[serde(rename = "LOCAL TEMPORARY")]
    LocalTemporary,
}

impl TableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::MaterializedView => "MATERIALIZED VIEW",
            Self::SystemTable => "SYSTEM TABLE",
            Self::GlobalTemporary => "GLOBAL TEMPORARY",
            Self::LocalTemporary => "LOCAL TEMPORARY",
        }
    }

    pub fn is_view(&self) -> bool {
        matches!(self, Self::View | Self::MaterializedView)
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Filled from the owning schema when the catalog is assembled.
    #[serde(default, skip_serializing)]
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub table_type: TableType,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// Foreign keys in which this table holds the referencing columns.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub check_constraints: Vec<CheckConstraint>,
}

impl Table {
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.schema, &self.name)
    }

    /// `schema.name`, or just the name for schema-less databases.
    pub fn full_name(&self) -> String {
        self.table_ref().to_string()
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_remarks(&self) -> bool {
        has_text(&self.remarks)
    }

    /// True if the named column participates in the primary key.
    pub fn is_primary_key_column(&self, name: &str) -> bool {
        self.primary_key
            .as_ref()
            .is_some_and(|pk| pk.columns.iter().any(|c| c == name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnDataType {
    /// Database-specific type name, e.g. `VARCHAR` or `int4`.
    pub name: String,
    /// Generic SQL type category the database type maps to.
    pub sql_type: SqlType,
}

impl ColumnDataType {
    pub fn new(name: &str, sql_type: SqlType) -> Self {
        Self {
            name: name.to_string(),
            sql_type,
        }
    }

    /// Build a data type from a type name, mapping well-known names to
    /// their SQL type category.
    pub fn from_type_name(name: &str) -> Self {
        Self::new(name, SqlType::from_type_name(name))
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Generic SQL type categories, as reported by database metadata drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    Array,
    BigInt,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    Numeric,
    Real,
    SmallInt,
    Time,
    Timestamp,
    TinyInt,
    VarBinary,
    VarChar,
    Other,
}

impl SqlType {
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "int" | "integer" | "int4" | "serial" => Self::Integer,
            "bigint" | "int8" | "bigserial" => Self::BigInt,
            "smallint" | "int2" => Self::SmallInt,
            "tinyint" => Self::TinyInt,
            "varchar" | "character varying" | "varchar2" | "nvarchar" => Self::VarChar,
            "char" | "character" | "nchar" | "bpchar" => Self::Char,
            "text" | "clob" => Self::Clob,
            "boolean" | "bool" => Self::Boolean,
            "bit" => Self::Bit,
            "date" => Self::Date,
            "time" => Self::Time,
            "timestamp" | "datetime" | "timestamptz" => Self::Timestamp,
            "decimal" => Self::Decimal,
            "numeric" | "number" => Self::Numeric,
            "real" | "float4" => Self::Real,
            "double" | "double precision" | "float8" => Self::Double,
            "float" => Self::Float,
            "blob" | "bytea" => Self::Blob,
            "binary" => Self::Binary,
            "varbinary" => Self::VarBinary,
            "array" => Self::Array,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// 1-based position of the column in its table.
    #[serde(default)]
    pub ordinal_position: u32,
    /// `None` when the crawler could not determine the type.
    #[serde(default)]
    pub data_type: Option<ColumnDataType>,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub decimal_digits: u32,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub auto_incremented: bool,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    pub fn has_remarks(&self) -> bool {
        has_text(&self.remarks)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimaryKey {
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    /// 1-based position of the column within the index, independent of the
    /// column's position in the table.
    pub index_ordinal_position: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    pub columns: Vec<IndexColumn>,
}

impl Index {
    /// Column names in index order. Order matters for prefix matching.
    pub fn column_names(&self) -> Vec<&str> {
        let mut columns: Vec<&IndexColumn> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.index_ordinal_position);
        columns.into_iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnReference {
    pub key_sequence: u32,
    /// Referencing side.
    pub foreign_key_column: ColumnRef,
    /// Referenced (primary key) side.
    pub primary_key_column: ColumnRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub column_references: Vec<ColumnReference>,
}

impl ForeignKey {
    /// Column references in constraint (key sequence) order.
    pub fn references(&self) -> Vec<&ColumnReference> {
        let mut refs: Vec<&ColumnReference> = self.column_references.iter().collect();
        refs.sort_by_key(|r| r.key_sequence);
        refs
    }

    /// Referencing column names in constraint order.
    pub fn column_names(&self) -> Vec<&str> {
        self.references()
            .into_iter()
            .map(|r| r.foreign_key_column.column.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    #[serde(default)]
    pub event_manipulation: String,
    #[serde(default)]
    pub action_timing: String,
    #[serde(default)]
    pub action_statement: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConstraint {
    pub name: String,
    #[serde(default)]
    pub definition: String,
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}
