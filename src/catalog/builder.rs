//! Fluent builder for catalog snapshots
//!
//! Used by unit and integration tests to describe a schema without writing
//! JSON by hand. Tables land in the `public` schema unless placed with
//! [`CatalogBuilder::table_in`].
//!
//! # Example
//!
//! ```rust
//! use schema_lint::catalog::builder::CatalogBuilder;
//!
//! let catalog = CatalogBuilder::new()
//!     .table("orders", |t| {
//!         t.column("id", "integer", false)
//!          .column("customer_id", "integer", false)
//!          .pk(&["id"])
//!          .index("idx_orders_customer", &["customer_id"], false)
//!          .fk("fk_customer", &["customer_id"], "customers", &["id"]);
//!     })
//!     .build();
//! assert_eq!(catalog.tables().count(), 1);
//! ```

use crate::catalog::types::{
    Catalog, Column, ColumnDataType, ColumnRef, ColumnReference, ForeignKey, Index, IndexColumn,
    PrimaryKey, Schema, Table, TableRef, TableType,
};

pub const DEFAULT_SCHEMA: &str = "public";

/// Builder for constructing a [`Catalog`]
pub struct CatalogBuilder {
    schemas: Vec<Schema>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self { schemas: vec![] }
    }

    /// Add a table to the default schema. The closure receives a
    /// [`TableBuilder`] to configure columns, indexes and constraints.
    pub fn table(self, name: &str, f: impl FnOnce(&mut TableBuilder)) -> Self {
        self.table_in(DEFAULT_SCHEMA, name, f)
    }

    /// Add a table to a named schema.
    pub fn table_in(mut self, schema: &str, name: &str, f: impl FnOnce(&mut TableBuilder)) -> Self {
        let mut builder = TableBuilder::new(schema, name);
        f(&mut builder);
        let table = builder.build();

        match self.schemas.iter_mut().find(|s| s.name == schema) {
            Some(existing) => existing.tables.push(table),
            None => self.schemas.push(Schema {
                name: schema.to_string(),
                tables: vec![table],
            }),
        }
        self
    }

    pub fn build(self) -> Catalog {
        Catalog::new(self.schemas)
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single [`Table`]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new(schema: &str, name: &str) -> Self {
        Self {
            table: Table {
                schema: schema.to_string(),
                name: name.to_string(),
                ..Table::default()
            },
        }
    }

    fn table_ref(&self) -> TableRef {
        self.table.table_ref()
    }

    fn push_column(&mut self, mut column: Column) -> &mut Self {
        column.ordinal_position = self.table.columns.len() as u32 + 1;
        self.table.columns.push(column);
        self
    }

    /// Add a column with a known data type
    pub fn column(&mut self, name: &str, type_name: &str, nullable: bool) -> &mut Self {
        self.push_column(Column {
            name: name.to_string(),
            data_type: Some(ColumnDataType::from_type_name(type_name)),
            nullable,
            ..Column::default()
        })
    }

    /// Add a column with a data type and size, e.g. `varchar(40)`
    pub fn sized_column(
        &mut self,
        name: &str,
        type_name: &str,
        size: u32,
        nullable: bool,
    ) -> &mut Self {
        self.push_column(Column {
            name: name.to_string(),
            data_type: Some(ColumnDataType::from_type_name(type_name)),
            size,
            nullable,
            ..Column::default()
        })
    }

    /// Add a column whose data type the crawler could not determine
    pub fn untyped_column(&mut self, name: &str, nullable: bool) -> &mut Self {
        self.push_column(Column {
            name: name.to_string(),
            data_type: None,
            nullable,
            ..Column::default()
        })
    }

    /// Add a column with a default value
    pub fn column_default(
        &mut self,
        name: &str,
        type_name: &str,
        nullable: bool,
        default: &str,
    ) -> &mut Self {
        self.push_column(Column {
            name: name.to_string(),
            data_type: Some(ColumnDataType::from_type_name(type_name)),
            nullable,
            default_value: Some(default.to_string()),
            ..Column::default()
        })
    }

    /// Set remarks on the table
    pub fn remarks(&mut self, remarks: &str) -> &mut Self {
        self.table.remarks = Some(remarks.to_string());
        self
    }

    /// Set remarks on an already-added column
    pub fn column_remarks(&mut self, column: &str, remarks: &str) -> &mut Self {
        if let Some(c) = self.table.columns.iter_mut().find(|c| c.name == column) {
            c.remarks = Some(remarks.to_string());
        }
        self
    }

    /// Mark the table as a view
    pub fn view(&mut self) -> &mut Self {
        self.table.table_type = TableType::View;
        self
    }

    pub fn table_type(&mut self, table_type: TableType) -> &mut Self {
        self.table.table_type = table_type;
        self
    }

    /// Add a primary key
    pub fn pk(&mut self, columns: &[&str]) -> &mut Self {
        self.table.primary_key = Some(PrimaryKey {
            name: Some(format!("{}_pkey", self.table.name)),
            columns: columns.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Add an index; the column slice order is the index order
    pub fn index(&mut self, name: &str, columns: &[&str], unique: bool) -> &mut Self {
        self.table.indexes.push(Index {
            name: name.to_string(),
            unique,
            columns: columns
                .iter()
                .enumerate()
                .map(|(i, c)| IndexColumn {
                    name: c.to_string(),
                    index_ordinal_position: i as u32 + 1,
                })
                .collect(),
        });
        self
    }

    /// Add a foreign key referencing a table in the same schema
    pub fn fk(
        &mut self,
        name: &str,
        columns: &[&str],
        ref_table: &str,
        ref_columns: &[&str],
    ) -> &mut Self {
        let schema = self.table.schema.clone();
        self.fk_to(name, columns, TableRef::new(&schema, ref_table), ref_columns)
    }

    /// Add a foreign key referencing an arbitrary table
    pub fn fk_to(
        &mut self,
        name: &str,
        columns: &[&str],
        ref_table: TableRef,
        ref_columns: &[&str],
    ) -> &mut Self {
        let own = self.table_ref();
        let column_references = columns
            .iter()
            .zip(ref_columns)
            .enumerate()
            .map(|(i, (fk_col, pk_col))| ColumnReference {
                key_sequence: i as u32 + 1,
                foreign_key_column: ColumnRef::new(own.clone(), fk_col),
                primary_key_column: ColumnRef::new(ref_table.clone(), pk_col),
            })
            .collect();
        self.table.foreign_keys.push(ForeignKey {
            name: name.to_string(),
            column_references,
        });
        self
    }

    pub fn build(self) -> Table {
        self.table
    }
}
