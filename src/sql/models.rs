//! Database metadata returned by the SQL Server tools.
//!
//! Field names follow the server's PascalCase serializer.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// A query result row, keyed by column name. `NULL` columns are JSON `null`.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Table or view metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableInfo {
    /// Database schema name.
    #[serde(default)]
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Object kind as reported by the server, e.g. `BASE TABLE` or `VIEW`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// Columns in ordinal order.
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    /// Primary key column names.
    #[serde(default)]
    pub primary_keys: Vec<String>,
    /// Foreign keys declared on this table.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyInfo>,
}

/// A single column of a table or view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// SQL Server type name, e.g. `int` or `nvarchar`.
    pub data_type: String,
    /// Whether the column accepts `NULL`.
    #[serde(default)]
    pub is_nullable: bool,
    /// Maximum length in characters for string types, `-1` for `max`.
    #[serde(default)]
    pub max_length: Option<i32>,
    /// Numeric precision.
    #[serde(default)]
    pub precision: Option<i32>,
    /// Numeric scale.
    #[serde(default)]
    pub scale: Option<i32>,
    /// Default constraint expression, as SQL text.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub is_primary_key: bool,
    /// Whether the column references another table.
    #[serde(default)]
    pub is_foreign_key: bool,
    /// `schema.table.column` of the referenced column.
    #[serde(default)]
    pub foreign_key_reference: Option<String>,
}

/// A foreign key relationship from one column to a column of another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForeignKeyInfo {
    /// Constraint name.
    pub name: String,
    /// Referencing column in this table.
    pub column: String,
    /// Schema of the referenced table.
    pub referenced_schema: String,
    /// Referenced table name.
    pub referenced_table: String,
    /// Referenced column name.
    pub referenced_column: String,
}

/// Object kinds accepted by `getDatabaseObjectsMetadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectType {
    /// Tables, views and procedures.
    #[default]
    All,
    /// Base tables only.
    Table,
    /// Views only.
    View,
    /// Stored procedures only.
    Procedure,
}

impl ObjectType {
    /// Wire value for the `objectType` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Procedure => "PROCEDURE",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
