//! Typed wrappers for the SQL Server tool set.
//!
//! The server's tools return their results as JSON *strings*, so structured
//! replies such as table metadata arrive double-encoded. Failures that the
//! server catches are reported in-band as `{"error": "..."}` with a success
//! status. [`decode_embedded`] handles both cases; the generic
//! [`ToolInvoker`] never does.

pub mod models;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    client::ToolInvoker,
    error::{Error, Result},
    types::{ToolParams, ToolResponse},
};

pub use models::{ColumnInfo, ForeignKeyInfo, ObjectType, Row, TableInfo};

/// Connection name the server falls back to.
pub const DEFAULT_CONNECTION: &str = "DefaultConnection";

/// SQL Server tools client.
#[derive(Debug)]
pub struct SqlTools<'a> {
    invoker: &'a ToolInvoker,
}

impl<'a> SqlTools<'a> {
    pub(crate) fn new(invoker: &'a ToolInvoker) -> Self {
        Self { invoker }
    }

    /// Open and close a connection to verify it works.
    ///
    /// Returns the server's status message. Connection failures are also
    /// reported as a message, not as an error.
    pub async fn initialize(&self, connection_name: &str) -> Result<String> {
        let params = connection_params(connection_name);
        let reply = self.invoker.invoke("initialize", Some(params)).await?;
        Ok(into_text(reply))
    }

    /// Echo `message` back.
    pub async fn echo(&self, message: impl Into<String>) -> Result<String> {
        let mut params = ToolParams::new();
        params.insert("message".into(), Value::String(message.into()));
        let reply = self.invoker.invoke("echo", Some(params)).await?;
        Ok(into_text(reply))
    }

    /// Echo `message` back through the `f1Echo` variant of the tool.
    pub async fn f1_echo(&self, message: impl Into<String>) -> Result<String> {
        let mut params = ToolParams::new();
        params.insert("message".into(), Value::String(message.into()));
        let reply = self.invoker.invoke("f1Echo", Some(params)).await?;
        Ok(into_text(reply))
    }

    /// Run `query` and return its rows.
    pub async fn execute_query(
        &self,
        query: impl Into<String>,
        connection_name: &str,
    ) -> Result<Vec<Row>> {
        let mut params = connection_params(connection_name);
        params.insert("query".into(), Value::String(query.into()));
        self.call("executeQuery", params).await
    }

    /// Tables with their columns, primary keys and foreign keys, optionally
    /// restricted to `schema`.
    pub async fn table_metadata(
        &self,
        connection_name: &str,
        schema: Option<&str>,
    ) -> Result<Vec<TableInfo>> {
        let mut params = connection_params(connection_name);
        if let Some(schema) = schema {
            params.insert("schema".into(), Value::String(schema.to_string()));
        }
        self.call("getTableMetadata", params).await
    }

    /// Metadata for tables, views or procedures.
    pub async fn database_objects(
        &self,
        connection_name: &str,
        schema: Option<&str>,
        object_type: ObjectType,
    ) -> Result<Vec<TableInfo>> {
        let mut params = connection_params(connection_name);
        if let Some(schema) = schema {
            params.insert("schema".into(), Value::String(schema.to_string()));
        }
        params.insert(
            "objectType".into(),
            Value::String(object_type.as_str().to_string()),
        );
        self.call("getDatabaseObjectsMetadata", params).await
    }

    async fn call<T: DeserializeOwned>(&self, tool: &str, params: ToolParams) -> Result<T> {
        call_embedded(self.invoker, tool, params).await
    }
}

/// Invoke `tool` and decode its reply with [`decode_embedded`], logging
/// decode and in-band failures with the tool name.
pub(crate) async fn call_embedded<T: DeserializeOwned>(
    invoker: &ToolInvoker,
    tool: &str,
    params: ToolParams,
) -> Result<T> {
    let reply = invoker.invoke(tool, Some(params)).await?;
    decode_embedded(tool, reply).inspect_err(|e| {
        tracing::error!(tool = %tool, error = %e, "Unexpected tool reply");
    })
}

fn connection_params(connection_name: &str) -> ToolParams {
    let mut params = ToolParams::new();
    params.insert(
        "connectionName".into(),
        Value::String(connection_name.to_string()),
    );
    params
}

/// Render a reply as text: strings are unwrapped, anything else is compact JSON.
fn into_text(reply: ToolResponse) -> String {
    match reply {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Decode a reply that may carry its payload as a JSON-encoded string.
///
/// A string reply is parsed a second time. An object with a string `error`
/// field becomes [`Error::Tool`]. Anything else is deserialized into `T`.
pub fn decode_embedded<T: DeserializeOwned>(tool: &str, reply: ToolResponse) -> Result<T> {
    let decode = |source| Error::Decode {
        tool: tool.to_string(),
        source,
    };

    let value = match reply {
        Value::String(text) => serde_json::from_str(&text).map_err(decode)?,
        other => other,
    };

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(Error::Tool {
            tool: tool.to_string(),
            message: message.to_string(),
        });
    }

    serde_json::from_value(value).map_err(decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_double_encoded_metadata() {
        let reply = Value::String(
            r#"[{"Schema":"dbo","Name":"Users","Columns":[{"Name":"Id","DataType":"int","IsNullable":false,"IsPrimaryKey":true}],"PrimaryKeys":["Id"],"ForeignKeys":[]}]"#
                .to_string(),
        );
        let tables: Vec<TableInfo> = decode_embedded("getTableMetadata", reply).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].schema, "dbo");
        assert_eq!(tables[0].name, "Users");
        assert_eq!(tables[0].primary_keys, vec!["Id".to_string()]);
        assert!(tables[0].columns[0].is_primary_key);
        assert_eq!(tables[0].columns[0].max_length, None);
    }

    #[test]
    fn test_decode_plain_json_reply() {
        let reply = json!([{ "name": "sys", "id": 1 }]);
        let rows: Vec<Row> = decode_embedded("executeQuery", reply).unwrap();
        assert_eq!(rows[0]["name"], "sys");
    }

    #[test]
    fn test_in_band_error_becomes_tool_error() {
        let reply = Value::String(
            r#"{ "error": "Database error occurred while executing query." }"#.to_string(),
        );
        let err = decode_embedded::<Vec<Row>>("executeQuery", reply).unwrap_err();
        match err {
            Error::Tool { tool, message } => {
                assert_eq!(tool, "executeQuery");
                assert_eq!(message, "Database error occurred while executing query.");
            }
            other => panic!("expected tool error, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_text_that_is_not_json() {
        let reply = Value::String("Successfully connected".to_string());
        let err = decode_embedded::<Vec<TableInfo>>("getTableMetadata", reply).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let err = decode_embedded::<Vec<TableInfo>>("getTableMetadata", json!({ "tables": 3 }))
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_into_text() {
        assert_eq!(into_text(json!("hello")), "hello");
        assert_eq!(into_text(json!({ "ok": true })), r#"{"ok":true}"#);
    }

    #[test]
    fn test_object_type_wire_values() {
        assert_eq!(ObjectType::default().as_str(), "ALL");
        assert_eq!(ObjectType::View.to_string(), "VIEW");
    }
}
