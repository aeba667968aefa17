//! Typed wrappers for the connection-string security tools.
//!
//! These tools return plain JSON objects, not JSON strings, but share the
//! SQL tools' decoding so a string-encoded or in-band `{"error": ...}` reply
//! is handled the same way.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    client::ToolInvoker,
    error::{Error, Result},
    sql::call_embedded,
    types::ToolParams,
};

/// Key length, in bytes, the server generates when none is given.
pub const DEFAULT_KEY_LENGTH: u32 = 32;

/// Key lengths, in bytes, the server accepts.
pub const KEY_LENGTH_RANGE: RangeInclusive<u32> = 16..=64;

/// Outcome of a key rotation or connection migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRotationResult {
    /// Number of connection strings re-encrypted.
    pub count: u64,
    pub message: String,
}

/// A freshly generated encryption key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureKey {
    pub key: String,
    /// Key length in bytes.
    pub length: u32,
    pub message: String,
}

/// Security tools client.
#[derive(Debug)]
pub struct SecurityTools<'a> {
    invoker: &'a ToolInvoker,
}

impl<'a> SecurityTools<'a> {
    pub(crate) fn new(invoker: &'a ToolInvoker) -> Self {
        Self { invoker }
    }

    /// Re-encrypt every stored connection string with `new_key`.
    ///
    /// The server must be restarted with the new key afterwards.
    pub async fn rotate_key(&self, new_key: impl Into<String>) -> Result<KeyRotationResult> {
        const TOOL: &str = "rotateKey";

        let new_key = new_key.into();
        if new_key.is_empty() {
            return Err(invalid_argument(TOOL, "new key cannot be empty"));
        }

        let mut params = ToolParams::new();
        params.insert("newKey".into(), Value::String(new_key));
        call_embedded(self.invoker, TOOL, params).await
    }

    /// Encrypt connection strings that are still stored in plain text.
    pub async fn migrate_connections_to_encrypted(&self) -> Result<KeyRotationResult> {
        call_embedded(self.invoker, "migrateConnectionsToEncrypted", ToolParams::new()).await
    }

    /// Generate a random key of `length` bytes, within [`KEY_LENGTH_RANGE`].
    pub async fn generate_secure_key(&self, length: u32) -> Result<SecureKey> {
        const TOOL: &str = "generateSecureKey";

        if !KEY_LENGTH_RANGE.contains(&length) {
            return Err(invalid_argument(
                TOOL,
                &format!(
                    "key length must be between {} and {} bytes, got {length}",
                    KEY_LENGTH_RANGE.start(),
                    KEY_LENGTH_RANGE.end()
                ),
            ));
        }

        let mut params = ToolParams::new();
        params.insert("length".into(), Value::from(length));
        call_embedded(self.invoker, TOOL, params).await
    }
}

fn invalid_argument(tool: &str, message: &str) -> Error {
    tracing::error!(tool = %tool, error = %message, "Rejected tool arguments");
    Error::InvalidArgument {
        tool: tool.to_string(),
        message: message.to_string(),
    }
}
