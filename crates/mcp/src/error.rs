//! Error types for MCP server operations.

use thiserror::Error;

use ledgerly_core::DomainError;
use ledgerly_store::StoreError;

/// MCP server error types.
#[derive(Error, Debug)]
pub enum McpError {
    /// Invalid request format or parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Store operation failure (validation, not found, storage).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the stdio transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DomainError> for McpError {
    fn from(err: DomainError) -> Self {
        Self::Store(StoreError::Domain(err))
    }
}

impl McpError {
    /// Convert to a JSON-RPC error code. Validation, not-found and storage
    /// failures each get a distinct code so callers can tell them apart.
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::InvalidRequest(_) => -32602,
            McpError::Store(StoreError::Domain(DomainError::Validation(_))) => -32602,
            McpError::Store(StoreError::Domain(DomainError::NotFound(_))) => -32001,
            McpError::Store(_) => -32002,
            McpError::Json(_) => -32700,
            McpError::Io(_) => -32000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_distinct_codes() {
        let validation: McpError = DomainError::validation("name cannot be empty").into();
        let not_found: McpError = DomainError::not_found("client 9 not found").into();
        let storage: McpError = StoreError::io(
            "data/clients.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();

        assert_eq!(validation.error_code(), -32602);
        assert_eq!(not_found.error_code(), -32001);
        assert_eq!(storage.error_code(), -32002);
    }
}
