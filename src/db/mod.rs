pub mod gateway;
pub mod sqlite;

pub use gateway::*;
pub use sqlite::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("no documents in result (collection {collection})")]
    NotFound { collection: String },

    #[error("cannot decode document from {collection}: {source}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode document for {collection}: {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("update for {collection} is not a document")]
    NotADocument { collection: String },

    #[error("failed to connect to store at {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("invalid {kind} name: {name:?}")]
    InvalidName { kind: &'static str, name: String },
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}
