use serde::{Deserialize, Serialize};

use super::record;

/// Record of an uploaded file. The bytes live on disk at `storage_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "documentId", default, skip_serializing_if = "String::is_empty")]
    pub document_id: String,
    #[serde(rename = "practiceId", default, skip_serializing_if = "String::is_empty")]
    pub practice_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub storage_path: String,
}

record!(Document {
    id: document_id => "documentId",
    parent: "practiceId",
});
