use serde::{Deserialize, Serialize};

use super::record;

/// Log entry attached to an enrollment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub activity_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

record!(Activity {
    id: activity_id => "activityId",
    parent: "enrollmentId",
});
