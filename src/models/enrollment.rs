use serde::{Deserialize, Serialize};

use super::record;

/// A payer enrollment for one provider at one location of a practice.
///
/// `state`, `status` and `type` are free-form strings owned by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub practice_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provider_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub enrollment_type: String,
}

record!(Enrollment {
    id: enrollment_id => "enrollmentId",
    parent: "practiceId",
});
