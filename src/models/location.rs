use serde::{Deserialize, Serialize};

use super::record;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub practice_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
}

record!(Location {
    id: location_id => "locationId",
    parent: "practiceId",
});
