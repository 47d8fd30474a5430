use serde::{Deserialize, Serialize};

use super::record;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practice {
    #[serde(rename = "practiceId", default, skip_serializing_if = "String::is_empty")]
    pub practice_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Employer identification (tax) number.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ein: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_name: String,
}

record!(Practice { id: practice_id => "practiceId" });
