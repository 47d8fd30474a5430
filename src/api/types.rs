//! Shared state and response bodies for the API layer.

use std::sync::Arc;

use serde::Serialize;

use crate::controller::Controller;
use crate::models::*;

/// State handed to every handler. Cloned per request.
#[derive(Clone)]
pub struct ApiContext {
    pub controller: Arc<Controller>,
}

impl ApiContext {
    pub fn new(controller: Arc<Controller>) -> Self {
        Self { controller }
    }
}

// ═══════════════════════════════════════════════════════════
// Response bodies
// ═══════════════════════════════════════════════════════════

/// Body of every successful update and delete.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn completed() -> Self {
        Self {
            status: "Completed",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeCreated {
    pub practice_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCreated {
    pub location_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCreated {
    pub provider_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreated {
    pub task_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCreated {
    pub enrollment_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreated {
    pub document_id: String,
}

#[derive(Debug, Serialize)]
pub struct PracticeList {
    pub practices: Vec<Practice>,
}

#[derive(Debug, Serialize)]
pub struct LocationList {
    pub locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
pub struct ProviderList {
    pub providers: Vec<Provider>,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentList {
    pub enrollments: Vec<Enrollment>,
}

#[derive(Debug, Serialize)]
pub struct DocumentList {
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct ActivityList {
    pub activities: Vec<Activity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_bodies_use_camel_case_ids() {
        let body = serde_json::to_value(PracticeCreated {
            practice_id: "P1".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "practiceId": "P1" }));
    }

    #[test]
    fn empty_list_keeps_its_key() {
        let body = serde_json::to_value(TaskList { tasks: Vec::new() }).unwrap();
        assert_eq!(body, json!({ "tasks": [] }));
    }

    #[test]
    fn status_is_completed() {
        let body = serde_json::to_value(StatusResponse::completed()).unwrap();
        assert_eq!(body, json!({ "status": "Completed" }));
    }
}
