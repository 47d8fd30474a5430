use super::*;

/// Message of the activity logged for every new enrollment.
pub const ENROLLMENT_CREATED_MESSAGE: &str = "Enrollment created";

impl Controller {
    pub fn create_activity(&self, activity: Activity) -> Result<String, ControllerError> {
        create_record(self.activities.as_ref(), activity)
    }

    pub fn read_activity(&self, activity_id: &str) -> Result<Activity, ControllerError> {
        read_record(self.activities.as_ref(), activity_id)
    }

    /// Activity log of one enrollment, oldest first.
    pub fn list_activities(&self, enrollment_id: &str) -> Result<Vec<Activity>, ControllerError> {
        list_children(self.activities.as_ref(), enrollment_id)
    }
}
