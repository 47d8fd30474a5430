use super::*;

/// Message of the task every new practice starts with.
pub const STARTER_TASK_MESSAGE: &str = "Sample task";
pub const STARTER_TASK_STATUS: &str = "Pending";

impl Controller {
    /// Create a practice, then its starter task.
    ///
    /// The practice is persisted first. If the task write fails the call
    /// fails, but the practice record remains.
    pub fn create_practice(&self, practice: Practice) -> Result<String, ControllerError> {
        let practice_id = create_record(self.practices.as_ref(), practice)?;

        let task = Task {
            practice_id: practice_id.clone(),
            message: STARTER_TASK_MESSAGE.into(),
            status: STARTER_TASK_STATUS.into(),
            ..Default::default()
        };
        if let Err(e) = self.create_task(task) {
            tracing::error!(
                practice_id = %practice_id,
                error = %e,
                "Practice persisted but starter task failed"
            );
            return Err(e);
        }

        Ok(practice_id)
    }

    pub fn read_practice(&self, practice_id: &str) -> Result<Practice, ControllerError> {
        read_record(self.practices.as_ref(), practice_id)
    }

    pub fn update_practice(&self, practice: &Practice) -> Result<(), ControllerError> {
        update_record(self.practices.as_ref(), practice)
    }

    /// Every practice; practices have no parent scope.
    pub fn list_practices(&self) -> Result<Vec<Practice>, ControllerError> {
        Ok(self.practices.find(&Filter::all())?)
    }
}
