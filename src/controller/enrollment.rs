use super::*;

impl Controller {
    /// Create an enrollment, then log its "Enrollment created" activity.
    ///
    /// The enrollment is persisted first. If the activity write fails the
    /// call fails, but the enrollment record remains.
    pub fn create_enrollment(&self, enrollment: Enrollment) -> Result<String, ControllerError> {
        let enrollment_id = create_record(self.enrollments.as_ref(), enrollment)?;

        let activity = Activity {
            enrollment_id: enrollment_id.clone(),
            message: ENROLLMENT_CREATED_MESSAGE.into(),
            ..Default::default()
        };
        if let Err(e) = self.create_activity(activity) {
            tracing::error!(
                enrollment_id = %enrollment_id,
                error = %e,
                "Enrollment persisted but creation activity failed"
            );
            return Err(e);
        }

        Ok(enrollment_id)
    }

    pub fn read_enrollment(&self, enrollment_id: &str) -> Result<Enrollment, ControllerError> {
        read_record(self.enrollments.as_ref(), enrollment_id)
    }

    pub fn update_enrollment(&self, enrollment: &Enrollment) -> Result<(), ControllerError> {
        update_record(self.enrollments.as_ref(), enrollment)
    }

    pub fn list_enrollments(&self, practice_id: &str) -> Result<Vec<Enrollment>, ControllerError> {
        list_children(self.enrollments.as_ref(), practice_id)
    }

    /// Deletes the enrollment only; its activities stay in place.
    pub fn delete_enrollment(&self, enrollment_id: &str) -> Result<(), ControllerError> {
        delete_record(self.enrollments.as_ref(), enrollment_id)
    }
}
