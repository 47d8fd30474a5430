use super::*;

impl Controller {
    pub fn create_task(&self, task: Task) -> Result<String, ControllerError> {
        create_record(self.tasks.as_ref(), task)
    }

    pub fn read_task(&self, task_id: &str) -> Result<Task, ControllerError> {
        read_record(self.tasks.as_ref(), task_id)
    }

    pub fn update_task(&self, task: &Task) -> Result<(), ControllerError> {
        update_record(self.tasks.as_ref(), task)
    }

    pub fn list_tasks(&self, practice_id: &str) -> Result<Vec<Task>, ControllerError> {
        list_children(self.tasks.as_ref(), practice_id)
    }

    pub fn delete_task(&self, task_id: &str) -> Result<(), ControllerError> {
        delete_record(self.tasks.as_ref(), task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn status_update_keeps_message() {
        let (controller, _tmp) = test_controller();
        let id = controller
            .create_task(Task {
                practice_id: "P1".into(),
                message: "Upload W-9".into(),
                status: "Pending".into(),
                ..Default::default()
            })
            .unwrap();

        controller
            .update_task(&Task {
                task_id: id.clone(),
                status: "Done".into(),
                ..Default::default()
            })
            .unwrap();

        let task = controller.read_task(&id).unwrap();
        assert_eq!(task.status, "Done");
        assert_eq!(task.message, "Upload W-9");
        assert_eq!(task.practice_id, "P1");
    }

    #[test]
    fn delete_removes_task_and_is_idempotent() {
        let (controller, _tmp) = test_controller();
        let id = controller
            .create_task(Task {
                practice_id: "P1".into(),
                message: "m".into(),
                ..Default::default()
            })
            .unwrap();

        controller.delete_task(&id).unwrap();
        assert!(controller.read_task(&id).unwrap_err().is_not_found());
        controller.delete_task(&id).unwrap();
        assert!(controller.list_tasks("P1").unwrap().is_empty());
    }
}
