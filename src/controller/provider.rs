use super::*;

impl Controller {
    pub fn create_provider(&self, provider: Provider) -> Result<String, ControllerError> {
        create_record(self.providers.as_ref(), provider)
    }

    pub fn read_provider(&self, provider_id: &str) -> Result<Provider, ControllerError> {
        read_record(self.providers.as_ref(), provider_id)
    }

    pub fn update_provider(&self, provider: &Provider) -> Result<(), ControllerError> {
        update_record(self.providers.as_ref(), provider)
    }

    pub fn list_providers(&self, practice_id: &str) -> Result<Vec<Provider>, ControllerError> {
        list_children(self.providers.as_ref(), practice_id)
    }

    pub fn delete_provider(&self, provider_id: &str) -> Result<(), ControllerError> {
        delete_record(self.providers.as_ref(), provider_id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn provider(practice_id: &str, name: &str) -> Provider {
        Provider {
            practice_id: practice_id.into(),
            name: name.into(),
            ssn: "123-45-6789".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_then_read_matches_input_except_id() {
        let (controller, _tmp) = test_controller();
        let input = provider("P1", "Dr. Gray");

        let id = controller.create_provider(input.clone()).unwrap();
        assert_eq!(
            controller.read_provider(&id).unwrap(),
            Provider { provider_id: id, ..input }
        );
    }

    #[test]
    fn update_replaces_present_fields() {
        let (controller, _tmp) = test_controller();
        let id = controller.create_provider(provider("P1", "Dr. Gray")).unwrap();

        let moved = Provider {
            provider_id: id.clone(),
            practice_id: "P2".into(),
            name: "Dr. Gray-Hale".into(),
            ..Default::default()
        };
        controller.update_provider(&moved).unwrap();

        let stored = controller.read_provider(&id).unwrap();
        assert_eq!(stored.name, "Dr. Gray-Hale");
        assert_eq!(stored.ssn, "123-45-6789");
        assert!(controller.list_providers("P1").unwrap().is_empty());
        assert_eq!(controller.list_providers("P2").unwrap(), vec![stored]);
    }

    #[test]
    fn delete_then_read_is_not_found() {
        let (controller, _tmp) = test_controller();
        let id = controller.create_provider(provider("P1", "Dr. Gray")).unwrap();
        controller.delete_provider(&id).unwrap();
        assert!(controller.read_provider(&id).unwrap_err().is_not_found());
        controller.delete_provider(&id).unwrap();
    }
}
