use super::*;

impl Controller {
    pub fn create_location(&self, location: Location) -> Result<String, ControllerError> {
        create_record(self.locations.as_ref(), location)
    }

    pub fn read_location(&self, location_id: &str) -> Result<Location, ControllerError> {
        read_record(self.locations.as_ref(), location_id)
    }

    pub fn update_location(&self, location: &Location) -> Result<(), ControllerError> {
        update_record(self.locations.as_ref(), location)
    }

    pub fn list_locations(&self, practice_id: &str) -> Result<Vec<Location>, ControllerError> {
        list_children(self.locations.as_ref(), practice_id)
    }

    pub fn delete_location(&self, location_id: &str) -> Result<(), ControllerError> {
        delete_record(self.locations.as_ref(), location_id)
    }
}
