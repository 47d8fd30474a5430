//! Entity operations on top of the gateways.
//!
//! The controller owns identifier assignment and the cross-entity side
//! effects of the create operations. Each entity gets its own bound
//! gateway, set up once at startup and never mutated afterwards.
//!
//! Multi-step operations are not atomic. Creating an enrollment (or a
//! practice) persists the parent before its activity (or task); when the
//! second write fails the call reports failure and the parent stays.
//! Only document upload cleans up after itself.

mod activity;
mod document;
mod enrollment;
mod location;
mod practice;
mod provider;
mod task;

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, StoreConfig};
use crate::db::{Filter, Gateway, GatewayError, GatewayParams, SqliteGateway};
use crate::models::*;

pub use activity::ENROLLMENT_CREATED_MESSAGE;
pub use practice::{STARTER_TASK_MESSAGE, STARTER_TASK_STATUS};

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("error {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Validation(String),
}

impl ControllerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ControllerError::Gateway(e) if e.is_not_found())
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ControllerError::Io {
            action,
            path,
            source,
        }
    }
}

/// One gateway per entity collection.
pub struct Gateways {
    pub activities: Box<dyn Gateway<Activity>>,
    pub enrollments: Box<dyn Gateway<Enrollment>>,
    pub locations: Box<dyn Gateway<Location>>,
    pub practices: Box<dyn Gateway<Practice>>,
    pub providers: Box<dyn Gateway<Provider>>,
    pub tasks: Box<dyn Gateway<Task>>,
    pub documents: Box<dyn Gateway<Document>>,
}

impl Gateways {
    /// SQLite gateways for every collection named in `store`.
    pub fn sqlite(store: &StoreConfig) -> Result<Self, GatewayError> {
        fn bind<T: Record>(
            store: &StoreConfig,
            collection: &str,
        ) -> Result<Box<dyn Gateway<T>>, GatewayError> {
            Ok(Box::new(SqliteGateway::<T>::new(GatewayParams {
                url: store.url.clone(),
                database: store.database.clone(),
                collection: collection.to_string(),
            })?))
        }

        Ok(Self {
            activities: bind(store, &store.activity_collection)?,
            enrollments: bind(store, &store.enrollment_collection)?,
            locations: bind(store, &store.location_collection)?,
            practices: bind(store, &store.practice_collection)?,
            providers: bind(store, &store.provider_collection)?,
            tasks: bind(store, &store.task_collection)?,
            documents: bind(store, &store.document_collection)?,
        })
    }
}

pub struct Controller {
    activities: Box<dyn Gateway<Activity>>,
    enrollments: Box<dyn Gateway<Enrollment>>,
    locations: Box<dyn Gateway<Location>>,
    practices: Box<dyn Gateway<Practice>>,
    providers: Box<dyn Gateway<Provider>>,
    tasks: Box<dyn Gateway<Task>>,
    documents: Box<dyn Gateway<Document>>,
    upload_dir: PathBuf,
}

impl Controller {
    /// Bind SQLite gateways from `config` and make sure the store
    /// directory exists.
    pub fn new(config: &Config) -> Result<Self, ControllerError> {
        std::fs::create_dir_all(&config.store.url)
            .map_err(ControllerError::io("creating store directory", &config.store.url))?;
        let gateways = Gateways::sqlite(&config.store)?;
        tracing::info!(
            store = %config.store.url.display(),
            database = %config.store.database,
            upload_dir = %config.service.upload_dir.display(),
            "Controller ready"
        );
        Ok(Self::with_gateways(gateways, config.service.upload_dir.clone()))
    }

    pub fn with_gateways(gateways: Gateways, upload_dir: PathBuf) -> Self {
        Self {
            activities: gateways.activities,
            enrollments: gateways.enrollments,
            locations: gateways.locations,
            practices: gateways.practices,
            providers: gateways.providers,
            tasks: gateways.tasks,
            documents: gateways.documents,
            upload_dir,
        }
    }

    pub fn upload_dir(&self) -> &std::path::Path {
        &self.upload_dir
    }
}

// ═══════════════════════════════════════════════════════════
// Generic record operations shared by every entity
// ═══════════════════════════════════════════════════════════

fn id_filter<T: Record>(id: &str) -> Filter {
    Filter::eq(T::ID_FIELD, id)
}

/// Assign a fresh identifier, overwriting any caller-supplied one, and
/// persist the record under it.
fn create_record<T: Record>(gateway: &dyn Gateway<T>, mut record: T) -> Result<String, ControllerError> {
    let id = Uuid::new_v4().to_string();
    record.set_id(id.clone());
    gateway.upsert(&id_filter::<T>(&id), &record)?;
    tracing::info!(kind = T::KIND, id = %id, "Record created");
    Ok(id)
}

fn read_record<T: Record>(gateway: &dyn Gateway<T>, id: &str) -> Result<T, ControllerError> {
    Ok(gateway.find_one(&id_filter::<T>(id))?)
}

/// Upsert keyed by the record's own identifier. No existence check:
/// an unknown identifier creates the record.
fn update_record<T: Record>(gateway: &dyn Gateway<T>, record: &T) -> Result<(), ControllerError> {
    if record.id().is_empty() {
        return Err(ControllerError::Validation(format!(
            "{} is required",
            T::ID_FIELD
        )));
    }
    gateway.upsert(&id_filter::<T>(record.id()), record)?;
    tracing::debug!(kind = T::KIND, id = %record.id(), "Record updated");
    Ok(())
}

fn list_children<T: Child>(gateway: &dyn Gateway<T>, parent_id: &str) -> Result<Vec<T>, ControllerError> {
    Ok(gateway.find(&Filter::eq(T::PARENT_FIELD, parent_id))?)
}

fn delete_record<T: Record>(gateway: &dyn Gateway<T>, id: &str) -> Result<(), ControllerError> {
    gateway.delete_one(&id_filter::<T>(id))?;
    tracing::info!(kind = T::KIND, id = %id, "Record deleted");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn update_without_id_is_rejected_before_store() {
        let (controller, _tmp) = test_controller();
        let err = controller
            .update_location(&Location {
                address: "1 Main St".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ControllerError::Validation(ref m) if m == "locationId is required"));
        assert!(controller.list_locations("").unwrap().is_empty());
    }

    #[test]
    fn not_found_is_classified() {
        let (controller, _tmp) = test_controller();
        let err = controller.read_provider("missing").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("no documents in result"));
    }

    #[test]
    fn store_outage_surfaces_as_error_not_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gateways = working_gateways(tmp.path());
        gateways.providers = unreachable_gateway(tmp.path());
        let controller = Controller::with_gateways(gateways, tmp.path().join("uploads"));

        let err = controller.list_providers("P1").unwrap_err();
        assert!(matches!(err, ControllerError::Gateway(GatewayError::Connect { .. })));
        assert!(!err.is_not_found());
    }

    #[test]
    fn new_creates_store_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let config = crate::config::test_config(tmp.path());
        assert!(!config.store.url.exists());
        Controller::new(&config).unwrap();
        assert!(config.store.url.is_dir());
    }
}
