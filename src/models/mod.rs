//! Domain records stored by the gateways.
//!
//! Every record is a flat JSON document keyed by a server-assigned UUID.
//! Empty string fields are skipped on serialization so a partial update
//! only overlays the fields it actually carries.

mod activity;
mod document;
mod enrollment;
mod location;
mod practice;
mod provider;
mod task;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use activity::*;
pub use document::*;
pub use enrollment::*;
pub use location::*;
pub use practice::*;
pub use provider::*;
pub use task::*;

/// A record with a server-assigned identifier stored in its own collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable entity name used in logs.
    const KIND: &'static str;
    /// JSON field holding the identifier.
    const ID_FIELD: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// A record scoped to a parent record through a foreign identifier.
///
/// The reference is never validated against the parent collection.
pub trait Child: Record {
    /// JSON field holding the parent identifier.
    const PARENT_FIELD: &'static str;
}

/// Implements `Record` (and `Child` when a parent is named) for a model.
macro_rules! record {
    ($name:ident { id: $id:ident => $id_field:literal }) => {
        impl $crate::models::Record for $name {
            const KIND: &'static str = stringify!($name);
            const ID_FIELD: &'static str = $id_field;

            fn id(&self) -> &str {
                &self.$id
            }

            fn set_id(&mut self, id: String) {
                self.$id = id;
            }
        }
    };
    ($name:ident {
        id: $id:ident => $id_field:literal,
        parent: $parent_field:literal $(,)?
    }) => {
        $crate::models::record!($name { id: $id => $id_field });

        impl $crate::models::Child for $name {
            const PARENT_FIELD: &'static str = $parent_field;
        }
    };
}

pub(crate) use record;
