//! Route handlers, one module per entity.

pub mod documents;
pub mod enrollments;
pub mod health;
pub mod locations;
pub mod practices;
pub mod providers;
pub mod tasks;
