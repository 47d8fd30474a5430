//! Request middleware shared by every route.

pub mod audit;
