//! Use cases over the entity store.
//!
//! Every function is generic over the repository traits it needs, so callers
//! pass any backend (or a mock) by reference.

pub mod appointments;
pub mod calendar;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod errors;
pub mod portfolio;

pub use errors::{ServiceError, ServiceResult};
