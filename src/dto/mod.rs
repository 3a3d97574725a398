//! Response payloads and query strings shared by services and routes.

pub mod appointment;
pub mod calendar;
pub mod client;
pub mod dashboard;
