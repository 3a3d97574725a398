//! Domain records and the pure derived views computed over them.

pub mod appointment;
pub mod calendar;
pub mod client;
pub mod enrichment;
pub mod photo;
pub mod service;
pub mod stats;
pub mod types;
