//! Diesel row types and their conversions to domain entities.

pub mod appointment;
pub mod blocked_date;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod photo;
pub mod service;
