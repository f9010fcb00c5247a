pub mod assistant;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod payment;
pub mod telemetry;
