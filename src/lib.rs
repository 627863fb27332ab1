pub mod configuration;
pub mod domain;
pub mod email_client;
mod error_handling;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
