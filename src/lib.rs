// sentinel - error-tracking integration service
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod store;
pub mod telemetry;
pub mod utils;
