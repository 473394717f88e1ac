pub mod client;
pub mod configuration;
pub mod contract;
pub mod domain;
pub mod report;
pub mod runner;
pub mod telemetry;
pub mod transport;
