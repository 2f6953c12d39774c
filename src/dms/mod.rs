pub mod admin;
pub mod client;
pub mod models;

pub use client::{DmsClient, MigrationService};
pub use models::{EndpointSummary, EndpointType, StartType, TaskSummary};
