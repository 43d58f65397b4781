//! Domain models for the videogen relay service.

pub mod task;

pub use task::{CheckStatusParams, CreateVideoParams, CreateVideoResponse, TaskStatus};
