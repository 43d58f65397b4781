//! HTTP handlers for the videogen relay service.

pub mod app;
pub mod video;
