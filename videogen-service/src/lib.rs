//! videogen-service: a stateless relay in front of a hosted image-to-video
//! generation API.
//!
//! Each request performs at most one outbound prediction call; the remote
//! task lifecycle lives entirely in the external system.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::AppState;
