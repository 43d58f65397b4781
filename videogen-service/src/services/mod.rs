//! Outbound collaborators: the secret store and the prediction API.

pub mod providers;
pub mod secrets;

pub use secrets::{GoogleSecretProvider, SecretProvider, StaticSecretProvider};
