//! Library exports for the review rating form, its CLI, and tests.
/// Application directory helpers.
pub mod app_dirs;
/// One-shot command-line client.
pub mod cli;
/// Persisted settings (endpoint).
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Prediction request lifecycle.
pub mod form;
/// HTTP agent and JSON transport seam.
pub mod http_client;
/// Logging setup.
pub mod logging;
/// GraphQL wire format and prediction client.
pub mod prediction;
