//! SpamWatch API
//!
//! HTTP prediction service over the SpamWatch classifier.
//!
//! Endpoints:
//! - `GET /`: service banner with the operating mode
//! - `POST /predict`: classify `{"text": ...}`
//! - `GET /health`: `{"status", "model_loaded"}`
//! - `GET /metrics`: Prometheus exposition

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ApiConfig;
pub use routes::create_router;
pub use state::AppState;
