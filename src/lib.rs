//! Academic homepage server
//!
//! Serves the data behind a personal academic homepage: publications from
//! the HAL open archive (raw passthrough and a sortable, filterable table
//! with citations), supervised students and the owner profile.

use std::sync::Arc;

pub mod api;
pub mod browser;
pub mod citation;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod services;
pub mod table;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
