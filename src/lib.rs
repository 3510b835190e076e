pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod extractor;
pub mod models;
pub mod plugins;
pub mod scraper;
pub mod utils;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use utils::error::{AppError, Result};

