//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - HTTP client
//! - Default icon
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod default_icon;
mod logger;

// Re-export public API
pub use client::init_client;
pub use default_icon::load_default_icon;
pub use logger::init_logger_with;
