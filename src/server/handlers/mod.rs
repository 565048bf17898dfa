//! Favicon server HTTP handlers.

mod clear;
mod icon;
mod metrics;
mod status;

pub use clear::clear_handler;
pub use icon::icon_handler;
pub use metrics::metrics_handler;
pub use status::status_handler;
