//! Pattern compilation helpers.
//!
//! This module provides panicking constructors for compile-time-constant CSS
//! selectors and regular expressions, used from `LazyLock` statics.

mod patterns;

pub use patterns::{compile_bytes_regex_unsafe, compile_regex_unsafe, parse_selector_unsafe};
