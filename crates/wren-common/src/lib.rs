//! Shared utilities for the Wren browser.
//!
//! This crate provides the pieces every other crate leans on:
//!
//! - [`url`] - URL parsing, relative resolution, and a blocking fetch client
//!   for `http`, `https`, and `file` URLs.
//! - [`warning`] - deduplicated, colored terminal warnings for recoverable
//!   conditions.

pub mod url;
pub mod warning;

pub use url::{FetchError, Scheme, Url, UrlError};
pub use warning::{clear_warnings, warn_once};
