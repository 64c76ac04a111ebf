//! Centralized error handling for iptv-merge
//!
//! Errors fall into two groups:
//!
//! - **Source errors** ([`SourceError`]): one remote playlist could not be
//!   retrieved. These are recovered locally; the source contributes nothing and
//!   the run continues with the remaining sources.
//! - **Application errors** ([`AppError`]): configuration, template and output
//!   failures. These abort the run before any output is written.
//!
//! Lines that match no expected shape and URLs that fail validation are not
//! errors at all; parsers skip them silently.
//!
//! # Usage
//!
//! ```rust
//! use iptv_merge::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("sources.urls must not be empty"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
