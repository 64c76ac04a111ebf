//! Error type definitions for iptv-merge

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
///
/// Every variant here is fatal for a run. Per-source retrieval problems are
/// modelled separately by [`SourceError`] and only end up here when a caller
/// chooses to escalate them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Template file could not be read
    #[error("Template error: {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output playlist could not be written
    #[error("Output error: {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Retrieval errors for a single remote source
///
/// Each variant keeps the (credential-obfuscated) URL so the reporter can log
/// it without further context.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection, TLS, DNS or timeout failure before a response arrived
    #[error("Transport error: {url} - {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP error: {url} - status {status}")]
    Http { url: String, status: u16 },

    /// The response body could not be read
    #[error("Body error: {url} - {message}")]
    Body { url: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a template read error
    pub fn template<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Template {
            path: path.into(),
            source,
        }
    }

    /// Create an output write error
    pub fn output<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

impl SourceError {
    /// Create a transport error
    pub fn transport<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// URL of the source that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Http { url, .. } | Self::Body { url, .. } => url,
        }
    }
}
