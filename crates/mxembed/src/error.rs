//! Error types for mxembed operations.
//!
//! This module provides the main error type [`MxEmbedError`] which wraps
//! the error conditions that can occur while assembling or reading host
//! documents.

use std::io;

use thiserror::Error;

use mxembed_codec::{InvalidTokenError, RoundTripError};

/// The main error type for mxembed operations.
///
/// # Diagnostic Variants
///
/// The `Xml` variant keeps the text that failed to parse so the position
/// reported by the parser can be rendered as a labeled source snippet.
#[derive(Debug, Error)]
pub enum MxEmbedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid token in diagram `{id}`: {err}")]
    Token {
        id: String,
        #[source]
        err: InvalidTokenError,
    },

    #[error("Round-trip check failed for diagram `{id}`: {err}")]
    RoundTrip {
        id: String,
        #[source]
        err: RoundTripError,
    },

    #[error("XML error: {err}")]
    Xml { err: roxmltree::Error, src: String },

    #[error("Host document error: {0}")]
    Host(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MxEmbedError {
    /// Create a new `Xml` error with the text that failed to parse.
    pub fn new_xml_error(err: roxmltree::Error, src: impl Into<String>) -> Self {
        Self::Xml {
            err,
            src: src.into(),
        }
    }
}
