// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

/// `PostgREST` client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PostgrestError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with an error status.
    #[error("Server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A single-row request matched no row.
    #[error("Row not found in {0}")]
    NotFound(String),

    /// The credentials were rejected.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The response body could not be decoded.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PostgrestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PostgrestError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
