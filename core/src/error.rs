// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::{Collection, Id};

/// Errors returned by the planner core.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No authenticated principal could be resolved.
    #[error("No user logged in")]
    Unauthenticated,

    /// The targeted record does not exist.
    #[error("No record {id} in {collection}")]
    NotFound {
        /// Collection that was searched.
        collection: Collection,
        /// Id that was not found.
        id: Id,
    },

    /// Any other failure reported by the store.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A draft or patch that the store must not accept.
    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl Error {
    pub(crate) fn not_found(collection: Collection, id: &Id) -> Self {
        Self::NotFound {
            collection,
            id: id.clone(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Remote(e.to_string())
    }
}

/// Result alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
