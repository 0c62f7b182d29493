// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

/// The user behind the access token, as reported by `auth/v1/user`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AuthUser {
    /// Stable user id.
    pub id: String,

    /// Email address, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
}
