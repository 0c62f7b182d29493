// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

/// `PostgREST` server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PostgrestConfig {
    /// Base URL of the project, e.g. `https://xyz.supabase.co`.
    pub base_url: String,

    /// Public API key, sent as the `apikey` header on every request.
    pub api_key: String,

    /// Access token of the signed-in user. Falls back to the API key.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Path of the REST endpoint below `base_url`.
    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    /// Path of the auth endpoint below `base_url`.
    #[serde(default = "default_auth_path")]
    pub auth_path: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl PostgrestConfig {
    /// Creates a configuration with defaults for everything but the endpoint and key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// The bearer token sent in the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

fn default_rest_path() -> String {
    "/rest/v1".to_string()
}

fn default_auth_path() -> String {
    "/auth/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("gala-postgrest/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for PostgrestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            access_token: None,
            rest_path: default_rest_path(),
            auth_path: default_auth_path(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
