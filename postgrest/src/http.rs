// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with `PostgREST` authentication headers.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::PostgrestConfig;
use crate::error::PostgrestError;

/// Media type asking `PostgREST` for exactly one row as a JSON object.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// HTTP client for `PostgREST` operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: PostgrestConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(config: PostgrestConfig) -> Result<Self, PostgrestError> {
        if config.base_url.is_empty() {
            return Err(PostgrestError::Config("base_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request with `apikey` and bearer headers.
    pub fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.config.bearer())
    }

    /// Joins the REST endpoint and a table name.
    pub fn rest_url(&self, table: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.rest_path,
            table
        )
    }

    /// Joins the auth endpoint and a resource path.
    pub fn auth_url(&self, resource: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.auth_path,
            resource
        )
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// `table` names the resource in [`PostgrestError::NotFound`] when a
    /// single-object request matched no row.
    pub async fn execute(
        &self,
        req: RequestBuilder,
        table: &str,
    ) -> Result<Response, PostgrestError> {
        let resp = req.send().await?;

        match resp.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(resp),
            StatusCode::NOT_ACCEPTABLE => Err(PostgrestError::NotFound(table.to_string())),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                let message = error_message(resp).await;
                Err(PostgrestError::Unauthorized(format!("{status}: {message}")))
            }
            status => {
                let message = error_message(resp).await;
                Err(PostgrestError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Pulls the `message` field out of a `PostgREST` error body, or returns the raw text.
async fn error_message(resp: Response) -> String {
    let text = resp
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response".to_string());

    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("msg"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(text)
}
