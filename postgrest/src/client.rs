// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! `PostgREST` client for table reads and writes.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::PostgrestConfig;
use crate::error::PostgrestError;
use crate::http::{HttpClient, SINGLE_OBJECT};
use crate::types::AuthUser;

/// `PostgREST` client for the tables behind the planner.
///
/// # Example
///
/// ```ignore
/// use gala_postgrest::{PostgrestClient, PostgrestConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PostgrestConfig::new("https://xyz.supabase.co", "anon-key");
/// let client = PostgrestClient::new(config)?;
/// let tasks: Vec<serde_json::Value> = client.select_eq("tasks", "event_id", "42").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http: Arc<HttpClient>,
}

impl PostgrestClient {
    /// Creates a new client.
    pub fn new(config: PostgrestConfig) -> Result<Self, PostgrestError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Selects every row of `table` whose `column` equals `value`.
    pub async fn select_eq<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<T>, PostgrestError> {
        tracing::debug!(table, column, value, "select rows");
        let url = self.http.rest_url(table);
        let filter = format!("eq.{value}");
        let req = self
            .http
            .build_request(Method::GET, &url)
            .query(&[("select", "*"), (column, filter.as_str())]);

        let resp = self.http.execute(req, table).await?;
        Ok(resp.json().await?)
    }

    /// Selects the single row of `table` whose `id` equals `id`.
    ///
    /// Returns [`PostgrestError::NotFound`] when no row matches.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<T, PostgrestError> {
        tracing::debug!(table, id, "select row");
        let url = self.http.rest_url(table);
        let filter = format!("eq.{id}");
        let req = self
            .http
            .build_request(Method::GET, &url)
            .query(&[("select", "*"), ("id", filter.as_str())])
            .header("Accept", SINGLE_OBJECT);

        let resp = self.http.execute(req, table).await?;
        Ok(resp.json().await?)
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert_one<B, T>(&self, table: &str, body: &B) -> Result<T, PostgrestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, "insert row");
        let url = self.http.rest_url(table);
        let req = self
            .http
            .build_request(Method::POST, &url)
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(body);

        let resp = self.http.execute(req, table).await?;
        Ok(resp.json().await?)
    }

    /// Patches the row with the given `id` and returns it as stored.
    ///
    /// Returns [`PostgrestError::NotFound`] when no row matches.
    pub async fn update_one<B, T>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<T, PostgrestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, id, "update row");
        let url = self.http.rest_url(table);
        let filter = format!("eq.{id}");
        let req = self
            .http
            .build_request(Method::PATCH, &url)
            .query(&[("select", "*"), ("id", filter.as_str())])
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(body);

        let resp = self.http.execute(req, table).await?;
        Ok(resp.json().await?)
    }

    /// Looks up the user behind the access token.
    ///
    /// Returns `Ok(None)` when the server reports no signed-in user.
    pub async fn auth_user(&self) -> Result<Option<AuthUser>, PostgrestError> {
        let url = self.http.auth_url("user");
        let resp = self
            .http
            .build_request(Method::GET, &url)
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(Some(resp.json().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(PostgrestError::Status {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            }),
        }
    }
}
