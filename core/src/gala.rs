// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tokio::fs;

use crate::analytics::EventAnalytics;
use crate::backend::{DB_FILENAME, MemoryBackend, PostgrestAuth, PostgrestBackend, SqliteBackend};
use crate::config::{Config, StoreKind};
use crate::context::EventContext;
use crate::data::EventData;
use crate::error::{Error, Result};
use crate::store::{Auth, Backend, Principal, StaticAuth, Store};
use crate::sync::EventSync;
use crate::types::Id;

/// Gala event-planning application core.
#[derive(Debug, Clone)]
pub struct Gala {
    config: Config,
    store: Store,
    context: EventContext,
}

impl Gala {
    /// Creates a new Gala instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self> {
        config.normalize()?;

        let (backend, auth): (Arc<dyn Backend>, Arc<dyn Auth>) = match config.store {
            StoreKind::Memory => (Arc::new(MemoryBackend::new()), static_auth(&config)),
            StoreKind::Sqlite => {
                let path = match &config.state_dir {
                    Some(dir) => {
                        prepare(dir).await?;
                        Some(dir.join(DB_FILENAME))
                    }
                    None => None,
                };
                let backend = SqliteBackend::open(path.as_deref())
                    .await
                    .map_err(|e| Error::Config(format!("Failed to initialize db: {e}")))?;
                (Arc::new(backend), static_auth(&config))
            }
            StoreKind::Postgrest => {
                let server = config.postgrest.clone().ok_or_else(|| {
                    Error::Config("store \"postgrest\" requires a [core.postgrest] table".into())
                })?;
                let backend = PostgrestBackend::new(server)?;
                let auth = PostgrestAuth::from(&backend);
                (Arc::new(backend), Arc::new(auth))
            }
        };

        Ok(Self::with_backend(config, backend, auth))
    }

    /// Creates an instance on an already opened backend.
    pub fn with_backend(config: Config, backend: Arc<dyn Backend>, auth: Arc<dyn Auth>) -> Self {
        let store = Store::new(backend);
        let context = EventContext::new(store.clone(), auth);
        Self {
            config,
            store,
            context,
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared store handle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The event context of this session.
    pub fn context(&self) -> &EventContext {
        &self.context
    }

    /// Creates a sync on the store of this instance, with no event selected.
    pub fn sync(&self) -> EventSync {
        EventSync::new(self.store.clone())
    }

    /// Reads an event with all its collections.
    pub async fn event_data(&self, event_id: &Id) -> Result<EventData> {
        EventData::fetch(&self.store, event_id).await
    }

    /// Reads an event and computes its analytics.
    pub async fn analytics(&self, event_id: &Id) -> Result<EventAnalytics> {
        let data = self.event_data(event_id).await?;
        Ok(EventAnalytics::compute(&data))
    }

    /// Close the Gala instance, releasing the store.
    pub async fn close(self) -> Result<()> {
        self.store.close().await
    }
}

fn static_auth(config: &Config) -> Arc<dyn Auth> {
    match &config.user {
        Some(user) => Arc::new(StaticAuth::new(Principal::new(user.as_str()))),
        None => Arc::new(StaticAuth::anonymous()),
    }
}

async fn prepare(state_dir: &std::path::Path) -> Result<()> {
    tracing::debug!(path = %state_dir.display(), "ensuring state directory exists");
    fs::create_dir_all(state_dir)
        .await
        .map_err(|e| Error::Config(format!("Failed to create state directory: {e}")))
}
