//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::docx::DocxConverter;

/// Shared application state
///
/// Built once in `main` and handed to every handler; nothing here is
/// initialised at import time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    docx_converter: Arc<dyn DocxConverter>,
}

impl AppState {
    pub fn new(config: Config, db: SqlitePool, docx_converter: Arc<dyn DocxConverter>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                docx_converter,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the PDF to DOCX converter
    pub fn docx_converter(&self) -> &dyn DocxConverter {
        self.inner.docx_converter.as_ref()
    }

    /// Close the database pool, waiting for in-flight queries
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down application state...");
        self.inner.db.close().await;
    }
}
