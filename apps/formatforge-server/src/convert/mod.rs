//! Conversion pipelines
//!
//! Synchronous decode -> transform -> encode steps. Handlers run them on
//! the blocking pool through [`run_blocking`] and persist history after.

mod compress;
mod images;

pub use compress::*;
pub use images::*;

use crate::error::{AppError, Result};

/// Run CPU-bound work off the async executor
pub async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("conversion task failed: {}", e)))?
}
