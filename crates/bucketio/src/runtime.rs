//! Tokio runtime management for synchronous operations

use crate::{Error, Result};
use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::runtime::{Handle, Runtime};

/// Get or create a shared Tokio runtime for blocking operations
pub(crate) fn get_runtime() -> Result<Arc<Runtime>> {
    static RUNTIME: OnceLock<Arc<Runtime>> = OnceLock::new();

    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime.clone());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("bucketio-worker")
        .build()
        .map_err(|e| Error::Runtime(format!("Failed to create Tokio runtime: {}", e)))?;

    Ok(RUNTIME.get_or_init(|| Arc::new(runtime)).clone())
}

/// Drive `future` to completion on `runtime`.
///
/// Returns `None` when called from inside an async context, where blocking
/// on another runtime would panic.
pub(crate) fn block_on<F: Future>(runtime: &Runtime, future: F) -> Option<F::Output> {
    if Handle::try_current().is_ok() {
        return None;
    }
    Some(runtime.block_on(future))
}
