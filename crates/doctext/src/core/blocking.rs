//! Running CPU-bound capability work off the async executor.

use crate::{DoctextError, Result};

/// Run `f` on tokio's blocking pool, carrying the current tracing span over.
///
/// A panic or cancellation of the worker becomes `ExtractorFailure`; errors returned
/// by `f` itself are passed through untouched.
pub async fn run_blocking<T, F>(task_name: &'static str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        let _guard = span.entered();
        f()
    })
    .await
    .map_err(|e| DoctextError::extractor_failure_with_source(format!("{} task failed", task_name), e))?
}
