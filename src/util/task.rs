use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// Runs a future, turning a panic inside it into an `Err` with the panic message.
///
/// Background tasks report panics to the UI through `AppEvent::TaskPanicked`
/// instead of dying silently inside the runtime.
pub async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic payload".to_string()
            }
        })
}
