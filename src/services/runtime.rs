//! Tokio Runtime Bridge
//!
//! GPUI runs its own executor; the HTTP client and timers live on tokio.
//! This module owns a shared tokio runtime and lets GPUI tasks await
//! futures running on it.

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        Runtime::new().expect("Failed to create tokio runtime")
    })
}

/// Execute a future on the tokio runtime and await its result from a GPUI
/// task. Used for one-shot waits (debounce sleeps, dismissal timers).
pub async fn run_in_tokio<F, T>(future: F) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = get_runtime().spawn(future);
    match handle.await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

/// Spawn a detached task on the tokio runtime
pub fn spawn_in_tokio<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    get_runtime().spawn(future);
}

/// Block on a future synchronously. Startup only.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_in_tokio() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        spawn_in_tokio(async move {
            flag_clone.store(true, Ordering::SeqCst);
        });

        std::thread::sleep(std::time::Duration::from_millis(100));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_block_on_returns_value() {
        let value = block_on(async { 21 * 2 });
        assert_eq!(value, 42);
    }
}
