//! Tokio Runtime Bridge
//!
//! The shell is a plain blocking loop, but photo capture is async.
//! This module provides a process-wide runtime to drive capture futures.
//!
//! ## Pattern
//!
//! ```text
//! stdin command loop
//!       │
//!       ▼
//! block_on(view_model.take_photo(&capture))
//!       │
//!       ▼
//! tokio::Runtime::block_on()
//!       │
//!       ▼
//! Result returned to the loop
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Block on a future synchronously
///
/// **Warning**: This blocks the current thread. Never call it from inside
/// an async task.
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
    fn test_block_on_returns_value() {
        assert_eq!(block_on(async { 40 + 2 }), 42);
    }
}
