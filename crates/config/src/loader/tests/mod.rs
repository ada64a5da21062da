//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods and `build()` validation.
//! - Test environment variable handling and precedence.
//! - Test `.env` file loading and the `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
