// system-tests/src/pool.rs
// ============================================================================
// Module: License Pool Lock
// Description: Process-wide lock over the shared remote license pool.
// Purpose: Keep read-then-act setup sequences from interleaving across tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Live tests pick a license from the remote pool and then act on it. Cargo
//! runs test functions on parallel threads, so two tests could pick the same
//! license and change its state under each other. Every live test holds a
//! [`PoolGuard`] for its whole body, which makes tests within a binary run
//! one at a time. Cargo already runs test binaries one after another.
//!
//! A test that panics while holding the lock poisons it; the next test takes
//! the lock anyway, since the guarded value carries no state.

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Lock shared by every test in the process.
static POOL_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive access to the remote license pool until dropped.
#[derive(Debug)]
pub struct PoolGuard {
    /// Held lock.
    _guard: MutexGuard<'static, ()>,
}

/// Blocks until the pool is free and returns its guard.
#[must_use]
pub fn lock_pool() -> PoolGuard {
    PoolGuard {
        _guard: POOL_LOCK.lock().unwrap_or_else(PoisonError::into_inner),
    }
}
