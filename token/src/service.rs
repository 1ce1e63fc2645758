//! Thread-safe service wrapper
//!
//! The host ledger executes every state-changing call as one atomic,
//! serialized transaction. Outside a ledger, `GridTokenService` reproduces
//! that guarantee with a single exclusive lock: every operation runs as one
//! critical section over the whole `TokenState`, so no caller ever observes
//! partially applied state. The wall clock is read once per call and passed
//! down as the engine's `now`.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::config::TokenConfig;
use crate::error::Result;
use crate::TokenState;

pub struct GridTokenService {
    state: Mutex<TokenState>,
}

impl GridTokenService {
    pub fn new(owner: &str, config: TokenConfig) -> Result<Self> {
        let now = unix_now();
        Ok(Self {
            state: Mutex::new(TokenState::new(owner, now, config)?),
        })
    }

    pub fn from_state(state: TokenState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Run a read-only query under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&TokenState) -> T) -> T {
        f(&self.state.lock())
    }

    /// Run a state-changing operation as one atomic unit, with the current
    /// wall-clock time supplied as `now`.
    pub fn execute<T>(&self, f: impl FnOnce(&mut TokenState, u64) -> Result<T>) -> Result<T> {
        let now = unix_now();
        f(&mut self.state.lock(), now)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs()
}
