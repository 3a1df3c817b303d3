//! The process-wide session slot.
//!
//! Exactly one session is active at a time. A successful cycle replaces the
//! previous session wholesale; a failed cycle leaves it in place and records
//! [`Phase::Failed`]. Readers get an `Arc` snapshot, so a later cycle never
//! changes a session someone already holds.

use std::sync::{Arc, PoisonError, RwLock};

use crate::builder::Mandrel;
use crate::error::MandrelError;
use crate::state::Session;
use crate::types::Phase;

static ACTIVE: RwLock<Option<Arc<Session>>> = RwLock::new(None);
static PHASE: RwLock<Phase> = RwLock::new(Phase::Uninitialized);

/// Run a default bootstrap cycle (process environment, current directory)
/// and install the result.
pub fn initialize() -> Result<Arc<Session>, MandrelError> {
    Mandrel::builder().initialize()
}

/// The active session, if a cycle has succeeded since the last [`reset`].
pub fn current() -> Option<Arc<Session>> {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// How the last cycle ended, or `Uninitialized`.
pub fn phase() -> Phase {
    *PHASE.read().unwrap_or_else(PoisonError::into_inner)
}

/// Drop the active session and return to `Uninitialized`.
pub fn reset() {
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = None;
    set_phase(Phase::Uninitialized);
}

pub(crate) fn install(result: Result<Session, MandrelError>) -> Result<Arc<Session>, MandrelError> {
    match result {
        Ok(session) => {
            let session = Arc::new(session);
            *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&session));
            set_phase(Phase::Ready);
            Ok(session)
        }
        Err(e) => {
            tracing::debug!(error = %e, "bootstrap failed, keeping previous session");
            set_phase(Phase::Failed);
            Err(e)
        }
    }
}

fn set_phase(phase: Phase) {
    *PHASE.write().unwrap_or_else(PoisonError::into_inner) = phase;
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

    /// Serializes tests that touch the process-wide slot.
    pub fn global_test_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
