//! Global application state.
//!
//! One process-wide [`MemoryStore`] behind a `RwLock`, the default
//! backing for the JSON API. The write lock is also what gives the
//! core its concurrency contract: mutations run one at a time, so no
//! two operations against the same squad can interleave.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use crate::store::MemoryStore;

/// Global store singleton.
pub static APP_STATE: Lazy<Arc<RwLock<MemoryStore>>> =
    Lazy::new(|| Arc::new(RwLock::new(MemoryStore::new())));

/// Run a read-only closure against the global store.
pub fn with_store<T>(f: impl FnOnce(&MemoryStore) -> T) -> T {
    let store = APP_STATE.read().unwrap();
    f(&store)
}

/// Run a mutating closure against the global store under the write
/// lock.
pub fn with_store_mut<T>(f: impl FnOnce(&mut MemoryStore) -> T) -> T {
    let mut store = APP_STATE.write().unwrap();
    f(&mut store)
}

/// Drop all global state. Test and demo hook.
pub fn reset_state() {
    APP_STATE.write().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Repository;

    // No reset here: tests share the process-wide singleton, so each
    // one works with its own uniquely-named rows instead of wiping.
    #[test]
    fn test_global_store_round_trip() {
        let user = with_store_mut(|store| store.create_user("state-round-trip-user"));
        let found = with_store(|store| store.user_by_username("state-round-trip-user"));
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }
}
