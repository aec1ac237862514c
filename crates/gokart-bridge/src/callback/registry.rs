//! Caller registry and registration holder
//!
//! The registry is the arena that replaces raw host pointers across the
//! engine boundary: proxies embed numeric ids, and the ids index into this
//! map. Ids are monotonically assigned, process-unique per registry, and
//! never reused, so a stale id resolves to "not found" instead of a dangling
//! pointer.
//!
//! The registry is an explicit, injectable service (`Arc<CallerRegistry>`),
//! not a process global; entries remove themselves through their registration
//! holders, so no teardown pass is needed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::callback::caller::{CallbackCaller, HostCallback};
use crate::factory::ValueFactory;

struct RegistryState {
    next_id: u64,
    callers: HashMap<u64, Arc<CallbackCaller>>,
}

/// Thread-safe map from caller id to shared callback-caller ownership.
///
/// One mutex guards both the map and the id counter, so concurrent
/// `register` calls can never be issued the same id. The critical section
/// covers map and counter mutation only; callback execution happens on a
/// shared handle after the lock is released.
pub struct CallerRegistry {
    state: Mutex<RegistryState>,
}

impl CallerRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                next_id: 0,
                callers: HashMap::new(),
            }),
        }
    }

    /// Store `caller` under the next unused id and return the id.
    ///
    /// Ids start at 0, increase monotonically and are never reused, even
    /// after removal. Cannot fail.
    pub fn register(&self, caller: Arc<CallbackCaller>) -> u64 {
        let mut state = self.state.lock().expect("registry lock poisoned");
        let id = state.next_id;
        state.next_id += 1;
        state.callers.insert(id, caller);
        debug!(caller_id = id, "registered callback caller");
        id
    }

    /// Remove the entry for `id`. Removing an absent id is a no-op.
    pub fn unregister(&self, id: u64) {
        let mut state = self.state.lock().expect("registry lock poisoned");
        if state.callers.remove(&id).is_some() {
            debug!(caller_id = id, "unregistered callback caller");
        }
    }

    /// Shared handle to the caller registered under `id`, if any.
    ///
    /// Returning `Arc` means a concurrent `unregister` cannot invalidate a
    /// caller mid-call; its storage is freed only when the last handle drops.
    pub fn lookup(&self, id: u64) -> Option<Arc<CallbackCaller>> {
        let state = self.state.lock().expect("registry lock poisoned");
        state.callers.get(&id).cloned()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        let state = self.state.lock().expect("registry lock poisoned");
        state.callers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CallerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII ownership of one registry entry.
///
/// Constructs a caller from its dependencies, registers it, and unregisters
/// exactly once on drop. Not `Clone`: a registration has exactly one owner,
/// and the registry entry exists iff the owner is alive.
pub struct CallerRegistration {
    registry: Arc<CallerRegistry>,
    id: u64,
}

impl CallerRegistration {
    pub fn new(
        registry: Arc<CallerRegistry>,
        factory: Arc<dyn ValueFactory>,
        callback: HostCallback,
    ) -> Self {
        let caller = Arc::new(CallbackCaller::new(factory, callback));
        let id = registry.register(caller);
        Self { registry, id }
    }

    /// The registry id, for embedding into proxy captured data.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for CallerRegistration {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::HostValueFactory;
    use pretty_assertions::assert_eq;

    fn test_caller() -> Arc<CallbackCaller> {
        Arc::new(CallbackCaller::new(
            Arc::new(HostValueFactory::new()),
            Arc::new(|_, _| {}),
        ))
    }

    #[test]
    fn register_assigns_sequential_ids_from_zero() {
        let registry = CallerRegistry::new();
        assert_eq!(registry.register(test_caller()), 0);
        assert_eq!(registry.register(test_caller()), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unregistered_ids_resolve_to_none() {
        let registry = CallerRegistry::new();
        let id = registry.register(test_caller());
        assert!(registry.lookup(id).is_some());

        registry.unregister(id);
        assert!(registry.lookup(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_of_never_registered_id_is_none() {
        let registry = CallerRegistry::new();
        assert!(registry.lookup(0).is_none());
        assert!(registry.lookup(u64::MAX).is_none());
    }

    #[test]
    fn unregister_of_absent_id_is_a_noop() {
        let registry = CallerRegistry::new();
        registry.unregister(17);
        let id = registry.register(test_caller());
        registry.unregister(id);
        registry.unregister(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let registry = CallerRegistry::new();
        let first = registry.register(test_caller());
        registry.unregister(first);
        let second = registry.register(test_caller());
        assert!(second > first);
    }

    #[test]
    fn registration_unregisters_exactly_once_on_drop() {
        let registry = Arc::new(CallerRegistry::new());
        let held = CallerRegistration::new(
            Arc::clone(&registry),
            Arc::new(HostValueFactory::new()),
            Arc::new(|_, _| {}),
        );
        let id = held.id();
        assert!(registry.lookup(id).is_some());

        drop(held);
        assert!(registry.lookup(id).is_none());
    }

    #[test]
    fn concurrent_registration_never_duplicates_ids() {
        use std::collections::HashSet;
        use std::thread;

        let registry = Arc::new(CallerRegistry::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                (0..64).map(|_| registry.register(test_caller())).collect::<Vec<u64>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("register thread panicked") {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 8 * 64);
        assert_eq!(registry.len(), 8 * 64);
    }
}
