//! Execution contexts and embedder data
//!
//! A `Context` is the engine-side execution environment handle the host binds
//! against. Hosts attach their own services to a context through type-keyed
//! embedder data slots, the standard channel for native callbacks to reach
//! host state without smuggling raw pointers through engine objects.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::value::{FunctionValue, NativeCallback, Value};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Context construction options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextOptions {
    /// Optional human-readable label, surfaced in diagnostics.
    pub label: Option<String>,
}

/// Execution environment handle.
///
/// Contexts carry a process-unique id, construction options, and type-keyed
/// embedder data slots. They are shared via `Arc` and safe to use from any
/// thread the engine chooses to run script on.
pub struct Context {
    id: u64,
    options: ContextOptions,
    slots: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_options(ContextOptions::default())
    }

    pub fn with_options(options: ContextOptions) -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            options,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Process-unique context id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.options.label.as_deref()
    }

    /// Attach a host service to this context, keyed by its type.
    ///
    /// A later `set_embedder_data` with the same type replaces the earlier
    /// attachment.
    pub fn set_embedder_data<T: Any + Send + Sync>(&self, data: Arc<T>) {
        let mut slots = self.slots.lock().expect("context slot lock poisoned");
        slots.insert(TypeId::of::<T>(), data);
    }

    /// Fetch a host service previously attached with `set_embedder_data`.
    pub fn embedder_data<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let slots = self.slots.lock().expect("context slot lock poisoned");
        let slot = slots.get(&TypeId::of::<T>())?.clone();
        slot.downcast::<T>().ok()
    }

    /// Create an engine-native function value bound to `callback`, with
    /// `data` captured immutably at creation.
    pub fn new_function(&self, callback: NativeCallback, data: Value) -> Value {
        Value::Function(Arc::new(FunctionValue::new(callback, data)))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("label", &self.options.label)
            .finish_non_exhaustive()
    }
}

/// Shared-ownership wrapper supplying the current execution context.
///
/// Queried whenever host code needs the context handle for a given engine
/// instance, e.g. when creating function values.
#[derive(Clone, Debug)]
pub struct ContextHolder {
    context: Arc<Context>,
}

impl ContextHolder {
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    /// Current execution context.
    pub fn current(&self) -> Arc<Context> {
        Arc::clone(&self.context)
    }
}
