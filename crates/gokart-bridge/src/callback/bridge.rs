//! Bridge factory and shared dispatch trampoline
//!
//! Creates proxy function values the engine can call, and routes every such
//! call back to the registered host callback. A proxy captures exactly two
//! wide integers (the caller registry id and the binding-local callback id)
//! and nothing else. Script code may retain or introspect a proxy long after
//! its host owner is gone; an opaque id pair cannot be dereferenced or
//! corrupted into a crash the way an embedded host pointer could.

use std::sync::Arc;

use gokart_engine::{CallScope, ContextHolder, Value, ValueArray};
use tracing::trace;

use crate::callback::caller::HostCallback;
use crate::callback::registry::{CallerRegistration, CallerRegistry};
use crate::factory::ValueFactory;
use crate::host::HostHandle;

/// Creates engine-callable proxies for one host callback registration.
///
/// Construction registers the callback (via an owned [`CallerRegistration`])
/// and wires the registry into the context's embedder data so the trampoline
/// can resolve it at call time. Dropping the bridge drops the registration;
/// proxies already handed to the engine keep existing but become permanently
/// inert.
pub struct CallbackBridge {
    context_holder: ContextHolder,
    factory: Arc<dyn ValueFactory>,
    registration: CallerRegistration,
}

impl CallbackBridge {
    pub fn new(
        context_holder: ContextHolder,
        registry: Arc<CallerRegistry>,
        factory: Arc<dyn ValueFactory>,
        callback: HostCallback,
    ) -> Self {
        context_holder
            .current()
            .set_embedder_data(Arc::clone(&registry));
        let registration = CallerRegistration::new(registry, Arc::clone(&factory), callback);
        Self {
            context_holder,
            factory,
            registration,
        }
    }

    /// Registry id of this bridge's registration.
    pub fn caller_id(&self) -> u64 {
        self.registration.id()
    }

    /// Create a proxy for `callback_id`, wrapped for return to the host.
    ///
    /// The captured data is the fixed ordered pair
    /// `[BigInt(caller_id), BigInt(callback_id)]`. `BigInt`, not `Number`:
    /// only the wide-integer kind carries the full u64 range without
    /// precision loss. Any number of proxies may share one registration while
    /// differing in callback id.
    pub fn make_proxy(&self, callback_id: u64) -> HostHandle {
        let context = self.context_holder.current();
        let data = Value::Array(ValueArray::from_vec(vec![
            Value::from(self.registration.id()),
            Value::from(callback_id),
        ]));
        let proxy = context.new_function(dispatch_proxy_call, data);
        trace!(
            caller_id = self.registration.id(),
            callback_id,
            context_id = context.id(),
            "created callback proxy"
        );
        self.factory.from_engine(&context, &proxy)
    }
}

/// The single trampoline behind every proxy.
///
/// Disambiguates purely through the validated captured data; there is no
/// per-proxy code. Every validation failure below (malformed captured data,
/// a non-lossless id, a registry missing from the current context, an id
/// with no live entry) makes the call a silent no-op: no return value, no
/// diagnostic. A proxy outliving its host owner is the routine case here,
/// not an error.
pub(crate) fn dispatch_proxy_call(scope: &mut CallScope<'_>) {
    let Value::Array(data) = scope.data() else {
        return;
    };
    if data.len() != 2 {
        return;
    }
    let Some(caller_id) = data.get(0).and_then(Value::as_u64_lossless) else {
        return;
    };
    let Some(callback_id) = data.get(1).and_then(Value::as_u64_lossless) else {
        return;
    };

    // Materialize the argument sequence before resolving the caller; order
    // and count stay exactly as received.
    let args: Vec<Value> = scope.args().to_vec();

    let Some(registry) = scope.context().embedder_data::<CallerRegistry>() else {
        return;
    };
    let Some(caller) = registry.lookup(caller_id) else {
        return;
    };
    caller.do_callback(scope.context(), callback_id, &args);
}
