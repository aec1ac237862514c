//! Shared test utilities for the bridge integration tests.

use std::sync::{Arc, Mutex};

use gokart_bridge::{CallbackBridge, CallerRegistry, HostCallback, HostHandle, HostValueFactory};
use gokart_engine::{Context, ContextHolder, Value};

/// Records every host-callback invocation for later assertions.
pub struct Recorder {
    calls: Mutex<Vec<(u64, HostHandle)>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn host_callback(self: &Arc<Self>) -> HostCallback {
        let recorder = Arc::clone(self);
        Arc::new(move |callback_id, value| {
            recorder
                .calls
                .lock()
                .expect("recorder lock poisoned")
                .push((callback_id, value));
        })
    }

    pub fn calls(&self) -> Vec<(u64, HostHandle)> {
        self.calls.lock().expect("recorder lock poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("recorder lock poisoned").len()
    }
}

/// A fully wired bridge: context, registry, recorder, bridge.
pub struct Harness {
    pub context: Arc<Context>,
    pub registry: Arc<CallerRegistry>,
    pub recorder: Arc<Recorder>,
    pub bridge: CallbackBridge,
}

pub fn harness() -> Harness {
    let context = Arc::new(Context::new());
    let registry = Arc::new(CallerRegistry::new());
    let recorder = Recorder::new();
    let bridge = bridge_on(&context, &registry, &recorder);
    Harness {
        context,
        registry,
        recorder,
        bridge,
    }
}

/// An extra bridge sharing an existing context and registry.
pub fn bridge_on(
    context: &Arc<Context>,
    registry: &Arc<CallerRegistry>,
    recorder: &Arc<Recorder>,
) -> CallbackBridge {
    CallbackBridge::new(
        ContextHolder::new(Arc::clone(context)),
        Arc::clone(registry),
        Arc::new(HostValueFactory::new()),
        recorder.host_callback(),
    )
}

/// Invoke a proxy the way the engine would on a script call.
pub fn invoke_proxy(proxy: &HostHandle, context: &Context, args: &[Value]) -> Option<Value> {
    proxy
        .as_function()
        .expect("proxy is a function handle")
        .invoke(context, args)
}
