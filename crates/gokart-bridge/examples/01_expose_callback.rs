//! Minimal bridge example
//!
//! Exposes a host callback to the engine as a proxy function value, then
//! invokes the proxy the way script code would.
//!
//! Run with: cargo run --example 01_expose_callback -p gokart-bridge

use std::sync::Arc;

use gokart_bridge::{CallbackBridge, CallerRegistry, HostValueFactory};
use gokart_engine::{Context, ContextHolder, Value};

fn main() {
    let context = Arc::new(Context::new());
    let registry = Arc::new(CallerRegistry::new());

    // Register a host callback; the bridge owns the registration.
    let bridge = CallbackBridge::new(
        ContextHolder::new(Arc::clone(&context)),
        registry,
        Arc::new(HostValueFactory::new()),
        Arc::new(|callback_id, value| {
            println!("callback {} invoked with {}", callback_id, value);
        }),
    );

    // Create a proxy for binding-local id 42 and hand it to "script".
    let proxy = bridge.make_proxy(42);
    let func = proxy.as_function().expect("proxy is a function");

    // Script calls the proxy with two arguments.
    func.invoke(&context, &[Value::from("x"), Value::from(3.5)]);
    // Output: callback 42 invoked with [x, 3.5]

    // Zero-argument calls work the same way.
    func.invoke(&context, &[]);
    // Output: callback 42 invoked with []
}
