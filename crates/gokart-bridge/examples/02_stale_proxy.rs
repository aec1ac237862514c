//! Stale proxy example
//!
//! The engine's collector may keep a proxy alive long after the host object
//! that created it is gone. Invoking such a proxy is a safe no-op.
//!
//! Run with: cargo run --example 02_stale_proxy -p gokart-bridge

use std::sync::Arc;

use gokart_bridge::{CallbackBridge, CallerRegistry, HostValueFactory};
use gokart_engine::{Context, ContextHolder, Value};

fn main() {
    let context = Arc::new(Context::new());
    let registry = Arc::new(CallerRegistry::new());

    let bridge = CallbackBridge::new(
        ContextHolder::new(Arc::clone(&context)),
        Arc::clone(&registry),
        Arc::new(HostValueFactory::new()),
        Arc::new(|callback_id, value| {
            println!("callback {} invoked with {}", callback_id, value);
        }),
    );

    let proxy = bridge.make_proxy(7);
    let func = proxy.as_function().expect("proxy is a function").clone();

    func.invoke(&context, &[Value::from("live")]);
    // Output: callback 7 invoked with [live]

    // Tear the host side down; the proxy survives in "engine memory".
    drop(bridge);
    println!("registrations left: {}", registry.len());
    // Output: registrations left: 0

    // The stale proxy is permanently inert: no callback, no error.
    let result = func.invoke(&context, &[Value::from("stale")]);
    println!("stale call returned: {:?}", result);
    // Output: stale call returned: None
}
