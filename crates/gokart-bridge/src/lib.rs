//! Host-side callback bridge for the Gokart engine
//!
//! Lets a host application expose native callbacks as callable values inside
//! the engine, and safely receive invocations from script code. The engine's
//! garbage collector may retain generated function values long past the host
//! objects that created them, so nothing host-owned ever crosses the boundary
//! as a raw pointer: proxies carry opaque numeric identifiers, and a shared
//! trampoline resolves them through a registry at call time. A stale
//! identifier degrades to a silent no-op, never to undefined behavior.
//!
//! Layers:
//! - [`host`]: the host's unified value representation and shared handles
//! - [`factory`]: conversion between engine-native and host values
//! - [`callback`]: registry, caller, registration holder, bridge factory
//!   and the shared dispatch trampoline

/// Bridge crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod callback;
pub mod factory;
pub mod host;

pub use callback::{CallbackBridge, CallbackCaller, CallerRegistration, CallerRegistry, HostCallback};
pub use factory::{HostValueFactory, ValueFactory};
pub use host::{HostHandle, HostValue, HostValueError};
