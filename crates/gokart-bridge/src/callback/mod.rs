//! Callback bridge infrastructure
//!
//! Routes proxy invocations from the engine back into host callbacks via:
//! - Caller registry (opaque numeric ids → shared callback callers)
//! - Registration holder (RAII ownership of one registry entry)
//! - Bridge factory + shared dispatch trampoline (proxy creation and call
//!   routing)
//!
//! The engine's collector may keep a proxy alive long after the host object
//! that created it is gone. Proxies therefore capture only an ordered pair of
//! numeric ids; the trampoline resolves them through the registry on every
//! call, and a stale or malformed pair degrades to a silent no-op.

pub mod bridge;
pub mod caller;
pub mod registry;

pub use bridge::CallbackBridge;
pub use caller::{CallbackCaller, HostCallback};
pub use registry::{CallerRegistration, CallerRegistry};
