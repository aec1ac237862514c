//! Gokart engine ABI
//!
//! This crate is the engine-facing surface a host embeds against:
//! - Engine-native value representation (`Value`, `ValueArray`)
//! - Native function values with captured data (`FunctionValue`, `CallScope`)
//! - Execution contexts and embedder data slots (`Context`, `ContextHolder`)
//!
//! The engine's interpreter and garbage collector live elsewhere; this crate
//! carries only the object surface that crosses the host boundary.

/// Engine ABI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod context;
pub mod value;

pub use context::{Context, ContextHolder, ContextOptions};
pub use value::{CallScope, FunctionValue, NativeCallback, Value, ValueArray};
