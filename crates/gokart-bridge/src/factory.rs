//! Conversion between engine-native and host values
//!
//! The value factory is the conversion seam between the engine's native
//! representation and the host's unified one. The bridge consumes it in two
//! places: building the argument value handed to a host callback, and
//! wrapping a freshly created proxy function for return to the host.

use std::sync::Arc;

use gokart_engine::{Context, Value};

use crate::host::{HostHandle, HostValue};

/// Converts engine-native values into host handles.
///
/// Injectable so embedders (and tests) can substitute richer conversions.
/// A factory that can fail signals failure per its own contract (typically
/// by panicking); the bridge core neither catches nor classifies that.
pub trait ValueFactory: Send + Sync {
    /// Convert an engine value into a shared host handle.
    ///
    /// The context is the one the value originates from; conversions that
    /// resolve engine state (e.g. function handles) may need it.
    fn from_engine(&self, context: &Context, value: &Value) -> HostHandle;
}

/// Default value factory: total, structure-preserving conversion.
///
/// Every engine value kind has a host representation, so this conversion
/// cannot fail. Function values become opaque shared handles.
#[derive(Debug, Default)]
pub struct HostValueFactory;

impl HostValueFactory {
    pub fn new() -> Self {
        Self
    }

    fn convert(&self, context: &Context, value: &Value) -> HostValue {
        match value {
            Value::Null => HostValue::Null,
            Value::Bool(b) => HostValue::Bool(*b),
            Value::Number(n) => HostValue::Number(*n),
            Value::BigInt(i) => HostValue::BigInt(*i),
            Value::String(s) => HostValue::String(s.as_ref().clone()),
            Value::Array(items) => HostValue::Array(
                items.iter().map(|item| self.convert(context, item)).collect(),
            ),
            Value::Function(f) => HostValue::Function(Arc::clone(f)),
        }
    }
}

impl ValueFactory for HostValueFactory {
    fn from_engine(&self, context: &Context, value: &Value) -> HostHandle {
        Arc::new(self.convert(context, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gokart_engine::{CallScope, ValueArray};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, HostValue::Null)]
    #[case(Value::Bool(true), HostValue::Bool(true))]
    #[case(Value::Number(2.5), HostValue::Number(2.5))]
    #[case(Value::BigInt(-3), HostValue::BigInt(-3))]
    #[case(Value::from("abc"), HostValue::String("abc".to_string()))]
    fn converts_scalars(#[case] input: Value, #[case] expected: HostValue) {
        let ctx = Context::new();
        let factory = HostValueFactory::new();
        assert_eq!(*factory.from_engine(&ctx, &input), expected);
    }

    #[test]
    fn converts_nested_arrays() {
        let ctx = Context::new();
        let factory = HostValueFactory::new();
        let inner = Value::Array(ValueArray::from_vec(vec![Value::from(1.0)]));
        let outer = Value::Array(ValueArray::from_vec(vec![inner, Value::from("x")]));
        assert_eq!(
            *factory.from_engine(&ctx, &outer),
            HostValue::Array(vec![
                HostValue::Array(vec![HostValue::Number(1.0)]),
                HostValue::String("x".to_string()),
            ])
        );
    }

    #[test]
    fn function_values_stay_shared_handles() {
        fn noop(_scope: &mut CallScope<'_>) {}
        let ctx = Context::new();
        let factory = HostValueFactory::new();
        let func = ctx.new_function(noop, Value::Null);
        let engine_handle = func.as_function().unwrap();

        let handle = factory.from_engine(&ctx, &func);
        let host_handle = handle.as_function().expect("function handle");
        assert!(Arc::ptr_eq(host_handle, engine_handle));
    }
}
