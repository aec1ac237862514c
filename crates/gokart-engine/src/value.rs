//! Engine-native value representation
//!
//! Shared value surface between engine and host:
//! - Numbers, Bools, Null: Immediate values (stack-allocated)
//! - BigInts: wide integers, the only numeric kind that carries the full
//!   unsigned 64-bit range without precision loss
//! - Strings: Heap-allocated, reference-counted (Arc<String>), immutable
//! - Arrays: Copy-on-write (ValueArray wrapping Arc<Vec<Value>>), value semantics
//! - Functions: native function values carrying captured data

use std::fmt;
use std::sync::Arc;

use crate::context::Context;

/// Copy-on-write array. Cheap to clone (refcount bump).
/// Mutations on a shared array clone the inner Vec first (Arc::make_mut).
#[derive(Clone, Debug)]
pub struct ValueArray(Arc<Vec<Value>>);

impl ValueArray {
    pub fn new() -> Self {
        ValueArray(Arc::new(Vec::new()))
    }

    pub fn from_vec(v: Vec<Value>) -> Self {
        ValueArray(Arc::new(v))
    }

    /// Read access — no clone needed.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get element by index — returns reference into inner Vec.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Mutating access — triggers CoW if Arc is shared.
    pub fn push(&mut self, value: Value) {
        Arc::make_mut(&mut self.0).push(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Convert to owned Vec — clones only if shared.
    pub fn into_vec(self) -> Vec<Value> {
        Arc::try_unwrap(self.0).unwrap_or_else(|arc| (*arc).clone())
    }
}

impl Default for ValueArray {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

impl std::ops::Index<usize> for ValueArray {
    type Output = Value;
    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl From<Vec<Value>> for ValueArray {
    fn from(v: Vec<Value>) -> Self {
        ValueArray::from_vec(v)
    }
}

impl FromIterator<Value> for ValueArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueArray(Arc::new(iter.into_iter().collect()))
    }
}

/// Implementation of a native function value.
///
/// A plain `fn` pointer, not a boxed closure: every per-invocation distinction
/// must come from the function value's captured data, never from per-function
/// code. The engine invokes this for each call of the owning function value.
pub type NativeCallback = fn(&mut CallScope<'_>);

/// Per-invocation view handed to a native callback.
///
/// Exposes the current execution context, the function value's captured data,
/// the call arguments in order, and a return slot. The return slot starts
/// empty; a callback that never sets it yields no value to the caller.
pub struct CallScope<'a> {
    context: &'a Context,
    data: &'a Value,
    args: &'a [Value],
    ret: Option<Value>,
}

impl<'a> CallScope<'a> {
    fn new(context: &'a Context, data: &'a Value, args: &'a [Value]) -> Self {
        Self {
            context,
            data,
            args,
            ret: None,
        }
    }

    /// Context the call is executing in.
    pub fn context(&self) -> &Context {
        self.context
    }

    /// Captured data bound to the function value at creation.
    pub fn data(&self) -> &Value {
        self.data
    }

    /// Call arguments, order and count exactly as passed.
    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// Set the value returned to the caller.
    pub fn set_return(&mut self, value: Value) {
        self.ret = Some(value);
    }
}

/// Engine-native function value: a shared native callback plus captured data.
///
/// The captured data is fixed at creation and immutable afterward. The engine
/// owns function values and may retain them arbitrarily long, independent of
/// any host object that produced them.
pub struct FunctionValue {
    callback: NativeCallback,
    data: Value,
}

impl FunctionValue {
    pub fn new(callback: NativeCallback, data: Value) -> Self {
        Self { callback, data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Invoke the function the way the engine would: build a call scope,
    /// run the native callback, hand back whatever it put in the return slot.
    pub fn invoke(&self, context: &Context, args: &[Value]) -> Option<Value> {
        let mut scope = CallScope::new(context, &self.data, args);
        (self.callback)(&mut scope);
        scope.ret
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// Engine-native value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// Wide integer value. Unlike `Number`, carries the full unsigned 64-bit
    /// range without precision loss.
    BigInt(i128),
    /// String value (reference-counted, immutable)
    String(Arc<String>),
    /// Array value (copy-on-write, value semantics)
    Array(ValueArray),
    /// Native function value (shared handle; the engine may retain it
    /// arbitrarily long)
    Function(Arc<FunctionValue>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
        }
    }

    /// Extract an unsigned 64-bit integer, losslessly or not at all.
    ///
    /// Only `BigInt` values exactly representable as `u64` qualify; every
    /// other kind (including `Number`, whose f64 payload cannot cover the
    /// full u64 range) returns `None`.
    pub fn as_u64_lossless(&self) -> Option<u64> {
        match self {
            Value::BigInt(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ValueArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<FunctionValue>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // Function values compare by identity, like engine object handles.
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::BigInt(i) => write!(f, "{}n", i),
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Array(arr) => {
                let elements: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Function(_) => write!(f, "<native fn>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::BigInt(i128::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::new(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::new(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(ValueArray::from_vec(v))
    }
}
