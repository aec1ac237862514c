//! Host unified value representation
//!
//! The host-side mirror of engine values. Host callbacks never see
//! engine-native objects directly; they receive shared [`HostHandle`]s built
//! by a value factory. Function values stay opaque handles: the host can
//! store them or hand them back to the engine, but cannot look inside.

use std::fmt;
use std::sync::Arc;

use gokart_engine::FunctionValue;
use thiserror::Error;

/// Shared handle to a host value, as delivered to host callbacks.
pub type HostHandle = Arc<HostValue>;

/// Errors for host-value interop conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostValueError {
    /// Value kind has no JSON representation
    #[error("cannot represent {kind} in JSON")]
    Unrepresentable { kind: &'static str },
    /// Integer too wide for a JSON number
    #[error("integer {0} does not fit in a JSON number")]
    IntegerOutOfRange(i128),
    /// NaN or infinity
    #[error("non-finite number cannot be represented in JSON")]
    NonFiniteNumber,
}

/// Host-side value.
#[derive(Clone, Debug)]
pub enum HostValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// Wide integer value
    BigInt(i128),
    /// Owned string value
    String(String),
    /// Array of host values
    Array(Vec<HostValue>),
    /// Opaque engine-function handle (identity compared)
    Function(Arc<FunctionValue>),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "bool",
            HostValue::Number(_) => "number",
            HostValue::BigInt(_) => "bigint",
            HostValue::String(_) => "string",
            HostValue::Array(_) => "array",
            HostValue::Function(_) => "function",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<FunctionValue>> {
        match self {
            HostValue::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Convert to a JSON value for host-side transport.
    ///
    /// Function handles and integers wider than a JSON number have no JSON
    /// form and fail with [`HostValueError`].
    pub fn to_json(&self) -> Result<serde_json::Value, HostValueError> {
        match self {
            HostValue::Null => Ok(serde_json::Value::Null),
            HostValue::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            HostValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or(HostValueError::NonFiniteNumber),
            HostValue::BigInt(i) => {
                if let Ok(n) = i64::try_from(*i) {
                    Ok(serde_json::Value::Number(serde_json::Number::from(n)))
                } else if let Ok(n) = u64::try_from(*i) {
                    Ok(serde_json::Value::Number(serde_json::Number::from(n)))
                } else {
                    Err(HostValueError::IntegerOutOfRange(*i))
                }
            }
            HostValue::String(s) => Ok(serde_json::Value::String(s.clone())),
            HostValue::Array(items) => items
                .iter()
                .map(HostValue::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            HostValue::Function(_) => Err(HostValueError::Unrepresentable { kind: "function" }),
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Number(a), HostValue::Number(b)) => a == b,
            (HostValue::BigInt(a), HostValue::BigInt(b)) => a == b,
            (HostValue::String(a), HostValue::String(b)) => a == b,
            (HostValue::Array(a), HostValue::Array(b)) => a == b,
            (HostValue::Function(a), HostValue::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => write!(f, "null"),
            HostValue::Bool(b) => write!(f, "{}", b),
            HostValue::Number(n) => write!(f, "{}", n),
            HostValue::BigInt(i) => write!(f, "{}n", i),
            HostValue::String(s) => write!(f, "{}", s),
            HostValue::Array(items) => {
                let elements: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            HostValue::Function(_) => write!(f, "<function>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gokart_engine::Value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_conversion_covers_data_values() {
        let value = HostValue::Array(vec![
            HostValue::Null,
            HostValue::Bool(true),
            HostValue::Number(1.5),
            HostValue::BigInt(7),
            HostValue::String("x".to_string()),
        ]);
        assert_eq!(value.to_json().unwrap(), json!([null, true, 1.5, 7, "x"]));
    }

    #[test]
    fn json_conversion_widens_large_bigints() {
        let value = HostValue::BigInt(i128::from(u64::MAX));
        assert_eq!(value.to_json().unwrap(), json!(u64::MAX));
    }

    #[test]
    fn json_conversion_rejects_oversized_bigints() {
        let value = HostValue::BigInt(i128::from(u64::MAX) + 1);
        assert_eq!(
            value.to_json(),
            Err(HostValueError::IntegerOutOfRange(i128::from(u64::MAX) + 1))
        );
    }

    #[test]
    fn json_conversion_rejects_functions_and_nan() {
        fn noop(_scope: &mut gokart_engine::CallScope<'_>) {}
        let func = HostValue::Function(Arc::new(FunctionValue::new(noop, Value::Null)));
        assert_eq!(
            func.to_json(),
            Err(HostValueError::Unrepresentable { kind: "function" })
        );
        assert_eq!(
            HostValue::Number(f64::NAN).to_json(),
            Err(HostValueError::NonFiniteNumber)
        );
    }

    #[test]
    fn function_handles_compare_by_identity() {
        fn noop(_scope: &mut gokart_engine::CallScope<'_>) {}
        let f = Arc::new(FunctionValue::new(noop, Value::Null));
        let a = HostValue::Function(Arc::clone(&f));
        let b = HostValue::Function(f);
        let c = HostValue::Function(Arc::new(FunctionValue::new(noop, Value::Null)));
        assert_eq!(a, b);
        assert!(a != c);
    }
}
