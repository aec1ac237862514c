//! Callback caller
//!
//! Adapts an ordered sequence of engine-native argument values into a single
//! host handle and invokes the host callback with it.

use std::sync::Arc;

use gokart_engine::{Context, Value, ValueArray};

use crate::factory::ValueFactory;
use crate::host::HostHandle;

/// Host callback signature: binding-local callback id plus the converted
/// argument value. Error handling inside the callback is the host's business.
pub type HostCallback = Arc<dyn Fn(u64, HostHandle) + Send + Sync>;

/// Invokes a host callback with converted engine arguments.
///
/// Owns its value factory and callback handle; immutable after construction.
pub struct CallbackCaller {
    factory: Arc<dyn ValueFactory>,
    callback: HostCallback,
}

impl CallbackCaller {
    pub fn new(factory: Arc<dyn ValueFactory>, callback: HostCallback) -> Self {
        Self { factory, callback }
    }

    /// Convert `args` (order and count preserved) through the value factory
    /// and invoke the host callback with `(callback_id, value)`.
    ///
    /// Whatever the factory or the callback does, including panicking, is
    /// their contract; nothing is caught or classified here.
    pub fn do_callback(&self, context: &Context, callback_id: u64, args: &[Value]) {
        let args_value = Value::Array(ValueArray::from_vec(args.to_vec()));
        let handle = self.factory.from_engine(context, &args_value);
        (self.callback)(callback_id, handle);
    }
}
