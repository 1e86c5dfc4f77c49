use fxhash::FxHashMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Outcome of a handler or hook call.
pub type HandlerResult = Result<Value, String>;

type HandlerFn = dyn Fn(&Value) -> HandlerResult + Send + Sync;

/// A callable bound to an endpoint or a lifecycle hook.
///
/// Cloning is cheap and clones compare equal; two handlers built from separate closures never do.
#[derive(Clone)]
pub struct Handler {
    label: Cow<'static, str>,
    func: Arc<HandlerFn>,
}

impl Handler {
    /// Wraps a closure. The label shows up in diagnostics and serialized plans.
    pub fn new<F>(label: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&Value) -> HandlerResult + Send + Sync + 'static,
    {
        Self { label: label.into(), func: Arc::new(func) }
    }

    /// A handler that returns `null` without looking at its input.
    pub fn noop(label: impl Into<Cow<'static, str>>) -> Self {
        Self::new(label, |_| Ok(Value::Null))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Invokes the handler.
    ///
    /// # Errors
    /// Whatever the wrapped closure reports.
    pub fn call(&self, input: &Value) -> HandlerResult {
        (self.func)(input)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.label).finish()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Serialize for Handler {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.label)
    }
}

/// Named handlers that manifest files refer to by string.
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    handlers: FxHashMap<String, Handler>,
}

impl HandlerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `func` under `name`, replacing any previous entry.
    pub fn insert<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&Value) -> HandlerResult + Send + Sync + 'static,
    {
        let name = name.into();
        self.handlers.insert(name.clone(), Handler::new(name, func));
        self
    }

    /// Registers a [`Handler::noop`] for every name, keeping existing entries.
    pub fn stub<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            self.handlers.entry(name.clone()).or_insert_with(|| Handler::noop(name));
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
