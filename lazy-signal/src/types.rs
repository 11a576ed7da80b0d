//! Core types for the lazy signal library
//!
//! This module defines the values that flow through the library: the opaque
//! signal value, the callable abstraction shared by proxies and resolved
//! targets, and the errors raised while resolving or invoking them.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Opaque signal value, compared by value (typically `"Identifier::method"`)
pub type SignalValue = Value;

/// Result type for signal operations
pub type Result<T> = std::result::Result<T, SignalError>;

type CallFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// Whether a callable is a deferred proxy or a resolved target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// Resolves its signal on first invocation, then forwards
    Proxy,
    /// A concrete handler
    Target,
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableKind::Proxy => write!(f, "proxy"),
            CallableKind::Target => write!(f, "target"),
        }
    }
}

/// A function value taking positional arguments and returning a single result
///
/// Cloning is cheap and clones share identity, see [`Callable::ptr_eq`].
#[derive(Clone)]
pub struct Callable {
    func: Arc<CallFn>,
    kind: CallableKind,
}

impl Callable {
    /// Wrap a closure as a resolved target
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            kind: CallableKind::Target,
        }
    }

    pub(crate) fn proxy<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            kind: CallableKind::Proxy,
        }
    }

    /// Invoke with the given positional arguments
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }

    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    pub fn is_proxy(&self) -> bool {
        self.kind == CallableKind::Proxy
    }

    /// True if both handles point at the same underlying function
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.func) as *const (),
            Arc::as_ptr(&other.func) as *const (),
        )
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// What a resolver produced for a signal
#[derive(Debug, Clone)]
pub enum Target {
    /// An invocable handler
    Callable(Callable),
    /// Something that cannot be invoked
    Value(Value),
}

impl Target {
    pub fn is_callable(&self) -> bool {
        matches!(self, Target::Callable(_))
    }

    /// Get the callable, if the target is invocable
    pub fn into_callable(self) -> Option<Callable> {
        match self {
            Target::Callable(callable) => Some(callable),
            Target::Value(_) => None,
        }
    }
}

impl From<Callable> for Target {
    fn from(callable: Callable) -> Self {
        Target::Callable(callable)
    }
}

/// Raised by a [`crate::Container`] when an identifier cannot be located
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Container lookup failed for \"{identifier}\": {reason}")]
pub struct LookupError {
    /// The identifier that was requested
    pub identifier: String,
    /// Why the lookup failed
    pub reason: String,
}

impl LookupError {
    pub fn new(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// The identifier is not registered in the container
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::new(identifier, "not found")
    }
}

/// Errors that can occur while resolving or invoking signals
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Resolver failed to convert signal \"{0}\" to callable target")]
    InvalidSignal(String),

    #[error(transparent)]
    LookupFailure(#[from] LookupError),

    #[error(transparent)]
    Target(#[from] anyhow::Error),

    #[error("Unknown resolver: {0}")]
    UnknownResolver(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Render a signal for diagnostics (strings without JSON quotes)
pub(crate) fn describe(signal: &SignalValue) -> String {
    match signal {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
