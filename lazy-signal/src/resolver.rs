//! Resolver strategies
//!
//! A resolver turns a raw signal into something callable. The default
//! [`ContainerResolver`] reads signals of the form `"Identifier"` or
//! `"Identifier::method"`, fetches `Identifier` from the container and binds
//! the method to the instance.

use crate::config::SignalConfig;
use crate::container::Container;
use crate::types::{describe, Callable, Result, SignalError, SignalValue, Target};
use std::fmt;
use std::sync::Arc;

/// Method used when a signal names no method
pub const DEFAULT_INVOKE_METHOD: &str = "invoke";

/// Separator between identifier and method in a signal string
pub const SIGNAL_DELIMITER: &str = "::";

/// Strategy converting a signal into a callable target
pub trait Resolve: Send + Sync {
    fn resolve(&self, signal: &SignalValue) -> Result<Target>;
}

impl<F> Resolve for F
where
    F: Fn(&SignalValue) -> Result<Target> + Send + Sync,
{
    fn resolve(&self, signal: &SignalValue) -> Result<Target> {
        self(signal)
    }
}

/// Resolves signals through a dependency-injection container
pub struct ContainerResolver {
    container: Arc<dyn Container>,
    invoke_method: String,
    delimiter: String,
}

impl ContainerResolver {
    /// Create a resolver with the default method name and delimiter
    pub fn new(container: Arc<dyn Container>) -> Self {
        Self {
            container,
            invoke_method: DEFAULT_INVOKE_METHOD.to_string(),
            delimiter: SIGNAL_DELIMITER.to_string(),
        }
    }

    /// Create a resolver using the method name and delimiter from `config`
    pub fn from_config(container: Arc<dyn Container>, config: &SignalConfig) -> Self {
        Self {
            container,
            invoke_method: config.invoke_method.clone(),
            delimiter: config.delimiter.clone(),
        }
    }

    /// Builder method: set the default method name
    pub fn with_invoke_method(mut self, method: impl Into<String>) -> Self {
        self.invoke_method = method.into();
        self
    }

    /// Split a signal string into `(identifier, method)`
    ///
    /// Only the first delimiter separates; the rest stays in the method name.
    pub fn split<'a>(&'a self, signal: &'a str) -> (&'a str, &'a str) {
        match signal.split_once(self.delimiter.as_str()) {
            Some((identifier, method)) => (identifier, method),
            None => (signal, self.invoke_method.as_str()),
        }
    }
}

impl Resolve for ContainerResolver {
    fn resolve(&self, signal: &SignalValue) -> Result<Target> {
        let raw = signal
            .as_str()
            .ok_or_else(|| SignalError::InvalidSignal(describe(signal)))?;
        let (identifier, method) = self.split(raw);

        log::debug!("Resolving signal \"{}\" to {}{}{}", raw, identifier, self.delimiter, method);

        let instance = self.container.get(identifier)?;

        if !instance.has_method(method) {
            return Err(SignalError::InvalidSignal(raw.to_string()));
        }

        let method = method.to_string();
        Ok(Target::Callable(Callable::new(move |args| {
            instance.call(&method, args)
        })))
    }
}

impl fmt::Debug for ContainerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerResolver")
            .field("invoke_method", &self.invoke_method)
            .field("delimiter", &self.delimiter)
            .finish_non_exhaustive()
    }
}
