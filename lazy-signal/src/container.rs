//! Container seam
//!
//! The dependency-injection container is an external collaborator. The
//! library only needs to fetch an instance by identifier and call named
//! methods on it.

use crate::types::{Callable, LookupError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// An instance handed out by a container, exposing named methods
pub trait Component: Send + Sync {
    /// Check whether `method` can be invoked on this instance
    fn has_method(&self, method: &str) -> bool;

    /// Invoke `method` with positional arguments
    fn call(&self, method: &str, args: &[Value]) -> Result<Value>;
}

/// Lookup service consulted by the resolver
pub trait Container: Send + Sync {
    /// Get (and possibly instantiate) the instance registered as `identifier`
    fn get(&self, identifier: &str) -> std::result::Result<Arc<dyn Component>, LookupError>;
}

/// A component assembled from named closures
///
/// Lets a host expose an instance to signals without a hand-written
/// [`Component`] impl.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: HashMap<String, Callable>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: register a method under `name`
    pub fn with_method<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Callable::new(func));
        self
    }

    /// Names of all registered methods, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Component for MethodTable {
    fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        match self.methods.get(method) {
            Some(callable) => callable.call(args),
            None => Err(anyhow::anyhow!("No method named \"{}\"", method).into()),
        }
    }
}
