//! Host application glue
//!
//! A host builds one shared [`Signal`] at startup. The resolver strategy is
//! picked by name from [`SignalConfig::resolver`], so an application can swap
//! in its own resolver through configuration alone.

use crate::config::SignalConfig;
use crate::container::Container;
use crate::resolver::{ContainerResolver, Resolve};
use crate::signal::Signal;
use crate::types::{Result, SignalError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the built-in container-backed resolver
pub const CONTAINER_RESOLVER: &str = "container";

/// Builds a resolver from the host's container and the signal configuration
pub type ResolverFactory =
    Arc<dyn Fn(Arc<dyn Container>, &SignalConfig) -> Arc<dyn Resolve> + Send + Sync>;

fn container_resolver(container: Arc<dyn Container>, config: &SignalConfig) -> Arc<dyn Resolve> {
    Arc::new(ContainerResolver::from_config(container, config))
}

/// Creates [`Signal`] instances with a configured resolver
pub struct SignalDelegate {
    factories: HashMap<String, ResolverFactory>,
}

impl SignalDelegate {
    /// Create a delegate knowing only the built-in `"container"` resolver
    pub fn new() -> Self {
        let mut factories: HashMap<String, ResolverFactory> = HashMap::new();
        factories.insert(CONTAINER_RESOLVER.to_string(), Arc::new(container_resolver));
        Self { factories }
    }

    /// Builder method: register an alternate resolver under `name`
    ///
    /// Registering an existing name replaces its factory.
    pub fn with_resolver<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Arc<dyn Container>, &SignalConfig) -> Arc<dyn Resolve> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Names of all known resolvers, sorted
    pub fn resolver_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build a signal wrapper using the resolver named in `config`
    pub fn build(&self, container: Arc<dyn Container>, config: &SignalConfig) -> Result<Signal> {
        config.validate()?;

        let factory = self
            .factories
            .get(&config.resolver)
            .ok_or_else(|| SignalError::UnknownResolver(config.resolver.clone()))?;

        log::info!("Building signal with resolver \"{}\"", config.resolver);
        Ok(Signal::from_shared(factory(container, config)))
    }
}

impl Default for SignalDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SignalDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalDelegate")
            .field("resolvers", &self.resolver_names())
            .finish()
    }
}
