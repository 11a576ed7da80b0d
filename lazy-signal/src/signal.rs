//! Main signal API
//!
//! [`Signal`] hands out proxies for signals and resolves each signal at most
//! once, on the first invocation of any of its proxies. Once resolved,
//! [`Signal::create`] returns the resolved target itself.

use crate::resolver::Resolve;
use crate::types::{describe, Callable, Result, SignalError, SignalValue, Target};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registered signals and their resolved targets, keyed by signal number
#[derive(Default)]
struct Registry {
    /// Raw signals in registration order; entries are never removed
    signals: Vec<SignalValue>,
    /// Resolved targets (sparse)
    targets: HashMap<usize, Callable>,
}

impl Registry {
    fn position(&self, signal: &SignalValue) -> Option<usize> {
        self.signals.iter().position(|registered| registered == signal)
    }
}

struct Inner {
    resolver: Arc<dyn Resolve>,
    registry: Mutex<Registry>,
}

impl Inner {
    fn proxy(&self, signal_number: usize, args: &[Value]) -> Result<Value> {
        self.target(signal_number)?.call(args)
    }

    /// Get the cached target for `signal_number`, resolving it if needed
    ///
    /// The lock is released while the resolver runs. If two callers resolve
    /// the same signal concurrently the first stored target wins.
    fn target(&self, signal_number: usize) -> Result<Callable> {
        let signal = {
            let registry = self.registry.lock();
            if let Some(target) = registry.targets.get(&signal_number) {
                log::trace!("Signal #{} already resolved", signal_number);
                return Ok(target.clone());
            }
            registry.signals[signal_number].clone()
        };

        log::debug!("Resolving signal #{}: {}", signal_number, describe(&signal));

        let callable = match self.resolver.resolve(&signal)? {
            Target::Callable(callable) => callable,
            Target::Value(value) => {
                log::warn!(
                    "Signal \"{}\" resolved to non-callable value {}",
                    describe(&signal),
                    value
                );
                return Err(SignalError::InvalidSignal(describe(&signal)));
            }
        };

        let mut registry = self.registry.lock();
        Ok(registry
            .targets
            .entry(signal_number)
            .or_insert(callable)
            .clone())
    }
}

/// Lazy callback wrapper over a resolver
///
/// Cloning is cheap; clones share one registry.
///
/// # Example
/// ```
/// use lazy_signal::{Callable, Signal, SignalValue, Target};
/// use serde_json::json;
///
/// let signal = Signal::new(|_: &SignalValue| -> lazy_signal::Result<Target> {
///     Ok(Callable::new(|args| Ok(json!(args.len()))).into())
/// });
///
/// let count = signal.create("Counter::count");
/// assert!(count.is_proxy());
/// assert_eq!(count.call(&[json!(1), json!(2)]).unwrap(), json!(2));
///
/// // Resolved now, so the target itself comes back
/// assert!(!signal.create("Counter::count").is_proxy());
/// ```
#[derive(Clone)]
pub struct Signal {
    inner: Arc<Inner>,
}

impl Signal {
    /// Create a new signal wrapper around `resolver`
    pub fn new<R>(resolver: R) -> Self
    where
        R: Resolve + 'static,
    {
        Self::from_shared(Arc::new(resolver))
    }

    /// Create a new signal wrapper around a shared resolver
    pub fn from_shared(resolver: Arc<dyn Resolve>) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    /// Track a signal and get a proxy to take its place
    ///
    /// Returns the resolved target directly if the signal was already
    /// resolved. Otherwise returns a new proxy; the resolver is not consulted
    /// until the proxy is invoked.
    pub fn create(&self, signal: impl Into<SignalValue>) -> Callable {
        let signal = signal.into();

        let signal_number = {
            let mut registry = self.inner.registry.lock();
            match registry.position(&signal) {
                Some(signal_number) => {
                    if let Some(target) = registry.targets.get(&signal_number) {
                        return target.clone();
                    }
                    signal_number
                }
                None => {
                    log::debug!(
                        "Registering signal #{}: {}",
                        registry.signals.len(),
                        describe(&signal)
                    );
                    registry.signals.push(signal);
                    registry.signals.len() - 1
                }
            }
        };

        let inner = Arc::clone(&self.inner);
        Callable::proxy(move |args| inner.proxy(signal_number, args))
    }

    /// Resolve a signal without registering or caching it
    pub fn resolve(&self, signal: impl Into<SignalValue>) -> Result<Target> {
        self.inner.resolver.resolve(&signal.into())
    }

    /// Check whether `signal` is registered and resolved
    pub fn is_resolved(&self, signal: impl Into<SignalValue>) -> bool {
        let signal = signal.into();
        let registry = self.inner.registry.lock();
        registry
            .position(&signal)
            .map(|signal_number| registry.targets.contains_key(&signal_number))
            .unwrap_or(false)
    }

    /// Registered signals in signal-number order
    pub fn signals(&self) -> Vec<SignalValue> {
        self.inner.registry.lock().signals.clone()
    }

    /// Number of registered signals
    pub fn len(&self) -> usize {
        self.inner.registry.lock().signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.lock();
        f.debug_struct("Signal")
            .field("signals", &registry.signals.len())
            .field("resolved", &registry.targets.len())
            .finish_non_exhaustive()
    }
}
