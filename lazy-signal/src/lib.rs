//! Lazy Signal Library
//!
//! Lazy callback indirection for dependency-injection containers. A signal is
//! a symbolic reference to a handler such as `"Mailer::send"`. Registering it
//! returns a proxy immediately; the container lookup and method binding only
//! happen the first time the proxy is called, and the result is cached.
//!
//! # Architecture
//!
//! - [`Signal`] registers signals, hands out proxies, caches resolved targets
//! - [`Resolve`] is the strategy turning a signal into a [`Callable`]
//! - [`ContainerResolver`] is the default strategy, backed by a [`Container`]
//! - [`SignalDelegate`] builds a [`Signal`] with the resolver named in
//!   [`SignalConfig`]
//!
//! The library does NOT:
//! - Implement dependency injection or manage instance lifetimes
//! - Retry failed resolutions (calling the proxy again retries)
//!
//! # Example Usage
//!
//! ```no_run
//! use lazy_signal::{config, Container, SignalDelegate};
//! use serde_json::json;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn wire(container: Arc<dyn Container>) -> lazy_signal::Result<()> {
//!     let config = config::load_config(Path::new("packages/signal.toml"))?;
//!     let signal = SignalDelegate::new().build(container, &config)?;
//!
//!     // Nothing is looked up yet
//!     let send = signal.create("Mailer::send");
//!
//!     // First call resolves "Mailer" through the container
//!     send.call(&[json!("ops@example.com"), json!("disk full")])?;
//!     Ok(())
//! }
//! ```

// Public modules
pub mod config;
pub mod container;
pub mod delegate;
pub mod resolver;
pub mod signal;
pub mod types;

// Re-export main types for convenience
pub use config::SignalConfig;
pub use container::{Component, Container, MethodTable};
pub use delegate::{ResolverFactory, SignalDelegate, CONTAINER_RESOLVER};
pub use resolver::{ContainerResolver, Resolve, DEFAULT_INVOKE_METHOD, SIGNAL_DELIMITER};
pub use signal::Signal;
pub use types::{
    Callable, CallableKind, LookupError, Result, SignalError, SignalValue, Target,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
