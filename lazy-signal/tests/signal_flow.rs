// End-to-end flow: delegate -> signal -> container-backed resolution
use lazy_signal::{
    config, Component, Container, LookupError, MethodTable, SignalConfig, SignalDelegate,
    SignalError,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Container that builds a fresh instance per lookup and counts lookups
#[derive(Default)]
struct CountingContainer {
    lookups: AtomicUsize,
    requested: parking_lot::Mutex<Vec<String>>,
}

impl CountingContainer {
    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Container for CountingContainer {
    fn get(&self, identifier: &str) -> Result<Arc<dyn Component>, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(identifier.to_string());

        match identifier {
            "Joiner" => Ok(Arc::new(
                MethodTable::new()
                    .with_method("invoke", |args| {
                        let parts: Vec<&str> = args.iter().filter_map(Value::as_str).collect();
                        Ok(json!(parts.join(" ")))
                    })
                    .with_method("count", |args| Ok(json!(args.len()))),
            )),
            "Inventory" => {
                let mut stock = HashMap::new();
                stock.insert("apple", 3);
                stock.insert("pear", 0);
                Ok(Arc::new(MethodTable::new().with_method("lookup", move |args| {
                    let item = args.first().and_then(Value::as_str).unwrap_or_default();
                    Ok(json!(stock.get(item).copied().unwrap_or(0)))
                })))
            }
            other => Err(LookupError::not_found(other)),
        }
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn lookup_is_deferred_until_first_call() {
    init_logging();
    let container = Arc::new(CountingContainer::default());
    let signal = SignalDelegate::new()
        .build(container.clone(), &SignalConfig::default())
        .unwrap();

    let join = signal.create("Joiner");
    let count = signal.create("Joiner::count");
    assert_eq!(container.lookups(), 0);
    assert_eq!(signal.len(), 2);

    assert_eq!(join.call(&[json!("foo"), json!("bar")]).unwrap(), json!("foo bar"));
    assert_eq!(container.lookups(), 1);

    for _ in 0..3 {
        assert_eq!(count.call(&[json!(1), json!(2), json!(3)]).unwrap(), json!(3));
    }
    assert_eq!(container.lookups(), 2);
    assert_eq!(*container.requested.lock(), vec!["Joiner", "Joiner"]);
}

#[test]
fn resolved_signal_returns_target_directly() {
    init_logging();
    let container = Arc::new(CountingContainer::default());
    let signal = SignalDelegate::new()
        .build(container.clone(), &SignalConfig::default())
        .unwrap();

    let proxy = signal.create("Inventory::lookup");
    assert!(proxy.is_proxy());
    assert_eq!(proxy.call(&[json!("apple")]).unwrap(), json!(3));

    let target = signal.create("Inventory::lookup");
    assert!(!target.is_proxy());
    assert!(target.ptr_eq(&signal.create("Inventory::lookup")));
    assert_eq!(target.call(&[json!("pear")]).unwrap(), json!(0));

    // The first proxy keeps working off the cache
    assert_eq!(proxy.call(&[json!("kiwi")]).unwrap(), json!(0));
    assert_eq!(container.lookups(), 1);
}

#[test]
fn lookup_failure_surfaces_through_proxy() {
    init_logging();
    let container = Arc::new(CountingContainer::default());
    let signal = SignalDelegate::new()
        .build(container.clone(), &SignalConfig::default())
        .unwrap();

    let proxy = signal.create("Mailer::send");
    match proxy.call(&[]) {
        Err(SignalError::LookupFailure(err)) => assert_eq!(err.identifier, "Mailer"),
        other => panic!("Expected LookupFailure, got {:?}", other),
    }

    // Not cached, so the next call tries the container again
    assert!(proxy.call(&[]).is_err());
    assert_eq!(container.lookups(), 2);
    assert!(!signal.is_resolved("Mailer::send"));
}

#[test]
fn missing_method_surfaces_as_invalid_signal() {
    init_logging();
    let signal = SignalDelegate::new()
        .build(Arc::new(CountingContainer::default()), &SignalConfig::default())
        .unwrap();

    let err = signal.create("Joiner::split").call(&[]).unwrap_err();
    assert!(matches!(err, SignalError::InvalidSignal(ref s) if s == "Joiner::split"));
    assert!(err.to_string().contains("Joiner::split"));
}

#[test]
fn direct_resolve_skips_registry() {
    init_logging();
    let container = Arc::new(CountingContainer::default());
    let signal = SignalDelegate::new()
        .build(container.clone(), &SignalConfig::default())
        .unwrap();

    let callable = signal.resolve("Joiner").unwrap().into_callable().unwrap();
    assert_eq!(callable.call(&[json!("a"), json!("b")]).unwrap(), json!("a b"));
    assert!(signal.is_empty());
    assert_eq!(container.lookups(), 1);
}

#[test]
fn configuration_file_selects_method_and_delimiter() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[signal]\nresolver = \"container\"\ninvoke_method = \"count\"\ndelimiter = \"->\"")
        .unwrap();

    let config = config::load_config(file.path()).unwrap();
    let signal = SignalDelegate::new()
        .build(Arc::new(CountingContainer::default()), &config)
        .unwrap();

    assert_eq!(signal.create("Joiner").call(&[json!("x")]).unwrap(), json!(1));
    assert_eq!(
        signal.create("Joiner->invoke").call(&[json!("x"), json!("y")]).unwrap(),
        json!("x y")
    );
}
