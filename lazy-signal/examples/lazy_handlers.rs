//! Lazy handler wiring demo
//!
//! Registers a few signals against a small container, shows that nothing is
//! instantiated until a handler is actually called, and prints the results.
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example lazy_handlers

use lazy_signal::{Component, Container, LookupError, MethodTable, SignalConfig, SignalDelegate};
use serde_json::{json, Value};
use std::sync::Arc;

struct DemoContainer;

impl Container for DemoContainer {
    fn get(&self, identifier: &str) -> Result<Arc<dyn Component>, LookupError> {
        println!("  [container] instantiating {}", identifier);
        match identifier {
            "Greeter" => Ok(Arc::new(MethodTable::new().with_method("invoke", |args| {
                let name = args.first().and_then(Value::as_str).unwrap_or("stranger");
                Ok(json!(format!("Hello, {}!", name)))
            }))),
            "Math" => Ok(Arc::new(
                MethodTable::new()
                    .with_method("sum", |args| Ok(json!(args.iter().filter_map(Value::as_f64).sum::<f64>())))
                    .with_method("max", |args| {
                        Ok(args
                            .iter()
                            .filter_map(Value::as_f64)
                            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
                            .map(|m| json!(m))
                            .unwrap_or(Value::Null))
                    }),
            )),
            other => Err(LookupError::not_found(other)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let signal = SignalDelegate::new().build(Arc::new(DemoContainer), &SignalConfig::default())?;

    println!("Registering handlers");
    let greet = signal.create("Greeter");
    let sum = signal.create("Math::sum");
    let max = signal.create("Math::max");
    let broken = signal.create("Weather::forecast");
    println!("  {} signals registered, none resolved\n", signal.len());

    println!("Calling handlers");
    println!("  greet -> {}", greet.call(&[json!("world")])?);
    println!("  sum   -> {}", sum.call(&[json!(1), json!(2.5), json!(4)])?);
    println!("  max   -> {}", max.call(&[json!(3), json!(9), json!(-1)])?);
    println!("  sum   -> {} (cached)", sum.call(&[json!(10)])?);

    match broken.call(&[]) {
        Ok(value) => println!("  forecast -> {}", value),
        Err(e) => println!("  forecast failed: {}", e),
    }

    println!("\nResolved handlers:");
    for s in signal.signals() {
        println!("  {:<20} resolved={}", s.to_string(), signal.is_resolved(s.clone()));
    }

    Ok(())
}
