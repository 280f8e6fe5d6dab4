//! Restock report over a JSON inventory: keeps the items below their threshold.
//!
//! Run with `RUST_LOG=trace` to see each traversal.
use pro_singulis_json::{bind, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Restock {
    sku: String,
    missing: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let inventory = r#"{
        "apples": {"count": 3, "sku": "A-1"},
        "pears": {"count": 40, "sku": "P-7"},
        "plums": {"count": 0, "sku": "P-9"}
    }"#;

    let mut restock = bind(
        |scope: &Value, args: &[&Value]| {
            let threshold = scope["threshold"].as_u64()?;
            let count = args[0]["count"].as_u64()?;
            (count < threshold).then(|| {
                json!({
                    "sku": args[0]["sku"],
                    "missing": threshold - count,
                })
            })
        },
        json!({"threshold": 10}),
    );

    let report = restock.call_str(inventory, None)?.unwrap_or(Value::Null);
    if let Value::Object(entries) = report {
        for (name, entry) in entries {
            let entry: Restock = serde_json::from_value(entry)?;
            println!("{}: order {} of {}", name, entry.missing, entry.sku);
        }
    }
    Ok(())
}
