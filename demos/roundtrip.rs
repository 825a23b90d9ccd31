//! Build a mapping, write it as KVP text, and parse it back.
//!
//! Run with: cargo run --example roundtrip

use kvp_text::{from_str, to_string, KvpMap, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut map = KvpMap::new();
    map.insert("region".to_string(), Value::from("eu-west-1"));
    map.insert("replicas".to_string(), Value::from(3));
    map.insert(
        "thresholds".to_string(),
        Value::List(vec![
            Value::Float(0.5),
            Value::Float(0.9),
            Value::Float(0.99),
        ]),
    );
    map.insert("verbose".to_string(), Value::Bool(true));
    map.insert("comment".to_string(), Value::Null);

    // Write to KVP text
    let text = to_string(&map);
    println!("KVP output:\n{}", text);

    // Parse it back
    let map_back = from_str(&text)?;
    assert_eq!(map, map_back);
    println!("✓ Round-trip successful");

    Ok(())
}
