//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use sin::{from_value, to_value, Kind, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Indexing builds whatever path it needs.
    let mut config = Value::new();
    config["server"]["host"] = Value::from("localhost");
    config["server"]["port"] = Value::from(8080u16);
    config["features"][2] = Value::from("metrics");
    config["features"][0] = Value::from("auth");

    println!("Config as SIN:\n{}", config);

    // Slot 1 was padded with an empty object.
    println!("features[1] kind: {}", config["features"][1].kind());

    // Accessors require the exact kind.
    let port = &config["server"]["port"];
    println!("port as u16: {}", port.as_u16()?);
    match port.as_i64() {
        Ok(v) => println!("port as i64: {}", v),
        Err(e) => println!("port as i64: {}", e),
    }

    // Branch on kind when the shape is data-dependent.
    for (key, value) in config["server"].as_object()? {
        match value.kind() {
            Kind::String => println!("  {} is text: {}", key, value.as_str()?),
            kind if kind.is_integer() => println!("  {} is a {} number", key, kind),
            kind => println!("  {} is {}", key, kind),
        }
    }

    // Edit arrays in place through the mutable view.
    config["features"].as_array_mut()?.retain(|v| !v.is_object());
    println!("features after cleanup: {}", config["features"].as_array()?.len());

    // Convert an existing struct to Value and back.
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let mut user_value = to_value(&user)?;
    user_value["roles"][2] = Value::from("auditor");
    println!("\nUser as Value:\n{}", user_value);

    let user_back: User = from_value(user_value)?;
    println!("Roles after edit: {:?}", user_back.roles);

    Ok(())
}
