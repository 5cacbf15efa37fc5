//! Parse a SIN document, read typed fields, and round-trip a struct.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use sin::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

const DOCUMENT: &str = r#": {
  .service: "inventory"
  .port: Uint16 8080
  .replicas: 3
  .ratio: 0.75
  .motd: `
Welcome.
Maintenance window is on Sundays.
`
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let parsed = sin::parse(DOCUMENT);
    if !parsed.is_ok() {
        return Err(parsed.error_log().into());
    }

    let doc = parsed.value;
    println!("service:  {}", doc["service"].as_str()?);
    println!("port:     {}", doc["port"].as_u16()?);
    println!("replicas: {}", doc["replicas"].as_i64()?);
    println!("ratio:    {}", doc["ratio"].as_f64()?);
    println!("motd:\n{}\n", doc["motd"].as_str()?);

    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    let text = to_string(&users)?;
    println!("SIN output:\n{}", text);

    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
