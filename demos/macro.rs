//! Using the sin! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use sin::{sin, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let bool_val = sin!(true);
    let number = sin!(42i64);
    let small = sin!(7u8);
    let text = sin!("Hello, SIN!");

    println!("Primitives:");
    print!("  bool:   {}", bool_val);
    print!("  number: {}", number);
    print!("  small:  {}", small);
    println!("  text:   {}", text);

    let numbers = sin!([1i64, 2i64, 3i64]);
    let mixed = sin!([1u16, "two", true, {}]);

    println!("Arrays:");
    println!("{}", numbers);
    println!("{}", mixed);

    let config = sin!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432u16,
            "name": "mydb"
        },
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Nested structures:");
    println!("{}", config);

    let items: Value = (1..=3u32)
        .map(|id| sin!({"id": id, "status": "active"}))
        .collect();

    let summary = sin!({
        "total": 3u32,
        "items": items
    });

    println!("Dynamic construction:");
    println!("{}", summary);

    println!("Accessing values:");
    println!("  App name: {}", config["app"]["name"].as_str()?);
    println!("  Features: {}", config["features"].as_array()?.len());

    Ok(())
}
