//! Customizing output with SinOptions and bounding the parser with ParseOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use sin::{parse_with_options, to_string_with_options, ParseOptions, SinOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    workers: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        workers: 4,
    };

    println!("Default (2 spaces):");
    println!("{}", sin::to_string(&config)?);

    println!("4 spaces:");
    let wide = SinOptions::new().with_indent(4);
    println!("{}", to_string_with_options(&config, &wide)?);

    println!("No indentation:");
    let flat = SinOptions::new().with_indent(0);
    println!("{}", to_string_with_options(&config, &flat)?);

    // Untrusted input: cap nesting and the largest array index.
    let limits = ParseOptions::new()
        .with_max_depth(4)
        .with_max_array_index(1_000);

    let hostile = ": [ [4000000000]: true ]";
    let parsed = parse_with_options(hostile, &limits);
    println!("Parsing {:?}:", hostile);
    println!("{}\n", parsed.error_log());

    let nested = ": { .a: { .b: { .c: { .d: { .e: 1 } } } } }";
    let parsed = parse_with_options(nested, &limits);
    println!("Parsing {:?}:", nested);
    println!("{}", parsed.error_log());

    Ok(())
}
