//! # sin
//!
//! A typed, human-readable structured-data format with a dynamic value model.
//!
//! ## What is SIN?
//!
//! SIN looks a little like JSON, but every scalar keeps its exact numeric kind. An
//! `Uint16` written out is an `Uint16` when read back, not "some number". Objects
//! keep their member order, so rendering is deterministic.
//!
//! ```text
//! : {
//!   .name: "sin"
//!   .port: Uint16
//!   8080
//!   .ratio: 0.75
//!   .hosts: [
//!     [0]: "a.example"
//!     [1]: "b.example"
//!   ]
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Exact kinds**: fourteen kinds, ten of them fixed-width numbers, with range
//!   checks on read
//! - **Resilient parser**: one pass reports every problem with its line number and
//!   still returns a best-effort tree
//! - **Auto-vivifying indexing**: `value["a"][3] = ...` builds the path it needs
//! - **Serde compatible**: convert any `#[derive(Serialize, Deserialize)]` type
//!   through the value model, keeping integer widths
//! - **Round-trip stable**: render, parse, render again gives the same text
//!
//! ## Quick Start
//!
//! ### Parsing and Building Values
//!
//! ```rust
//! use sin::{Kind, Value};
//!
//! let parsed = sin::parse(":{\n .a: Int8 3\n .b: [\n [1]: Int16 2\n [4]: Int32 7\n ]\n}");
//! assert!(parsed.is_ok(), "{}", parsed.error_log());
//!
//! let mut value = parsed.value;
//! assert_eq!(value["a"].as_i8().unwrap(), 3);
//! assert_eq!(value["b"][4].as_i32().unwrap(), 7);
//! assert_eq!(value["b"][0].kind(), Kind::Object);
//!
//! value["c"] = Value::from("added");
//! let text = value.to_string();
//! assert_eq!(sin::parse(&text).value.to_string(), text);
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use sin::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     name: String,
//!     port: u16,
//!     weight: f32,
//! }
//!
//! let server = Server { name: "edge".to_string(), port: 443, weight: 0.5 };
//!
//! let text = to_string(&server).unwrap();
//! assert_eq!(text, ": {\n  .name: \"edge\"\n  .port: Uint16\n  443\n  .weight: Float\n  0.5\n}\n");
//!
//! let back: Server = from_str(&text).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Dynamic Values with the sin! Macro
//!
//! ```rust
//! use sin::sin;
//!
//! let data = sin!({
//!     "name": "Alice",
//!     "age": 30u8,
//!     "tags": ["rust", "serde"]
//! });
//!
//! assert_eq!(data["name"].as_str().unwrap(), "Alice");
//! assert_eq!(data["tags"].as_array().unwrap().len(), 2);
//! ```
//!
//! ## Errors
//!
//! Malformed text never fails [`parse`]; check [`Parsed::is_ok`] or use
//! [`Parsed::into_result`]. Asking a value for the wrong kind (`as_u8` on an
//! `Int64`) returns [`Error::TypeMismatch`]. Diagnostic events are emitted through
//! `tracing`; the crate installs no subscriber.
//!
//! ## Format Reference
//!
//! See the [`grammar`] module.
//!
//! ## Demos
//!
//! The `demos/` directory holds small programs:
//!
//! - **`simple.rs`** - parse a document and read fields
//! - **`macro.rs`** - build values with the `sin!` macro
//! - **`dynamic_values.rs`** - indexing, auto-vivification and kind checks
//! - **`custom_options.rs`** - indentation and parser limits
//!
//! Run any demo with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod grammar;
pub mod kind;
pub mod macros;
pub mod map;
pub mod options;
mod reader;
pub mod ser;
pub mod value;

pub use de::{from_value, Parsed, Parser};
pub use error::{Error, ParseError, ParseErrors, Result};
pub use kind::{Kind, UnknownKind};
pub use map::SinMap;
pub use options::{ParseOptions, SinOptions};
pub use ser::{to_value, Serializer, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parse SIN text into a [`Value`].
///
/// Never fails: problems are collected on the returned [`Parsed`] alongside a
/// best-effort tree.
///
/// # Examples
///
/// ```rust
/// let parsed = sin::parse(":123");
/// assert!(parsed.is_ok());
/// assert_eq!(parsed.value.as_i64().unwrap(), 123);
///
/// let parsed = sin::parse(":[0extra]: 1 ]");
/// assert!(!parsed.is_ok());
/// ```
#[must_use]
pub fn parse(text: &str) -> Parsed {
    Parser::new(text).parse()
}

/// Parse SIN text with limits from [`ParseOptions`].
#[must_use]
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Parsed {
    Parser::with_options(text, options.clone()).parse()
}

/// Parse SIN text, failing with [`Error::Parse`] if anything was reported.
///
/// # Examples
///
/// ```rust
/// let value = sin::from_str_value(": true").unwrap();
/// assert!(value.as_bool().unwrap());
///
/// let err = sin::from_str_value(": Uint8 256").unwrap_err();
/// assert!(err.to_string().contains("out of range for Uint8"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] carrying every diagnostic.
pub fn from_str_value(text: &str) -> Result<Value> {
    parse(text).into_result()
}

/// Serialize any `T: Serialize` to a SIN string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i64, y: i64 }
///
/// let text = sin::to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, ": {\n  .x: 1\n  .y: 2\n}\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (non-string map keys,
/// 128-bit integers).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &SinOptions::default())
}

/// Serialize any `T: Serialize` to a SIN string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &SinOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_value(value)?.to_sin_string_with_options(options))
}

/// Serialize any `T: Serialize` to a writer in SIN format.
///
/// # Examples
///
/// ```rust
/// let mut buffer = Vec::new();
/// sin::to_writer(&mut buffer, &vec![true, false]).unwrap();
/// assert_eq!(buffer, b": [\n  [0]: true\n  [1]: false\n]\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &SinOptions::default())
}

/// Serialize any `T: Serialize` to a writer in SIN format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &SinOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from SIN text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = sin::from_str(": {\n .x: Int32 1\n .y: Int32 2\n}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text has diagnostics, or a conversion error if
/// the tree does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(from_str_value(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream of SIN text.
///
/// # Errors
///
/// Returns an error if reading fails, the text is not valid SIN, or the tree
/// does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of SIN text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid SIN, or the tree
/// does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::io::Cursor;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        score: Option<f64>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: u16, h: u16 },
        Pair(i8, i8),
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            score: Some(9.5),
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: -2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, ": {\n  .x: Int32\n  1\n  .y: Int32\n  -2\n}\n");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = user();
        let text = to_string(&user).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_none_round_trips_as_empty_object() {
        let mut user = user();
        user.score = None;
        let value = to_value(&user).unwrap();
        assert_eq!(value["score"], Value::object());

        let user_back: User = from_value(value).unwrap();
        assert_eq!(user_back.score, None);
    }

    #[test]
    fn test_enum_variants() {
        let shapes = vec![
            Shape::Empty,
            Shape::Circle(1.5),
            Shape::Rect { w: 3, h: 4 },
            Shape::Pair(-1, 1),
        ];
        let value = to_value(&shapes).unwrap();
        assert_eq!(value[0].as_str().unwrap(), "Empty");
        assert_eq!(value[1]["Circle"].as_f64().unwrap(), 1.5);
        assert_eq!(value[2]["Rect"]["w"].as_u16().unwrap(), 3);
        assert_eq!(value[3]["Pair"][0].as_i8().unwrap(), -1);

        let text = to_string(&shapes).unwrap();
        let back: Vec<Shape> = from_str(&text).unwrap();
        assert_eq!(back, shapes);
    }

    #[test]
    fn test_maps_keep_string_keys() {
        let mut map = BTreeMap::new();
        map.insert("with space".to_string(), 1u8);
        map.insert("plain".to_string(), 2u8);
        let text = to_string(&map).unwrap();
        assert!(text.contains("[\"with space\"]: Uint8\n"));
        let back: BTreeMap<String, u8> = from_str(&text).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_from_str_reports_parse_errors() {
        let err = from_str::<Point>(": {\n .x: Int32 1\n .y: Int32 oops\n}").unwrap_err();
        match err {
            Error::Parse(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.0[0].line, 3);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_str_kind_mismatch() {
        // Untagged integers are Int64, which does not fit a u8 field.
        #[derive(Deserialize, Debug)]
        struct Small {
            #[allow(dead_code)]
            v: u8,
        }
        assert!(from_str::<Small>(": { .v: 300 }").is_err());
        assert!(from_str::<Small>(": { .v: 30 }").is_ok());
    }

    #[test]
    fn test_writer_and_reader() {
        let point = Point { x: 5, y: 6 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();

        let back: Point = from_reader(Cursor::new(&buffer)).unwrap();
        assert_eq!(back, point);
        let back: Point = from_slice(&buffer).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn test_from_slice_invalid_utf8() {
        assert!(from_slice::<Point>(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_to_string_with_options() {
        let options = SinOptions::new().with_indent(4);
        let text = to_string_with_options(&vec![1i64], &options).unwrap();
        assert_eq!(text, ": [\n    [0]: 1\n]\n");
    }

    #[test]
    fn test_parse_with_options_limits_index() {
        let options = ParseOptions::new().with_max_array_index(10);
        assert!(parse_with_options(": [ [10]: 1 ]", &options).is_ok());

        let parsed = parse_with_options(": [ [11]: 1 ]", &options);
        assert!(!parsed.is_ok());
        assert_eq!(parsed.value, Value::array());
    }
}
