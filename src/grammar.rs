//! SIN Format Reference
//!
//! This module documents the SIN text format as read by [`parse`](crate::parse)
//! and written by [`Value::to_sin_string`](crate::Value::to_sin_string).
//!
//! # Overview
//!
//! A SIN document is a single value. Every value is introduced by a `:` and is one
//! of: a string, an object, an array, or a scalar. Whitespace (space, tab, CR, LF)
//! between tokens is insignificant.
//!
//! ```text
//! value      := ':' (string | object | array | scalar)
//! object     := '{' (key value)* '}'
//! key        := '.' name | '[' (quoted-string | text) ']'
//! array      := '[' ('[' index ']' value)* ']'
//! string     := '"' ... '"' | '`' ... '`'
//! scalar     := 'true' | 'false' | number | type-name literal
//! ```
//!
//! # Objects
//!
//! Members are written as a key followed by a value. Member order is preserved.
//!
//! ```text
//! : {
//!   .name: "sin"
//!   ["two words"]: true
//!   [also fine]: 1
//! }
//! ```
//!
//! **Rules**:
//! - `.name` runs until whitespace or `:`, and must not be empty.
//! - `["..."]` takes a quoted string with the usual escapes; whitespace around the
//!   quotes is allowed.
//! - `[text]` takes everything up to `]`, with surrounding whitespace trimmed.
//! - A repeated key overwrites the earlier member in place.
//!
//! # Arrays
//!
//! Elements carry explicit indices. Indices may be sparse or out of order; gaps
//! are filled with empty objects.
//!
//! ```rust
//! let parsed = sin::parse(": [ [2]: true [0]: 1 ]");
//! assert!(parsed.is_ok());
//! let items = parsed.value.as_array().unwrap();
//! assert_eq!(items.len(), 3);
//! assert!(items[1].is_object());
//! ```
//!
//! An index is decimal digits only. `[abc]`, `[-1]` and `[1extra]` are errors; the
//! member's value is still read and then dropped. Indices above
//! [`ParseOptions::max_array_index`](crate::ParseOptions) (`1 << 20` by default)
//! are rejected the same way, and so is nesting deeper than `max_depth` (256).
//!
//! # Strings
//!
//! | Form | Escapes | Line breaks |
//! |------|---------|-------------|
//! | `"..."` | `\n \r \t \" \\` | not allowed, use `\n` |
//! | `` `...` `` | `` \` `` and `\\` only | allowed; one leading and one trailing break are removed |
//!
//! Backtick strings keep any other backslash sequence as written:
//!
//! ```rust
//! let parsed = sin::parse(": `\nline one\\n\nline two\n`");
//! assert_eq!(parsed.value.as_str().unwrap(), "line one\\n\nline two");
//! ```
//!
//! # Scalars
//!
//! ## Untagged
//!
//! A bare literal is tried in order as a signed 64-bit integer, an unsigned 64-bit
//! integer and a double. `true` and `false` are booleans.
//!
//! | Text | Kind |
//! |------|------|
//! | `123` | `Int64` |
//! | `18446744073709551615` | `Uint64` |
//! | `123.456`, `1e5`, `NaN`, `inf` | `Double` |
//! | `true` | `Bool` |
//!
//! ## Tagged
//!
//! A type name followed by a literal fixes the kind and checks the range:
//!
//! ```text
//! : Uint8 255
//! : Int16
//!   -300
//! : Float 1.5
//! ```
//!
//! Type names: `Uint8 Int8 Uint16 Int16 Uint32 Int32 Uint64 Int64 Float Double Bool`.
//! Unsigned kinds reject a leading `-`. `Float` and `Double` reject literals that
//! overflow to infinity (`:Float 1e40`) but accept `inf` and `nan` as written.
//! Trailing characters after the literal (`123extra`) are an error.
//!
//! ```rust
//! assert!(sin::parse(":Int8 -128").is_ok());
//! assert!(!sin::parse(":Int8 -129").is_ok());
//! assert!(!sin::parse(":Uint8 -1").is_ok());
//! ```
//!
//! # Output Form
//!
//! The serializer indents each level by two spaces (see
//! [`SinOptions`](crate::SinOptions)). `Bool`, `Int64` and `Double` are written
//! untagged; every other scalar kind is written with its type name and its literal
//! on the following line. A double with an integral value gets a `.0` suffix so it
//! reads back as a double. Keys use `.name` unless they are empty or contain
//! whitespace, a backtick, or one of `:[]{}"\`, in which case they are written
//! as `["escaped"]`.
//!
//! Rendering then parsing then rendering again yields the same text.
//!
//! # Diagnostics
//!
//! The parser does not stop at the first problem. Each problem is recorded as
//! `<message> at line <n>` (lines start at 1) and parsing continues with a
//! default value in place of the broken part.
//!
//! ```rust
//! let parsed = sin::parse(":{\n .a: Uint8 300\n .b: 2\n}");
//! assert_eq!(parsed.errors.len(), 1);
//! assert_eq!(parsed.errors[0].line, 2);
//! assert_eq!(parsed.value["b"].as_i64().unwrap(), 2);
//! ```
