//! Error types for SIN parsing, value access and serde conversion.
//!
//! Two classes of failure exist and they are reported differently:
//!
//! - **Format errors** found while reading text never abort a parse. They are
//!   collected as [`ParseError`] diagnostics on [`Parsed`](crate::Parsed) and only
//!   become an [`Error::Parse`] when a caller asks for a strict result.
//! - **Type errors** happen when an accessor such as [`Value::as_i8`](crate::Value::as_i8)
//!   is called on a value of another kind. They carry the requested and the actual
//!   [`Kind`] so the caller can tell what went wrong.
//!
//! ## Examples
//!
//! ```rust
//! use sin::{Error, Kind, Value};
//!
//! let value = Value::from("text");
//! match value.as_i32() {
//!     Err(Error::TypeMismatch { requested, actual }) => {
//!         assert_eq!(requested, Kind::Int32);
//!         assert_eq!(actual, Kind::String);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::Kind;
use std::fmt;
use thiserror::Error;

/// A single diagnostic produced while parsing SIN text.
///
/// Lines are 1-based.
///
/// # Examples
///
/// ```rust
/// let parsed = sin::parse(":Uint8 256");
/// assert_eq!(parsed.errors.len(), 1);
/// assert_eq!(parsed.errors[0].line, 1);
/// assert!(parsed.errors[0].to_string().ends_with("at line 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        ParseError {
            line,
            message: message.into(),
        }
    }
}

/// Every diagnostic collected during one parse, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl From<Vec<ParseError>> for ParseErrors {
    fn from(errors: Vec<ParseError>) -> Self {
        ParseErrors(errors)
    }
}

/// Represents all possible errors surfaced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An accessor was called on a value of a different kind.
    #[error("Type assertion. Requested type: {requested}, Actual type: {actual}")]
    TypeMismatch { requested: Kind, actual: Kind },

    /// The text contained one or more format errors.
    #[error("Invalid SIN document:\n{0}")]
    Parse(ParseErrors),

    /// A Rust type that has no SIN representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// The failure is also reported as a `tracing` debug event. Debug builds attach a
    /// captured backtrace to that event (controlled by `RUST_BACKTRACE`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sin::{Error, Kind};
    ///
    /// let err = Error::type_mismatch(Kind::Bool, Kind::Double);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Type assertion. Requested type: Bool, Actual type: Double"
    /// );
    /// ```
    pub fn type_mismatch(requested: Kind, actual: Kind) -> Self {
        #[cfg(debug_assertions)]
        {
            let backtrace = std::backtrace::Backtrace::capture();
            tracing::debug!(%requested, %actual, %backtrace, "type assertion failed");
        }
        #[cfg(not(debug_assertions))]
        tracing::debug!(%requested, %actual, "type assertion failed");

        Error::TypeMismatch { requested, actual }
    }

    /// Wraps the diagnostics of a failed parse.
    pub fn parse(errors: impl Into<ParseErrors>) -> Self {
        Error::Parse(errors.into())
    }

    /// Creates an unsupported type error for types that cannot be represented in SIN.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sin::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
