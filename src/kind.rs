//! The closed set of kinds a [`Value`](crate::Value) can hold.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Discriminant of a [`Value`](crate::Value).
///
/// The names returned by [`Kind::name`] are the type names used in SIN text,
/// e.g. `: Uint16\n  443\n`.
///
/// # Examples
///
/// ```rust
/// use sin::Kind;
///
/// assert_eq!(Kind::Uint16.name(), "Uint16");
/// assert_eq!("Int8".parse::<Kind>(), Ok(Kind::Int8));
/// assert!("Array".parse::<Kind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
    Uint64,
    Int64,
    Float,
    Double,
    Bool,
    String,
    Array,
    Object,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 14] = [
        Kind::Uint8,
        Kind::Int8,
        Kind::Uint16,
        Kind::Int16,
        Kind::Uint32,
        Kind::Int32,
        Kind::Uint64,
        Kind::Int64,
        Kind::Float,
        Kind::Double,
        Kind::Bool,
        Kind::String,
        Kind::Array,
        Kind::Object,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Uint8 => "Uint8",
            Kind::Int8 => "Int8",
            Kind::Uint16 => "Uint16",
            Kind::Int16 => "Int16",
            Kind::Uint32 => "Uint32",
            Kind::Int32 => "Int32",
            Kind::Uint64 => "Uint64",
            Kind::Int64 => "Int64",
            Kind::Float => "Float",
            Kind::Double => "Double",
            Kind::Bool => "Bool",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Uint8
                | Kind::Int8
                | Kind::Uint16
                | Kind::Int16
                | Kind::Uint32
                | Kind::Int32
                | Kind::Uint64
                | Kind::Int64
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64)
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Kind::String | Kind::Array | Kind::Object)
    }

    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }

    /// Returns `true` if the serializer writes this kind with an explicit type name.
    ///
    /// `Bool`, `Int64` and `Double` are what untagged literals infer to, so they are
    /// written bare. Strings and containers have their own syntax.
    ///
    /// ```rust
    /// use sin::Kind;
    ///
    /// assert!(Kind::Int32.is_tagged());
    /// assert!(!Kind::Int64.is_tagged());
    /// assert!(!Kind::Object.is_tagged());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_tagged(self) -> bool {
        self.is_scalar() && !matches!(self, Kind::Bool | Kind::Int64 | Kind::Double)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a word is not a scalar type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type name '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    /// Parses a type name usable as a tag in SIN text. Only scalar kinds are tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.is_scalar() && kind.name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
