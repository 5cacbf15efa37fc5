//! Dynamic value representation for SIN data.
//!
//! This module provides the [`Value`] enum which represents any SIN node: one of
//! the fixed-width numeric kinds, a boolean, a string, an ordered array or an
//! object with ordered string keys.
//!
//! ## Creating Values
//!
//! ```rust
//! use sin::{sin, Value};
//!
//! let flag = Value::from(true);
//! let port = Value::from(8080u16);
//! let text = Value::from("hello");
//!
//! let list = sin!([1, 2, "5"]);
//! assert_eq!(list.as_array().unwrap().len(), 3);
//! ```
//!
//! ## Indexing
//!
//! Mutable indexing creates what it needs. A value indexed by position becomes an
//! array padded with empty objects; a value indexed by key becomes an object.
//!
//! ```rust
//! use sin::{Kind, Value};
//!
//! let mut config = Value::new();
//! config["server"]["port"] = Value::from(8080u16);
//! config["hosts"][2] = Value::from("c.example");
//!
//! assert_eq!(config["server"]["port"].as_u16().unwrap(), 8080);
//! assert_eq!(config["hosts"].as_array().unwrap().len(), 3);
//! assert_eq!(config["hosts"][0].kind(), Kind::Object);
//! ```
//!
//! ## Extracting Values
//!
//! Accessors only succeed for the exact kind, there is no numeric coercion:
//!
//! ```rust
//! use sin::Value;
//!
//! let value = Value::from(42i32);
//! assert_eq!(value.as_i32().unwrap(), 42);
//! assert!(value.as_i64().is_err());
//! ```

use crate::ser::Serializer;
use crate::{Error, Kind, Parsed, Result, SinMap, SinOptions};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::OnceLock;

/// A dynamically-typed SIN value.
///
/// Exactly one kind is active at a time and the payload always matches it.
/// `Clone` copies the whole tree; two values never share storage.
///
/// The default value is an empty object.
///
/// # Examples
///
/// ```rust
/// use sin::{Kind, Value};
///
/// let mut value = Value::default();
/// assert_eq!(value.kind(), Kind::Object);
///
/// value = Value::from("x");
/// value = Value::from(5.0);
/// assert_eq!(value.kind(), Kind::Double);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Uint8(u8),
    Int8(i8),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Int32(i32),
    Uint64(u64),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Object(SinMap),
}

impl Default for Value {
    fn default() -> Self {
        Value::Object(SinMap::new())
    }
}

/// Shared empty object handed out by read-only indexing of missing slots.
fn placeholder() -> &'static Value {
    static PLACEHOLDER: OnceLock<Value> = OnceLock::new();
    PLACEHOLDER.get_or_init(Value::object)
}

macro_rules! scalar_accessor {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&self) -> Result<$ty> {
            match self {
                Value::$variant(v) => Ok(*v),
                other => Err(Error::type_mismatch(Kind::$variant, other.kind())),
            }
        }
    };
}

impl Value {
    /// Creates an empty object, the same as [`Value::default`].
    #[must_use]
    pub fn new() -> Self {
        Value::default()
    }

    /// Creates an empty object.
    #[must_use]
    pub fn object() -> Self {
        Value::Object(SinMap::new())
    }

    /// Creates an empty array.
    #[must_use]
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Parses SIN text. See [`crate::parse`].
    pub fn parse(text: &str) -> Parsed {
        crate::parse(text)
    }

    /// Returns the active kind.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Uint8(_) => Kind::Uint8,
            Value::Int8(_) => Kind::Int8,
            Value::Uint16(_) => Kind::Uint16,
            Value::Int16(_) => Kind::Int16,
            Value::Uint32(_) => Kind::Uint32,
            Value::Int32(_) => Kind::Int32,
            Value::Uint64(_) => Kind::Uint64,
            Value::Int64(_) => Kind::Int64,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.kind().is_integer()
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_) | Value::Double(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    scalar_accessor!(as_u8, Uint8, u8);
    scalar_accessor!(as_i8, Int8, i8);
    scalar_accessor!(as_u16, Uint16, u16);
    scalar_accessor!(as_i16, Int16, i16);
    scalar_accessor!(as_u32, Uint32, u32);
    scalar_accessor!(
        /// Returns the payload of an `Int32` value.
        ///
        /// # Errors
        ///
        /// [`Error::TypeMismatch`] for any other kind, including other integer widths.
        as_i32,
        Int32,
        i32
    );
    scalar_accessor!(as_u64, Uint64, u64);
    scalar_accessor!(as_i64, Int64, i64);
    scalar_accessor!(as_f32, Float, f32);
    scalar_accessor!(as_f64, Double, f64);
    scalar_accessor!(as_bool, Bool, bool);

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(Kind::String, other.kind())),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>> {
        match self {
            Value::Array(arr) => Ok(arr),
            other => Err(Error::type_mismatch(Kind::Array, other.kind())),
        }
    }

    /// Returns the live element vector of an array.
    ///
    /// Pushing or removing through the returned reference changes this value.
    ///
    /// ```rust
    /// use sin::Value;
    ///
    /// let mut value = Value::array();
    /// value.as_array_mut().unwrap().push(Value::from(1u8));
    /// assert_eq!(value.as_array().unwrap().len(), 1);
    /// ```
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(arr) => Ok(arr),
            other => Err(Error::type_mismatch(Kind::Array, other.kind())),
        }
    }

    pub fn as_object(&self) -> Result<&SinMap> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(Error::type_mismatch(Kind::Object, other.kind())),
        }
    }

    /// Returns the live member map of an object.
    pub fn as_object_mut(&mut self) -> Result<&mut SinMap> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(Error::type_mismatch(Kind::Object, other.kind())),
        }
    }

    /// Looks up an array element without creating it.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Looks up an object member without creating it.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    /// Returns the slot at `index`, turning this value into an array and padding it
    /// with empty objects as needed.
    ///
    /// Any previous non-array content is discarded.
    pub fn slot(&mut self, index: usize) -> &mut Value {
        match self {
            Value::Array(arr) => {
                if index >= arr.len() {
                    arr.resize_with(index + 1, Value::default);
                }
                &mut arr[index]
            }
            other => {
                *other = Value::array();
                other.slot(index)
            }
        }
    }

    /// Returns the member at `key`, turning this value into an object and inserting
    /// an empty object at `key` as needed.
    ///
    /// Any previous non-object content is discarded.
    pub fn member(&mut self, key: &str) -> &mut Value {
        match self {
            Value::Object(obj) => obj.get_or_insert_default(key),
            other => {
                *other = Value::object();
                other.member(key)
            }
        }
    }

    /// Renders this value as SIN text with default options.
    ///
    /// Same output as the `Display` implementation.
    #[must_use]
    pub fn to_sin_string(&self) -> String {
        self.to_sin_string_with_options(&SinOptions::default())
    }

    #[must_use]
    pub fn to_sin_string_with_options(&self, options: &SinOptions) -> String {
        let mut serializer = Serializer::new(options.clone());
        serializer.write_value(self);
        serializer.into_inner()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sin_string())
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Read-only indexing never changes the value; a missing slot reads as an
    /// empty object.
    fn index(&self, index: usize) -> &Value {
        self.get(index).unwrap_or_else(|| placeholder())
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.slot(index)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get_key(key).unwrap_or_else(|| placeholder())
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.member(key)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Uint8(v) => serializer.serialize_u8(*v),
            Value::Int8(v) => serializer.serialize_i8(*v),
            Value::Uint16(v) => serializer.serialize_u16(*v),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::Uint32(v) => serializer.serialize_u32(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Uint64(v) => serializer.serialize_u64(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid SIN value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i8<E>(self, value: i8) -> std::result::Result<Value, E> {
                Ok(Value::Int8(value))
            }

            fn visit_i16<E>(self, value: i16) -> std::result::Result<Value, E> {
                Ok(Value::Int16(value))
            }

            fn visit_i32<E>(self, value: i32) -> std::result::Result<Value, E> {
                Ok(Value::Int32(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Int64(value))
            }

            fn visit_u8<E>(self, value: u8) -> std::result::Result<Value, E> {
                Ok(Value::Uint8(value))
            }

            fn visit_u16<E>(self, value: u16) -> std::result::Result<Value, E> {
                Ok(Value::Uint16(value))
            }

            fn visit_u32<E>(self, value: u32) -> std::result::Result<Value, E> {
                Ok(Value::Uint32(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::Uint64(value))
            }

            fn visit_f32<E>(self, value: f32) -> std::result::Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            // SIN has no null; absence is an empty object.
            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::object())
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::object())
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = SinMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

macro_rules! from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl TryFrom<&Value> for $ty {
                type Error = Error;

                fn try_from(value: &Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(*v),
                        other => Err(Error::type_mismatch(Kind::$variant, other.kind())),
                    }
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    <$ty>::try_from(&value)
                }
            }
        )*
    };
}

from_scalar! {
    u8 => Uint8,
    i8 => Int8,
    u16 => Uint16,
    i16 => Int16,
    u32 => Uint32,
    i32 => Int32,
    u64 => Uint64,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    bool => Bool,
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(Kind::String, other.kind())),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<SinMap> for Value {
    fn from(value: SinMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_object() {
        let value = Value::default();
        assert_eq!(value.kind(), Kind::Object);
        assert!(value.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_reassignment_replaces_kind() {
        let mut a = Value::from("x");
        assert_eq!(a.kind(), Kind::String);
        a = Value::from(5.0);
        assert_eq!(a.kind(), Kind::Double);
        assert!(a.as_str().is_err());
    }

    #[test]
    fn test_index_auto_vivifies_array() {
        let mut a = Value::default();
        a[5] = Value::from(9);
        assert_eq!(a.kind(), Kind::Array);
        let arr = a.as_array().unwrap();
        assert_eq!(arr.len(), 6);
        for slot in &arr[..5] {
            assert_eq!(slot, &Value::object());
        }
        assert_eq!(a[5].as_i32().unwrap(), 9);
    }

    #[test]
    fn test_index_promotion_discards_content() {
        let mut a = Value::from(3u8);
        a["k"] = Value::from(true);
        assert_eq!(a.as_object().unwrap().len(), 1);

        a[0] = Value::from(1u8);
        assert_eq!(a.as_array().unwrap().len(), 1);

        a["z"] = Value::from(false);
        let keys: Vec<_> = a.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z"]);
    }

    #[test]
    fn test_index_within_bounds_does_not_grow() {
        let mut a: Value = vec![1, 2, 3].into();
        a[1] = Value::from("two");
        assert_eq!(a.as_array().unwrap().len(), 3);
        assert_eq!(a[1].as_str().unwrap(), "two");
    }

    #[test]
    fn test_read_only_index_does_not_mutate() {
        let a = Value::from(7i64);
        assert_eq!(a["missing"].kind(), Kind::Object);
        assert_eq!(a[3].kind(), Kind::Object);
        assert_eq!(a, Value::Int64(7));
    }

    #[test]
    fn test_accessor_kinds_are_exact() {
        let value = Value::from(1u16);
        assert_eq!(value.as_u16().unwrap(), 1);
        assert!(value.as_u32().is_err());
        assert!(value.as_i16().is_err());
        match value.as_f64() {
            Err(Error::TypeMismatch { requested, actual }) => {
                assert_eq!(requested, Kind::Double);
                assert_eq!(actual, Kind::Uint16);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_array_view_aliases_storage() {
        let mut value = Value::array();
        value.as_array_mut().unwrap().push(Value::from("a"));
        value.as_array_mut().unwrap().push(Value::from("b"));
        value.as_array_mut().unwrap().remove(0);
        assert_eq!(value[0].as_str().unwrap(), "b");

        let mut obj = Value::object();
        obj.as_object_mut()
            .unwrap()
            .insert("k".to_string(), Value::from(1u8));
        assert_eq!(obj["k"].as_u8().unwrap(), 1);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = Value::new();
        a["list"][0] = Value::from(1i64);
        let b = a.clone();
        a["list"][0] = Value::from(2i64);
        assert_eq!(b["list"][0].as_i64().unwrap(), 1);
    }

    #[test]
    fn test_tryfrom_scalars() {
        let value = Value::from(-4i8);
        assert_eq!(i8::try_from(&value).unwrap(), -4);
        assert!(u8::try_from(&value).is_err());
        assert_eq!(
            String::try_from(Value::from("s")).unwrap(),
            "s".to_string()
        );
    }

    #[test]
    fn test_from_vec_and_iterator() {
        let value: Value = vec!["a", "b"].into();
        assert_eq!(value.as_array().unwrap().len(), 2);

        let value: Value = (0u8..3).collect();
        assert_eq!(value[2].as_u8().unwrap(), 2);
    }
}
