//! SIN serialization.
//!
//! Two halves live here:
//!
//! - [`Serializer`] renders a [`Value`] tree as SIN text. Rendering is total:
//!   every value has a textual form and the parser reads it back to an equal tree.
//! - [`ValueSerializer`] turns any `T: Serialize` into a [`Value`], keeping the
//!   integer width of each field (`u16` becomes `Uint16`, `f32` becomes `Float`).
//!
//! ## Layout
//!
//! Each nesting level is indented by [`SinOptions::indent`] spaces. Strings and
//! the kinds that untagged literals infer to (`Bool`, `Int64`, `Double`) are
//! written on the key's line; every other scalar kind carries its type name and
//! puts the literal on the next line.
//!
//! ```rust
//! use sin::{sin, Value};
//!
//! let mut value = sin!({"name": "x", "on": true});
//! value["port"] = Value::from(443u16);
//! value["ratio"] = Value::from(0.5);
//!
//! assert_eq!(
//!     value.to_string(),
//!     ": {\n  .name: \"x\"\n  .on: true\n  .port: Uint16\n  443\n  .ratio: 0.5\n}\n"
//! );
//! ```

use crate::reader::escape_quoted;
use crate::{Error, Result, SinMap, SinOptions, Value};
use serde::{ser, Serialize};

/// Renders [`Value`] trees as SIN text.
pub struct Serializer {
    output: String,
    options: SinOptions,
}

impl Serializer {
    pub fn new(options: SinOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `value`, starting at nesting depth 0.
    pub fn write_value(&mut self, value: &Value) {
        self.write_node(value, 0);
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.options.indent {
            self.output.push(' ');
        }
    }

    fn write_node(&mut self, value: &Value, depth: usize) {
        match value {
            Value::String(s) => {
                self.output.push_str(": \"");
                escape_quoted(&mut self.output, s);
                self.output.push_str("\"\n");
            }
            Value::Array(arr) => {
                self.output.push_str(": [\n");
                for (i, element) in arr.iter().enumerate() {
                    self.write_indent(depth + 1);
                    self.output.push('[');
                    self.output.push_str(&i.to_string());
                    self.output.push(']');
                    self.write_node(element, depth + 1);
                }
                self.write_indent(depth);
                self.output.push_str("]\n");
            }
            Value::Object(obj) => {
                self.output.push_str(": {\n");
                for (key, member) in obj.iter() {
                    self.write_indent(depth + 1);
                    self.write_key(key);
                    self.write_node(member, depth + 1);
                }
                self.write_indent(depth);
                self.output.push_str("}\n");
            }
            scalar => {
                let kind = scalar.kind();
                self.output.push_str(": ");
                if kind.is_tagged() {
                    self.output.push_str(kind.name());
                    self.output.push('\n');
                    self.write_indent(depth);
                }
                self.output.push_str(&scalar_literal(scalar));
                self.output.push('\n');
            }
        }
    }

    fn write_key(&mut self, key: &str) {
        if needs_brackets(key) {
            self.output.push_str("[\"");
            escape_quoted(&mut self.output, key);
            self.output.push_str("\"]");
        } else {
            self.output.push('.');
            self.output.push_str(key);
        }
    }
}

/// A key can use the `.name` form only if the parser's bare-name reader gives it
/// back unchanged.
#[inline]
fn needs_brackets(key: &str) -> bool {
    key.is_empty()
        || key.chars().any(|ch| {
            ch.is_whitespace() || matches!(ch, ':' | '[' | ']' | '{' | '}' | '"' | '`' | '\\')
        })
}

fn scalar_literal(value: &Value) -> String {
    match value {
        Value::Uint8(v) => v.to_string(),
        Value::Int8(v) => v.to_string(),
        Value::Uint16(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float(v) => float_literal(v.to_string(), v.is_finite()),
        Value::Double(v) => float_literal(v.to_string(), v.is_finite()),
        Value::Bool(b) => b.to_string(),
        Value::String(_) | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

// `Display` for floats never uses exponents, so a finite value without '.' is
// integral and would read back as an integer.
fn float_literal(mut text: String, finite: bool) -> String {
    if finite && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// `Option::None` and `()` become an empty object; unit enum variants become
/// strings; other enum variants become a single-member object keyed by the
/// variant name.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: SinMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: String,
    map: SinMap,
}

fn wrap_variant(name: String, value: Value) -> Value {
    let mut map = SinMap::with_capacity(1);
    map.insert(name, value);
    Value::Object(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Uint8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Uint16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Uint32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Uint64(v))
    }

    fn serialize_i128(self, _v: i128) -> Result<Value> {
        Err(Error::unsupported_type("i128"))
    }

    fn serialize_u128(self, _v: u128) -> Result<Value> {
        Err(Error::unsupported_type("u128"))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Double(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::Uint8(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::object())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::object())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::object())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(variant.to_string(), to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            map: SinMap::new(),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: SinMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(wrap_variant(self.name, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "map keys must be strings, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(wrap_variant(self.name, Value::Object(self.map)))
    }
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use sin::{to_value, Kind};
///
/// #[derive(Serialize)]
/// struct Point { x: i16, y: i16 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value["x"].kind(), Kind::Int16);
/// ```
///
/// # Errors
///
/// Returns an error for map keys that are not strings and for 128-bit integers.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
