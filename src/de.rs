//! SIN deserialization.
//!
//! Two halves live here:
//!
//! - [`Parser`] reads SIN text into a [`Value`] tree. It never fails outright:
//!   malformed input produces diagnostics on [`Parsed`] next to a best-effort tree,
//!   so one pass reports every problem in a document.
//! - `Value` implements [`serde::Deserializer`], which backs [`from_value`] and the
//!   typed `from_str` family in the crate root.
//!
//! ## Usage
//!
//! ```rust
//! let parsed = sin::parse(": {\n  .name: \"sin\"\n  .port: Uint16\n  8080\n}\n");
//! assert!(parsed.is_ok());
//! assert_eq!(parsed.value["port"].as_u16().unwrap(), 8080);
//!
//! let parsed = sin::parse(":Uint8 256");
//! assert_eq!(parsed.error_log(), "value '256' out of range for Uint8 at line 1");
//! ```

use crate::reader::{self, Reader};
use crate::{Error, Kind, ParseError, ParseOptions, Result, SinMap, Value};
use serde::de::value::{MapDeserializer, SeqDeserializer, StringDeserializer};
use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use std::num::IntErrorKind;
use std::str::FromStr;

/// The outcome of parsing SIN text: a value tree plus any diagnostics.
///
/// An empty `errors` list means the document was well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: Value,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    /// Returns `true` when no diagnostics were produced.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// All diagnostics, one `"<message> at line <n>"` per line. Empty on success.
    #[must_use]
    pub fn error_log(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Converts into a strict result, failing with [`Error::Parse`] if anything
    /// was reported.
    pub fn into_result(self) -> Result<Value> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(Error::parse(self.errors))
        }
    }
}

/// Recursive-descent parser for SIN text.
///
/// Created via [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`].
pub struct Parser<'a> {
    reader: Reader<'a>,
    options: ParseOptions,
    errors: Vec<ParseError>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            reader: Reader::new(input),
            options,
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Parses the whole input as one root value.
    pub fn parse(mut self) -> Parsed {
        let value = self.parse_value();

        self.reader.skip_whitespace();
        if !self.reader.at_end() {
            self.error("unexpected trailing input");
        }

        tracing::debug!(
            errors = self.errors.len(),
            lines = self.reader.line(),
            kind = %value.kind(),
            "parsed SIN document"
        );

        Parsed {
            value,
            errors: self.errors,
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let err = ParseError::new(self.reader.line(), message);
        tracing::trace!(line = err.line, message = %err.message, "parse diagnostic");
        self.errors.push(err);
    }

    /// Reports an unexpected character and skips the run of text it starts.
    ///
    /// Always consumes at least one character.
    fn skip_unexpected(&mut self, ch: char, context: &str) {
        self.error(format!("unexpected character '{}' in {}", ch, context));
        self.reader.next_char();
        self.reader
            .read_while(|c| !reader::is_whitespace(c) && !matches!(c, '{' | '}' | '[' | ']'));
    }

    /// `value := ':' (string | object | array | scalar)`
    fn parse_value(&mut self) -> Value {
        self.reader.skip_whitespace();
        match self.reader.peek() {
            Some(':') => {
                self.reader.next_char();
            }
            Some(ch) => {
                self.error(format!("':' expected but '{}' found", ch));
                return Value::default();
            }
            None => {
                self.error("':' expected but end of input found");
                return Value::default();
            }
        }

        self.reader.skip_whitespace();
        match self.reader.peek() {
            None => {
                self.error("value expected but end of input found");
                Value::default()
            }
            Some('"') => Value::String(self.parse_quoted_string()),
            Some('`') => Value::String(self.parse_raw_string()),
            Some('{') => self.parse_container(Self::parse_object),
            Some('[') => self.parse_container(Self::parse_array),
            Some(ch) if reader::is_word_delimiter(ch) => {
                self.error(format!("value expected but '{}' found", ch));
                Value::default()
            }
            Some(_) => self.parse_scalar(),
        }
    }

    fn parse_container(&mut self, parse: fn(&mut Self) -> Value) -> Value {
        if let Some(max_depth) = self.options.max_depth {
            if self.depth >= max_depth {
                self.error(format!("nesting deeper than {} levels", max_depth));
                self.skip_container();
                return Value::default();
            }
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    /// Skips a balanced `{...}` or `[...]` group without building values.
    fn skip_container(&mut self) {
        let mut open = 0usize;
        while let Some(ch) = self.reader.next_char() {
            match ch {
                '{' | '[' => open += 1,
                '}' | ']' => {
                    open = open.saturating_sub(1);
                    if open == 0 {
                        return;
                    }
                }
                '"' | '`' => {
                    while let Some(c) = self.reader.next_char() {
                        if c == '\\' {
                            self.reader.next_char();
                        } else if c == ch {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// `object := '{' (key value)* '}'`
    fn parse_object(&mut self) -> Value {
        self.reader.next_char(); // '{'
        let mut map = SinMap::new();

        loop {
            self.reader.skip_whitespace();
            match self.reader.peek() {
                None => {
                    self.error("'}' expected but end of input found");
                    break;
                }
                Some('}') => {
                    self.reader.next_char();
                    break;
                }
                Some('.') | Some('[') => {
                    let key = self.parse_key();
                    let value = self.parse_value();
                    if let Some(key) = key {
                        map.insert(key, value);
                    }
                }
                Some(ch) => self.skip_unexpected(ch, "object"),
            }
        }

        Value::Object(map)
    }

    /// `key := '.' word | '[' (quoted-string | text) ']'`
    fn parse_key(&mut self) -> Option<String> {
        if self.reader.next_char() == Some('.') {
            let name = self
                .reader
                .read_while(|c| !reader::is_whitespace(c) && c != ':');
            if name.is_empty() {
                self.error("member name expected after '.'");
                return None;
            }
            return Some(name.to_string());
        }

        // '[' already consumed
        self.reader.skip_whitespace();
        if self.reader.peek() == Some('"') {
            let name = self.parse_quoted_string();
            self.reader.skip_whitespace();
            match self.reader.peek() {
                Some(']') => {
                    self.reader.next_char();
                }
                Some(ch) => self.error(format!("']' expected but '{}' found", ch)),
                None => self.error("']' expected but end of input found"),
            }
            return Some(name);
        }

        let name = self.reader.read_while(|c| c != ']');
        if self.reader.next_char().is_none() {
            self.error("']' expected but end of input found");
            return None;
        }
        let name = name.trim_end_matches(reader::is_whitespace);
        if name.is_empty() {
            self.error("member name expected inside '[]'");
            return None;
        }
        Some(name.to_string())
    }

    /// `array := '[' ('[' index ']' value)* ']'`
    fn parse_array(&mut self) -> Value {
        self.reader.next_char(); // '['
        let mut items: Vec<Value> = Vec::new();

        loop {
            self.reader.skip_whitespace();
            match self.reader.peek() {
                None => {
                    self.error("']' expected but end of input found");
                    break;
                }
                Some(']') => {
                    self.reader.next_char();
                    break;
                }
                Some('[') => {
                    let index = self.parse_index();
                    // The value is read even for a bad index so the cursor stays in step.
                    let value = self.parse_value();
                    if let Some(index) = index {
                        if index >= items.len() {
                            if items.try_reserve(index + 1 - items.len()).is_err() {
                                self.error(format!("array index {} is too large", index));
                                continue;
                            }
                            items.resize_with(index + 1, Value::default);
                        }
                        items[index] = value;
                    }
                }
                Some(ch) => self.skip_unexpected(ch, "array"),
            }
        }

        Value::Array(items)
    }

    fn parse_index(&mut self) -> Option<usize> {
        self.reader.next_char(); // '['
        let raw = self.reader.read_while(|c| c != ']');
        if self.reader.next_char().is_none() {
            self.error("']' expected but end of input found");
            return None;
        }

        let text = raw.trim_matches(reader::is_whitespace);
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            self.error(format!("invalid array index '{}'", raw));
            return None;
        }
        let index = match text.parse::<usize>() {
            Ok(index) if index < usize::MAX => index,
            _ => {
                self.error(format!("array index '{}' out of range", text));
                return None;
            }
        };
        if let Some(max) = self.options.max_array_index {
            if index > max {
                self.error(format!("array index {} exceeds the limit of {}", index, max));
                return None;
            }
        }
        Some(index)
    }

    /// `"..."` with `\n \r \t \" \\` escapes.
    fn parse_quoted_string(&mut self) -> String {
        self.reader.next_char(); // '"'
        let mut result = String::new();

        loop {
            match self.reader.next_char() {
                None => {
                    self.error("unterminated string");
                    break;
                }
                Some('"') => break,
                Some('\\') => match self.reader.next_char() {
                    Some(ch) => match reader::quoted_escape(ch) {
                        Some(decoded) => result.push(decoded),
                        None => {
                            self.error(format!("unknown escape sequence '\\{}'", ch));
                            result.push('\\');
                            result.push(ch);
                        }
                    },
                    None => {
                        self.error("unterminated string");
                        break;
                    }
                },
                Some('\n') => {
                    self.error("line break inside a \"\" string");
                    result.push('\n');
                }
                Some(ch) => result.push(ch),
            }
        }

        result
    }

    /// `` `...` `` with `` \` `` and `\\` escapes. One line break directly after the
    /// opening and one directly before the closing backtick are dropped.
    fn parse_raw_string(&mut self) -> String {
        self.reader.next_char(); // '`'
        let mut result = String::new();

        loop {
            match self.reader.next_char() {
                None => {
                    self.error("unterminated string");
                    break;
                }
                Some('`') => break,
                Some('\\') => match self.reader.next_char() {
                    Some(ch) => match reader::raw_escape(ch) {
                        Some(decoded) => result.push(decoded),
                        None => {
                            result.push('\\');
                            result.push(ch);
                        }
                    },
                    None => {
                        self.error("unterminated string");
                        break;
                    }
                },
                Some(ch) => result.push(ch),
            }
        }

        strip_line_breaks(result)
    }

    /// `true | false | <type-name> <literal> | <untagged number>`
    fn parse_scalar(&mut self) -> Value {
        let word = self.reader.read_word();
        match word {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => match word.parse::<Kind>() {
                Ok(kind) => self.parse_tagged(kind),
                Err(_) => self.parse_untagged(word),
            },
        }
    }

    fn parse_tagged(&mut self, kind: Kind) -> Value {
        self.reader.skip_whitespace();
        match self.reader.peek() {
            None => {
                self.error(format!("{} literal expected but end of input found", kind));
                return Value::default();
            }
            Some(ch) if reader::is_word_delimiter(ch) => {
                self.error(format!("{} literal expected but '{}' found", kind, ch));
                return Value::default();
            }
            Some(_) => {}
        }

        let literal = self.reader.read_word();
        match tagged_literal(kind, literal) {
            Ok(value) => value,
            Err(message) => {
                self.error(message);
                Value::default()
            }
        }
    }

    /// Tries i64, then u64, then f64; each must consume the whole word.
    fn parse_untagged(&mut self, word: &str) -> Value {
        if let Ok(v) = word.parse::<i64>() {
            Value::Int64(v)
        } else if let Ok(v) = word.parse::<u64>() {
            Value::Uint64(v)
        } else if let Ok(v) = word.parse::<f64>() {
            Value::Double(v)
        } else {
            self.error(format!("cannot parse '{}' as a value", word));
            Value::default()
        }
    }
}

fn strip_line_breaks(mut s: String) -> String {
    if s.ends_with("\r\n") {
        s.truncate(s.len() - 2);
    } else if s.ends_with('\n') {
        s.truncate(s.len() - 1);
    }
    if s.starts_with("\r\n") {
        s.drain(..2);
    } else if s.starts_with('\n') {
        s.drain(..1);
    }
    s
}

fn int_literal<T>(kind: Kind, text: &str) -> std::result::Result<T, String>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    if kind.is_unsigned() && text.starts_with('-') {
        return Err(format!("negative value '{}' for unsigned {}", text, kind));
    }
    text.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            format!("value '{}' out of range for {}", text, kind)
        }
        _ => format!("cannot parse '{}' as {}", text, kind),
    })
}

/// Finite literals that overflow the kind are out of range; `inf` and `nan`
/// spellings are taken as written.
fn float_literal<T>(kind: Kind, text: &str) -> std::result::Result<T, String>
where
    T: FromStr<Err = std::num::ParseFloatError> + Into<f64> + Copy,
{
    let value = text
        .parse::<T>()
        .map_err(|_| format!("cannot parse '{}' as {}", text, kind))?;
    let named = text
        .trim_start_matches(|c| c == '+' || c == '-')
        .starts_with(|c: char| c.is_ascii_alphabetic());
    if !named && !value.into().is_finite() {
        return Err(format!("value '{}' out of range for {}", text, kind));
    }
    Ok(value)
}

fn tagged_literal(kind: Kind, text: &str) -> std::result::Result<Value, String> {
    match kind {
        Kind::Uint8 => int_literal(kind, text).map(Value::Uint8),
        Kind::Int8 => int_literal(kind, text).map(Value::Int8),
        Kind::Uint16 => int_literal(kind, text).map(Value::Uint16),
        Kind::Int16 => int_literal(kind, text).map(Value::Int16),
        Kind::Uint32 => int_literal(kind, text).map(Value::Uint32),
        Kind::Int32 => int_literal(kind, text).map(Value::Int32),
        Kind::Uint64 => int_literal(kind, text).map(Value::Uint64),
        Kind::Int64 => int_literal(kind, text).map(Value::Int64),
        Kind::Float => float_literal(kind, text).map(Value::Float),
        Kind::Double => float_literal(kind, text).map(Value::Double),
        Kind::Bool => match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(format!("cannot parse '{}' as Bool", text)),
        },
        Kind::String | Kind::Array | Kind::Object => {
            Err(format!("{} cannot be used as a type tag", kind))
        }
    }
}

/// Deserialize an instance of `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use sin::{from_value, sin};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let value = sin!({"x": 1, "y": 2});
/// let point: Point = from_value(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Uint8(v) => visitor.visit_u8(v),
            Value::Int8(v) => visitor.visit_i8(v),
            Value::Uint16(v) => visitor.visit_u16(v),
            Value::Int16(v) => visitor.visit_i16(v),
            Value::Uint32(v) => visitor.visit_u32(v),
            Value::Int32(v) => visitor.visit_i32(v),
            Value::Uint64(v) => visitor.visit_u64(v),
            Value::Int64(v) => visitor.visit_i64(v),
            Value::Float(v) => visitor.visit_f32(v),
            Value::Double(v) => visitor.visit_f64(v),
            Value::Bool(v) => visitor.visit_bool(v),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => {
                let mut seq = SeqDeserializer::<_, Error>::new(arr.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Value::Object(map) => {
                let mut access = MapDeserializer::<_, Error>::new(map.into_iter());
                let value = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if is_empty_object(&self) {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if is_empty_object(&self) {
            visitor.visit_unit()
        } else {
            Err(Error::custom(format!(
                "expected an empty object for unit, found {}",
                self.kind()
            )))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(variant) => {
                let de: StringDeserializer<Error> = variant.into_deserializer();
                visitor.visit_enum(de)
            }
            Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
                Some((variant, value)) => visitor.visit_enum(EnumDeserializer { variant, value }),
                None => Err(Error::custom("expected a single-key object for enum")),
            },
            other => Err(Error::custom(format!(
                "expected a string or single-key object for enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDeserializer)>
    where
        V: DeserializeSeed<'de>,
    {
        let de: StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(de)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        if is_empty_object(&self.value) {
            Ok(())
        } else {
            Err(Error::custom("expected unit variant"))
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self.value)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.value, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self.value, visitor)
    }
}
