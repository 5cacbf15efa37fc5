//! Configuration options for SIN rendering and parsing.
//!
//! - [`SinOptions`]: how the serializer lays out text
//! - [`ParseOptions`]: limits applied by the parser
//!
//! ## Examples
//!
//! ```rust
//! use sin::{sin, SinOptions};
//!
//! let value = sin!({"a": [true]});
//! let text = value.to_sin_string_with_options(&SinOptions::new().with_indent(4));
//! assert_eq!(text, ": {\n    .a: [\n        [0]: true\n    ]\n}\n");
//! ```

/// Configuration options for SIN serialization.
///
/// # Examples
///
/// ```rust
/// use sin::SinOptions;
///
/// let options = SinOptions::new();
/// assert_eq!(options.indent, 2);
///
/// let options = SinOptions::new().with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for SinOptions {
    fn default() -> Self {
        SinOptions { indent: 2 }
    }
}

impl SinOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Configuration options for the SIN parser.
///
/// `max_depth` makes the parser report containers nested deeper than the limit
/// instead of recursing into them. `max_array_index` rejects array members whose
/// index is larger than the limit, which bounds how much padding a single `[n]`
/// can allocate.
///
/// Both limits are on by default ([`ParseOptions::DEFAULT_MAX_DEPTH`] and
/// [`ParseOptions::DEFAULT_MAX_ARRAY_INDEX`]). Setting a field to `None` lifts
/// that limit for trusted input.
///
/// # Examples
///
/// ```rust
/// use sin::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(1);
/// let parsed = parse_with_options(":{ .a: { .b: { } } }", &options);
/// assert!(!parsed.is_ok());
///
/// let parsed = sin::parse(": [ [4000000000000]: 1 ]");
/// assert_eq!(parsed.errors.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_depth: Option<usize>,
    pub max_array_index: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
            max_array_index: Some(Self::DEFAULT_MAX_ARRAY_INDEX),
        }
    }
}

impl ParseOptions {
    /// Container nesting accepted by [`ParseOptions::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    /// Largest array index accepted by [`ParseOptions::default`].
    pub const DEFAULT_MAX_ARRAY_INDEX: usize = 1 << 20;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_max_array_index(mut self, max_array_index: usize) -> Self {
        self.max_array_index = Some(max_array_index);
        self
    }
}
