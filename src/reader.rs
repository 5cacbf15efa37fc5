//! Line-tracking character reader and escape tables shared by the parser and
//! the serializer.

/// Whitespace that separates SIN tokens.
#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// Characters that end a bare word (a scalar literal or a type name).
#[inline]
pub(crate) fn is_word_delimiter(ch: char) -> bool {
    is_whitespace(ch) || matches!(ch, ':' | '{' | '}' | '[' | ']')
}

/// Decodes the character after a backslash inside a `"` string.
#[inline]
pub(crate) fn quoted_escape(ch: char) -> Option<char> {
    match ch {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// Decodes the character after a backslash inside a backtick string.
#[inline]
pub(crate) fn raw_escape(ch: char) -> Option<char> {
    match ch {
        '`' => Some('`'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// Appends `s` to `out` using the `"` string escapes.
pub(crate) fn escape_quoted(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
}

/// A cursor over the input that counts lines as it goes.
pub(crate) struct Reader<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Reader {
            input,
            position: 0,
            line: 1,
        }
    }

    /// Current 1-based line.
    #[inline]
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if is_whitespace(ch) {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Consumes characters while `pred` holds and returns them as a slice.
    pub(crate) fn read_while<F>(&mut self, mut pred: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.next_char();
        }
        &self.input[start..self.position]
    }

    /// Reads a bare word up to the next delimiter.
    pub(crate) fn read_word(&mut self) -> &'a str {
        self.read_while(|ch| !is_word_delimiter(ch))
    }
}
