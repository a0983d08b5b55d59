//! Depth- and quote-aware delimiter scanning.
//!
//! Every split the engine performs (expression from chain, stage from stage,
//! name from arguments, argument from argument) goes through the same scan.
//! A delimiter only counts when it sits at bracket depth zero and outside a
//! quoted string:
//!
//! - `(`, `[` and `{` open a group, `)`, `]` and `}` close one
//! - `"` and `'` open a string that only the same quote closes
//! - inside a string, a backslash escapes the next character
//!
//! Malformed input never fails. Unbalanced quotes swallow the rest of the
//! input and a stray closer pushes the depth below zero, which suppresses
//! every later delimiter.
//!
//! When scanning for `|`, a doubled `||` is the host language's logical-or
//! operator and never splits.

/// Iterator over the byte offsets of top-level delimiters in a string.
///
/// All structural characters are ASCII, so the offsets are always valid
/// `str` slice boundaries.
#[derive(Debug, Clone)]
pub struct Delimiters<'a> {
    bytes: &'a [u8],
    delimiter: u8,
    pos: usize,
    depth: isize,
    quote: Option<u8>,
    escaped: bool,
}

impl<'a> Delimiters<'a> {
    /// Creates a scanner over `input` looking for `delimiter`.
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is not ASCII.
    pub fn new(input: &'a str, delimiter: char) -> Self {
        assert!(delimiter.is_ascii(), "delimiter must be ASCII");
        Self {
            bytes: input.as_bytes(),
            delimiter: delimiter as u8,
            pos: 0,
            depth: 0,
            quote: None,
            escaped: false,
        }
    }

    /// Whether the scan so far has stopped inside a string literal.
    pub fn in_string(&self) -> bool {
        self.quote.is_some()
    }
}

impl Iterator for Delimiters<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let i = self.pos;
            let byte = self.bytes[i];
            self.pos += 1;

            if let Some(quote) = self.quote {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == quote {
                    self.quote = None;
                }
                continue;
            }

            match byte {
                b'"' | b'\'' => self.quote = Some(byte),
                b'(' | b'[' | b'{' => self.depth += 1,
                b')' | b']' | b'}' => self.depth -= 1,
                _ if byte == self.delimiter && self.depth == 0 => {
                    if byte == b'|' && self.bytes.get(i + 1) == Some(&b'|') {
                        self.pos += 1;
                        continue;
                    }
                    return Some(i);
                }
                _ => {}
            }
        }
        None
    }
}

/// Splits `input` on every top-level `delimiter`.
///
/// Pieces are returned verbatim (untrimmed). An empty input yields a single
/// empty piece, like [`str::split`].
pub fn split_top_level(input: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for offset in Delimiters::new(input, delimiter) {
        pieces.push(&input[start..offset]);
        start = offset + 1;
    }
    pieces.push(&input[start..]);
    pieces
}

/// Splits `input` around its first top-level `delimiter`.
///
/// Returns `None` when the delimiter does not occur at the top level.
pub fn split_once_top_level(input: &str, delimiter: char) -> Option<(&str, &str)> {
    Delimiters::new(input, delimiter)
        .next()
        .map(|offset| (&input[..offset], &input[offset + 1..]))
}

/// Whether `input` ends inside an unterminated string literal.
pub fn ends_in_string(input: &str) -> bool {
    let mut scan = Delimiters::new(input, '|');
    for _ in scan.by_ref() {}
    scan.in_string()
}
