//! Splitting helpers that are aware of Python string literals and bracket nesting.
//!
//! None of these understand the full Python grammar. A quote opens a string that runs until the
//! next unescaped quote of the same kind, which means a triple-quoted string is seen as three
//! strings in a row. That is good enough for the single-line statements we deal with.

pub fn split_filter_empty<'a>(input: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    input.split(separator).filter(|v| !v.is_empty())
}

/// Split `input` into trimmed, non-empty lines.
pub fn non_empty_lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Tracks whether a left-to-right scan is currently inside a quoted string.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuoteState {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feed the next character of the scan. Returns `true` if `c` belongs to a quoted string,
    /// including the opening and closing quote characters themselves.
    pub fn feed(&mut self, c: char) -> bool {
        match self.quote {
            Some(quote) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == quote {
                    self.quote = None;
                }
                true
            }
            None => {
                if c == '"' || c == '\'' {
                    self.quote = Some(c);
                    return true;
                }
                false
            }
        }
    }

    pub fn in_quotes(&self) -> bool {
        self.quote.is_some()
    }
}

/// Iterate over the characters of `text` that are not part of a quoted string.
pub fn unquoted_char_indices(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut state = QuoteState::default();
    text.char_indices().filter(move |(_, c)| !state.feed(*c))
}

/// Split `text` into runs that are inside or outside quoted strings, in order. Each run is
/// paired with `true` when it is quoted, quote characters included.
pub fn quoted_segments(text: &str) -> Vec<(bool, &str)> {
    let mut ret = vec![];
    let mut state = QuoteState::default();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in text.char_indices() {
        let in_quotes = state.feed(c);
        if in_quotes != quoted {
            if i > start {
                ret.push((quoted, &text[start..i]));
            }
            start = i;
            quoted = in_quotes;
        }
    }
    if start < text.len() {
        ret.push((quoted, &text[start..]));
    }
    ret
}

/// Byte index of the first occurrence of `needle` outside of a quoted string.
pub fn find_unquoted(text: &str, needle: char) -> Option<usize> {
    unquoted_char_indices(text)
        .find(|(_, c)| *c == needle)
        .map(|(i, _)| i)
}

/// Split at every `separator` that is outside of a quoted string.
pub fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    split_at_indices(
        text,
        unquoted_char_indices(text)
            .filter(|(_, c)| *c == separator)
            .map(|(i, _)| i),
    )
}

/// Split at every `separator` that is outside of a quoted string and not nested inside any
/// bracket pair.
///
/// # Example
///
/// ```
/// use pyinfer_util::split::split_top_level;
/// let parts = split_top_level(r#""a, b", ["c", "d"], e"#, ',');
/// assert_eq!(parts, vec![r#""a, b""#, r#" ["c", "d"]"#, " e"]);
/// ```
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut depth = 0i64;
    let indices = unquoted_char_indices(text)
        .filter(|(_, c)| {
            match *c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ => {}
            }
            depth == 0 && *c == separator
        })
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    split_at_indices(text, indices)
}

/// Whether a string literal opened in `text` is still open at its end.
pub fn ends_in_quotes(text: &str) -> bool {
    let mut state = QuoteState::default();
    for c in text.chars() {
        state.feed(c);
    }
    state.in_quotes()
}

/// Net number of brackets left open at the end of `text`, ignoring quoted strings. Negative if
/// more brackets are closed than opened.
pub fn bracket_balance(text: &str) -> i64 {
    unquoted_char_indices(text)
        .map(|(_, c)| match c {
            '(' | '[' | '{' => 1,
            ')' | ']' | '}' => -1,
            _ => 0,
        })
        .sum()
}

fn split_at_indices<I: IntoIterator<Item = usize>>(text: &str, indices: I) -> Vec<&str> {
    let mut ret = vec![];
    let mut last = 0;
    for index in indices {
        ret.push(&text[last..index]);
        // Separators handled here are all single-byte ASCII characters
        last = index + 1;
    }
    ret.push(&text[last..]);
    ret
}
