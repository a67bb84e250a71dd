//! Parse flat form keys into field paths.
//!
//! Two notations are understood:
//!
//! - dotted keys, e.g. `user.address.city`;
//! - bracketed keys, e.g. `user[address][city]`.
//!
//! A key that contains at least one dot is always treated as dotted: the bracket
//! grammar is not attempted on it.
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The ordered sequence of field names addressed by a single form key.
///
/// A `FieldPath` is never empty.
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a flat key into a [`FieldPath`].
    ///
    /// ```rust
    /// use formbind::key::FieldPath;
    ///
    /// let dotted = FieldPath::parse("user.address.city").unwrap();
    /// let bracketed = FieldPath::parse("user[address][city]").unwrap();
    /// assert_eq!(dotted, bracketed);
    /// assert_eq!(dotted.segments(), ["user", "address", "city"]);
    /// ```
    pub fn parse(key: &str) -> Result<Self, KeyParseError> {
        if key.contains('.') {
            parse_dotted(key)
        } else {
            parse_bracketed(key)
        }
    }

    /// The segments of this path, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments in this path.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Split the path into its intermediate segments and its final segment.
    pub fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            // `FieldPath` is never empty.
            None => (&[], ""),
        }
    }

    /// Remove `prefix` from the front of the path.
    ///
    /// Returns `None` if the first segment doesn't match `prefix` or if nothing
    /// would be left after stripping it.
    pub fn strip_prefix(&self, prefix: &str) -> Option<FieldPath> {
        let (first, rest) = self.segments.split_first()?;
        if first != prefix || rest.is_empty() {
            return None;
        }
        Some(FieldPath {
            segments: rest.to_vec(),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Keys that are empty or start with the reserved prefix (`_` by default) are
/// never bound, and never diagnosed.
pub fn is_reserved(key: &str, reserved_prefix: &str) -> bool {
    key.is_empty() || (!reserved_prefix.is_empty() && key.starts_with(reserved_prefix))
}

/// Lowercase the first character of a segment.
///
/// Field names are matched after this normalization, therefore `User[Name]`
/// and `user[name]` address the same field.
pub fn normalize_segment(segment: &str) -> Cow<'_, str> {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            Cow::Owned(first.to_lowercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(segment),
    }
}

fn parse_dotted(key: &str) -> Result<FieldPath, KeyParseError> {
    let mut segments = Vec::new();
    let mut position = 0;
    for part in key.split('.') {
        if part.is_empty() {
            return Err(KeyParseError::EmptySegment { position });
        }
        segments.push(part.to_owned());
        position += part.len() + 1;
    }
    Ok(FieldPath { segments })
}

fn parse_bracketed(key: &str) -> Result<FieldPath, KeyParseError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    // Byte offset of the `[` that opened the group we are currently in, if any.
    let mut open: Option<usize> = None;

    for (position, c) in key.char_indices() {
        match c {
            '[' => {
                if open.is_some() {
                    return Err(KeyParseError::NestedOpen { position });
                }
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                open = Some(position);
            }
            ']' => {
                let Some(start) = open.take() else {
                    return Err(KeyParseError::UnmatchedClose { position });
                };
                if current.is_empty() {
                    // `tags[]` is the conventional array suffix: accepted at the very end only.
                    let is_trailing = position + 1 == key.len();
                    if !is_trailing || segments.is_empty() {
                        return Err(KeyParseError::EmptySegment { position: start });
                    }
                } else {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if let Some(position) = open {
        return Err(KeyParseError::Unclosed { position });
    }
    if !current.is_empty() {
        segments.push(current);
    }
    if segments.is_empty() {
        return Err(KeyParseError::EmptySegment { position: 0 });
    }
    Ok(FieldPath { segments })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
/// A form key that doesn't follow the dotted or bracketed grammar.
///
/// Positions are byte offsets into the key.
pub enum KeyParseError {
    #[error("unexpected `]` at position {position}: there is no open `[` to close")]
    UnmatchedClose { position: usize },
    #[error("unexpected `[` at position {position}: brackets can't be nested")]
    NestedOpen { position: usize },
    #[error("the `[` at position {position} is never closed")]
    Unclosed { position: usize },
    #[error("empty segment at position {position}")]
    EmptySegment { position: usize },
}
