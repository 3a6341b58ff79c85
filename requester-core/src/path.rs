//! Dotted/bracketed accessors used by json outputs, e.g. `data.items[2].id` or `grid[0][1]`.

use std::fmt;

use crate::types::AnyValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl OutputPath {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Parse an accessor. The empty path addresses the whole document.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = raw.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut key)));
                    }
                    let mut digits = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(n);
                    }
                    if !closed {
                        return Err(PathError::UnclosedBracket);
                    }
                    let index = digits
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| PathError::InvalidIndex(digits.clone()))?;
                    segments.push(PathSegment::Index(index));
                }
                ']' => return Err(PathError::UnexpectedBracket),
                other => key.push(other),
            }
        }
        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Walk the document. Missing keys, out-of-range indices and type mismatches yield `None`.
    pub fn lookup<'a>(&self, doc: &'a AnyValue) -> Option<&'a AnyValue> {
        let mut cur = doc;
        for seg in &self.segments {
            cur = match (seg, cur) {
                (PathSegment::Key(k), AnyValue::Object(map)) => map.get(k)?,
                // `items.0` reads the same as `items[0]`.
                (PathSegment::Key(k), AnyValue::Array(arr)) => arr.get(k.parse::<usize>().ok()?)?,
                (PathSegment::Index(i), AnyValue::Array(arr)) => arr.get(*i)?,
                _ => return None,
            };
        }
        Some(cur)
    }
}

impl fmt::Display for OutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("unclosed '[' in path")]
    UnclosedBracket,
    #[error("unexpected ']' in path")]
    UnexpectedBracket,
    #[error("array index must be a non-negative integer, got '{0}'")]
    InvalidIndex(String),
}
