//! Path patterns and locations.
//!
//! A [`PathPattern`] is the path of a single route node, relative to its
//! parent (`/` for the root, `contacts/:contactId` below it). A
//! [`Location`] is a concrete path the navigator was asked to visit,
//! split into segments and search params.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Parameters captured from `:name` segments, keyed by name.
pub type Params = BTreeMap<String, String>;

/// Rank of a static segment when choosing between matching branches.
const STATIC_SCORE: u32 = 10;

/// Rank of a `:param` segment.
const PARAM_SCORE: u32 = 3;

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text.
    Static(String),
    /// Matches any single segment and captures it under this name.
    Param(String),
}

/// Parsed path pattern of one route node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/`, `contacts/:contactId` or `:id/edit`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty parameter names, invalid characters in a
    /// parameter name, or a parameter name used twice.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message,
        };

        let mut segments = Vec::new();
        for raw in split_segments(pattern) {
            if let Some(name) = raw.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid("parameter name is empty".to_string()));
                }
                if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(invalid(format!("invalid parameter name '{name}'")));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                {
                    return Err(invalid(format!("duplicate parameter '{name}'")));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if raw.contains(['?', '#']) {
                return Err(invalid(format!("segment '{raw}' contains '?' or '#'")));
            } else {
                segments.push(Segment::Static(raw.to_string()));
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Specificity used to rank competing matches.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Static(_) => STATIC_SCORE,
                Segment::Param(_) => PARAM_SCORE,
            })
            .sum()
    }

    /// Match this pattern against the start of `path`.
    ///
    /// On success, captured params are inserted into `params` and the number
    /// of consumed segments is returned.
    pub fn match_prefix(&self, path: &[String], params: &mut Params) -> Option<usize> {
        if path.len() < self.segments.len() {
            return None;
        }

        let mut captured = Vec::new();
        for (segment, actual) in self.segments.iter().zip(path) {
            match segment {
                Segment::Static(expected) if expected == actual => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => captured.push((name.clone(), actual.clone())),
            }
        }

        params.extend(captured);
        Some(self.segments.len())
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A concrete location: path segments plus search params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
    search: BTreeMap<String, String>,
}

impl Location {
    /// Parse a location such as `/contacts/1?q=ada`.
    ///
    /// Relative input is treated as rooted at `/`. Empty segments, a
    /// trailing slash and any `#fragment` are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let without_fragment = raw.split('#').next().unwrap_or_default();
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        let segments = split_segments(path)
            .map(|segment| percent_decode(segment, false))
            .collect();
        let search = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (percent_decode(key, true), percent_decode(value, true))
            })
            .collect();

        Self { segments, search }
    }

    /// Decoded path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The normalized path without search params.
    #[must_use]
    pub fn path(&self) -> String {
        let encoded: Vec<String> = self
            .segments
            .iter()
            .map(|segment| percent_encode(segment, PATH_RESERVED))
            .collect();
        format!("/{}", encoded.join("/"))
    }

    /// A single search param, `None` when absent or empty.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.search
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        let mut separator = '?';
        for (key, value) in &self.search {
            write!(
                f,
                "{separator}{}={}",
                percent_encode(key, QUERY_RESERVED),
                percent_encode(value, QUERY_RESERVED)
            )?;
            separator = '&';
        }
        Ok(())
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Characters escaped when writing a path segment.
const PATH_RESERVED: &[char] = &['%', ' ', '/', '?', '#', '+'];

/// Characters escaped when writing a search key or value.
const QUERY_RESERVED: &[char] = &['%', ' ', '&', '=', '+', '#'];

/// Escape every char in `reserved` as `%XX`.
fn percent_encode(input: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if reserved.contains(&ch) {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim.
///
/// `+` means a space only in search params.
fn percent_decode(input: &str, plus_as_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
