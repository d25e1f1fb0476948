//! Member path model.
//!
//! Paths are `/`-separated, carry no leading, trailing or doubled separator
//! and are compared by their normalized string form. `\` is an ordinary
//! name character. The free helpers here are total over any non-empty input.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

use crate::{ArchiveError, Result};

/// Separator used inside archive member names.
pub const SEPARATOR: char = '/';

/// A normalized archive member path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArchivePath(String);

impl ArchivePath {
    /// Normalize a raw member name into a path.
    ///
    /// Strips exactly one trailing separator, then requires every segment
    /// to be non-empty and neither `.` nor `..`. This rules out leading
    /// separators and doubled separators, so every proper prefix of a
    /// parsed path is itself a valid path.
    pub fn parse(raw: &str) -> Result<Self> {
        normalize(raw)
            .filter(|p| p.split(SEPARATOR).all(is_valid_segment))
            .map(|p| Self(p.to_string()))
            .ok_or_else(|| ArchiveError::InvalidPath(raw.to_string()))
    }

    /// Wrap a proper prefix of an already parsed path.
    pub(crate) fn from_prefix(prefix: &str) -> Self {
        Self(prefix.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent directory path, or `None` for a root-level member.
    pub fn parent(&self) -> Option<ArchivePath> {
        parent(&self.0).map(ArchivePath::from_prefix)
    }

    /// Display name (last segment).
    pub fn segment(&self) -> &str {
        segment(&self.0)
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.0.split(SEPARATOR).count()
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            rest: parent(&self.0),
        }
    }

    /// Member name as stored in the container for a directory entry.
    pub fn to_dir_name(&self) -> String {
        format!("{}{}", self.0, SEPARATOR)
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ArchivePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ArchivePath {
    type Error = ArchiveError;

    fn try_from(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}

/// Iterator over the proper ancestors of a path.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.rest?;
        self.rest = parent(current);
        Some(current)
    }
}

/// Strip one trailing separator; `None` if the result is empty.
pub fn normalize(raw: &str) -> Option<&str> {
    let trimmed = raw.strip_suffix(SEPARATOR).unwrap_or(raw);
    (!trimmed.is_empty()).then_some(trimmed)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".."
}

/// Substring before the last separator.
///
/// A leading separator yields an empty prefix, which is treated as "no parent".
pub fn parent(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR)
        .map(|idx| &path[..idx])
        .filter(|p| !p.is_empty())
}

/// Substring after the last separator.
pub fn segment(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
