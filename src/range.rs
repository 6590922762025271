use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::{Error, Result};

/// 1-based page number of the remote collection.
pub type PageRequest = u32;

/// An inclusive, non-empty range of pages, `start..=end` with `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: PageRequest,
    end: PageRequest,
}

impl PageRange {
    pub fn new(start: PageRequest, end: PageRequest) -> Result<Self> {
        Self::checked(&format!("{start}-{end}"), start, end)
    }

    fn checked(input: &str, start: PageRequest, end: PageRequest) -> Result<Self> {
        if start < 1 {
            return Err(invalid(input, "pages start at 1"));
        }
        if start > end {
            return Err(invalid(input, "start page is after end page"));
        }
        Ok(Self { start, end })
    }

    /// Number of pages in the range. Never zero.
    pub fn page_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn pages(&self) -> RangeInclusive<PageRequest> {
        self.start..=self.end
    }

    /// Default output file for this range: `anime-<start>-<end>.json`.
    pub fn file_name(&self) -> String {
        format!("anime-{}-{}.json", self.start, self.end)
    }
}

impl FromStr for PageRange {
    type Err = Error;

    /// Parses `<start>-<end>`, both positive integers.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| invalid(s, "expected `<start>-<end>`"))?;
        PageRange::checked(s, parse_bound(s, start)?, parse_bound(s, end)?)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl IntoIterator for &PageRange {
    type Item = PageRequest;
    type IntoIter = RangeInclusive<PageRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}

fn parse_bound(input: &str, bound: &str) -> Result<PageRequest> {
    let bound = bound.trim();
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(input, "bounds must be positive integers"));
    }
    bound
        .parse()
        .map_err(|_| invalid(input, "page number is too large"))
}

fn invalid(input: &str, reason: &'static str) -> Error {
    Error::InvalidRange {
        input: input.to_string(),
        reason,
    }
}
