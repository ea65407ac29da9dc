use alloc::string::String;

use crate::PropertySink;

const COMMENT_PREFIX: char = '#';
const CONTINUATION: char = '\\';
const SEPARATOR: char = '=';

/// Counters collected over one parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub lines: usize,
    pub comments: usize,
    pub continuations: usize,
    pub inserted: usize,
    /// Logical lines without a key: no `=`, or `=` as the first character.
    pub dropped: usize,
    /// Input ended on a continuation line; that fragment was discarded.
    pub dangling: bool,
}

/// Parses physical lines into `sink`.
///
/// Each physical line is trimmed on its own before it joins the current
/// logical line. Malformed entries are counted and skipped, never reported.
pub fn parse_lines<'a, I, S>(lines: I, sink: &mut S) -> ParseSummary
where
    I: IntoIterator<Item = &'a str>,
    S: PropertySink + ?Sized,
{
    let mut summary = ParseSummary::default();
    let mut pending = String::new();
    let mut continued = false;

    for line in lines {
        summary.lines += 1;

        if line.starts_with(COMMENT_PREFIX) {
            summary.comments += 1;
            continue;
        }

        if let Some(fragment) = line.strip_suffix(CONTINUATION) {
            summary.continuations += 1;
            pending.push_str(trim_line(fragment));
            continued = true;
            continue;
        }

        pending.push_str(trim_line(line));
        match split_entry(&pending) {
            Some((key, value)) => {
                sink.insert_property(String::from(key), String::from(value));
                summary.inserted += 1;
            }
            None => summary.dropped += 1,
        }
        pending.clear();
        continued = false;
    }

    summary.dangling = continued;
    summary
}

/// Splits `input` into lines and parses them into `sink`.
pub fn parse_str<S>(input: &str, sink: &mut S) -> ParseSummary
where
    S: PropertySink + ?Sized,
{
    parse_lines(split_lines(input), sink)
}

/// Iterates over the lines of `input`, ending each at `\n`, `\r` or `\r\n`.
///
/// A terminator at the very end does not start another line.
pub fn split_lines(input: &str) -> impl Iterator<Item = &str> {
    SplitLines { rest: input }
}

/// Strips every char up to and including U+0020 from both ends. Control
/// characters go; non-breaking and ideographic spaces stay.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c <= ' ')
}

fn split_entry(logical: &str) -> Option<(&str, &str)> {
    match logical.find(SEPARATOR) {
        Some(0) | None => None,
        Some(index) => Some((&logical[..index], &logical[index + 1..])),
    }
}

struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(['\r', '\n']) {
            Some(index) => {
                let line = &self.rest[..index];
                let tail = &self.rest[index..];
                let skip = if tail.starts_with("\r\n") { 2 } else { 1 };
                self.rest = &tail[skip..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
