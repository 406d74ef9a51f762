//! Source positions for flattened key paths.
//!
//! Two sources feed a [`PositionTable`]:
//! - [`extract_positions`] walks the raw text line by line and rebuilds key
//!   paths from indentation (2-space steps). It works on text that does not
//!   parse at all.
//! - [`track_spans`] replays the YAML event stream with markers and records
//!   the exact line of every scalar leaf's key. It needs text the YAML reader
//!   accepts.
//!
//! [`build_positions`] merges both, preferring the event spans.

use hashbrown::HashMap;
use regex::Regex;
use std::sync::OnceLock;
use yaml_rust::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust::scanner::{Marker, TScalarStyle};

use super::value::{is_empty_or_null, strip_quotes};

/// Mapping from fully-qualified key path to its 1-based line number.
///
/// Iteration order is insertion order, which the suffix lookups rely on.
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` at `line` unless the path is already known. Returns true if recorded.
    pub fn record(&mut self, path: impl Into<String>, line: usize) -> bool {
        let path = path.into();
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path.clone(), self.order.len());
        self.order.push((path, line));
        true
    }

    /// Add every path from `other` that this table does not know yet.
    pub fn fill_from(&mut self, other: &PositionTable) {
        for (path, line) in &other.order {
            self.record(path.clone(), *line);
        }
    }

    /// Exact match on the full path.
    pub fn exact(&self, path: &str) -> Option<usize> {
        self.index.get(path).map(|&slot| self.order[slot].1)
    }

    /// Line lookup with graceful degradation:
    /// 1. exact path
    /// 2. first path ending with the key's last two segments
    /// 3. first path ending with the key's last segment
    pub fn lookup(&self, key: &str) -> Option<usize> {
        if let Some(line) = self.exact(key) {
            return Some(line);
        }

        let segments: Vec<&str> = key.split('.').collect();
        if segments.len() > 1 {
            if let Some(line) = self.first_with_suffix(&segments[segments.len() - 2..]) {
                return Some(line);
            }
        }

        let last = segments.last()?;
        self.first_with_suffix(std::slice::from_ref(last))
    }

    fn first_with_suffix(&self, suffix: &[&str]) -> Option<usize> {
        self.order.iter().find_map(|(path, line)| {
            let segments: Vec<&str> = path.split('.').collect();
            segments.ends_with(suffix).then_some(*line)
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order.iter().map(|(path, line)| (path.as_str(), *line))
    }
}

/// One `indent key: rest` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyLine<'a> {
    pub indent: usize,
    pub key: &'a str,
    pub rest: &'a str,
}

fn key_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"^(?P<indent>[ \t]*)(?P<key>"[^"]*"|'[^']*'|[^\s#'"\-:][^:]*?)[ \t]*:(?:[ \t]+(?P<rest>.*?))?[ \t]*$"#,
        )
        .expect("key line pattern is valid")
    })
}

impl<'a> KeyLine<'a> {
    /// Match a raw line against the `(indent)(key):(rest)` shape.
    /// Blank lines, comments and sequence items do not match.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let line = raw.trim_end_matches('\r');
        let caps = key_line_pattern().captures(line)?;
        let indent = caps.name("indent").map_or(0, |m| m.as_str().chars().count());
        let key = strip_quotes(caps.name("key")?.as_str().trim());
        if key.is_empty() {
            return None;
        }
        let rest = strip_trailing_comment(caps.name("rest").map_or("", |m| m.as_str()));
        Some(Self { indent, key, rest })
    }

    /// True when the value opens a literal or folded block scalar (`|`, `>-`, ...).
    pub fn opens_block_scalar(&self) -> bool {
        let mut chars = self.rest.chars();
        matches!(chars.next(), Some('|') | Some('>'))
            && chars.all(|c| c == '-' || c == '+' || c.is_ascii_digit())
    }
}

/// Cut a value at the first `#` that starts a comment: at the start of the
/// value or after whitespace, and past the closing quote of a quoted token.
/// An unclosed quote keeps the whole value.
fn strip_trailing_comment(rest: &str) -> &str {
    let scan_from = match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => match rest[1..].find(quote) {
            Some(close) => close + 2,
            None => return rest,
        },
        _ => 0,
    };

    let mut prev_is_space = scan_from == 0;
    for (offset, c) in rest[scan_from..].char_indices() {
        if c == '#' && prev_is_space {
            return rest[..scan_from + offset].trim_end();
        }
        prev_is_space = c == ' ' || c == '\t';
    }
    rest
}

/// Indentation of a raw line, or `None` for blank lines.
pub(crate) fn line_indent(raw: &str) -> Option<usize> {
    let line = raw.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }
    Some(line.chars().take_while(|c| *c == ' ' || *c == '\t').count())
}

/// Rebuild key paths from indentation and record the first line where each
/// path gets a non-empty value.
pub fn extract_positions(text: &str) -> PositionTable {
    let mut table = PositionTable::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut block_indent: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        if let Some(owner) = block_indent {
            match line_indent(raw) {
                None => continue,
                Some(indent) if indent > owner => continue,
                Some(_) => block_indent = None,
            }
        }

        let Some(line) = KeyLine::parse(raw) else {
            continue;
        };

        let depth = (line.indent + 1) / 2;
        stack.truncate(depth);
        stack.push(line.key);

        if line.opens_block_scalar() {
            block_indent = Some(line.indent);
        }
        if !is_empty_or_null(line.rest) {
            table.record(stack.join("."), idx + 1);
        }
    }

    table
}

enum Frame {
    Mapping {
        key: Option<(String, usize)>,
        expect_key: bool,
    },
    Sequence,
}

/// Replays marked YAML events, keeping the open mapping keys on a stack.
#[derive(Default)]
struct SpanTracker {
    frames: Vec<Frame>,
    table: PositionTable,
}

impl SpanTracker {
    fn current_path(&self) -> Option<(String, usize)> {
        let mut segments = Vec::with_capacity(self.frames.len());
        let mut line = 0;
        for frame in &self.frames {
            match frame {
                Frame::Mapping { key: Some((key, at)), .. } => {
                    segments.push(key.as_str());
                    line = *at;
                }
                _ => return None,
            }
        }
        Some((segments.join("."), line))
    }

    fn finish_value(&mut self) {
        if let Some(Frame::Mapping { key, expect_key }) = self.frames.last_mut() {
            *key = None;
            *expect_key = true;
        }
    }
}

impl MarkedEventReceiver for SpanTracker {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        match ev {
            Event::DocumentStart => self.frames.clear(),
            Event::MappingStart(_) => self.frames.push(Frame::Mapping {
                key: None,
                expect_key: true,
            }),
            Event::SequenceStart(_) => self.frames.push(Frame::Sequence),
            Event::MappingEnd | Event::SequenceEnd => {
                self.frames.pop();
                self.finish_value();
            }
            Event::Scalar(value, style, _, _) => {
                let expecting_key = matches!(
                    self.frames.last(),
                    Some(Frame::Mapping { expect_key: true, .. })
                );
                if expecting_key {
                    if let Some(Frame::Mapping { key, expect_key }) = self.frames.last_mut() {
                        *key = Some((value, mark.line()));
                        *expect_key = false;
                    }
                    return;
                }

                let is_null = style == TScalarStyle::Plain && is_empty_or_null(&value);
                if !is_null {
                    if let Some((path, line)) = self.current_path() {
                        self.table.record(path, line);
                    }
                }
                self.finish_value();
            }
            Event::Alias(_) => {
                let expecting_key = matches!(
                    self.frames.last(),
                    Some(Frame::Mapping { expect_key: true, .. })
                );
                if expecting_key {
                    if let Some(Frame::Mapping { key, expect_key }) = self.frames.last_mut() {
                        *key = Some(("*".to_string(), mark.line()));
                        *expect_key = false;
                    }
                } else {
                    self.finish_value();
                }
            }
            _ => {}
        }
    }
}

/// Exact key positions from the YAML event stream, or `None` if the reader rejects the text.
pub fn track_spans(text: &str) -> Option<PositionTable> {
    let mut tracker = SpanTracker::default();
    let mut parser = Parser::new(text.chars());
    match parser.load(&mut tracker, false) {
        Ok(()) => Some(tracker.table),
        Err(e) => {
            log::debug!("span tracking stopped: {}", e);
            None
        }
    }
}

/// Event spans where available, indentation heuristic for everything else.
pub fn build_positions(text: &str) -> PositionTable {
    let heuristic = extract_positions(text);
    match track_spans(text) {
        Some(mut precise) => {
            precise.fill_from(&heuristic);
            precise
        }
        None => heuristic,
    }
}
