//! Lazy block iterator over a line source

use super::{DiagnosticSink, ErrorHandling, ParseIssue, TracingSink};
use crate::{Result, SubRipItem};
use core::iter::FusedIterator;

/// Lines of a string with their terminators kept
///
/// Created by [`split_lines`]. Keeping terminators lets [`ItemStream`]
/// detect the end-of-line convention of the source.
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    inner: core::str::SplitInclusive<'a, char>,
}

/// Split text into lines, keeping `\n` / `\r\n` terminators
#[must_use]
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines {
        inner: text.split_inclusive('\n'),
    }
}

impl Iterator for SplitLines<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|line| Ok(line.to_string()))
    }
}

/// Run of non-blank lines read from the source
struct RawBlock {
    /// 1-based line number of the first line
    line: usize,
    lines: Vec<String>,
}

/// Single-pass iterator of blocks parsed from a line source
///
/// Lines may carry their terminator or not; blank lines (whitespace only)
/// separate blocks. Failed blocks are handled per [`ErrorHandling`]: under
/// `Raise` the iterator yields one error and then ends. Errors from the line
/// source itself always end the iteration, whatever the policy.
pub struct ItemStream<I, S = TracingSink> {
    lines: I,
    policy: ErrorHandling,
    sink: S,
    line_number: usize,
    blocks_seen: usize,
    skipped: usize,
    eol: Option<&'static str>,
    finished: bool,
}

impl<I> ItemStream<I, TracingSink>
where
    I: Iterator<Item = Result<String>>,
{
    /// Stream over fallible lines, logging through `tracing` under `Log`
    pub fn new<T>(lines: T, policy: ErrorHandling) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            policy,
            sink: TracingSink,
            line_number: 0,
            blocks_seen: 0,
            skipped: 0,
            eol: None,
            finished: false,
        }
    }
}

impl<'a> ItemStream<SplitLines<'a>, TracingSink> {
    /// Stream over the lines of decoded text
    #[must_use]
    pub fn from_text(text: &'a str, policy: ErrorHandling) -> Self {
        Self::new(split_lines(text), policy)
    }
}

impl<I, S> ItemStream<I, S>
where
    I: Iterator<Item = Result<String>>,
    S: DiagnosticSink,
{
    /// Replace the diagnostic sink used under `Log`
    pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> ItemStream<I, T> {
        ItemStream {
            lines: self.lines,
            policy: self.policy,
            sink,
            line_number: self.line_number,
            blocks_seen: self.blocks_seen,
            skipped: self.skipped,
            eol: self.eol,
            finished: self.finished,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> ErrorHandling {
        self.policy
    }

    /// First line terminator met so far, if any
    #[must_use]
    pub const fn detected_eol(&self) -> Option<&'static str> {
        self.eol
    }

    /// Number of blocks read so far, valid or not
    #[must_use]
    pub const fn blocks_seen(&self) -> usize {
        self.blocks_seen
    }

    /// Number of invalid blocks skipped so far
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Consume the stream and return its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn next_block(&mut self) -> Option<Result<RawBlock>> {
        let mut block = RawBlock {
            line: 0,
            lines: Vec::new(),
        };

        loop {
            let raw = match self.lines.next() {
                Some(Ok(raw)) => raw,
                Some(Err(error)) => return Some(Err(error)),
                None if block.lines.is_empty() => return None,
                None => return Some(Ok(block)),
            };
            self.line_number += 1;

            let line = self.strip_terminator(raw);
            if line.trim().is_empty() {
                if !block.lines.is_empty() {
                    return Some(Ok(block));
                }
                continue;
            }
            if block.lines.is_empty() {
                block.line = self.line_number;
            }
            block.lines.push(line);
        }
    }

    fn strip_terminator(&mut self, mut line: String) -> String {
        if self.line_number == 1 && line.starts_with('\u{FEFF}') {
            line.remove(0);
        }
        if line.ends_with('\n') {
            line.pop();
            let eol = if line.ends_with('\r') {
                line.pop();
                "\r\n"
            } else {
                "\n"
            };
            self.eol.get_or_insert(eol);
        }
        line
    }
}

impl<I, S> Iterator for ItemStream<I, S>
where
    I: Iterator<Item = Result<String>>,
    S: DiagnosticSink,
{
    type Item = Result<SubRipItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let block = match self.next_block() {
                Some(Ok(block)) => block,
                Some(Err(error)) => {
                    self.finished = true;
                    return Some(Err(error));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };
            self.blocks_seen += 1;

            let error = match SubRipItem::from_lines(&block.lines) {
                Ok(item) => return Some(Ok(item)),
                Err(error) => error,
            };
            let issue = ParseIssue::new(self.blocks_seen, block.line, &error, block.lines.join("\n"));

            match self.policy {
                ErrorHandling::Pass => {
                    tracing::trace!(block = issue.block, line = issue.line, "skipped invalid block");
                    self.skipped += 1;
                }
                ErrorHandling::Log => {
                    self.skipped += 1;
                    self.sink.report(issue);
                }
                ErrorHandling::Raise => {
                    self.finished = true;
                    return Some(Err(issue.into_error()));
                }
            }
        }
    }
}

impl<I, S> FusedIterator for ItemStream<I, S>
where
    I: Iterator<Item = Result<String>>,
    S: DiagnosticSink,
{
}

impl<I, S> core::fmt::Debug for ItemStream<I, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemStream")
            .field("policy", &self.policy)
            .field("line_number", &self.line_number)
            .field("blocks_seen", &self.blocks_seen)
            .field("skipped", &self.skipped)
            .field("eol", &self.eol)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
