//! Reporting of skipped blocks under the `Log` policy

use crate::SubRipError;
use core::fmt;

/// A block that failed to parse and was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 1-based position of the block within the stream
    pub block: usize,
    /// 1-based line number where the block starts
    pub line: usize,
    pub reason: String,
    /// Block text as read, lines joined with `\n`
    pub raw: String,
}

impl ParseIssue {
    /// Build an issue from a block error
    #[must_use]
    pub fn new(block: usize, line: usize, error: &SubRipError, raw: impl Into<String>) -> Self {
        let reason = match error {
            SubRipError::InvalidBlock { reason } | SubRipError::InvalidBlockAt { reason, .. } => {
                reason.clone()
            }
            other => other.to_string(),
        };
        Self {
            block,
            line,
            reason,
            raw: raw.into(),
        }
    }

    /// Error carrying the same position and raw text
    #[must_use]
    pub fn into_error(self) -> SubRipError {
        SubRipError::InvalidBlockAt {
            block: self.block,
            line: self.line,
            reason: self.reason,
            raw: self.raw,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InvalidItem(block {}, line {}): {}\n{}",
            self.block, self.line, self.reason, self.raw
        )
    }
}

/// Receiver for skipped-block reports
pub trait DiagnosticSink {
    fn report(&mut self, issue: ParseIssue);
}

/// Sink emitting one `warn` event per skipped block
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, issue: ParseIssue) {
        tracing::warn!(
            block = issue.block,
            line = issue.line,
            raw = %issue.raw,
            "skipping invalid subtitle block: {}",
            issue.reason
        );
    }
}

impl DiagnosticSink for Vec<ParseIssue> {
    fn report(&mut self, issue: ParseIssue) {
        self.push(issue);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, issue: ParseIssue) {
        (**self).report(issue);
    }
}
