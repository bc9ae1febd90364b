//! Ordered collection of subtitle blocks
//!
//! A [`SubRipFile`] owns [`ItemHandle`]s rather than blocks. Views produced
//! by [`slice`](SubRipFile::slice), [`at`](SubRipFile::at) and `clone` share
//! those handles, so editing a block through a view edits it everywhere.
//! Use [`deep_clone`](SubRipFile::deep_clone) for an independent copy.
//!
//! Block order is whatever the caller built. Only [`sort`](SubRipFile::sort),
//! [`clean_indexes`](SubRipFile::clean_indexes) and
//! [`remove_overlaps`](SubRipFile::remove_overlaps) reorder blocks.
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::{SliceFilter, SubRipFile};
//!
//! let source = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:05,000\nWorld\n";
//! let file = SubRipFile::parse_str(source)?;
//!
//! let late = file.slice(SliceFilter::new().starts_after((0, 0, 2, 0)))?;
//! late[0].write().text = "Everyone".to_string();
//!
//! assert_eq!(file.text_at((0, 0, 4, 0))?.as_deref(), Some("Everyone"));
//! assert_eq!(file.text_at("00:00:02,500")?, None);
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use crate::{
    encoding::{BomType, DecodedLines, TextEncoding},
    item::{ItemHandle, SubtitleIndex},
    parser::{split_lines, DiagnosticSink, ItemStream, ParseOptions, TracingSink},
    time::{Shift, TimeLike},
    ErrorHandling, Result, SubRipError, SubRipItem, SubRipTime,
};
use core::{fmt, ops::Index, str::FromStr};
use std::{
    io::{BufReader, Read, Write},
    path::{Path, PathBuf},
};

mod slice;

pub use slice::SliceFilter;

/// Line terminator used when none was set or detected
#[cfg(windows)]
pub const DEFAULT_EOL: &str = "\r\n";
/// Line terminator used when none was set or detected
#[cfg(not(windows))]
pub const DEFAULT_EOL: &str = "\n";

/// Ordered, index-accessible sequence of subtitle blocks
#[derive(Debug, Clone, Default)]
pub struct SubRipFile {
    items: Vec<ItemHandle>,
    eol: Option<String>,
    path: Option<PathBuf>,
    encoding: TextEncoding,
}

impl SubRipFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection owning fresh handles for `items`
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = SubRipItem>,
    {
        items.into_iter().collect()
    }

    /// Set the end-of-line convention
    #[must_use]
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.set_eol(eol);
        self
    }

    /// Parse decoded text with default options
    ///
    /// # Errors
    ///
    /// Never fails under the default `Pass` policy; kept fallible so the
    /// signature matches the other entry points.
    pub fn parse_str(text: &str) -> Result<Self> {
        Self::from_str_with_options(text, &ParseOptions::default())
    }

    /// Parse decoded text
    ///
    /// The encoding setting of `options` is ignored; the text is already
    /// decoded.
    ///
    /// # Errors
    ///
    /// Under [`ErrorHandling::Raise`], returns the first invalid block as
    /// [`SubRipError::InvalidBlockAt`].
    pub fn from_str_with_options(text: &str, options: &ParseOptions) -> Result<Self> {
        Self::from_str_with_sink(text, options, TracingSink)
    }

    /// Parse decoded text, reporting skipped blocks to `sink` under `Log`
    ///
    /// # Errors
    ///
    /// See [`from_str_with_options`](Self::from_str_with_options).
    pub fn from_str_with_sink<S: DiagnosticSink>(
        text: &str,
        options: &ParseOptions,
        sink: S,
    ) -> Result<Self> {
        let stream = ItemStream::new(split_lines(text), options.error_handling).with_sink(sink);
        Self::collect_stream(stream, options)
    }

    /// Decode bytes per `options.encoding`, then parse
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::Encoding`] for undecodable bytes, and block
    /// errors under `Raise`.
    pub fn from_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Self> {
        let (encoding, text) = options.encoding.decode(bytes)?;
        let mut file = Self::from_str_with_options(&text, options)?;
        file.encoding = encoding;
        Ok(file)
    }

    /// Read, decode and parse everything from `reader`
    ///
    /// # Errors
    ///
    /// Reader failures surface as [`SubRipError::Io`]; otherwise as for
    /// [`from_bytes`](Self::from_bytes).
    pub fn from_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Self> {
        Self::from_reader_with_sink(reader, options, TracingSink)
    }

    /// [`from_reader`](Self::from_reader) with an explicit diagnostic sink
    ///
    /// # Errors
    ///
    /// See [`from_reader`](Self::from_reader).
    pub fn from_reader_with_sink<R: Read, S: DiagnosticSink>(
        reader: R,
        options: &ParseOptions,
        sink: S,
    ) -> Result<Self> {
        let lines = DecodedLines::new(BufReader::new(reader), options.encoding)?;
        let encoding = lines.encoding();
        let stream = ItemStream::new(lines, options.error_handling).with_sink(sink);
        let mut file = Self::collect_stream(stream, options)?;
        file.encoding = encoding;
        Ok(file)
    }

    /// Eagerly parse already-decoded lines
    ///
    /// Lines may or may not carry their terminators.
    ///
    /// # Errors
    ///
    /// Block errors under [`ErrorHandling::Raise`].
    pub fn read<I, L>(lines: I, options: &ParseOptions) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::collect_stream(Self::stream(lines, options.error_handling), options)
    }

    /// Lazily parse already-decoded lines, one block at a time
    ///
    /// The returned iterator is single-pass.
    pub fn stream<I, L>(
        lines: I,
        policy: ErrorHandling,
    ) -> ItemStream<impl Iterator<Item = Result<String>>>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        ItemStream::new(lines.into_iter().map(|line| Ok(line.into())), policy)
    }

    fn collect_stream<I, S>(mut stream: ItemStream<I, S>, options: &ParseOptions) -> Result<Self>
    where
        I: Iterator<Item = Result<String>>,
        S: DiagnosticSink,
    {
        let mut file = Self::new();
        if let Some(eol) = &options.eol {
            file.set_eol(eol.as_str());
        }
        for item in stream.by_ref() {
            file.push(item?);
        }
        if let Some(eol) = stream.detected_eol() {
            file.detect_eol(eol);
        }
        tracing::debug!(
            items = file.len(),
            skipped = stream.skipped(),
            policy = %stream.policy(),
            "parsed subtitle stream"
        );
        Ok(file)
    }

    /// Line terminator used for rendering
    ///
    /// An explicitly set value, else the terminator detected while parsing,
    /// else [`DEFAULT_EOL`].
    #[must_use]
    pub fn eol(&self) -> &str {
        self.eol.as_deref().unwrap_or(DEFAULT_EOL)
    }

    /// Explicitly set the line terminator; always replaces the current one
    pub fn set_eol(&mut self, eol: impl Into<String>) {
        self.eol = Some(eol.into());
    }

    /// Record a detected terminator unless one is already set
    pub(crate) fn detect_eol(&mut self, eol: &str) {
        if self.eol.is_none() {
            self.eol = Some(eol.to_string());
        }
    }

    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Encoding the collection was decoded from, UTF-8 by default
    #[must_use]
    pub const fn text_encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn set_text_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ItemHandle> {
        self.items.get(index)
    }

    /// Append a block or an existing handle
    pub fn push(&mut self, item: impl Into<ItemHandle>) {
        self.items.push(item.into());
    }

    /// Insert at `index`, clamped to the end of the collection
    pub fn insert(&mut self, index: usize, item: impl Into<ItemHandle>) {
        let index = index.min(self.items.len());
        self.items.insert(index, item.into());
    }

    /// Remove and return the handle at `index`
    pub fn remove(&mut self, index: usize) -> Option<ItemHandle> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ItemHandle> {
        self.items.iter()
    }

    #[must_use]
    pub fn handles(&self) -> &[ItemHandle] {
        &self.items
    }

    /// Owned copies of every block, in collection order
    #[must_use]
    pub fn snapshot(&self) -> Vec<SubRipItem> {
        self.items.iter().map(ItemHandle::snapshot).collect()
    }

    /// Copy with fresh handles; edits no longer propagate
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self {
            items: self.items.iter().map(|h| ItemHandle::new(h.snapshot())).collect(),
            ..self.view(Vec::new())
        }
    }

    /// New collection with the same metadata over `items`
    fn view(&self, items: Vec<ItemHandle>) -> Self {
        Self {
            items,
            eol: self.eol.clone(),
            path: self.path.clone(),
            encoding: self.encoding,
        }
    }

    /// Blocks passing every bound of `filter`, sharing this collection's handles
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UncoercibleValue`] if a bound cannot be coerced.
    pub fn slice(&self, filter: SliceFilter) -> Result<Self> {
        let bounds = filter.compile()?;
        let items = self
            .items
            .iter()
            .filter(|handle| bounds.matches(&handle.read()))
            .cloned()
            .collect();
        Ok(self.view(items))
    }

    /// Blocks whose `[start, end]` contains `time`, sharing handles
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UncoercibleValue`] if `time` cannot be coerced.
    pub fn at(&self, time: impl Into<TimeLike>) -> Result<Self> {
        let time = SubRipTime::coerce(time)?;
        Ok(self.view(self.containing(time).collect()))
    }

    /// Text of the blocks containing `time`, joined with `\n`
    ///
    /// A negative instant matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UncoercibleValue`] if `time` cannot be coerced.
    pub fn text_at(&self, time: impl Into<TimeLike>) -> Result<Option<String>> {
        let time = SubRipTime::coerce(time)?;
        if time.ordinal() < 0 {
            return Ok(None);
        }
        let texts: Vec<String> = self
            .containing(time)
            .map(|handle| handle.read().text.clone())
            .collect();
        Ok((!texts.is_empty()).then(|| texts.join("\n")))
    }

    fn containing(&self, time: SubRipTime) -> impl Iterator<Item = ItemHandle> + '_ {
        self.items
            .iter()
            .filter(move |handle| handle.read().contains(time))
            .cloned()
    }

    /// Shift every block in place, in collection order
    pub fn shift(&mut self, shift: &Shift) {
        for handle in &self.items {
            handle.write().shift(shift);
        }
    }

    /// Stable sort by `(start, end)`
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| a.read().cmp_timing(&b.read()));
    }

    /// Sort, then renumber blocks from 1
    pub fn clean_indexes(&mut self) {
        self.sort();
        for (number, handle) in (1_i64..).zip(&self.items) {
            handle.write().index = SubtitleIndex::Number(number);
        }
    }

    /// Sort, then truncate each block's end to the next block's start
    ///
    /// One left-to-right pass over adjacent pairs. Returns the number of
    /// blocks truncated.
    pub fn remove_overlaps(&mut self) -> usize {
        self.sort();
        let mut truncated = 0;
        for pair in self.items.windows(2) {
            let next_start = pair[1].read().start;
            let mut previous = pair[0].write();
            if previous.end > next_start {
                tracing::trace!(
                    index = %previous.index,
                    end = %previous.end,
                    truncated_to = %next_start,
                    "truncating overlapping block"
                );
                previous.end = next_start;
                truncated += 1;
            }
        }
        truncated
    }

    /// Render with this collection's line terminator
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Render into a text sink
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn render_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.render_with(out, self.eol())
    }

    /// Render with `eol` substituted for every `\n`
    ///
    /// Each block is followed by a blank line unless its rendering already
    /// ends with one.
    pub fn render_with<W: fmt::Write>(&self, out: &mut W, eol: &str) -> fmt::Result {
        let blank = eol.repeat(2);
        for handle in &self.items {
            let block = handle.read().to_string().replace('\n', eol);
            out.write_str(&block)?;
            if !block.ends_with(&blank) {
                out.write_str(eol)?;
            }
        }
        Ok(())
    }

    /// Encode and write the rendering to a byte sink
    ///
    /// UTF-16 and UTF-32 output starts with a byte order mark so that it
    /// can be detected when read back; UTF-8 output does not.
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::Encoding`] for characters the encoding cannot
    /// represent and [`SubRipError::Io`] for writer failures.
    pub fn write_to<W: Write>(&self, mut writer: W, encoding: TextEncoding, eol: &str) -> Result<()> {
        let mut text = String::new();
        self.render_with(&mut text, eol)?;
        if let Some(bom) = encoding.bom().filter(|bom| *bom != BomType::Utf8) {
            writer.write_all(bom.signature())?;
        }
        writer.write_all(&encoding.encode(&text)?)?;
        writer.flush()?;
        Ok(())
    }
}

impl Index<usize> for SubRipFile {
    type Output = ItemHandle;

    fn index(&self, index: usize) -> &ItemHandle {
        &self.items[index]
    }
}

impl FromIterator<SubRipItem> for SubRipFile {
    fn from_iter<T: IntoIterator<Item = SubRipItem>>(iter: T) -> Self {
        iter.into_iter().map(ItemHandle::new).collect()
    }
}

impl FromIterator<ItemHandle> for SubRipFile {
    fn from_iter<T: IntoIterator<Item = ItemHandle>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Extend<SubRipItem> for SubRipFile {
    fn extend<T: IntoIterator<Item = SubRipItem>>(&mut self, iter: T) {
        self.items.extend(iter.into_iter().map(ItemHandle::new));
    }
}

impl Extend<ItemHandle> for SubRipFile {
    fn extend<T: IntoIterator<Item = ItemHandle>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SubRipFile {
    type Item = &'a ItemHandle;
    type IntoIter = core::slice::Iter<'a, ItemHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for SubRipFile {
    type Item = ItemHandle;
    type IntoIter = std::vec::IntoIter<ItemHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl fmt::Display for SubRipFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_to(f)
    }
}

impl FromStr for SubRipFile {
    type Err = SubRipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

#[cfg(test)]
mod tests;
