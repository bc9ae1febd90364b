//! # SubRip I/O
//!
//! Filesystem entry points for `subrip-core`: open a `.srt` file, stream its
//! blocks lazily, and save a collection back to disk.
//!
//! Opening detects the byte order mark unless an explicit encoding is
//! configured, and records the path and encoding on the collection so a
//! later [`save`] can reuse them.
//!
//! ```rust,no_run
//! use subrip_core::{ParseOptions, Shift};
//! use subrip_io::{open, save, SaveOptions};
//!
//! let mut file = open("movie.srt", &ParseOptions::default())?;
//! file.shift(&Shift::new().with_seconds(-2));
//! save(&file, None::<&str>, &SaveOptions::default())?;
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};
use subrip_core::{
    encoding::DecodedLines,
    parser::{DiagnosticSink, ItemStream, TracingSink},
    ParseOptions, Result, SubRipError, SubRipFile, TextEncoding,
};

/// Lazy block stream over an open file
pub type FileStream = ItemStream<DecodedLines<BufReader<File>>>;

/// Overrides applied when saving
///
/// Unset fields fall back to the collection's own encoding and line
/// terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub encoding: Option<TextEncoding>,
    pub eol: Option<String>,
}

impl SaveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    #[must_use]
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.eol = Some(eol.into());
        self
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> SubRipError {
    SubRipError::Io {
        message: format!("{}: {err}", path.display()),
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| io_error(path, &e))
}

/// Read and parse a file
///
/// # Errors
///
/// Returns [`SubRipError::Io`] when the file cannot be read,
/// [`SubRipError::Encoding`] when its bytes do not decode, and block errors
/// under the `Raise` policy.
pub fn open(path: impl AsRef<Path>, options: &ParseOptions) -> Result<SubRipFile> {
    open_with_sink(path, options, TracingSink)
}

/// [`open`] with skipped blocks reported to `sink` under the `Log` policy
///
/// # Errors
///
/// See [`open`].
pub fn open_with_sink<S: DiagnosticSink>(
    path: impl AsRef<Path>,
    options: &ParseOptions,
    sink: S,
) -> Result<SubRipFile> {
    let path = path.as_ref();
    let mut file = SubRipFile::from_reader_with_sink(open_file(path)?, options, sink)?;
    file.set_source_path(path);
    tracing::debug!(
        path = %path.display(),
        encoding = %file.text_encoding(),
        items = file.len(),
        "opened subtitle file"
    );
    Ok(file)
}

/// Stream blocks from a file without loading it whole
///
/// # Errors
///
/// Returns [`SubRipError::Io`] when the file cannot be opened. Later read,
/// decode and block errors are yielded by the stream.
pub fn stream_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<FileStream> {
    let path = path.as_ref();
    let lines = DecodedLines::new(BufReader::new(open_file(path)?), options.encoding)?;
    tracing::debug!(path = %path.display(), encoding = %lines.encoding(), "streaming subtitle file");
    Ok(ItemStream::new(lines, options.error_handling))
}

/// Write a collection to disk
///
/// Writes to `path` when given, else to the path the collection was opened
/// from. Returns the path written.
///
/// # Errors
///
/// Returns [`SubRipError::Io`] when there is no target path or the write
/// fails, and [`SubRipError::Encoding`] for text the target encoding cannot
/// represent.
pub fn save<P: AsRef<Path>>(
    file: &SubRipFile,
    path: Option<P>,
    options: &SaveOptions,
) -> Result<PathBuf> {
    let target = match (path, file.source_path()) {
        (Some(path), _) => path.as_ref().to_path_buf(),
        (None, Some(source)) => source.to_path_buf(),
        (None, None) => {
            return Err(SubRipError::Io {
                message: "no target path and the collection was not opened from a file"
                    .to_string(),
            })
        }
    };
    let encoding = options.encoding.unwrap_or_else(|| file.text_encoding());
    let eol = options.eol.as_deref().unwrap_or_else(|| file.eol());

    let writer = File::create(&target).map_err(|e| io_error(&target, &e))?;
    file.write_to(BufWriter::new(writer), encoding, eol)?;

    tracing::debug!(
        path = %target.display(),
        encoding = %encoding,
        items = file.len(),
        "saved subtitle file"
    );
    Ok(target)
}
