//! Incremental line decoding from a byte reader

use super::{BomType, EncodingSetting, TextEncoding};
use crate::{Result, SubRipError};
use std::io::{BufRead, Chain, Cursor, Read};

/// Iterator of decoded lines read from a [`BufRead`] source
///
/// The byte order mark is resolved once, from the first
/// [`BomType::MAX_LEN`] bytes of the source however many reads that takes.
/// Lines keep their terminator. Only one line is held in memory at a time,
/// so the iterator suits inputs too large to decode up front.
///
/// # Examples
///
/// ```rust
/// use subrip_core::encoding::{DecodedLines, EncodingSetting, TextEncoding};
///
/// let mut bytes = vec![0xFE, 0xFF];
/// bytes.extend(TextEncoding::Utf16Be.encode("1\n2\n")?);
/// let lines = DecodedLines::new(&bytes[..], EncodingSetting::AutoDetect)?;
/// assert_eq!(lines.encoding(), TextEncoding::Utf16Be);
/// assert_eq!(lines.collect::<Result<Vec<_>, _>>()?, vec!["1\n", "2\n"]);
/// # Ok::<(), subrip_core::SubRipError>(())
/// ```
#[derive(Debug)]
pub struct DecodedLines<R> {
    /// Peeked head, mark already skipped, followed by the rest of the source
    reader: Chain<Cursor<Vec<u8>>, R>,
    encoding: TextEncoding,
    /// Encoded form of `\n` in the resolved encoding
    newline: Vec<u8>,
    /// Bytes consumed so far, mark included
    offset: usize,
    done: bool,
}

impl<R: BufRead> DecodedLines<R> {
    /// Resolve the encoding from the head of `reader`
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::Io`] if reading the head fails.
    pub fn new(mut reader: R, setting: EncodingSetting) -> Result<Self> {
        let mut head = Vec::with_capacity(BomType::MAX_LEN);
        reader
            .by_ref()
            .take(BomType::MAX_LEN as u64)
            .read_to_end(&mut head)?;
        let (encoding, skip) = setting.resolve(&head);

        let mut head = Cursor::new(head);
        head.set_position(skip as u64);
        Ok(Self {
            reader: head.chain(reader),
            encoding,
            newline: encoding.encode("\n")?,
            offset: skip,
            done: false,
        })
    }

    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let width = self.newline.len();
        let mut buf = Vec::new();

        loop {
            if self.reader.read_until(b'\n', &mut buf)? == 0 || !buf.ends_with(b"\n") {
                break;
            }
            // `\n` may sit inside a wider code unit; complete the unit first
            let pad = (width - buf.len() % width) % width;
            if pad > 0 {
                self.reader.by_ref().take(pad as u64).read_to_end(&mut buf)?;
            }
            if buf.len() % width == 0 && buf.ends_with(&self.newline) {
                break;
            }
        }

        if buf.is_empty() {
            return Ok(None);
        }

        let line = self.encoding.decode(&buf).map_err(|error| match error {
            SubRipError::Encoding {
                encoding,
                position,
                reason,
            } => SubRipError::Encoding {
                encoding,
                position: position + self.offset,
                reason,
            },
            other => other,
        })?;
        self.offset += buf.len();
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for DecodedLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let line = self.read_line().transpose();
        if !matches!(line, Some(Ok(_))) {
            self.done = true;
        }
        line
    }
}
