//! Line-oriented stream processing
//!
//! One entry (or code) per line. The line terminator (`\n` or `\r\n`) is the
//! only thing stripped; every other character belongs to the entry.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::codec::{Compressor, Expander, SymbolAlphabet};
use crate::error::Result;

/// Byte and line counts for one processed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub lines: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl StreamStats {
    /// Output size relative to input size (1.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            1.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}

/// Compress every line of `reader` into `writer`.
pub fn compress_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    alphabet: SymbolAlphabet,
) -> Result<StreamStats> {
    let mut compressor = Compressor::new(alphabet);
    let mut warned_unsorted = false;

    let stats = for_each_line(reader, &mut writer, |entry| {
        if !warned_unsorted && compressor.position() > 0 && entry < compressor.predictor() {
            tracing::warn!(
                "Input is not sorted at line {}; compression will be less effective",
                compressor.position() + 1
            );
            warned_unsorted = true;
        }
        compressor.push(entry)
    })?;

    writer.flush()?;
    Ok(stats)
}

/// Expand every line of `reader` into `writer`.
///
/// Stops at the first undecodable line; lines already written stay written.
pub fn expand_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    alphabet: SymbolAlphabet,
) -> Result<StreamStats> {
    let mut expander = Expander::new(alphabet);
    let stats = for_each_line(reader, &mut writer, |code| expander.push(code))?;
    writer.flush()?;
    Ok(stats)
}

fn for_each_line<R, W, F>(mut reader: R, writer: &mut W, mut convert: F) -> Result<StreamStats>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<String>,
{
    let mut stats = StreamStats::default();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        stats.lines += 1;
        stats.bytes_in += read as u64;

        let converted = convert(strip_terminator(&line))?;
        writer.write_all(converted.as_bytes())?;
        writer.write_all(b"\n")?;
        stats.bytes_out += converted.len() as u64 + 1;
    }

    Ok(stats)
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CodecError, PfcError};
    use std::io::Cursor;

    const WORDS: &str = "abate\nabatement\nabattoir\nabbe\nabbess\nabbey\nabbot\nabbreviate\nabbreviated\n";
    const CODES: &str = "Aabate\nFment\nEtoir\nCbe\nEss\nEy\nDot\nDreviate\nKd\n";

    fn run_compress(input: &str) -> (String, StreamStats) {
        let mut out = Vec::new();
        let stats = compress_stream(Cursor::new(input), &mut out, SymbolAlphabet::DEFAULT).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_compress_stream() {
        let (out, stats) = run_compress(WORDS);
        assert_eq!(out, CODES);
        assert_eq!(stats.lines, 9);
        assert_eq!(stats.bytes_in, WORDS.len() as u64);
        assert_eq!(stats.bytes_out, CODES.len() as u64);
        assert!(stats.ratio() < 1.0);
    }

    #[test]
    fn test_expand_stream() {
        let mut out = Vec::new();
        let stats = expand_stream(Cursor::new(CODES), &mut out, SymbolAlphabet::DEFAULT).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), WORDS);
        assert_eq!(stats.lines, 9);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let (out, stats) = run_compress("abate\r\nabatement");
        assert_eq!(out, "Aabate\nFment\n");
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let input = " leading\ntrailing \n\n";
        let (codes, _) = run_compress(input);

        let mut out = Vec::new();
        expand_stream(Cursor::new(codes), &mut out, SymbolAlphabet::DEFAULT).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn test_empty_input() {
        let (out, stats) = run_compress("");
        assert!(out.is_empty());
        assert_eq!(stats, StreamStats::default());
        assert_eq!(stats.ratio(), 1.0);
    }

    #[test]
    fn test_expand_error_keeps_earlier_output() {
        let mut out = Vec::new();
        let err = expand_stream(Cursor::new("Aabc\nEx\nAy\n"), &mut out, SymbolAlphabet::DEFAULT)
            .unwrap_err();

        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.codec_error(),
            Some(&CodecError::PredictorTooShort {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(String::from_utf8(out).unwrap(), "abc\n");
    }

    #[test]
    fn test_non_utf8_input() {
        let mut out = Vec::new();
        let err = compress_stream(Cursor::new(vec![0xff, b'\n']), &mut out, SymbolAlphabet::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, PfcError::Io(_)));
    }
}
