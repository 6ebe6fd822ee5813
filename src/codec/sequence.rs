//! Sequence transformers
//!
//! Thread the predictor through an ordered list: compression predicts each
//! entry from the previous original entry, expansion from the previous
//! decoded one. Positions in errors are 1-based.

use crate::codec::entry::EntryCodec;
use crate::codec::symbol::SymbolAlphabet;
use crate::error::{CodecError, PfcError, Result};

/// Step-wise compressor holding the current predictor.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    codec: EntryCodec,
    predictor: String,
    position: usize,
}

impl Compressor {
    pub fn new(alphabet: SymbolAlphabet) -> Self {
        Self {
            codec: EntryCodec::new(alphabet),
            predictor: String::new(),
            position: 0,
        }
    }

    /// Encode the next entry and make it the predictor for the one after.
    pub fn push(&mut self, entry: &str) -> Result<String> {
        self.position += 1;
        let code = self
            .codec
            .encode(entry, &self.predictor)
            .map_err(|source| PfcError::Line {
                line: self.position,
                source,
            })?;
        self.predictor.clear();
        self.predictor.push_str(entry);
        Ok(code)
    }

    /// The last entry pushed, or "" before the first one.
    pub fn predictor(&self) -> &str {
        &self.predictor
    }

    /// Number of entries pushed so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Step-wise expander holding the current predictor.
///
/// Every later entry depends on the earlier ones decoding correctly, so after
/// the first failure the expander refuses further input.
#[derive(Debug, Clone, Default)]
pub struct Expander {
    codec: EntryCodec,
    predictor: String,
    position: usize,
    failed: Option<CodecError>,
}

impl Expander {
    pub fn new(alphabet: SymbolAlphabet) -> Self {
        Self {
            codec: EntryCodec::new(alphabet),
            predictor: String::new(),
            position: 0,
            failed: None,
        }
    }

    /// Decode the next code and make the result the predictor for the one after.
    pub fn push(&mut self, code: &str) -> Result<String> {
        if let Some(source) = &self.failed {
            return Err(PfcError::Line {
                line: self.position,
                source: source.clone(),
            });
        }

        self.position += 1;
        match self.codec.decode(code, &self.predictor) {
            Ok(entry) => {
                self.predictor.clone_from(&entry);
                Ok(entry)
            }
            Err(source) => {
                self.failed = Some(source.clone());
                Err(PfcError::Line {
                    line: self.position,
                    source,
                })
            }
        }
    }

    /// The last entry decoded, or "" before the first one.
    pub fn predictor(&self) -> &str {
        &self.predictor
    }

    /// Number of codes pushed so far, including a failed one.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }
}

/// Lazy compression of an entry sequence. See [`compress`].
pub struct Compress<I> {
    entries: I,
    compressor: Compressor,
    done: bool,
}

impl<I> Iterator for Compress<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let entry = self.entries.next()?;
        let code = self.compressor.push(entry.as_ref());
        self.done = code.is_err();
        Some(code)
    }
}

/// Lazy expansion of a code sequence. See [`expand`].
pub struct Expand<I> {
    codes: I,
    expander: Expander,
}

impl<I> Iterator for Expand<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.expander.is_failed() {
            return None;
        }
        let code = self.codes.next()?;
        Some(self.expander.push(code.as_ref()))
    }
}

/// Encode `entries` in order, one code per entry. Stops after the first error.
pub fn compress<I>(entries: I, alphabet: SymbolAlphabet) -> Compress<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Compress {
        entries: entries.into_iter(),
        compressor: Compressor::new(alphabet),
        done: false,
    }
}

/// Decode `codes` in order, one entry per code. Stops after the first error.
pub fn expand<I>(codes: I, alphabet: SymbolAlphabet) -> Expand<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Expand {
        codes: codes.into_iter(),
        expander: Expander::new(alphabet),
    }
}

pub fn compress_all<I>(entries: I, alphabet: SymbolAlphabet) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    compress(entries, alphabet).collect()
}

pub fn expand_all<I>(codes: I, alphabet: SymbolAlphabet) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    expand(codes, alphabet).collect()
}
