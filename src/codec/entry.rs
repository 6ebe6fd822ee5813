//! Single-entry codec
//!
//! One entry becomes a length symbol plus the suffix it does not share with
//! its predictor.

use crate::codec::prefix::{char_offset, shared_prefix_length};
use crate::codec::symbol::SymbolAlphabet;
use crate::error::CodecError;

/// Encodes one entry relative to its predictor, and back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryCodec {
    alphabet: SymbolAlphabet,
}

impl EntryCodec {
    pub fn new(alphabet: SymbolAlphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &SymbolAlphabet {
        &self.alphabet
    }

    /// Length symbol followed by the part of `entry` not reused from `predictor`.
    ///
    /// Shared prefixes longer than the alphabet can express are clamped; the
    /// extra characters are written out literally.
    pub fn encode(&self, entry: &str, predictor: &str) -> Result<String, CodecError> {
        let n = shared_prefix_length(entry, predictor).min(self.alphabet.max_prefix());
        let symbol = self.alphabet.encode_length(n)?;
        // n never exceeds the character count of entry
        let suffix_start = char_offset(entry, n).unwrap_or(entry.len());

        let suffix = &entry[suffix_start..];
        let mut code = String::with_capacity(symbol.len_utf8() + suffix.len());
        code.push(symbol);
        code.push_str(suffix);
        Ok(code)
    }

    /// Rebuild the entry that `encode` turned into `code` against the same predictor.
    pub fn decode(&self, code: &str, predictor: &str) -> Result<String, CodecError> {
        let mut chars = code.chars();
        let symbol = chars.next().ok_or(CodecError::MalformedCode)?;
        let tail = chars.as_str();

        let n = self.alphabet.decode_length(symbol)?;
        let prefix_end = char_offset(predictor, n).ok_or_else(|| CodecError::PredictorTooShort {
            needed: n,
            available: predictor.chars().count(),
        })?;

        let mut entry = String::with_capacity(prefix_end + tail.len());
        entry.push_str(&predictor[..prefix_end]);
        entry.push_str(tail);
        Ok(entry)
    }
}

/// [`EntryCodec::encode`] with the default alphabet.
pub fn encode(entry: &str, predictor: &str) -> Result<String, CodecError> {
    EntryCodec::default().encode(entry, predictor)
}

/// [`EntryCodec::decode`] with the default alphabet.
pub fn decode(code: &str, predictor: &str) -> Result<String, CodecError> {
    EntryCodec::default().decode(code, predictor)
}
