//! Length symbols
//!
//! A prefix length `n` in `0..=max_prefix` is written as the character at
//! offset `n` from the first symbol of a contiguous alphabet.

use std::ops::RangeInclusive;

use crate::error::CodecError;

/// Longest shared prefix a single symbol can express by default.
pub const DEFAULT_MAX_PREFIX: usize = 25;

/// Symbol for a zero-length prefix by default.
pub const DEFAULT_FIRST_SYMBOL: char = 'A';

const SURROGATES: RangeInclusive<u32> = 0xD800..=0xDFFF;
const CONTROLS: [RangeInclusive<u32>; 2] = [0x00..=0x1F, 0x7F..=0x9F];

/// Immutable mapping between prefix lengths and symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolAlphabet {
    first: char,
    last: char,
    max_prefix: usize,
}

impl SymbolAlphabet {
    /// 'A' (0) through 'Z' (25).
    pub const DEFAULT: SymbolAlphabet = SymbolAlphabet {
        first: DEFAULT_FIRST_SYMBOL,
        last: 'Z',
        max_prefix: DEFAULT_MAX_PREFIX,
    };

    /// Build the alphabet `first ..= first + max_prefix`.
    ///
    /// Every symbol must be a Unicode scalar value and none may be a control
    /// character, so a symbol can never be mistaken for a line delimiter.
    pub fn new(first: char, max_prefix: usize) -> Result<Self, CodecError> {
        let start = first as u32;
        let end = u32::try_from(max_prefix)
            .ok()
            .and_then(|m| start.checked_add(m))
            .filter(|&end| end <= char::MAX as u32)
            .ok_or_else(|| {
                CodecError::InvalidAlphabet(format!(
                    "{max_prefix} symbols past {first:?} exceed the Unicode range"
                ))
            })?;

        let range = start..=end;
        if overlaps(&range, &SURROGATES) {
            return Err(CodecError::InvalidAlphabet(format!(
                "U+{start:04X}..=U+{end:04X} crosses the surrogate range"
            )));
        }
        if CONTROLS.iter().any(|controls| overlaps(&range, controls)) {
            return Err(CodecError::InvalidAlphabet(format!(
                "U+{start:04X}..=U+{end:04X} contains control characters"
            )));
        }

        let last = char::from_u32(end).ok_or_else(|| {
            CodecError::InvalidAlphabet(format!("U+{end:04X} is not a valid character"))
        })?;

        Ok(Self {
            first,
            last,
            max_prefix,
        })
    }

    pub fn first(&self) -> char {
        self.first
    }

    pub fn last(&self) -> char {
        self.last
    }

    pub fn max_prefix(&self) -> usize {
        self.max_prefix
    }

    /// Symbol for prefix length `n`. Callers must clamp to `max_prefix` first.
    pub fn encode_length(&self, n: usize) -> Result<char, CodecError> {
        let out_of_range = CodecError::OutOfRangeLength {
            length: n,
            max: self.max_prefix,
        };
        if n > self.max_prefix {
            return Err(out_of_range);
        }
        // n <= max_prefix, and first + max_prefix was checked in `new`
        char::from_u32(self.first as u32 + n as u32).ok_or(out_of_range)
    }

    /// Prefix length carried by `symbol`.
    pub fn decode_length(&self, symbol: char) -> Result<usize, CodecError> {
        if !self.contains(symbol) {
            return Err(CodecError::InvalidSymbol {
                symbol,
                first: self.first,
                last: self.last,
            });
        }
        Ok((symbol as u32 - self.first as u32) as usize)
    }

    pub fn contains(&self, symbol: char) -> bool {
        (self.first..=self.last).contains(&symbol)
    }
}

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn overlaps(a: &RangeInclusive<u32>, b: &RangeInclusive<u32>) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}
