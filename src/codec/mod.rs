//! Prefix front-coding codec
//!
//! Encodes each entry of a sorted list as one length symbol (how many leading
//! characters it shares with the previous entry) followed by the remaining
//! literal suffix.

pub mod entry;
pub mod prefix;
pub mod sequence;
pub mod symbol;

pub use entry::{decode, encode, EntryCodec};
pub use prefix::shared_prefix_length;
pub use sequence::{compress, compress_all, expand, expand_all, Compress, Compressor, Expand, Expander};
pub use symbol::{SymbolAlphabet, DEFAULT_FIRST_SYMBOL, DEFAULT_MAX_PREFIX};
