pub mod codec;
pub mod config;
pub mod error;
pub mod stream;

pub use codec::{
    compress, compress_all, decode, encode, expand, expand_all, shared_prefix_length, Compress,
    Compressor, EntryCodec, Expand, Expander, SymbolAlphabet, DEFAULT_FIRST_SYMBOL,
    DEFAULT_MAX_PREFIX,
};
pub use config::CodecConfig;
pub use error::{CodecError, PfcError, Result};
pub use stream::{compress_stream, expand_stream, StreamStats};
