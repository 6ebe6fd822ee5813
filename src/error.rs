use thiserror::Error;

/// Failures of a single codec call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Prefix length {length} is out of range (max {max})")]
    OutOfRangeLength { length: usize, max: usize },

    #[error("Invalid length symbol {symbol:?} (expected {first:?}..={last:?})")]
    InvalidSymbol { symbol: char, first: char, last: char },

    #[error("Malformed code: missing length symbol")]
    MalformedCode,

    #[error("Predictor too short: need {needed} characters, predictor has {available}")]
    PredictorTooShort { needed: usize, available: usize },

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),
}

#[derive(Error, Debug)]
pub enum PfcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: CodecError,
    },

    #[error("{failed} of {total} files failed")]
    Batch { failed: usize, total: usize },
}

impl PfcError {
    /// The codec failure behind this error, if any.
    pub fn codec_error(&self) -> Option<&CodecError> {
        match self {
            PfcError::Codec(e) | PfcError::Line { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// 1-based line number of the offending item, for sequence failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            PfcError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PfcError>;
