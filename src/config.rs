//! Codec configuration
//!
//! Both sides of a compressed file must agree on these values: they fix the
//! mapping between length symbols and prefix lengths.
//!
//! ```toml
//! max_prefix = 25
//! first_symbol = "A"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::{SymbolAlphabet, DEFAULT_FIRST_SYMBOL, DEFAULT_MAX_PREFIX};
use crate::error::{PfcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Longest shared prefix a single symbol expresses
    pub max_prefix: usize,
    /// Symbol for a zero-length prefix
    pub first_symbol: char,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_prefix: DEFAULT_MAX_PREFIX,
            first_symbol: DEFAULT_FIRST_SYMBOL,
        }
    }
}

impl CodecConfig {
    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| PfcError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PfcError::Config(e.to_string()))
    }

    /// Apply command-line overrides on top of this config.
    pub fn with_overrides(mut self, max_prefix: Option<usize>, first_symbol: Option<char>) -> Self {
        if let Some(max_prefix) = max_prefix {
            self.max_prefix = max_prefix;
        }
        if let Some(first_symbol) = first_symbol {
            self.first_symbol = first_symbol;
        }
        self
    }

    /// Validate and build the symbol alphabet.
    pub fn alphabet(&self) -> Result<SymbolAlphabet> {
        Ok(SymbolAlphabet::new(self.first_symbol, self.max_prefix)?)
    }
}
