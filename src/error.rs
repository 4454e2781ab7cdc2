//! Error types for the Huffman engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Why a bitstring could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitstreamFault {
    /// A character other than '0' or '1'.
    #[error("invalid digit {0:?}")]
    InvalidDigit(char),

    /// The bits ended part way down a code path.
    #[error("bitstream ends in the middle of a code")]
    Truncated,

    /// The bits follow a branch that holds no symbol.
    #[error("bit sequence does not match any code")]
    NoSuchPath,
}

/// Engine error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// A phrase with no symbols has no Huffman tree.
    #[error("empty input: a phrase needs at least one symbol")]
    EmptyInput,

    /// A symbol has no entry in the codebook.
    #[error("unknown symbol {symbol:?} at position {position}")]
    UnknownSymbol { symbol: char, position: usize },

    /// The bitstring is not a sequence of complete codes for this tree.
    #[error("malformed bitstream at bit {position}: {reason}")]
    MalformedBitstream {
        position: usize,
        reason: BitstreamFault,
    },
}

impl HuffmanError {
    pub fn unknown_symbol(symbol: char, position: usize) -> Self {
        HuffmanError::UnknownSymbol { symbol, position }
    }

    pub fn malformed(position: usize, reason: BitstreamFault) -> Self {
        HuffmanError::MalformedBitstream { position, reason }
    }

    /// Stable tag for callers that map failures to their own messages.
    pub fn kind(&self) -> &'static str {
        match self {
            HuffmanError::EmptyInput => "empty_input",
            HuffmanError::UnknownSymbol { .. } => "unknown_symbol",
            HuffmanError::MalformedBitstream { .. } => "malformed_bitstream",
        }
    }

    /// Bit or character offset the failure points at, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            HuffmanError::EmptyInput => None,
            HuffmanError::UnknownSymbol { position, .. }
            | HuffmanError::MalformedBitstream { position, .. } => Some(*position),
        }
    }
}
