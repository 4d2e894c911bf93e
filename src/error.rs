use std::collections::TryReserveError;

use thiserror::Error;

use crate::encoding::Encoding;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EncodingError {
    #[error("invalid {encoding} byte sequence at offset {offset}")]
    InvalidSequence { encoding: Encoding, offset: usize },

    #[error("codepoint U+{codepoint:04X} cannot be represented in {encoding}")]
    Unrepresentable { encoding: Encoding, codepoint: u32 },

    #[error("encoded text contains a nul byte at offset {offset}")]
    InteriorNul { offset: usize },
}

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("failed to allocate result buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

impl ResizeError {
    /// Short tag used in Steel error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ResizeError::Encoding(_) => "encoding-error",
            ResizeError::Allocation(_) => "allocation-error",
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LocaleError {
    #[error("unsupported codeset `{codeset}` in locale `{locale}`")]
    UnsupportedCodeset { locale: String, codeset: String },
}
