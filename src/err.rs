use thiserror::Error;

use std::io;

pub type DeserializationResult<T> = std::result::Result<T, DeserializationError>;
pub type SerializationResult<T> = std::result::Result<T, SerializationError>;

/// Errors raised while decoding a dialog template from raw resource bytes.
///
/// Every offset is relative to the start of the template block.
#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("buffer too small for {what} at offset {offset} (need {need} bytes, have {have})")]
    Truncated {
        what: &'static str,
        offset: u64,
        need: usize,
        have: usize,
    },

    #[error("malformed resource identifier for {what} at offset {offset}")]
    MalformedIdentifier { what: &'static str, offset: u64 },

    #[error("malformed UTF-16 string for {what} at offset {offset}")]
    MalformedString { what: &'static str, offset: u64 },

    #[error(
        "failed to read control {index} of {declared} declared controls, caused by:\n\t {source}"
    )]
    ControlCountMismatch {
        index: u16,
        declared: u16,
        #[source]
        source: Box<DeserializationError>,
    },

    #[error(
        "invalid extended dialog template signature, expected `1, 0xFFFF`, found `{version}, 0x{signature:04X}`"
    )]
    InvalidExtendedSignature { version: u16, signature: u16 },

    #[error("offset {offset}: {remaining} unexpected bytes after the end of the template")]
    TrailingData { offset: u64, remaining: usize },
}

/// Errors raised while encoding a dialog template.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("an I/O error has occurred while writing the template")]
    Io(#[from] io::Error),

    #[error("a dialog template holds at most 65535 controls, found {count}")]
    ControlCountOverflow { count: usize },

    #[error("control creation data holds at most 65535 bytes, found {len}")]
    CreationDataOverflow { len: usize },
}

impl DeserializationError {
    /// Re-labels a failure inside a resource identifier as a malformed identifier.
    ///
    /// Fixed-width truncations and string failures both surface as `MalformedIdentifier`,
    /// anchored at the offset where the identifier starts.
    pub(crate) fn into_malformed_identifier(self, what: &'static str, offset: u64) -> Self {
        match self {
            DeserializationError::Truncated { .. } | DeserializationError::MalformedString { .. } => {
                DeserializationError::MalformedIdentifier { what, offset }
            }
            other => other,
        }
    }
}
