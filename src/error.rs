//! Error types for TTA decoding and tag indexing

use thiserror::Error;

/// Result type alias for container operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a stream header could not be decoded.
///
/// Each variant ends the decode attempt; no partial header is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// No header bytes were supplied
    #[error("no header data")]
    MissingData,

    /// The block does not start with the `TTA` identifier
    #[error("stream header does not start with the TTA identifier")]
    FormatMismatch,

    /// Fewer bytes than the selected header layout needs
    #[error("stream header truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: usize, actual: usize },
}

/// Malformed tag structure found while indexing a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("ID3v2 tag at offset {offset} runs past the end of the stream")]
    Id3v2PastEnd { offset: u64 },

    #[error("unsupported ID3v2 major version {0}")]
    Id3v2Version(u8),

    #[error("APE tag size {size} is invalid for a stream of {stream_len} bytes")]
    ApeSize { size: u32, stream_len: u64 },

    #[error("APE item {index} runs past the end of the tag")]
    ApeItemPastEnd { index: u32 },
}

/// Main error type for opening and reading a TTA file
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream header error
    #[error("Header error: {0}")]
    Header(#[from] HeaderError),

    /// Tag error
    #[error("Tag error: {0}")]
    Tag(#[from] TagError),
}
