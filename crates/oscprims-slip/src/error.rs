use oscprims_codec::CodecError;

/// Errors that can occur while framing or unframing SLIP packets.
#[derive(Debug, thiserror::Error)]
pub enum SlipError {
    /// The frame or its contents violate the codec rules.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// An I/O error occurred while reading or writing frames.
    #[error("SLIP I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before another frame delimiter was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, SlipError>;
