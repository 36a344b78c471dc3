use crate::argument::TypeTag;

/// Errors that can occur while building, encoding or decoding OSC contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The address pattern does not start with '/'.
    #[error("address pattern must start with '/'")]
    InvalidAddress,

    /// The message was serialized before an address pattern was set.
    #[error("address pattern not set")]
    AddressNotSet,

    /// The address pattern exceeds the configured maximum length.
    #[error("address pattern too long ({len} bytes, max {max})")]
    TooLong { len: usize, max: usize },

    /// The message already holds the maximum number of arguments.
    #[error("too many arguments (max {max})")]
    TooManyArguments { max: usize },

    /// The argument bytes would exceed the message's argument buffer.
    #[error("argument buffer full ({needed} bytes needed, {available} available)")]
    BufferFull { needed: usize, available: usize },

    /// The element would exceed the bundle's element buffer.
    #[error("bundle full ({needed} bytes needed, {available} available)")]
    BundleFull { needed: usize, available: usize },

    /// The caller-provided destination cannot hold the encoded bytes.
    #[error("destination too small ({needed} bytes needed, {available} available)")]
    DestinationTooSmall { needed: usize, available: usize },

    /// The contents exceed the maximum packet size.
    #[error("packet too large ({size} bytes, max {max})")]
    PacketTooLarge { size: usize, max: usize },

    /// Bundles are nested deeper than the dispatcher allows.
    #[error("bundle nesting exceeds maximum depth of {max}")]
    DepthExceeded { max: usize },

    /// The getter does not match the type tag at the current argument.
    #[error("type mismatch (expected '{expected}', found {found:#04x})")]
    TypeMismatch { expected: TypeTag, found: u8 },

    /// Every argument of the message has already been consumed.
    #[error("no more arguments available")]
    ArgumentsExhausted,

    /// The type-tag string contains a character that is not an OSC type tag.
    #[error("unknown type tag {0:#04x}")]
    UnknownTypeTag(u8),

    /// Fewer bytes remain than the argument type requires.
    #[error("argument truncated ({needed} bytes needed, {remaining} remaining)")]
    Truncated { needed: usize, remaining: usize },

    /// A structural violation of the OSC wire format.
    #[error("malformed contents: {0}")]
    Malformed(&'static str),

    /// The contents to dispatch are empty.
    #[error("contents empty")]
    EmptyContents,

    /// The first byte is neither '/' (message) nor '#' (bundle).
    #[error("invalid contents (first byte {0:#04x})")]
    InvalidContents(u8),

    /// No handler was registered to receive decoded output.
    #[error("no handler registered")]
    NoHandler,
}

/// Coarse error categories shared by every codec operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Buffer, argument-count, size or depth limits.
    CapacityExceeded,
    /// Structural violation: bad magic byte, misaligned size, truncated data,
    /// bad escape sequence.
    Malformed,
    /// Wrong accessor called for the current argument.
    TypeMismatch,
    /// Missing or malformed address pattern.
    InvalidAddress,
    /// Callback not registered.
    NoHandler,
}

impl CodecError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidAddress | CodecError::AddressNotSet => ErrorKind::InvalidAddress,
            CodecError::TooLong { .. }
            | CodecError::TooManyArguments { .. }
            | CodecError::BufferFull { .. }
            | CodecError::BundleFull { .. }
            | CodecError::DestinationTooSmall { .. }
            | CodecError::PacketTooLarge { .. }
            | CodecError::DepthExceeded { .. } => ErrorKind::CapacityExceeded,
            CodecError::TypeMismatch { .. } | CodecError::ArgumentsExhausted => {
                ErrorKind::TypeMismatch
            }
            CodecError::UnknownTypeTag(_)
            | CodecError::Truncated { .. }
            | CodecError::Malformed(_)
            | CodecError::EmptyContents
            | CodecError::InvalidContents(_) => ErrorKind::Malformed,
            CodecError::NoHandler => ErrorKind::NoHandler,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
