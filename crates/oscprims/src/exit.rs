use std::fmt;
use std::io;

use oscprims_codec::{CodecError, ErrorKind};
use oscprims_slip::SlipError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound | io::ErrorKind::UnexpectedEof => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Errors from building contents are the caller's fault; errors from
/// parsing them mean the input data is bad.
pub fn build_error(context: &str, err: CodecError) -> CliError {
    let code = match err.kind() {
        ErrorKind::InvalidAddress | ErrorKind::CapacityExceeded | ErrorKind::Malformed => USAGE,
        ErrorKind::TypeMismatch | ErrorKind::NoHandler => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn decode_error(context: &str, err: CodecError) -> CliError {
    let code = match err.kind() {
        ErrorKind::NoHandler => INTERNAL,
        _ => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn slip_error(context: &str, err: SlipError) -> CliError {
    match err {
        SlipError::Io(source) => io_error(context, source),
        SlipError::Codec(err) => decode_error(context, err),
        SlipError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}
