//! SLIP (RFC 1055) framing for OSC packets.
//!
//! Each packet travels as its bytes with `END` (0xC0) and `ESC` (0xDB)
//! escaped, followed by one `END` delimiter. Three ways in and out:
//! - [`encode`] / [`unescape`] for caller-provided buffers
//! - [`SlipDecoder`] for byte-at-a-time input such as a UART
//! - [`SlipReader`] / [`SlipWriter`] over `std::io` streams
//!
//! With the `async` feature, [`SlipCodec`] plugs into `tokio_util::codec`.

pub mod codec;
pub mod decoder;
pub mod error;
#[cfg(feature = "async")]
pub mod framed;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, encode, encode_frame, encode_packet, encoded_len, unescape, SlipConfig, END,
    ESC, ESC_END, ESC_ESC, SLIP_DECODER_BUFFER_SIZE,
};
pub use decoder::{PacketHandler, SlipDecoder};
pub use error::{Result, SlipError};
#[cfg(feature = "async")]
pub use framed::SlipCodec;
pub use reader::SlipReader;
pub use writer::SlipWriter;
