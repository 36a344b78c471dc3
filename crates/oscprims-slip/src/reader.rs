use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use oscprims_codec::{MessageHandler, Packet};
use tracing::trace;

use crate::codec::{decode_frame, SlipConfig};
use crate::error::{Result, SlipError};

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;
const READ_CHUNK_SIZE: usize = 4 * 1024;

/// Reads complete SLIP-framed packets from any `Read` stream.
///
/// Handles partial reads internally; callers always get whole packets.
pub struct SlipReader<T> {
    inner: T,
    buf: BytesMut,
    config: SlipConfig,
}

impl<T: Read> SlipReader<T> {
    /// Create a new reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, SlipConfig::default())
    }

    /// Create a new reader with explicit configuration.
    pub fn with_config(inner: T, config: SlipConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete packet (blocking).
    ///
    /// Returns `Err(SlipError::ConnectionClosed)` when EOF is reached. A
    /// rejected frame is consumed, so the next call resumes after it.
    pub fn read_packet(&mut self) -> Result<Packet> {
        loop {
            if let Some(packet) = decode_frame(&mut self.buf, &self.config)? {
                trace!(len = packet.len(), "SLIP packet read");
                return Ok(packet);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(SlipError::Io(err)),
            };

            if read == 0 {
                return Err(SlipError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read packets until EOF, dispatching every message they contain.
    ///
    /// Stops at the first error other than a clean end of stream. Returns the
    /// number of packets processed.
    pub fn dispatch_all<H: MessageHandler>(&mut self, handler: &mut H) -> Result<usize> {
        let mut count = 0;
        loop {
            let packet = match self.read_packet() {
                Ok(packet) => packet,
                Err(SlipError::ConnectionClosed) => return Ok(count),
                Err(err) => return Err(err),
            };
            packet.process_messages(handler)?;
            count += 1;
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update the packet size limit for subsequent frames.
    pub fn set_max_packet_size(&mut self, max_packet_size: usize) {
        self.config.max_packet_size = max_packet_size;
    }

    /// Current reader configuration.
    pub fn config(&self) -> &SlipConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BufMut;
    use oscprims_codec::{Bundle, CodecError, Message, TimeTag};

    use super::*;
    use crate::codec::{encode_frame, END, ESC};

    fn wire(frames: &[&[u8]]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for frame in frames {
            encode_frame(frame, &mut buf);
        }
        buf.to_vec()
    }

    #[test]
    fn read_single_packet() {
        let bytes = wire(&[b"/hello\0\0,\0\0\0".as_slice()]);
        let mut reader = SlipReader::new(Cursor::new(bytes));
        let packet = reader.read_packet().unwrap();
        assert_eq!(packet.as_bytes(), b"/hello\0\0,\0\0\0");
    }

    #[test]
    fn read_multiple_packets_skipping_empty_frames() {
        let mut bytes = vec![END, END];
        bytes.extend(wire(&[
            b"one".as_slice(),
            [END, ESC].as_slice(),
            b"three".as_slice(),
        ]));
        let mut reader = SlipReader::new(Cursor::new(bytes));

        assert_eq!(reader.read_packet().unwrap().as_bytes(), b"one");
        assert_eq!(reader.read_packet().unwrap().as_bytes(), [END, ESC]);
        assert_eq!(reader.read_packet().unwrap().as_bytes(), b"three");
        assert!(matches!(
            reader.read_packet(),
            Err(SlipError::ConnectionClosed)
        ));
    }

    #[test]
    fn partial_read_handling() {
        let byte_reader = ByteByByteReader {
            bytes: wire(&[b"slow".as_slice()]),
            pos: 0,
        };
        let mut reader = SlipReader::new(byte_reader);
        assert_eq!(reader.read_packet().unwrap().as_bytes(), b"slow");
    }

    #[test]
    fn connection_closed_mid_frame() {
        let mut reader = SlipReader::new(Cursor::new(b"/partial".to_vec()));
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, SlipError::ConnectionClosed));
    }

    #[test]
    fn malformed_frame_then_recovery() {
        let mut bytes = BytesMut::new();
        bytes.put_slice(&[b'x', ESC, b'y', END]);
        encode_frame(b"ok", &mut bytes);
        let mut reader = SlipReader::new(Cursor::new(bytes.to_vec()));

        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, SlipError::Codec(CodecError::Malformed(_))));
        assert_eq!(reader.read_packet().unwrap().as_bytes(), b"ok");
    }

    #[test]
    fn oversized_frame_in_stream() {
        let cfg = SlipConfig {
            max_packet_size: 4,
            ..SlipConfig::default()
        };
        let bytes = wire(&[b"too long".as_slice()]);
        let mut reader = SlipReader::with_config(Cursor::new(bytes), cfg);
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(
            err,
            SlipError::Codec(CodecError::PacketTooLarge { max: 4, .. })
        ));
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            interrupted: false,
            bytes: wire(&[b"ok".as_slice()]),
            pos: 0,
        };
        let mut framed = SlipReader::new(reader);
        assert_eq!(framed.read_packet().unwrap().as_bytes(), b"ok");
    }

    #[test]
    fn dispatch_all_walks_every_packet() {
        let mut bundle = Bundle::new(TimeTag::new(7, 0));
        bundle.add_contents(&Message::new("/b").unwrap()).unwrap();
        let message = Packet::from_contents(&Message::new("/a").unwrap()).unwrap();
        let bundle = Packet::from_contents(&bundle).unwrap();
        let mut reader = SlipReader::new(Cursor::new(wire(&[
            message.as_bytes(),
            bundle.as_bytes(),
        ])));

        let mut seen = Vec::new();
        let mut handler = |time_tag: Option<TimeTag>, message: &mut Message| {
            seen.push((time_tag, message.address_pattern().to_owned()));
        };
        assert_eq!(reader.dispatch_all(&mut handler).unwrap(), 2);
        assert_eq!(
            seen,
            [
                (None, "/a".to_owned()),
                (Some(TimeTag::new(7, 0)), "/b".to_owned())
            ]
        );
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = SlipReader::new(Cursor::new(Vec::<u8>::new()));
        reader.set_max_packet_size(64);
        assert_eq!(reader.config().max_packet_size, 64);
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
