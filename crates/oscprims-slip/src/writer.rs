use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use oscprims_codec::{CodecError, Contents, Packet};

use crate::codec::{encode_frame, SlipConfig};
use crate::error::{Result, SlipError};

const INITIAL_BUFFER_CAPACITY: usize = 2 * 1024;

/// Writes SLIP-framed packets to any `Write` stream.
pub struct SlipWriter<T> {
    inner: T,
    buf: BytesMut,
    config: SlipConfig,
}

impl<T: Write> SlipWriter<T> {
    /// Create a new writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, SlipConfig::default())
    }

    /// Create a new writer with explicit configuration.
    pub fn with_config(inner: T, config: SlipConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Write one packet as a complete frame (blocking).
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        self.write_bytes(packet.as_bytes())
    }

    /// Serialize a message or bundle and write it as one frame.
    pub fn send<C: Contents + ?Sized>(&mut self, contents: &C) -> Result<()> {
        let packet = Packet::from_contents(contents)?;
        self.write_packet(&packet)
    }

    /// Frame and write raw packet bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.config.max_packet_size {
            return Err(SlipError::Codec(CodecError::PacketTooLarge {
                size: bytes.len(),
                max: self.config.max_packet_size,
            }));
        }

        self.buf.clear();
        encode_frame(bytes, &mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(SlipError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(SlipError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(SlipError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update the packet size limit for subsequent writes.
    pub fn set_max_packet_size(&mut self, max_packet_size: usize) {
        self.config.max_packet_size = max_packet_size;
    }

    /// Current writer configuration.
    pub fn config(&self) -> &SlipConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use oscprims_codec::{Bundle, Message, PacketContents, TimeTag};

    use super::*;
    use crate::codec::{END, ESC, ESC_END};
    use crate::reader::SlipReader;

    #[test]
    fn write_escapes_and_terminates() {
        let mut writer = SlipWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.write_bytes(&[1, END, 2]).unwrap();
        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, [1, ESC, ESC_END, 2, END]);
    }

    #[test]
    fn send_message_and_bundle_round_trip() {
        let mut writer = SlipWriter::new(Cursor::new(Vec::<u8>::new()));
        let message = Message::new("/example").unwrap();
        let mut bundle = Bundle::new(TimeTag::new(1, 0));
        bundle.add_contents(&message).unwrap();

        writer.send(&message).unwrap();
        writer.send(&bundle).unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = SlipReader::new(Cursor::new(wire));
        assert_eq!(
            reader.read_packet().unwrap().parse().unwrap(),
            PacketContents::Message(message)
        );
        assert_eq!(
            reader.read_packet().unwrap().parse().unwrap(),
            PacketContents::Bundle(bundle)
        );
    }

    #[test]
    fn send_propagates_serialization_errors() {
        let mut writer = SlipWriter::new(Cursor::new(Vec::<u8>::new()));
        let err = writer.send(&Message::new("").unwrap()).unwrap_err();
        assert!(matches!(err, SlipError::Codec(CodecError::AddressNotSet)));
        assert!(writer.get_ref().get_ref().is_empty());
    }

    #[test]
    fn oversized_packet_rejected() {
        let cfg = SlipConfig {
            max_packet_size: 4,
            ..SlipConfig::default()
        };
        let mut writer = SlipWriter::with_config(Cursor::new(Vec::<u8>::new()), cfg);
        let err = writer.write_bytes(b"oversized").unwrap_err();
        assert!(matches!(
            err,
            SlipError::Codec(CodecError::PacketTooLarge { size: 9, max: 4 })
        ));
    }

    #[test]
    fn handles_interrupted_and_would_block() {
        let sink = FlakyWriter {
            failures: vec![ErrorKind::Interrupted, ErrorKind::WouldBlock],
            flush_failures: vec![ErrorKind::Interrupted],
            data: Vec::new(),
        };
        let mut writer = SlipWriter::new(sink);
        writer.write_bytes(b"retry").unwrap();
        assert_eq!(writer.into_inner().data, b"retry\xC0");
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let mut writer = SlipWriter::new(ZeroWriter);
        let err = writer.write_bytes(b"x").unwrap_err();
        assert!(matches!(err, SlipError::ConnectionClosed));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut writer = SlipWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.set_max_packet_size(16);
        assert_eq!(writer.config().max_packet_size, 16);
        let _ = writer.get_mut();
        let _inner = writer.into_inner();
    }

    struct FlakyWriter {
        failures: Vec<ErrorKind>,
        flush_failures: Vec<ErrorKind>,
        data: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Some(kind) = self.failures.pop() {
                return Err(std::io::Error::from(kind));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            match self.flush_failures.pop() {
                Some(kind) => Err(std::io::Error::from(kind)),
                None => Ok(()),
            }
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
