use oscprims_codec::limits::MAX_PACKET_SIZE;
use oscprims_codec::{CodecError, Packet, Result};
use tracing::{debug, trace};

use crate::codec::{unescape, END, SLIP_DECODER_BUFFER_SIZE};

/// Receives each packet decoded by a [`SlipDecoder`].
pub trait PacketHandler {
    fn handle_packet(&mut self, packet: &Packet);
}

impl<F> PacketHandler for F
where
    F: FnMut(&Packet),
{
    fn handle_packet(&mut self, packet: &Packet) {
        self(packet)
    }
}

/// Byte-at-a-time SLIP decoder for serial-style input.
///
/// Bytes collect in a fixed ring buffer until an `END` delimiter arrives.
/// A frame longer than the buffer wraps around and overwrites its own
/// start; the corrupted frame is then rejected when it ends (or delivered
/// garbled), and decoding recovers at the next delimiter.
pub struct SlipDecoder<'h> {
    buffer: [u8; SLIP_DECODER_BUFFER_SIZE],
    index: usize,
    max_packet_size: usize,
    handler: Option<&'h mut dyn PacketHandler>,
}

impl Default for SlipDecoder<'_> {
    fn default() -> Self {
        Self {
            buffer: [0; SLIP_DECODER_BUFFER_SIZE],
            index: 0,
            max_packet_size: MAX_PACKET_SIZE,
            handler: None,
        }
    }
}

impl<'h> SlipDecoder<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler<H: PacketHandler>(handler: &'h mut H) -> Self {
        let mut decoder = Self::default();
        decoder.handler = Some(handler);
        decoder
    }

    pub fn set_handler<H: PacketHandler>(&mut self, handler: &'h mut H) {
        self.handler = Some(handler);
    }

    /// Limit the unescaped size of decoded packets.
    pub fn with_max_packet_size(mut self, max_packet_size: usize) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    /// Feed one byte. Returns the packet when `byte` completes a frame.
    ///
    /// The frame buffer is reset at every delimiter, whether or not the
    /// frame decoded. Empty frames yield empty packets.
    pub fn decode_byte(&mut self, byte: u8) -> Result<Option<Packet>> {
        if byte == END {
            let len = self.index;
            self.index = 0;
            return match unescape(&self.buffer[..len], self.max_packet_size) {
                Ok(packet) => {
                    trace!(len = packet.len(), "SLIP frame decoded");
                    Ok(Some(packet))
                }
                Err(err) => {
                    debug!(error = %err, len, "SLIP frame rejected");
                    Err(err)
                }
            };
        }

        self.buffer[self.index] = byte;
        self.index += 1;
        if self.index == self.buffer.len() {
            debug!(
                capacity = SLIP_DECODER_BUFFER_SIZE,
                "SLIP decoder buffer wrapped"
            );
            self.index = 0;
        }
        Ok(None)
    }

    /// Feed one byte and pass any completed packet to the handler.
    ///
    /// A completed frame with no handler registered is discarded and
    /// reported as [`CodecError::NoHandler`].
    pub fn process_byte(&mut self, byte: u8) -> Result<()> {
        if let Some(packet) = self.decode_byte(byte)? {
            let handler = self
                .handler
                .as_deref_mut()
                .ok_or(CodecError::NoHandler)?;
            handler.handle_packet(&packet);
        }
        Ok(())
    }

    /// Feed a run of bytes, stopping at the first error.
    pub fn process_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        bytes.iter().try_for_each(|&byte| self.process_byte(byte))
    }

    /// Bytes collected since the last delimiter (modulo wraparound).
    pub fn pending(&self) -> usize {
        self.index
    }

    /// Discard any partially received frame.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
