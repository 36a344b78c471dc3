use bytes::{BufMut, BytesMut};
use oscprims_codec::limits::{MAX_PACKET_SIZE, MAX_TRANSPORT_SIZE};
use oscprims_codec::{CodecError, Packet, Result};

/// Frame delimiter.
pub const END: u8 = 0xC0;
/// Escape introducer.
pub const ESC: u8 = 0xDB;
/// Escaped `END`.
pub const ESC_END: u8 = 0xDC;
/// Escaped `ESC`.
pub const ESC_ESC: u8 = 0xDD;

/// Size of the byte-at-a-time decoder's ring buffer.
pub const SLIP_DECODER_BUFFER_SIZE: usize = MAX_TRANSPORT_SIZE;

/// Configuration shared by the SLIP readers, writers and decoders.
#[derive(Debug, Clone)]
pub struct SlipConfig {
    /// Largest unescaped packet accepted or sent. Default: [`MAX_PACKET_SIZE`].
    pub max_packet_size: usize,
    /// Drop frames with no bytes between delimiters instead of returning
    /// empty packets. Only the stream readers honour this.
    pub skip_empty_frames: bool,
}

impl Default for SlipConfig {
    fn default() -> Self {
        Self {
            max_packet_size: MAX_PACKET_SIZE,
            skip_empty_frames: true,
        }
    }
}

/// Number of bytes [`encode`] writes for `bytes`, trailing `END` included.
pub fn encoded_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .map(|&b| if b == END || b == ESC { 2 } else { 1 })
        .sum::<usize>()
        + 1
}

/// SLIP-encode `bytes` into `dst`, returning the number of bytes written.
///
/// Nothing is written when `dst` is too small.
pub fn encode(bytes: &[u8], dst: &mut [u8]) -> Result<usize> {
    let needed = encoded_len(bytes);
    if dst.len() < needed {
        return Err(CodecError::DestinationTooSmall {
            needed,
            available: dst.len(),
        });
    }
    let mut buf = &mut dst[..needed];
    put_escaped(&mut buf, bytes);
    Ok(needed)
}

/// SLIP-encode a packet into `dst`.
pub fn encode_packet(packet: &Packet, dst: &mut [u8]) -> Result<usize> {
    encode(packet.as_bytes(), dst)
}

/// Append the SLIP encoding of `bytes` to a growable buffer.
pub fn encode_frame(bytes: &[u8], dst: &mut BytesMut) {
    dst.reserve(encoded_len(bytes));
    put_escaped(dst, bytes);
}

fn put_escaped<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    for &byte in bytes {
        match byte {
            END => buf.put_slice(&[ESC, ESC_END]),
            ESC => buf.put_slice(&[ESC, ESC_ESC]),
            other => buf.put_u8(other),
        }
    }
    buf.put_u8(END);
}

/// Undo SLIP escaping for the bytes of one frame, delimiter excluded.
///
/// `max_packet_size` is capped at [`MAX_PACKET_SIZE`].
pub fn unescape(frame: &[u8], max_packet_size: usize) -> Result<Packet> {
    let limit = max_packet_size.min(MAX_PACKET_SIZE);
    let mut packet = Packet::new();
    let mut bytes = frame.iter();
    while let Some(&byte) = bytes.next() {
        let byte = if byte == ESC {
            match bytes.next() {
                Some(&ESC_END) => END,
                Some(&ESC_ESC) => ESC,
                Some(_) => return Err(CodecError::Malformed("invalid SLIP escape sequence")),
                None => return Err(CodecError::Malformed("SLIP frame ends with escape byte")),
            }
        } else {
            byte
        };
        if packet.len() >= limit {
            return Err(CodecError::PacketTooLarge {
                size: unescaped_len(frame),
                max: limit,
            });
        }
        packet.try_push(byte)?;
    }
    Ok(packet)
}

fn unescaped_len(frame: &[u8]) -> usize {
    frame.len() - frame.iter().filter(|&&b| b == ESC).count()
}

/// Decode the next complete frame from a stream buffer.
///
/// Returns `Ok(None)` if the buffer doesn't hold a frame delimiter yet. On
/// success, consumes the frame bytes from the buffer; a rejected frame is
/// consumed too, so decoding can resume with the next one.
pub fn decode_frame(src: &mut BytesMut, config: &SlipConfig) -> Result<Option<Packet>> {
    loop {
        let Some(end) = src.iter().position(|&b| b == END) else {
            // Worst case every byte of a maximum-size packet is escaped.
            let limit = 2 * config.max_packet_size.min(MAX_PACKET_SIZE);
            if src.len() > limit {
                let size = src.len();
                src.clear();
                return Err(CodecError::PacketTooLarge {
                    size,
                    max: config.max_packet_size,
                });
            }
            return Ok(None);
        };

        let frame = src.split_to(end + 1);
        if end == 0 && config.skip_empty_frames {
            continue;
        }
        return unescape(&frame[..end], config.max_packet_size).map(Some);
    }
}
