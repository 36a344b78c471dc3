//! `tokio_util::codec` adapter for SLIP-framed packets.

use bytes::BytesMut;
use oscprims_codec::{CodecError, Packet};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame, encode_frame, SlipConfig};
use crate::error::SlipError;

/// SLIP codec for use with `FramedRead`, `FramedWrite` and `Framed`.
#[derive(Debug, Clone, Default)]
pub struct SlipCodec {
    config: SlipConfig,
}

impl SlipCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SlipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SlipConfig {
        &self.config
    }
}

impl Decoder for SlipCodec {
    type Item = Packet;
    type Error = SlipError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, SlipError> {
        Ok(decode_frame(src, &self.config)?)
    }
}

impl Encoder<&Packet> for SlipCodec {
    type Error = SlipError;

    fn encode(&mut self, packet: &Packet, dst: &mut BytesMut) -> Result<(), SlipError> {
        if packet.len() > self.config.max_packet_size {
            return Err(SlipError::Codec(CodecError::PacketTooLarge {
                size: packet.len(),
                max: self.config.max_packet_size,
            }));
        }
        encode_frame(packet.as_bytes(), dst);
        Ok(())
    }
}

impl Encoder<Packet> for SlipCodec {
    type Error = SlipError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<(), SlipError> {
        Encoder::<&Packet>::encode(self, &packet, dst)
    }
}
