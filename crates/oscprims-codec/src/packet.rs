//! Packets: one message or one bundle in a bounded byte buffer.

use heapless::Vec;

use crate::bundle::Bundle;
use crate::dispatch::{Dispatcher, MessageHandler};
use crate::error::{CodecError, Result};
use crate::limits::MAX_PACKET_SIZE;
use crate::message::Message;

/// Anything that can be serialized as the contents of a packet or bundle
/// element.
pub trait Contents {
    /// Serialized size in bytes.
    fn size(&self) -> usize;

    /// Write the serialized form into `dst`, returning the bytes written.
    fn serialize_into(&self, dst: &mut [u8]) -> Result<usize>;
}

/// The two kinds of OSC contents, told apart by their first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentsKind {
    Message,
    Bundle,
}

impl ContentsKind {
    /// Classify serialized contents without parsing them.
    pub fn classify(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            None => Err(CodecError::EmptyContents),
            Some(b'/') => Ok(ContentsKind::Message),
            Some(b'#') => Ok(ContentsKind::Bundle),
            Some(&other) => Err(CodecError::InvalidContents(other)),
        }
    }
}

/// Parsed packet contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketContents {
    Message(Message),
    Bundle(Bundle),
}

impl PacketContents {
    /// Classify and parse serialized contents in one step.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        match ContentsKind::classify(bytes)? {
            ContentsKind::Message => Message::deserialize(bytes).map(PacketContents::Message),
            ContentsKind::Bundle => Bundle::deserialize(bytes).map(PacketContents::Bundle),
        }
    }

    pub fn kind(&self) -> ContentsKind {
        match self {
            PacketContents::Message(_) => ContentsKind::Message,
            PacketContents::Bundle(_) => ContentsKind::Bundle,
        }
    }
}

impl Contents for PacketContents {
    fn size(&self) -> usize {
        match self {
            PacketContents::Message(message) => message.size(),
            PacketContents::Bundle(bundle) => bundle.size(),
        }
    }

    fn serialize_into(&self, dst: &mut [u8]) -> Result<usize> {
        match self {
            PacketContents::Message(message) => message.serialize_into(dst),
            PacketContents::Bundle(bundle) => bundle.serialize_into(dst),
        }
    }
}

impl From<Message> for PacketContents {
    fn from(message: Message) -> Self {
        PacketContents::Message(message)
    }
}

impl From<Bundle> for PacketContents {
    fn from(bundle: Bundle) -> Self {
        PacketContents::Bundle(bundle)
    }
}

/// Serialized OSC contents, as sent or received over a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packet {
    bytes: Vec<u8, MAX_PACKET_SIZE>,
}

impl Packet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy raw bytes into a packet.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut packet = Self::new();
        packet
            .bytes
            .extend_from_slice(bytes)
            .map_err(|()| too_large(bytes.len()))?;
        Ok(packet)
    }

    /// Serialize a message or bundle into a new packet.
    pub fn from_contents<C: Contents + ?Sized>(contents: &C) -> Result<Self> {
        let size = contents.size();
        if size > MAX_PACKET_SIZE {
            return Err(too_large(size));
        }
        let mut packet = Self::new();
        packet.bytes.resize(size, 0).map_err(|()| too_large(size))?;
        let written = contents.serialize_into(&mut packet.bytes)?;
        packet.bytes.truncate(written);
        Ok(packet)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Append one byte, failing once the packet is full.
    pub fn try_push(&mut self, byte: u8) -> Result<()> {
        self.bytes
            .push(byte)
            .map_err(|_| too_large(MAX_PACKET_SIZE + 1))
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// What the packet holds, judged by its first byte.
    pub fn kind(&self) -> Result<ContentsKind> {
        ContentsKind::classify(&self.bytes)
    }

    /// Parse the packet into a message or bundle.
    pub fn parse(&self) -> Result<PacketContents> {
        PacketContents::parse(&self.bytes)
    }

    /// Deliver every message in the packet to `handler`, using the default
    /// nesting limit.
    pub fn process_messages<H: MessageHandler>(&self, handler: &mut H) -> Result<()> {
        Dispatcher::with_handler(handler).dispatch(&self.bytes)
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<&[u8]> for Packet {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Packet::from_bytes(bytes)
    }
}

fn too_large(size: usize) -> CodecError {
    CodecError::PacketTooLarge {
        size,
        max: MAX_PACKET_SIZE,
    }
}
