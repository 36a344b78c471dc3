//! Open Sound Control (OSC 1.0) message and bundle codec.
//!
//! Every type here stores its data in fixed-capacity buffers sized for a
//! single UDP datagram (see [`limits`]). Building, serializing and parsing:
//! - [`Message`]: address pattern, type-tag string and typed arguments
//! - [`Bundle`]: time tag plus size-prefixed messages or nested bundles
//! - [`Packet`]: the serialized bytes of either, ready for a transport
//!
//! Failed operations leave the value they were called on unchanged.
//! [`Dispatcher`] walks a packet and hands each message to a
//! [`MessageHandler`] together with the time tag of its enclosing bundle.

pub mod argument;
pub mod bundle;
pub mod dispatch;
pub mod error;
pub mod limits;
pub mod message;
pub mod packet;
pub mod time_tag;

pub use argument::{Argument, MidiMessage, RgbaColour, TypeTag};
pub use bundle::{Bundle, BundleElement, BUNDLE_HEADER};
pub use dispatch::{Dispatcher, MessageHandler};
pub use error::{CodecError, ErrorKind, Result};
pub use limits::{MAX_PACKET_SIZE, MAX_TRANSPORT_SIZE};
pub use message::{Arguments, Message};
pub use packet::{Contents, ContentsKind, Packet, PacketContents};
pub use time_tag::TimeTag;
