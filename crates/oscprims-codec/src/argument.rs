//! Typed OSC argument values and their big-endian wire encoding.

use std::fmt;

use bytes::{Buf, BufMut};

use crate::error::{CodecError, Result};
use crate::limits::{align4, osc_string_size};
use crate::time_tag::TimeTag;

/// OSC type-tag characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Int32 = b'i',
    Float32 = b'f',
    String = b's',
    AlternateString = b'S',
    Blob = b'b',
    Int64 = b'h',
    TimeTag = b't',
    Double = b'd',
    Character = b'c',
    RgbaColour = b'r',
    MidiMessage = b'm',
    True = b'T',
    False = b'F',
    Nil = b'N',
    Infinitum = b'I',
    ArrayBegin = b'[',
    ArrayEnd = b']',
}

impl TypeTag {
    /// Look up the tag for a type-tag character.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        let tag = match byte {
            b'i' => TypeTag::Int32,
            b'f' => TypeTag::Float32,
            b's' => TypeTag::String,
            b'S' => TypeTag::AlternateString,
            b'b' => TypeTag::Blob,
            b'h' => TypeTag::Int64,
            b't' => TypeTag::TimeTag,
            b'd' => TypeTag::Double,
            b'c' => TypeTag::Character,
            b'r' => TypeTag::RgbaColour,
            b'm' => TypeTag::MidiMessage,
            b'T' => TypeTag::True,
            b'F' => TypeTag::False,
            b'N' => TypeTag::Nil,
            b'I' => TypeTag::Infinitum,
            b'[' => TypeTag::ArrayBegin,
            b']' => TypeTag::ArrayEnd,
            _ => return None,
        };
        Some(tag)
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn as_char(self) -> char {
        self as u8 as char
    }

    /// Payload size for fixed-width types, `None` for strings and blobs.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            TypeTag::Int32
            | TypeTag::Float32
            | TypeTag::Character
            | TypeTag::RgbaColour
            | TypeTag::MidiMessage => Some(4),
            TypeTag::Int64 | TypeTag::TimeTag | TypeTag::Double => Some(8),
            TypeTag::True
            | TypeTag::False
            | TypeTag::Nil
            | TypeTag::Infinitum
            | TypeTag::ArrayBegin
            | TypeTag::ArrayEnd => Some(0),
            TypeTag::String | TypeTag::AlternateString | TypeTag::Blob => None,
        }
    }
}

impl TryFrom<u8> for TypeTag {
    type Error = CodecError;

    fn try_from(byte: u8) -> Result<Self> {
        TypeTag::from_u8(byte).ok_or(CodecError::UnknownTypeTag(byte))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 32-bit RGBA colour, one byte per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RgbaColour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl RgbaColour {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// 4-byte MIDI message: port id, status byte and two data bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MidiMessage {
    pub port_id: u8,
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub const fn new(port_id: u8, status: u8, data1: u8, data2: u8) -> Self {
        Self {
            port_id,
            status,
            data1,
            data2,
        }
    }
}

/// A single OSC argument, borrowing string and blob payloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument<'a> {
    Int32(i32),
    Float32(f32),
    String(&'a str),
    AlternateString(&'a str),
    Blob(&'a [u8]),
    Int64(i64),
    TimeTag(TimeTag),
    Double(f64),
    Character(char),
    RgbaColour(RgbaColour),
    MidiMessage(MidiMessage),
    True,
    False,
    Nil,
    Infinitum,
    ArrayBegin,
    ArrayEnd,
}

impl<'a> Argument<'a> {
    /// The type tag written for this argument.
    pub fn tag(&self) -> TypeTag {
        match self {
            Argument::Int32(_) => TypeTag::Int32,
            Argument::Float32(_) => TypeTag::Float32,
            Argument::String(_) => TypeTag::String,
            Argument::AlternateString(_) => TypeTag::AlternateString,
            Argument::Blob(_) => TypeTag::Blob,
            Argument::Int64(_) => TypeTag::Int64,
            Argument::TimeTag(_) => TypeTag::TimeTag,
            Argument::Double(_) => TypeTag::Double,
            Argument::Character(_) => TypeTag::Character,
            Argument::RgbaColour(_) => TypeTag::RgbaColour,
            Argument::MidiMessage(_) => TypeTag::MidiMessage,
            Argument::True => TypeTag::True,
            Argument::False => TypeTag::False,
            Argument::Nil => TypeTag::Nil,
            Argument::Infinitum => TypeTag::Infinitum,
            Argument::ArrayBegin => TypeTag::ArrayBegin,
            Argument::ArrayEnd => TypeTag::ArrayEnd,
        }
    }

    /// Number of bytes [`encode_into`](Self::encode_into) writes.
    pub fn encoded_len(&self) -> usize {
        match self {
            Argument::String(s) | Argument::AlternateString(s) => osc_string_size(s.len()),
            Argument::Blob(data) => 4 + align4(data.len()),
            other => other.tag().fixed_size().unwrap_or(0),
        }
    }

    /// Write the argument payload into `dst`, returning the bytes written.
    ///
    /// Nothing is written when the argument is rejected.
    pub fn encode_into(&self, dst: &mut [u8]) -> Result<usize> {
        self.validate()?;
        let needed = self.encoded_len();
        if dst.len() < needed {
            return Err(CodecError::DestinationTooSmall {
                needed,
                available: dst.len(),
            });
        }

        let mut buf = &mut dst[..needed];
        match *self {
            Argument::Int32(v) => buf.put_i32(v),
            Argument::Float32(v) => buf.put_f32(v),
            Argument::String(s) | Argument::AlternateString(s) => {
                buf.put_slice(s.as_bytes());
                buf.put_bytes(0, needed - s.len());
            }
            Argument::Blob(data) => {
                buf.put_i32(data.len() as i32);
                buf.put_slice(data);
                buf.put_bytes(0, needed - 4 - data.len());
            }
            Argument::Int64(v) => buf.put_i64(v),
            Argument::TimeTag(tag) => buf.put_u64(tag.raw()),
            Argument::Double(v) => buf.put_f64(v),
            Argument::Character(c) => buf.put_u32(c as u32),
            Argument::RgbaColour(c) => buf.put_slice(&[c.red, c.green, c.blue, c.alpha]),
            Argument::MidiMessage(m) => buf.put_slice(&[m.port_id, m.status, m.data1, m.data2]),
            Argument::True
            | Argument::False
            | Argument::Nil
            | Argument::Infinitum
            | Argument::ArrayBegin
            | Argument::ArrayEnd => {}
        }
        Ok(needed)
    }

    /// Decode one argument of type `tag` from the front of `bytes`.
    ///
    /// Returns the argument and the number of bytes it occupied.
    pub fn decode(tag: TypeTag, bytes: &'a [u8]) -> Result<(Argument<'a>, usize)> {
        let decoded = match tag {
            TypeTag::Int32 => (Argument::Int32(take(bytes, 4)?.get_i32()), 4),
            TypeTag::Float32 => (Argument::Float32(take(bytes, 4)?.get_f32()), 4),
            TypeTag::Int64 => (Argument::Int64(take(bytes, 8)?.get_i64()), 8),
            TypeTag::TimeTag => (
                Argument::TimeTag(TimeTag::from_raw(take(bytes, 8)?.get_u64())),
                8,
            ),
            TypeTag::Double => (Argument::Double(take(bytes, 8)?.get_f64()), 8),
            TypeTag::Character => (Argument::Character(char::from(take(bytes, 4)?[3])), 4),
            TypeTag::RgbaColour => {
                let b = take(bytes, 4)?;
                (Argument::RgbaColour(RgbaColour::new(b[0], b[1], b[2], b[3])), 4)
            }
            TypeTag::MidiMessage => {
                let b = take(bytes, 4)?;
                (Argument::MidiMessage(MidiMessage::new(b[0], b[1], b[2], b[3])), 4)
            }
            TypeTag::String => {
                let (s, consumed) = decode_string(bytes)?;
                (Argument::String(s), consumed)
            }
            TypeTag::AlternateString => {
                let (s, consumed) = decode_string(bytes)?;
                (Argument::AlternateString(s), consumed)
            }
            TypeTag::Blob => decode_blob(bytes)?,
            TypeTag::True => (Argument::True, 0),
            TypeTag::False => (Argument::False, 0),
            TypeTag::Nil => (Argument::Nil, 0),
            TypeTag::Infinitum => (Argument::Infinitum, 0),
            TypeTag::ArrayBegin => (Argument::ArrayBegin, 0),
            TypeTag::ArrayEnd => (Argument::ArrayEnd, 0),
        };
        Ok(decoded)
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Argument::String(s) | Argument::AlternateString(s) => {
                if s.bytes().any(|b| b == 0 || !b.is_ascii()) {
                    return Err(CodecError::Malformed(
                        "string must be ASCII without embedded NUL",
                    ));
                }
            }
            Argument::Blob(data) if data.len() > i32::MAX as usize => {
                return Err(CodecError::Malformed("blob exceeds i32 length"));
            }
            Argument::Character(c) if !c.is_ascii() => {
                return Err(CodecError::Malformed("character must be ASCII"));
            }
            _ => {}
        }
        Ok(())
    }
}

fn take(bytes: &[u8], size: usize) -> Result<&[u8]> {
    bytes.get(..size).ok_or(CodecError::Truncated {
        needed: size,
        remaining: bytes.len(),
    })
}

fn decode_string(bytes: &[u8]) -> Result<(&str, usize)> {
    let len = bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or(CodecError::Malformed("string not NUL-terminated"))?;
    let consumed = osc_string_size(len);
    if consumed > bytes.len() {
        return Err(CodecError::Truncated {
            needed: consumed,
            remaining: bytes.len(),
        });
    }
    let s = std::str::from_utf8(&bytes[..len])
        .map_err(|_| CodecError::Malformed("string is not valid UTF-8"))?;
    Ok((s, consumed))
}

fn decode_blob(bytes: &[u8]) -> Result<(Argument<'_>, usize)> {
    if bytes.len() < 4 {
        return Err(CodecError::Truncated {
            needed: 4,
            remaining: bytes.len(),
        });
    }
    let mut buf = bytes;
    let size = buf.get_i32();
    if size < 0 {
        return Err(CodecError::Malformed("negative blob size"));
    }
    let size = size as usize;
    if size > buf.remaining() {
        return Err(CodecError::Malformed("blob size exceeds remaining bytes"));
    }
    let consumed = 4 + align4(size);
    if consumed > bytes.len() {
        return Err(CodecError::Truncated {
            needed: consumed,
            remaining: bytes.len(),
        });
    }
    Ok((Argument::Blob(&bytes[4..4 + size]), consumed))
}

impl From<i32> for Argument<'_> {
    fn from(v: i32) -> Self {
        Argument::Int32(v)
    }
}

impl From<f32> for Argument<'_> {
    fn from(v: f32) -> Self {
        Argument::Float32(v)
    }
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(v: &'a str) -> Self {
        Argument::String(v)
    }
}

impl<'a> From<&'a [u8]> for Argument<'a> {
    fn from(v: &'a [u8]) -> Self {
        Argument::Blob(v)
    }
}

impl From<i64> for Argument<'_> {
    fn from(v: i64) -> Self {
        Argument::Int64(v)
    }
}

impl From<f64> for Argument<'_> {
    fn from(v: f64) -> Self {
        Argument::Double(v)
    }
}

impl From<bool> for Argument<'_> {
    fn from(v: bool) -> Self {
        if v {
            Argument::True
        } else {
            Argument::False
        }
    }
}

impl From<TimeTag> for Argument<'_> {
    fn from(v: TimeTag) -> Self {
        Argument::TimeTag(v)
    }
}

impl From<char> for Argument<'_> {
    fn from(v: char) -> Self {
        Argument::Character(v)
    }
}

impl From<RgbaColour> for Argument<'_> {
    fn from(v: RgbaColour) -> Self {
        Argument::RgbaColour(v)
    }
}

impl From<MidiMessage> for Argument<'_> {
    fn from(v: MidiMessage) -> Self {
        Argument::MidiMessage(v)
    }
}
