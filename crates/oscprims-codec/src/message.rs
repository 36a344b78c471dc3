//! OSC messages: address pattern, type-tag string and argument bytes.

use std::iter::FusedIterator;

use bytes::BufMut;
use heapless::{String, Vec};

use crate::argument::{Argument, MidiMessage, RgbaColour, TypeTag};
use crate::error::{CodecError, Result};
use crate::limits::{
    align4, osc_string_size, MAX_ADDRESS_PATTERN_LENGTH, MAX_ARGUMENTS, MAX_ARGUMENTS_SIZE,
    MAX_MESSAGE_SIZE, MAX_TYPE_TAG_STRING_LENGTH, MIN_MESSAGE_SIZE,
};
use crate::packet::Contents;
use crate::time_tag::TimeTag;

/// An OSC message with fixed-capacity storage.
///
/// Arguments are appended with [`add_argument`](Message::add_argument) and
/// read back in order with the typed getters. Each successful getter moves
/// an internal cursor to the next argument; a failed one leaves it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    address: String<MAX_ADDRESS_PATTERN_LENGTH>,
    type_tags: Vec<u8, MAX_TYPE_TAG_STRING_LENGTH>,
    arguments: Vec<u8, MAX_ARGUMENTS_SIZE>,
    tag_cursor: usize,
    arg_cursor: usize,
}

impl Default for Message {
    fn default() -> Self {
        let mut type_tags: Vec<u8, MAX_TYPE_TAG_STRING_LENGTH> = Vec::new();
        // Capacity is at least one.
        let _ = type_tags.push(b',');
        Self {
            address: String::new(),
            type_tags,
            arguments: Vec::new(),
            tag_cursor: 1,
            arg_cursor: 0,
        }
    }
}

impl Message {
    /// Create a message with no arguments.
    ///
    /// `address` may be empty, in which case it must be set before the
    /// message can be serialized.
    pub fn new(address: &str) -> Result<Self> {
        let mut message = Self::default();
        if !address.is_empty() {
            message.set_address_pattern(address)?;
        }
        Ok(message)
    }

    /// Replace the address pattern.
    pub fn set_address_pattern(&mut self, address: &str) -> Result<()> {
        validate_address(address, address.len())?;
        self.address.clear();
        self.address
            .push_str(address)
            .map_err(|()| too_long(address.len()))
    }

    /// Append one or more address parts, e.g. `"/b/c"` onto `"/a"`.
    pub fn append_address_pattern(&mut self, parts: &str) -> Result<()> {
        let combined = self.address.len() + parts.len();
        validate_address(parts, combined)?;
        self.address
            .push_str(parts)
            .map_err(|()| too_long(combined))
    }

    pub fn address_pattern(&self) -> &str {
        &self.address
    }

    /// Append an argument. The message is unchanged if this fails.
    pub fn add_argument<'a>(&mut self, value: impl Into<Argument<'a>>) -> Result<()> {
        let argument = value.into();
        if self.argument_count() >= MAX_ARGUMENTS {
            return Err(CodecError::TooManyArguments { max: MAX_ARGUMENTS });
        }

        let needed = argument.encoded_len();
        let start = self.arguments.len();
        let header =
            osc_string_size(self.address.len()) + osc_string_size(self.type_tags.len() + 1);
        let available = (MAX_ARGUMENTS_SIZE - start)
            .min(MAX_MESSAGE_SIZE.saturating_sub(header + start));
        if needed > available {
            return Err(CodecError::BufferFull { needed, available });
        }

        self.arguments
            .resize(start + needed, 0)
            .map_err(|()| CodecError::BufferFull { needed, available })?;
        if let Err(err) = argument.encode_into(&mut self.arguments[start..]) {
            self.arguments.truncate(start);
            return Err(err);
        }
        if self.type_tags.push(argument.tag().as_u8()).is_err() {
            self.arguments.truncate(start);
            return Err(CodecError::TooManyArguments { max: MAX_ARGUMENTS });
        }
        Ok(())
    }

    /// Number of arguments, as given by the type-tag string.
    pub fn argument_count(&self) -> usize {
        self.type_tags.len() - 1
    }

    /// The type-tag string including its leading comma.
    pub fn type_tag_string(&self) -> &str {
        std::str::from_utf8(&self.type_tags).unwrap_or_default()
    }

    /// Raw argument bytes following the type-tag string.
    pub fn argument_bytes(&self) -> &[u8] {
        &self.arguments
    }

    /// Serialized size in bytes.
    pub fn size(&self) -> usize {
        osc_string_size(self.address.len())
            + osc_string_size(self.type_tags.len())
            + self.arguments.len()
    }

    /// Write the message into `dst`, returning the number of bytes written.
    pub fn serialize_into(&self, dst: &mut [u8]) -> Result<usize> {
        if self.address.is_empty() {
            return Err(CodecError::AddressNotSet);
        }
        if !self.address.starts_with('/') {
            return Err(CodecError::InvalidAddress);
        }
        let size = self.size();
        if dst.len() < size {
            return Err(CodecError::DestinationTooSmall {
                needed: size,
                available: dst.len(),
            });
        }

        let mut buf = &mut dst[..size];
        put_osc_string(&mut buf, self.address.as_bytes());
        put_osc_string(&mut buf, &self.type_tags);
        buf.put_slice(&self.arguments);
        Ok(size)
    }

    /// Parse a serialized message.
    ///
    /// Argument bytes are copied verbatim and validated as they are read.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let size = bytes.len();
        if size % 4 != 0 {
            return Err(CodecError::Malformed("message size is not a multiple of 4"));
        }
        if size < MIN_MESSAGE_SIZE {
            return Err(CodecError::Malformed("message shorter than minimum size"));
        }
        if size > MAX_MESSAGE_SIZE {
            return Err(CodecError::PacketTooLarge {
                size,
                max: MAX_MESSAGE_SIZE,
            });
        }
        if bytes[0] != b'/' {
            return Err(CodecError::InvalidAddress);
        }

        let address_len = bytes
            .iter()
            .position(|&b| b == 0)
            .ok_or(CodecError::Malformed("address pattern not NUL-terminated"))?;
        if address_len > MAX_ADDRESS_PATTERN_LENGTH {
            return Err(too_long(address_len));
        }
        let address = std::str::from_utf8(&bytes[..address_len])
            .map_err(|_| CodecError::Malformed("address pattern is not valid UTF-8"))?;

        let comma = bytes[address_len..]
            .iter()
            .position(|&b| b == b',')
            .map(|offset| address_len + offset)
            .ok_or(CodecError::Malformed("missing type-tag string"))?;
        let tags_start = comma + 1;
        let tags_len = bytes[tags_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(CodecError::Malformed("type-tag string not NUL-terminated"))?;
        if tags_len > MAX_ARGUMENTS {
            return Err(CodecError::TooManyArguments { max: MAX_ARGUMENTS });
        }
        let tags = &bytes[tags_start..tags_start + tags_len];
        if !tags.is_ascii() {
            return Err(CodecError::Malformed("type-tag string is not ASCII"));
        }

        let arguments_start = align4(tags_start + tags_len + 1);
        let arguments = &bytes[arguments_start..];

        let mut message = Self::default();
        message
            .address
            .push_str(address)
            .map_err(|()| too_long(address_len))?;
        message
            .type_tags
            .extend_from_slice(tags)
            .map_err(|()| CodecError::TooManyArguments { max: MAX_ARGUMENTS })?;
        message
            .arguments
            .extend_from_slice(arguments)
            .map_err(|()| CodecError::BufferFull {
                needed: arguments.len(),
                available: MAX_ARGUMENTS_SIZE,
            })?;
        Ok(message)
    }

    /// True while at least one argument remains unread.
    pub fn is_argument_available(&self) -> bool {
        self.tag_cursor < self.type_tags.len()
    }

    /// Type of the next argument, `None` when exhausted or not a known tag.
    pub fn argument_type(&self) -> Option<TypeTag> {
        TypeTag::from_u8(self.raw_argument_type())
    }

    /// Raw type-tag character of the next argument, `0` when exhausted.
    pub fn raw_argument_type(&self) -> u8 {
        self.type_tags.get(self.tag_cursor).copied().unwrap_or(0)
    }

    /// Read the next argument whatever its type.
    pub fn next_argument(&mut self) -> Result<Argument<'_>> {
        let (argument, consumed) = decode_at(
            &self.type_tags,
            &self.arguments,
            self.tag_cursor,
            self.arg_cursor,
        )?;
        self.tag_cursor += 1;
        self.arg_cursor += consumed;
        Ok(argument)
    }

    /// Step over the next argument, keeping tag and byte cursors in sync.
    pub fn skip_argument(&mut self) -> Result<()> {
        self.next_argument().map(|_| ())
    }

    /// Move the cursor back to the first argument.
    pub fn rewind_arguments(&mut self) {
        self.tag_cursor = 1;
        self.arg_cursor = 0;
    }

    pub fn get_int32(&mut self) -> Result<i32> {
        self.check_type(TypeTag::Int32, &[TypeTag::Int32])?;
        match self.next_argument()? {
            Argument::Int32(v) => Ok(v),
            other => Err(mismatch(TypeTag::Int32, &other)),
        }
    }

    pub fn get_float32(&mut self) -> Result<f32> {
        self.check_type(TypeTag::Float32, &[TypeTag::Float32])?;
        match self.next_argument()? {
            Argument::Float32(v) => Ok(v),
            other => Err(mismatch(TypeTag::Float32, &other)),
        }
    }

    /// Read a string argument. Accepts both `s` and `S`.
    pub fn get_string(&mut self) -> Result<&str> {
        self.check_type(
            TypeTag::String,
            &[TypeTag::String, TypeTag::AlternateString],
        )?;
        match self.next_argument()? {
            Argument::String(s) | Argument::AlternateString(s) => Ok(s),
            other => Err(mismatch(TypeTag::String, &other)),
        }
    }

    pub fn get_blob(&mut self) -> Result<&[u8]> {
        self.check_type(TypeTag::Blob, &[TypeTag::Blob])?;
        match self.next_argument()? {
            Argument::Blob(data) => Ok(data),
            other => Err(mismatch(TypeTag::Blob, &other)),
        }
    }

    pub fn get_int64(&mut self) -> Result<i64> {
        self.check_type(TypeTag::Int64, &[TypeTag::Int64])?;
        match self.next_argument()? {
            Argument::Int64(v) => Ok(v),
            other => Err(mismatch(TypeTag::Int64, &other)),
        }
    }

    pub fn get_time_tag(&mut self) -> Result<TimeTag> {
        self.check_type(TypeTag::TimeTag, &[TypeTag::TimeTag])?;
        match self.next_argument()? {
            Argument::TimeTag(v) => Ok(v),
            other => Err(mismatch(TypeTag::TimeTag, &other)),
        }
    }

    pub fn get_double(&mut self) -> Result<f64> {
        self.check_type(TypeTag::Double, &[TypeTag::Double])?;
        match self.next_argument()? {
            Argument::Double(v) => Ok(v),
            other => Err(mismatch(TypeTag::Double, &other)),
        }
    }

    pub fn get_character(&mut self) -> Result<char> {
        self.check_type(TypeTag::Character, &[TypeTag::Character])?;
        match self.next_argument()? {
            Argument::Character(c) => Ok(c),
            other => Err(mismatch(TypeTag::Character, &other)),
        }
    }

    pub fn get_rgba_colour(&mut self) -> Result<RgbaColour> {
        self.check_type(TypeTag::RgbaColour, &[TypeTag::RgbaColour])?;
        match self.next_argument()? {
            Argument::RgbaColour(c) => Ok(c),
            other => Err(mismatch(TypeTag::RgbaColour, &other)),
        }
    }

    pub fn get_midi_message(&mut self) -> Result<MidiMessage> {
        self.check_type(TypeTag::MidiMessage, &[TypeTag::MidiMessage])?;
        match self.next_argument()? {
            Argument::MidiMessage(m) => Ok(m),
            other => Err(mismatch(TypeTag::MidiMessage, &other)),
        }
    }

    /// Read a `T` or `F` argument.
    pub fn get_bool(&mut self) -> Result<bool> {
        self.check_type(TypeTag::True, &[TypeTag::True, TypeTag::False])?;
        match self.next_argument()? {
            Argument::True => Ok(true),
            Argument::False => Ok(false),
            other => Err(mismatch(TypeTag::True, &other)),
        }
    }

    /// Iterate over all arguments without moving the cursor.
    ///
    /// The iterator stops after yielding the first error.
    pub fn arguments(&self) -> Arguments<'_> {
        Arguments {
            tags: &self.type_tags[1..],
            bytes: &self.arguments,
            offset: 0,
            failed: false,
        }
    }

    fn check_type(&self, expected: TypeTag, accepted: &[TypeTag]) -> Result<()> {
        let found = self
            .type_tags
            .get(self.tag_cursor)
            .copied()
            .ok_or(CodecError::ArgumentsExhausted)?;
        if accepted.iter().any(|tag| tag.as_u8() == found) {
            Ok(())
        } else {
            Err(CodecError::TypeMismatch { expected, found })
        }
    }
}

impl Contents for Message {
    fn size(&self) -> usize {
        Message::size(self)
    }

    fn serialize_into(&self, dst: &mut [u8]) -> Result<usize> {
        Message::serialize_into(self, dst)
    }
}

/// Iterator returned by [`Message::arguments`].
#[derive(Debug, Clone)]
pub struct Arguments<'m> {
    tags: &'m [u8],
    bytes: &'m [u8],
    offset: usize,
    failed: bool,
}

impl<'m> Iterator for Arguments<'m> {
    type Item = Result<Argument<'m>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (&raw, rest) = self.tags.split_first()?;
        let decoded = TypeTag::try_from(raw)
            .and_then(|tag| Argument::decode(tag, &self.bytes[self.offset..]));
        match decoded {
            Ok((argument, consumed)) => {
                self.tags = rest;
                self.offset += consumed;
                Some(Ok(argument))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Arguments<'_> {}

fn decode_at<'a>(
    type_tags: &[u8],
    arguments: &'a [u8],
    tag_cursor: usize,
    arg_cursor: usize,
) -> Result<(Argument<'a>, usize)> {
    let raw = type_tags
        .get(tag_cursor)
        .copied()
        .ok_or(CodecError::ArgumentsExhausted)?;
    let tag = TypeTag::try_from(raw)?;
    Argument::decode(tag, &arguments[arg_cursor..])
}

fn validate_address(address: &str, combined_len: usize) -> Result<()> {
    if !address.starts_with('/') || address.contains('\0') {
        return Err(CodecError::InvalidAddress);
    }
    if combined_len > MAX_ADDRESS_PATTERN_LENGTH {
        return Err(too_long(combined_len));
    }
    Ok(())
}

fn too_long(len: usize) -> CodecError {
    CodecError::TooLong {
        len,
        max: MAX_ADDRESS_PATTERN_LENGTH,
    }
}

fn mismatch(expected: TypeTag, found: &Argument<'_>) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        found: found.tag().as_u8(),
    }
}

fn put_osc_string(buf: &mut &mut [u8], bytes: &[u8]) {
    buf.put_slice(bytes);
    buf.put_bytes(0, osc_string_size(bytes.len()) - bytes.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(message: &Message) -> std::vec::Vec<u8> {
        let mut out = vec![0u8; message.size()];
        let written = message.serialize_into(&mut out).unwrap();
        assert_eq!(written, out.len());
        out
    }

    #[test]
    fn empty_message_wire_format() {
        let message = Message::new("/example").unwrap();
        assert_eq!(
            serialize(&message),
            [
                0x2F, 0x65, 0x78, 0x61, 0x6D, 0x70, 0x6C, 0x65, 0x00, 0x00, 0x00, 0x00, 0x2C,
                0x00, 0x00, 0x00
            ]
        );
        assert_eq!(message.size(), 16);
        assert_eq!(message.type_tag_string(), ",");
    }

    #[test]
    fn address_must_start_with_slash() {
        assert_eq!(
            Message::new("example").unwrap_err(),
            CodecError::InvalidAddress
        );
        let mut message = Message::new("/a").unwrap();
        assert_eq!(
            message.append_address_pattern("b"),
            Err(CodecError::InvalidAddress)
        );
        assert_eq!(message.address_pattern(), "/a");
    }

    #[test]
    fn address_length_is_bounded() {
        let long = format!("/{}", "x".repeat(MAX_ADDRESS_PATTERN_LENGTH));
        assert!(matches!(
            Message::new(&long),
            Err(CodecError::TooLong { len: 65, max: 64 })
        ));

        let mut message = Message::new(&long[..MAX_ADDRESS_PATTERN_LENGTH - 1]).unwrap();
        assert!(matches!(
            message.append_address_pattern("/yz"),
            Err(CodecError::TooLong { .. })
        ));
        message.append_address_pattern("/").unwrap();
        assert_eq!(message.address_pattern().len(), MAX_ADDRESS_PATTERN_LENGTH);
    }

    #[test]
    fn append_and_set_address() {
        let mut message = Message::new("/synth").unwrap();
        message.append_address_pattern("/1/freq").unwrap();
        assert_eq!(message.address_pattern(), "/synth/1/freq");
        message.set_address_pattern("/other").unwrap();
        assert_eq!(message.address_pattern(), "/other");
    }

    #[test]
    fn serialize_requires_address() {
        let message = Message::new("").unwrap();
        let mut out = [0u8; 16];
        assert_eq!(
            message.serialize_into(&mut out),
            Err(CodecError::AddressNotSet)
        );
    }

    #[test]
    fn serialize_rejects_small_destination() {
        let message = Message::new("/example").unwrap();
        let mut out = [0u8; 12];
        assert_eq!(
            message.serialize_into(&mut out),
            Err(CodecError::DestinationTooSmall {
                needed: 16,
                available: 12
            })
        );
    }

    #[test]
    fn argument_count_limit_leaves_message_unchanged() {
        let mut message = Message::new("/many").unwrap();
        for i in 0..MAX_ARGUMENTS as i32 {
            message.add_argument(i).unwrap();
        }
        let size = message.size();
        assert_eq!(
            message.add_argument(99),
            Err(CodecError::TooManyArguments { max: MAX_ARGUMENTS })
        );
        assert_eq!(message.size(), size);
        assert_eq!(message.argument_count(), MAX_ARGUMENTS);
    }

    #[test]
    fn argument_buffer_limit_leaves_message_unchanged() {
        let mut message = Message::new("/big").unwrap();
        let blob = vec![7u8; MAX_MESSAGE_SIZE - 16];
        message.add_argument(&blob[..]).unwrap();
        let size = message.size();
        assert_eq!(size, MAX_MESSAGE_SIZE);
        assert_eq!(
            message.add_argument(1),
            Err(CodecError::BufferFull {
                needed: 4,
                available: 0
            })
        );
        assert_eq!(message.size(), size);
        assert_eq!(message.type_tag_string(), ",b");
    }

    #[test]
    fn rejected_string_leaves_message_unchanged() {
        let mut message = Message::new("/s").unwrap();
        assert!(message.add_argument("bad\0").is_err());
        assert_eq!(message.size(), 8);
        assert_eq!(message.argument_count(), 0);
    }

    #[test]
    fn typed_getters_read_back_in_order() {
        let mut message = Message::new("/mix").unwrap();
        message.add_argument(42).unwrap();
        message.add_argument(0.5f32).unwrap();
        message.add_argument("hello").unwrap();
        message.add_argument(&[1u8, 2, 3][..]).unwrap();
        message.add_argument(-7i64).unwrap();
        message.add_argument(TimeTag::new(1, 2)).unwrap();
        message.add_argument(1.25f64).unwrap();
        message.add_argument('z').unwrap();
        message.add_argument(RgbaColour::new(1, 2, 3, 4)).unwrap();
        message.add_argument(MidiMessage::new(0, 0x90, 60, 100)).unwrap();
        message.add_argument(true).unwrap();
        message.add_argument(Argument::Nil).unwrap();
        assert_eq!(message.type_tag_string(), ",ifsbhtdcrmTN");

        let bytes = serialize(&message);
        let mut parsed = Message::deserialize(&bytes).unwrap();
        assert_eq!(parsed, message);

        assert_eq!(parsed.get_int32().unwrap(), 42);
        assert_eq!(parsed.get_float32().unwrap(), 0.5);
        assert_eq!(parsed.get_string().unwrap(), "hello");
        assert_eq!(parsed.get_blob().unwrap(), &[1, 2, 3]);
        assert_eq!(parsed.get_int64().unwrap(), -7);
        assert_eq!(parsed.get_time_tag().unwrap(), TimeTag::new(1, 2));
        assert_eq!(parsed.get_double().unwrap(), 1.25);
        assert_eq!(parsed.get_character().unwrap(), 'z');
        assert_eq!(parsed.get_rgba_colour().unwrap(), RgbaColour::new(1, 2, 3, 4));
        assert_eq!(
            parsed.get_midi_message().unwrap(),
            MidiMessage::new(0, 0x90, 60, 100)
        );
        assert!(parsed.get_bool().unwrap());
        assert_eq!(parsed.argument_type(), Some(TypeTag::Nil));
        assert_eq!(parsed.next_argument().unwrap(), Argument::Nil);
        assert!(!parsed.is_argument_available());
        assert_eq!(parsed.raw_argument_type(), 0);
        assert_eq!(parsed.argument_type(), None);
        assert_eq!(parsed.get_int32(), Err(CodecError::ArgumentsExhausted));
    }

    #[test]
    fn wrong_getter_does_not_advance() {
        let mut message = Message::new("/x").unwrap();
        message.add_argument(5).unwrap();
        assert_eq!(
            message.get_float32(),
            Err(CodecError::TypeMismatch {
                expected: TypeTag::Float32,
                found: b'i'
            })
        );
        assert_eq!(message.argument_type(), Some(TypeTag::Int32));
        assert_eq!(message.get_int32().unwrap(), 5);
    }

    #[test]
    fn get_string_accepts_alternate_string() {
        let mut message = Message::new("/x").unwrap();
        message.add_argument(Argument::AlternateString("sym")).unwrap();
        assert_eq!(message.type_tag_string(), ",S");
        assert_eq!(message.get_string().unwrap(), "sym");
    }

    #[test]
    fn skip_keeps_cursors_in_sync() {
        let mut message = Message::new("/x").unwrap();
        message.add_argument("a longer string").unwrap();
        message.add_argument(9).unwrap();
        message.skip_argument().unwrap();
        assert_eq!(message.get_int32().unwrap(), 9);

        message.rewind_arguments();
        assert_eq!(message.get_string().unwrap(), "a longer string");
    }

    #[test]
    fn deserialize_rejects_bad_sizes() {
        assert!(matches!(
            Message::deserialize(b"/a\0\0,\0"),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            Message::deserialize(b"/\0\0\0"),
            Err(CodecError::Malformed(_))
        ));
        let oversized = vec![0u8; MAX_MESSAGE_SIZE + 4];
        assert!(matches!(
            Message::deserialize(&oversized),
            Err(CodecError::PacketTooLarge { .. })
        ));
    }

    #[test]
    fn deserialize_rejects_missing_slash() {
        assert_eq!(
            Message::deserialize(b"xa\0\0,\0\0\0"),
            Err(CodecError::InvalidAddress)
        );
    }

    #[test]
    fn deserialize_rejects_missing_type_tags() {
        assert!(matches!(
            Message::deserialize(b"/abc\0\0\0\0"),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            Message::deserialize(b"/ab\0,iii"),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn truncated_argument_is_reported_lazily() {
        let mut message = Message::deserialize(b"/a\0\0,i\0\0").unwrap();
        assert_eq!(message.argument_count(), 1);
        assert_eq!(
            message.get_int32(),
            Err(CodecError::Truncated {
                needed: 4,
                remaining: 0
            })
        );
        assert!(message.is_argument_available());
    }

    #[test]
    fn arguments_iterator_fuses_after_error() {
        let message = Message::deserialize(b"/a\0\0,ix\0\0\0\0\x07").unwrap();
        let mut args = message.arguments();
        assert_eq!(args.next(), Some(Ok(Argument::Int32(7))));
        assert_eq!(args.next(), Some(Err(CodecError::UnknownTypeTag(b'x'))));
        assert_eq!(args.next(), None);
        assert_eq!(message.raw_argument_type(), b'i');
    }
}
