//! Compile-time capacities of every fixed-size buffer in the codec.
//!
//! The values follow a UDP payload over standard Ethernet: 1500 byte MTU minus
//! IPv4 and UDP headers.

/// Maximum packet size permitted by the transport.
pub const MAX_TRANSPORT_SIZE: usize = 1472;

/// Maximum size of an OSC packet.
pub const MAX_PACKET_SIZE: usize = MAX_TRANSPORT_SIZE;

/// Maximum size of a serialized OSC message.
pub const MAX_MESSAGE_SIZE: usize = MAX_TRANSPORT_SIZE;

/// Smallest valid message: `"/\0\0\0,\0\0\0"`.
pub const MIN_MESSAGE_SIZE: usize = 8;

/// Maximum address pattern length, excluding the terminating NUL.
pub const MAX_ADDRESS_PATTERN_LENGTH: usize = 64;

/// Maximum number of arguments in one message.
pub const MAX_ARGUMENTS: usize = 16;

/// Maximum type-tag string length, including the leading comma.
pub const MAX_TYPE_TAG_STRING_LENGTH: usize = 1 + MAX_ARGUMENTS;

/// Capacity of a message's argument buffer.
pub const MAX_ARGUMENTS_SIZE: usize = MAX_MESSAGE_SIZE - MIN_MESSAGE_SIZE;

/// Maximum size of a serialized OSC bundle.
pub const MAX_BUNDLE_SIZE: usize = MAX_TRANSPORT_SIZE;

/// Bundle header (`#bundle\0`) plus time tag.
pub const MIN_BUNDLE_SIZE: usize = 16;

/// Capacity of a bundle's element buffer.
pub const MAX_BUNDLE_ELEMENTS_SIZE: usize = MAX_BUNDLE_SIZE - MIN_BUNDLE_SIZE;

/// Default maximum bundle nesting depth followed by the dispatcher.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Round `len` up to the next multiple of 4.
pub(crate) const fn align4(len: usize) -> usize {
    (len + 3) & !3
}

/// Size of an OSC string of `len` characters: at least one NUL, padded to 4.
pub(crate) const fn osc_string_size(len: usize) -> usize {
    (len / 4 + 1) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc_string_size_always_has_a_terminator() {
        assert_eq!(osc_string_size(0), 4);
        assert_eq!(osc_string_size(3), 4);
        assert_eq!(osc_string_size(4), 8);
        assert_eq!(osc_string_size(8), 12);
    }

    #[test]
    fn align4_rounds_up() {
        assert_eq!(align4(0), 0);
        assert_eq!(align4(1), 4);
        assert_eq!(align4(4), 4);
        assert_eq!(align4(5), 8);
    }
}
