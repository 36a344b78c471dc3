//! OSC bundles: `#bundle\0`, a time tag and size-prefixed elements.

use std::ops::Range;

use bytes::{Buf, BufMut};
use heapless::Vec;

use crate::error::{CodecError, Result};
use crate::limits::{MAX_BUNDLE_ELEMENTS_SIZE, MAX_BUNDLE_SIZE, MIN_BUNDLE_SIZE};
use crate::packet::Contents;
use crate::time_tag::TimeTag;

/// The 8-byte bundle header, including its NUL terminator.
pub const BUNDLE_HEADER: &[u8; 8] = b"#bundle\0";

const SIZE_PREFIX: usize = 4;

/// An OSC bundle with fixed-capacity element storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    time_tag: TimeTag,
    elements: Vec<u8, MAX_BUNDLE_ELEMENTS_SIZE>,
    cursor: usize,
}

/// One element of a bundle, borrowed from the bundle's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleElement<'b> {
    /// Offset of the element contents within the element stream.
    pub offset: usize,
    /// Element contents without the size prefix.
    pub bytes: &'b [u8],
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new(TimeTag::IMMEDIATE)
    }
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new(time_tag: TimeTag) -> Self {
        Self {
            time_tag,
            elements: Vec::new(),
            cursor: 0,
        }
    }

    pub fn time_tag(&self) -> TimeTag {
        self.time_tag
    }

    pub fn set_time_tag(&mut self, time_tag: TimeTag) {
        self.time_tag = time_tag;
    }

    /// Append a message or nested bundle as a new element.
    ///
    /// The bundle is unchanged if this fails; errors from serializing
    /// `contents` are returned as they are.
    pub fn add_contents<C: Contents + ?Sized>(&mut self, contents: &C) -> Result<()> {
        let available = self.remaining_capacity();
        if available < SIZE_PREFIX {
            return Err(CodecError::BundleFull {
                needed: SIZE_PREFIX,
                available,
            });
        }
        let needed = SIZE_PREFIX + contents.size();
        if needed > available {
            return Err(CodecError::BundleFull { needed, available });
        }

        let start = self.elements.len();
        self.elements
            .resize(start + needed, 0)
            .map_err(|()| CodecError::BundleFull { needed, available })?;
        let written = match contents.serialize_into(&mut self.elements[start + SIZE_PREFIX..]) {
            Ok(written) => written,
            Err(err) => {
                self.elements.truncate(start);
                return Err(err);
            }
        };
        self.elements[start..start + SIZE_PREFIX].copy_from_slice(&(written as i32).to_be_bytes());
        self.elements.truncate(start + SIZE_PREFIX + written);
        Ok(())
    }

    /// Remove every element, keeping the time tag.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Bytes still available for elements, including their size prefixes.
    pub fn remaining_capacity(&self) -> usize {
        MAX_BUNDLE_ELEMENTS_SIZE - self.elements.len()
    }

    /// Serialized size in bytes.
    pub fn size(&self) -> usize {
        MIN_BUNDLE_SIZE + self.elements.len()
    }

    /// The raw element stream: size-prefixed elements back to back.
    pub fn element_bytes(&self) -> &[u8] {
        &self.elements
    }

    /// Write the bundle into `dst`, returning the number of bytes written.
    pub fn serialize_into(&self, dst: &mut [u8]) -> Result<usize> {
        let size = self.size();
        if dst.len() < size {
            return Err(CodecError::DestinationTooSmall {
                needed: size,
                available: dst.len(),
            });
        }
        let mut buf = &mut dst[..size];
        buf.put_slice(BUNDLE_HEADER);
        buf.put_u64(self.time_tag.raw());
        buf.put_slice(&self.elements);
        Ok(size)
    }

    /// Parse a serialized bundle. Elements are validated as they are read.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let (time_tag, stream) = split_header(bytes)?;
        let mut bundle = Self::new(time_tag);
        bundle
            .elements
            .extend_from_slice(stream)
            .map_err(|()| CodecError::PacketTooLarge {
                size: bytes.len(),
                max: MAX_BUNDLE_SIZE,
            })?;
        Ok(bundle)
    }

    /// True while at least one more size prefix can be read.
    pub fn is_element_available(&self) -> bool {
        self.cursor + SIZE_PREFIX <= self.elements.len()
    }

    /// Read the next element. A malformed size prefix leaves the cursor
    /// where it was.
    pub fn next_element(&mut self) -> Result<BundleElement<'_>> {
        let (range, next) = read_element(&self.elements, self.cursor)?;
        self.cursor = next;
        Ok(BundleElement {
            offset: range.start,
            bytes: &self.elements[range],
        })
    }

    /// Move the cursor back to the first element.
    pub fn rewind_elements(&mut self) {
        self.cursor = 0;
    }

    /// Iterate over all elements without moving the cursor.
    ///
    /// Stops after yielding the first error.
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            stream: &self.elements,
            cursor: 0,
            failed: false,
        }
    }
}

impl Contents for Bundle {
    fn size(&self) -> usize {
        Bundle::size(self)
    }

    fn serialize_into(&self, dst: &mut [u8]) -> Result<usize> {
        Bundle::serialize_into(self, dst)
    }
}

/// Iterator returned by [`Bundle::elements`].
#[derive(Debug, Clone)]
pub struct Elements<'b> {
    stream: &'b [u8],
    cursor: usize,
    failed: bool,
}

impl<'b> Iterator for Elements<'b> {
    type Item = Result<BundleElement<'b>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor + SIZE_PREFIX > self.stream.len() {
            return None;
        }
        match read_element(self.stream, self.cursor) {
            Ok((range, next)) => {
                self.cursor = next;
                Some(Ok(BundleElement {
                    offset: range.start,
                    bytes: &self.stream[range],
                }))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Elements<'_> {}

/// Validate a bundle's framing and split it into time tag and element stream.
pub(crate) fn split_header(bytes: &[u8]) -> Result<(TimeTag, &[u8])> {
    let size = bytes.len();
    if size % 4 != 0 {
        return Err(CodecError::Malformed("bundle size is not a multiple of 4"));
    }
    if size < MIN_BUNDLE_SIZE {
        return Err(CodecError::Malformed("bundle shorter than header and time tag"));
    }
    if size > MAX_BUNDLE_SIZE {
        return Err(CodecError::PacketTooLarge {
            size,
            max: MAX_BUNDLE_SIZE,
        });
    }
    if &bytes[..BUNDLE_HEADER.len()] != BUNDLE_HEADER {
        return Err(CodecError::Malformed("missing #bundle header"));
    }
    let mut header = &bytes[BUNDLE_HEADER.len()..MIN_BUNDLE_SIZE];
    let time_tag = TimeTag::from_raw(header.get_u64());
    Ok((time_tag, &bytes[MIN_BUNDLE_SIZE..]))
}

/// Read the element whose size prefix starts at `cursor`.
///
/// Returns the range of the element contents and the cursor of the next one.
pub(crate) fn read_element(stream: &[u8], cursor: usize) -> Result<(Range<usize>, usize)> {
    let remaining = stream.len().saturating_sub(cursor);
    if remaining < SIZE_PREFIX {
        return Err(CodecError::Truncated {
            needed: SIZE_PREFIX,
            remaining,
        });
    }
    let mut prefix = &stream[cursor..cursor + SIZE_PREFIX];
    let size = prefix.get_i32();
    if size < 0 {
        return Err(CodecError::Malformed("negative bundle element size"));
    }
    let size = size as usize;
    if size % 4 != 0 {
        return Err(CodecError::Malformed("bundle element size is not a multiple of 4"));
    }
    let start = cursor + SIZE_PREFIX;
    if size > stream.len() - start {
        return Err(CodecError::Malformed("bundle element exceeds bundle"));
    }
    Ok((start..start + size, start + size))
}
