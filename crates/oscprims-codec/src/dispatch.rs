//! Recursive delivery of every message in a packet.

use tracing::{debug, trace};

use crate::bundle::{read_element, split_header};
use crate::error::{CodecError, Result};
use crate::limits::DEFAULT_MAX_DEPTH;
use crate::message::Message;
use crate::packet::{ContentsKind, Packet};
use crate::time_tag::TimeTag;

/// Receives each message found while dispatching a packet.
///
/// `time_tag` is the time tag of the innermost enclosing bundle, or `None`
/// for a message sent on its own.
pub trait MessageHandler {
    fn handle_message(&mut self, time_tag: Option<TimeTag>, message: &mut Message);
}

impl<F> MessageHandler for F
where
    F: FnMut(Option<TimeTag>, &mut Message),
{
    fn handle_message(&mut self, time_tag: Option<TimeTag>, message: &mut Message) {
        self(time_tag, message)
    }
}

/// Walks packets and hands every leaf message to a [`MessageHandler`].
///
/// Bundle elements are visited in place; only leaf messages are copied out.
/// Nesting deeper than [`max_depth`](Dispatcher::with_max_depth) bundles is
/// rejected with [`CodecError::DepthExceeded`].
pub struct Dispatcher<'h> {
    handler: Option<&'h mut dyn MessageHandler>,
    max_depth: usize,
}

impl Default for Dispatcher<'_> {
    fn default() -> Self {
        Self {
            handler: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'h> Dispatcher<'h> {
    /// A dispatcher with no handler. Dispatching fails with
    /// [`CodecError::NoHandler`] until one is set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler<H: MessageHandler>(handler: &'h mut H) -> Self {
        Self {
            handler: Some(handler),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn set_handler<H: MessageHandler>(&mut self, handler: &'h mut H) {
        self.handler = Some(handler);
    }

    /// Limit how many bundles may enclose one another.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Deliver every message in `bytes`.
    ///
    /// Any failure aborts the walk; messages delivered before it stay
    /// delivered.
    pub fn dispatch(&mut self, bytes: &[u8]) -> Result<()> {
        let max_depth = self.max_depth;
        let handler = self
            .handler
            .as_deref_mut()
            .ok_or(CodecError::NoHandler)?;
        let result = visit(handler, bytes, None, 0, max_depth);
        if let Err(err) = &result {
            debug!(error = %err, len = bytes.len(), "dispatch aborted");
        }
        result
    }

    pub fn dispatch_packet(&mut self, packet: &Packet) -> Result<()> {
        self.dispatch(packet.as_bytes())
    }
}

fn visit(
    handler: &mut dyn MessageHandler,
    bytes: &[u8],
    time_tag: Option<TimeTag>,
    depth: usize,
    max_depth: usize,
) -> Result<()> {
    match ContentsKind::classify(bytes)? {
        ContentsKind::Message => {
            let mut message = Message::deserialize(bytes)?;
            trace!(
                address = message.address_pattern(),
                tags = message.type_tag_string(),
                depth,
                "message"
            );
            handler.handle_message(time_tag, &mut message);
            Ok(())
        }
        ContentsKind::Bundle => {
            if depth >= max_depth {
                return Err(CodecError::DepthExceeded { max: max_depth });
            }
            let (bundle_time, stream) = split_header(bytes)?;
            trace!(depth, time_tag = %bundle_time, len = stream.len(), "bundle");
            let mut cursor = 0;
            while cursor + 4 <= stream.len() {
                let (range, next) = read_element(stream, cursor)?;
                visit(handler, &stream[range], Some(bundle_time), depth + 1, max_depth)?;
                cursor = next;
            }
            Ok(())
        }
    }
}
