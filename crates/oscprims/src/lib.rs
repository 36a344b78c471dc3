//! Open Sound Control (OSC 1.0) with fixed-capacity buffers.
//!
//! # Crate Structure
//!
//! - [`codec`]: messages, bundles, packets and the recursive dispatcher
//! - [`slip`]: SLIP framing for byte streams and serial links

/// Re-export codec types.
pub mod codec {
    pub use oscprims_codec::*;
}

/// Re-export SLIP framing types.
pub mod slip {
    pub use oscprims_slip::*;
}
