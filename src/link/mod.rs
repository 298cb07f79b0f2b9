//! Inter-device link protocol
//!
//! Both devices must agree on the codec table byte for byte; it is the
//! only contract between them.

pub mod codec;

pub use codec::{CodecError, LinkSymbol, Trajectory, WIN_BYTE, decode, encode};
