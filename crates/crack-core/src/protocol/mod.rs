//! Protocol module containing message types and the line codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_message, encode_message, read_message, write_message, CodecError};
pub use messages::*;
