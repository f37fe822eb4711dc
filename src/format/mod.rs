pub mod constants;
pub mod frame;
pub mod stream;
pub mod varint;

pub use constants::*;
pub use frame::{decompress_frame, is_frame, read_frame, Frame, FrameHeader, FrameWriter};
pub use stream::{encode_token, TokenReader, TokenWriter};
pub use varint::{encode_varint, read_varint, write_varint};
