pub mod replay;

pub use replay::{decompress, Decoder};
