mod buffer;
mod mask;

pub use buffer::MaskBuffer;
