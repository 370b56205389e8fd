pub mod color;
pub mod config;
pub mod gradient;
pub mod logger;
pub mod png_writer;

pub use crate::color::Color;
pub use crate::png_writer::{write_png, PngWriteError};
