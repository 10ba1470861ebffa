//! # Graphics
//!
//! Everything between an icon file on disk and bytes the terminal can paint:
//!
//! - [`image`]: PNG decoding, placeholder tiles, bilinear scaling
//! - [`sixel`]: the sixel encoder
//! - [`render`]: the `IconRenderer` seam the TUI renders through

pub mod image;
pub mod render;
pub mod sixel;

pub use image::{IconImage, ImageError, load_icons, load_image, placeholder};
pub use render::{Fit, IconRenderer, SixelRenderer};
