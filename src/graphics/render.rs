use log::debug;

use super::image::{IconImage, bilinear_scale, scale_to_fit};
use super::sixel;
use crate::core::cache::RenderedIcon;
use crate::core::geometry::PixelBox;

/// How an image is fitted to its target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Stretch to exactly the box.
    Exact,
    /// Largest size that fits inside the box without distortion.
    Contain,
}

/// Turns a source image into something the terminal can display.
pub trait IconRenderer: Send + Sync {
    fn render(&self, image: &IconImage, target: PixelBox, fit: Fit) -> RenderedIcon;
}

/// Renders icons as sixel graphics.
#[derive(Debug, Default, Clone, Copy)]
pub struct SixelRenderer;

impl IconRenderer for SixelRenderer {
    fn render(&self, image: &IconImage, target: PixelBox, fit: Fit) -> RenderedIcon {
        let scaled = match fit {
            Fit::Exact => bilinear_scale(image, target.width, target.height),
            Fit::Contain => scale_to_fit(image, target.width, target.height),
        };
        debug!(
            "Rendered {}x{} icon to {}x{} ({:?})",
            image.width, image.height, scaled.width, scaled.height, fit
        );
        RenderedIcon {
            payload: sixel::encode(&scaled),
            width_px: scaled.width,
            height_px: scaled.height,
        }
    }
}
