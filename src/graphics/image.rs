//! Icon decoding, placeholders and scaling.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::core::config::AppEntry;

/// Side length of the generated placeholder icon.
pub const PLACEHOLDER_SIZE: u32 = 64;

/// Decoded image data (RGBA pixels).
#[derive(Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel.
    pub pixels: Vec<u8>,
}

// Pixel dumps make action logs unreadable.
impl fmt::Debug for IconImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IconImage({}x{})", self.width, self.height)
    }
}

impl IconImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y * self.width + x) as usize * 4;
        match self.pixels.get(idx..idx + 4) {
            Some(p) => [p[0], p[1], p[2], p[3]],
            None => [0, 0, 0, 0],
        }
    }
}

#[derive(Debug)]
pub enum ImageError {
    Io(std::io::Error),
    Decode(png::DecodingError),
    Unsupported(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(e) => write!(f, "icon I/O error: {e}"),
            ImageError::Decode(e) => write!(f, "icon decode error: {e}"),
            ImageError::Unsupported(what) => write!(f, "unsupported icon: {what}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<std::io::Error> for ImageError {
    fn from(e: std::io::Error) -> Self {
        ImageError::Io(e)
    }
}

impl From<png::DecodingError> for ImageError {
    fn from(e: png::DecodingError) -> Self {
        ImageError::Decode(e)
    }
}

/// Load a PNG icon from disk.
pub fn load_image(path: &Path) -> Result<IconImage, ImageError> {
    let file = File::open(path)?;
    decode_png(BufReader::new(file))
}

/// Decode a PNG stream to 8-bit RGBA.
pub fn decode_png<R: Read>(reader: R) -> Result<IconImage, ImageError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    let pixels: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => bytes.to_vec(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(ImageError::Unsupported("indexed color after expansion".to_string()));
        }
    };

    if info.width == 0 || info.height == 0 {
        return Err(ImageError::Unsupported("empty image".to_string()));
    }

    Ok(IconImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// A rounded grey tile, used when an app has no usable icon.
pub fn placeholder(width: u32, height: u32) -> IconImage {
    let w = width.max(1);
    let h = height.max(1);
    let radius = (w.min(h) / 6) as i64;
    let mut pixels = vec![0u8; (w * h * 4) as usize];

    for y in 0..h {
        for x in 0..w {
            if outside_rounded_corner(x as i64, y as i64, w as i64, h as i64, radius) {
                continue;
            }
            let edge = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let shade = if edge { 140 } else { 90 };
            let idx = ((y * w + x) * 4) as usize;
            pixels[idx..idx + 4].copy_from_slice(&[shade, shade, shade, 255]);
        }
    }

    IconImage {
        width: w,
        height: h,
        pixels,
    }
}

fn outside_rounded_corner(x: i64, y: i64, w: i64, h: i64, r: i64) -> bool {
    if r == 0 {
        return false;
    }
    let cx = if x < r {
        r
    } else if x >= w - r {
        w - r - 1
    } else {
        return false;
    };
    let cy = if y < r {
        r
    } else if y >= h - r {
        h - r - 1
    } else {
        return false;
    };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy > r * r
}

/// Load every app's icon, in order. Never returns fewer images than apps:
/// anything missing or broken becomes a placeholder.
pub fn load_icons(apps: &[AppEntry]) -> Vec<IconImage> {
    apps.iter()
        .map(|app| match &app.icon {
            Some(path) => match load_image(path) {
                Ok(image) => {
                    debug!(
                        "Loaded icon for '{}' ({}x{})",
                        app.name, image.width, image.height
                    );
                    image
                }
                Err(e) => {
                    warn!("Icon for '{}' at {}: {}", app.name, path.display(), e);
                    placeholder(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE)
                }
            },
            None => placeholder(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
        })
        .collect()
}

/// Scale to fit within the box, preserving aspect ratio. Scales up as well
/// as down so small icons fill their cell.
pub fn scale_to_fit(image: &IconImage, max_width: u32, max_height: u32) -> IconImage {
    if max_width == 0 || max_height == 0 {
        return image.clone();
    }

    let scale_x = max_width as f64 / image.width as f64;
    let scale_y = max_height as f64 / image.height as f64;
    let scale = scale_x.min(scale_y);

    let new_w = (image.width as f64 * scale) as u32;
    let new_h = (image.height as f64 * scale) as u32;

    bilinear_scale(image, new_w.max(1), new_h.max(1))
}

/// Scale image to exact dimensions using bilinear interpolation.
pub fn bilinear_scale(image: &IconImage, new_width: u32, new_height: u32) -> IconImage {
    if new_width == 0 || new_height == 0 {
        return image.clone();
    }
    if new_width == image.width && new_height == image.height {
        return image.clone();
    }

    let mut pixels = vec![0u8; (new_width * new_height * 4) as usize];
    let x_ratio = image.width as f32 / new_width as f32;
    let y_ratio = image.height as f32 / new_height as f32;

    for y in 0..new_height {
        for x in 0..new_width {
            let src_x = x as f32 * x_ratio;
            let src_y = y as f32 * y_ratio;

            let x0 = (src_x as u32).min(image.width - 1);
            let y0 = (src_y as u32).min(image.height - 1);
            let x1 = (x0 + 1).min(image.width - 1);
            let y1 = (y0 + 1).min(image.height - 1);

            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            let (p00, p10) = (image.pixel(x0, y0), image.pixel(x1, y0));
            let (p01, p11) = (image.pixel(x0, y1), image.pixel(x1, y1));

            let dst = (y * new_width + x) as usize * 4;
            for c in 0..4 {
                let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
                let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
                pixels[dst + c] = (top * (1.0 - fy) + bottom * fy).round() as u8;
            }
        }
    }

    IconImage {
        width: new_width,
        height: new_height,
        pixels,
    }
}
