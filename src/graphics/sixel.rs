//! Minimal sixel encoder.
//!
//! Colors are quantized to a fixed 6x6x6 cube so the palette never needs to
//! be computed per image. Pixels with alpha below half are left unpainted
//! (`P2 = 1`), which lets the cell border and background show through.

use super::image::IconImage;

const LEVELS: u32 = 6;
const ALPHA_CUTOFF: u8 = 128;

/// Palette index for an opaque RGB color.
fn quantize(r: u8, g: u8, b: u8) -> u16 {
    let level = |v: u8| (v as u32 * (LEVELS - 1) + 127) / 255;
    (level(r) * LEVELS * LEVELS + level(g) * LEVELS + level(b)) as u16
}

/// Palette entry as sixel RGB percentages.
fn palette_rgb(index: u16) -> (u32, u32, u32) {
    let index = index as u32;
    let pct = |level: u32| level * 100 / (LEVELS - 1);
    (
        pct(index / (LEVELS * LEVELS)),
        pct(index / LEVELS % LEVELS),
        pct(index % LEVELS),
    )
}

pub fn encode(image: &IconImage) -> String {
    let (w, h) = (image.width as usize, image.height as usize);
    let indices: Vec<Option<u16>> = image
        .pixels
        .chunks_exact(4)
        .map(|p| (p[3] >= ALPHA_CUTOFF).then(|| quantize(p[0], p[1], p[2])))
        .collect();

    let mut out = String::with_capacity(w * h / 2);
    out.push_str("\x1bP0;1;0q");
    out.push_str(&format!("\"1;1;{w};{h}"));

    let mut used: Vec<u16> = indices.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();
    for &color in &used {
        let (r, g, b) = palette_rgb(color);
        out.push_str(&format!("#{color};2;{r};{g};{b}"));
    }

    for band_top in (0..h).step_by(6) {
        if band_top > 0 {
            out.push('-');
        }
        let band_rows = (h - band_top).min(6);
        let band = |x: usize, dy: usize| indices.get((band_top + dy) * w + x).copied().flatten();

        let mut colors: Vec<u16> = (0..band_rows)
            .flat_map(|dy| (0..w).filter_map(move |x| band(x, dy)))
            .collect();
        colors.sort_unstable();
        colors.dedup();

        for (i, &color) in colors.iter().enumerate() {
            if i > 0 {
                out.push('$');
            }
            out.push_str(&format!("#{color}"));
            let mut run = Run::default();
            for x in 0..w {
                let bits = (0..band_rows)
                    .filter(|&dy| band(x, dy) == Some(color))
                    .fold(0u8, |acc, dy| acc | (1 << dy));
                run.push(&mut out, (63 + bits) as char);
            }
            run.flush(&mut out);
        }
    }

    out.push_str("\x1b\\");
    out
}

/// Run-length state for one sixel row.
#[derive(Default)]
struct Run {
    ch: Option<char>,
    len: usize,
}

impl Run {
    fn push(&mut self, out: &mut String, ch: char) {
        if self.ch == Some(ch) {
            self.len += 1;
            return;
        }
        self.flush(out);
        self.ch = Some(ch);
        self.len = 1;
    }

    fn flush(&mut self, out: &mut String) {
        let Some(ch) = self.ch.take() else {
            return;
        };
        if self.len > 3 {
            out.push_str(&format!("!{}{}", self.len, ch));
        } else {
            for _ in 0..self.len {
                out.push(ch);
            }
        }
        self.len = 0;
    }
}
