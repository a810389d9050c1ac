// crates/uiqvga-core/src/color/mod.rs
//
// RGB565 <-> RGB888. Integer-only; unpack floors, pack rounds, so
// pack(unpack(w)) == w for every word.

use crate::canvas::{Canvas, Geometry};
use crate::error::{DecodeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// Output (ch0, ch1, ch2) = (bits 11-15, bits 5-10, bits 0-4).
    Rgb,
    /// Output (ch2, ch1, ch0); the packing itself is unchanged.
    Bgr,
}

impl ChannelOrder {
    pub fn name(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "rgb",
            ChannelOrder::Bgr => "bgr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rgb" => Some(ChannelOrder::Rgb),
            "bgr" => Some(ChannelOrder::Bgr),
            _ => None,
        }
    }
}

#[inline]
fn expand5(v: u16) -> u8 {
    ((v as u32 * 255) / 31) as u8
}

#[inline]
fn expand6(v: u16) -> u8 {
    ((v as u32 * 255) / 63) as u8
}

#[inline]
fn narrow5(x: u8) -> u16 {
    ((x as u32 * 31 + 127) / 255) as u16
}

#[inline]
fn narrow6(x: u8) -> u16 {
    ((x as u32 * 63 + 127) / 255) as u16
}

#[inline]
pub fn unpack_rgb565(word: u16, byte_swap: bool, order: ChannelOrder) -> [u8; 3] {
    let w = if byte_swap { word.swap_bytes() } else { word };
    let ch0 = expand5((w >> 11) & 0x1F);
    let ch1 = expand6((w >> 5) & 0x3F);
    let ch2 = expand5(w & 0x1F);
    match order {
        ChannelOrder::Rgb => [ch0, ch1, ch2],
        ChannelOrder::Bgr => [ch2, ch1, ch0],
    }
}

#[inline]
pub fn pack_rgb565(rgb: [u8; 3], byte_swap: bool, order: ChannelOrder) -> u16 {
    let [ch0, ch1, ch2] = match order {
        ChannelOrder::Rgb => rgb,
        ChannelOrder::Bgr => [rgb[2], rgb[1], rgb[0]],
    };
    let w = (narrow5(ch0) << 11) | (narrow6(ch1) << 5) | narrow5(ch2);
    if byte_swap {
        w.swap_bytes()
    } else {
        w
    }
}

/// Interleaved RGB8, `width * height * 3` bytes, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RenderedImage {
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 3 {
            return None;
        }
        Some(Self { width, height, data })
    }

    /// Every pixel set to `rgb`.
    pub fn uniform(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let data = rgb.iter().copied().cycle().take(width * height * 3).collect();
        Self { width, height, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// One row as interleaved RGB bytes.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * 3;
        &self.data[y * stride..(y + 1) * stride]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

pub fn render_canvas(canvas: &Canvas, byte_swap: bool, order: ChannelOrder) -> RenderedImage {
    let side = canvas.side();
    let mut data = Vec::with_capacity(side * side * 3);
    for &w in canvas.words() {
        data.extend_from_slice(&unpack_rgb565(w, byte_swap, order));
    }
    RenderedImage { width: side, height: side, data }
}

/// Re-pack an RGB8 image into words. The image must be exactly canvas-sized.
pub fn canvas_from_image(
    image: &RenderedImage,
    geometry: Geometry,
    byte_swap: bool,
    order: ChannelOrder,
) -> Result<Canvas> {
    let side = geometry.side();
    if image.width != side || image.height != side {
        return Err(DecodeError::ImageSize {
            width: image.width as u32,
            height: image.height as u32,
            side,
        });
    }
    let words = image
        .data
        .chunks_exact(3)
        .map(|p| pack_rgb565([p[0], p[1], p[2]], byte_swap, order))
        .collect();
    Canvas::from_words(geometry, words)
}
