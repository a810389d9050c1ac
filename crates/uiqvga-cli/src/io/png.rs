// crates/uiqvga-cli/src/io/png.rs

use anyhow::{Context, Result};
use image::RgbImage;
use uiqvga_core::RenderedImage;

pub fn save_png(path: &str, img: &RenderedImage) -> Result<()> {
    let buf = RgbImage::from_raw(img.width() as u32, img.height() as u32, img.as_bytes().to_vec())
        .ok_or_else(|| anyhow::anyhow!("rendered buffer does not match {}x{}", img.width(), img.height()))?;
    buf.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png {path}"))?;
    Ok(())
}

/// Any PNG, converted to 8-bit RGB.
pub fn load_png(path: &str) -> Result<RenderedImage> {
    let img = image::open(path).with_context(|| format!("read png {path}"))?.to_rgb8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    RenderedImage::from_raw(w, h, img.into_raw()).ok_or_else(|| anyhow::anyhow!("png {path}: bad pixel buffer"))
}
