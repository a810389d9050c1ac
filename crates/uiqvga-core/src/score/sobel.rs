// crates/uiqvga-core/src/score/sobel.rs

use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::color::RenderedImage;

/// Integer luma, BT.601 weights in 8.8 fixed point.
pub fn luma_plane(image: &RenderedImage) -> GrayImage {
    let (w, h) = (image.width() as u32, image.height() as u32);
    let mut l8 = GrayImage::new(w, h);
    for (p, out) in image.as_bytes().chunks_exact(3).zip(l8.pixels_mut()) {
        let y = (77 * p[0] as u32 + 150 * p[1] as u32 + 29 * p[2] as u32) >> 8;
        *out = Luma([y as u8]);
    }
    l8
}

/// 3x3 Sobel gradient magnitude, row-major.
pub fn sobel_magnitude(gray: &GrayImage) -> Vec<f64> {
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    gx.pixels()
        .zip(gy.pixels())
        .map(|(sx, sy)| {
            let (sx, sy) = (sx.0[0] as f64, sy.0[0] as f64);
            (sx * sx + sy * sy).sqrt()
        })
        .collect()
}

/// Mean Sobel magnitude of the luma plane.
pub fn edge_cost(image: &RenderedImage) -> f64 {
    if image.width() == 0 || image.height() == 0 {
        return 0.0;
    }
    let mag = sobel_magnitude(&luma_plane(image));
    mag.iter().sum::<f64>() / mag.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(w: u32, h: u32, f: impl Fn(u32, u32) -> u8) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([f(x, y)]))
    }

    #[test]
    fn flat_plane_has_no_gradient() {
        let gray = plane(4, 4, |_, _| 42);
        assert!(sobel_magnitude(&gray).iter().all(|&m| m == 0.0));
    }

    #[test]
    fn vertical_edge_responds_only_near_the_edge() {
        // columns 0..4 dark, 4..8 bright
        let gray = plane(8, 4, |x, _| if x < 4 { 0 } else { 10 });
        let mag = sobel_magnitude(&gray);
        let row1 = &mag[8..16];
        assert!(row1[3] > 0.0);
        assert!(row1[4] > 0.0);
        assert_eq!(row1[1], 0.0);
        assert_eq!(row1[6], 0.0);
    }

    #[test]
    fn luma_weights_sum_to_full_scale() {
        let img = RenderedImage::uniform(2, 2, [255, 255, 255]);
        assert!(luma_plane(&img).pixels().all(|p| p.0[0] == 255));
        let img = RenderedImage::uniform(2, 2, [0, 0, 0]);
        assert!(luma_plane(&img).pixels().all(|p| p.0[0] == 0));
    }
}
