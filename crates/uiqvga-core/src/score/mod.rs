// crates/uiqvga-core/src/score/mod.rs
//
// Artifact cost of a rendered candidate. Lower is better.
// Integer sums, one division per metric, so a uniform image is exactly 0.

pub mod sobel;

use crate::color::RenderedImage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    pub seam: f64,
    pub comb: f64,
    pub edge: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        crate::params::defaults::default_weights()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreMetrics {
    /// Mean |left - right| across internal tile-column boundaries.
    pub seam_cost: f64,
    /// Mean |even row - following odd row|.
    pub comb_cost: f64,
    /// Mean Sobel magnitude of the luma plane.
    pub edge_cost: f64,
}

#[inline]
fn abs_diff_sum(a: &[u8], b: &[u8]) -> u64 {
    a.iter().zip(b).map(|(&x, &y)| x.abs_diff(y) as u64).sum()
}

/// Averaged over every internal boundary `x = k * tile_size`; 0 without any.
pub fn seam_cost(image: &RenderedImage, tile_size: usize, grid: usize) -> f64 {
    let w = image.width();
    let h = image.height();
    let boundaries: Vec<usize> = (1..grid).map(|k| k * tile_size).filter(|&x| x > 0 && x < w).collect();
    if boundaries.is_empty() || h == 0 {
        return 0.0;
    }

    let per_boundary = (h * 3) as f64;
    let mut total = 0.0;
    for &x in &boundaries {
        let mut sum = 0u64;
        for y in 0..h {
            let row = image.row(y);
            sum += abs_diff_sum(&row[(x - 1) * 3..x * 3], &row[x * 3..(x + 1) * 3]);
        }
        total += sum as f64 / per_boundary;
    }
    total / boundaries.len() as f64
}

/// Row pairs (0,1), (2,3), ...; a trailing unpaired row is ignored.
pub fn comb_cost(image: &RenderedImage) -> f64 {
    let pairs = image.height() / 2;
    if pairs == 0 || image.width() == 0 {
        return 0.0;
    }
    let mut sum = 0u64;
    for i in 0..pairs {
        sum += abs_diff_sum(image.row(2 * i), image.row(2 * i + 1));
    }
    sum as f64 / (pairs * image.width() * 3) as f64
}

pub fn compute_metrics(image: &RenderedImage, tile_size: usize, grid: usize) -> ScoreMetrics {
    ScoreMetrics {
        seam_cost: seam_cost(image, tile_size, grid),
        comb_cost: comb_cost(image),
        edge_cost: sobel::edge_cost(image),
    }
}

pub fn combine_score(m: &ScoreMetrics, w: &ScoreWeights) -> f64 {
    w.seam * m.seam_cost + w.comb * m.comb_cost + w.edge * m.edge_cost
}
