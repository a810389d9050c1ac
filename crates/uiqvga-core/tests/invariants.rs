// crates/uiqvga-core/tests/invariants.rs

use proptest::prelude::*;

use uiqvga_core::canvas::tiles::{assemble, disassemble};
use uiqvga_core::canvas::Canvas;
use uiqvga_core::color::RenderedImage;
use uiqvga_core::decode::keystream::apply_keystream;
use uiqvga_core::score::{combine_score, compute_metrics, ScoreWeights};
use uiqvga_core::{Geometry, ParameterSet, SearchSpace, TileOrder, XorKeys, XorMode};

fn order_strategy() -> impl Strategy<Value = TileOrder> {
    prop::sample::select(TileOrder::ALL.to_vec())
}

fn mode_strategy() -> impl Strategy<Value = XorMode> {
    prop::sample::select(XorMode::ALL.to_vec())
}

proptest! {
    #[test]
    fn tile_assembly_inverts_disassembly(
        tile in 1usize..6,
        grid in 1usize..5,
        order in order_strategy(),
        seed in any::<u16>(),
    ) {
        let g = Geometry::new(tile, grid).unwrap();
        let c = Canvas::from_fn(g, |r, col| seed ^ ((r * 131 + col * 7) as u16));
        let flat = disassemble(&c, order);
        prop_assert_eq!(assemble(&flat, g, order).unwrap(), c);
    }

    #[test]
    fn keystream_is_self_inverse(
        mode in mode_strategy(),
        primary in any::<u16>(),
        secondary in any::<u16>(),
        words in prop::collection::vec(any::<u16>(), 36),
    ) {
        let g = Geometry::new(2, 3).unwrap();
        let c = Canvas::from_words(g, words).unwrap();
        let keys = XorKeys::new(primary, secondary);
        let twice = apply_keystream(&apply_keystream(&c, mode, keys), mode, keys);
        prop_assert_eq!(twice, c);
    }

    #[test]
    fn uniform_images_score_zero(
        tile in 1usize..8,
        grid in 1usize..4,
        rgb in any::<[u8; 3]>(),
    ) {
        let side = tile * grid;
        let img = RenderedImage::uniform(side, side, rgb);
        let m = compute_metrics(&img, tile, grid);
        prop_assert_eq!(m.seam_cost, 0.0);
        prop_assert_eq!(m.comb_cost, 0.0);
        prop_assert_eq!(m.edge_cost, 0.0);
        let w = ScoreWeights { seam: 2.0, comb: 0.5, edge: 1.0 };
        prop_assert_eq!(combine_score(&m, &w), 0.0);
    }
}

#[test]
fn zero_period_with_nonzero_step_never_enumerates() {
    let mut space = SearchSpace::single(&ParameterSet::plain(3));
    space.drift_periods = vec![0];
    space.drift_steps = vec![1];
    assert_eq!(space.candidates(3).count(), 0);
    assert_eq!(space.valid_combinations(3), 0);

    space.drift_steps = vec![-1, 0, 1];
    space.drift_periods = vec![0, 8];
    let got: Vec<_> = space.candidates(3).map(|(_, p)| p.drift).collect();
    assert_eq!(got.len(), 4);
    assert!(got.iter().all(|d| d.period() != 0 || d.step() == 0));
}
