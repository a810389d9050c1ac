// crates/uiqvga-core/src/search/driver.rs
//
// Render + score every candidate of a SearchSpace and keep the best N.
// Each evaluation is pure; workers fold into private TopN keepers that are
// merged at the end, so the ranking does not depend on scheduling.

use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::canvas::tiles::{assemble, TileOrder};
use crate::canvas::{words_from_le_bytes, Canvas, Geometry};
use crate::color::{render_canvas, RenderedImage};
use crate::decode::pipeline::decode_assembled;
use crate::error::{DecodeError, Result};
use crate::params::defaults;
use crate::params::ParameterSet;
use crate::score::{combine_score, compute_metrics, ScoreMetrics, ScoreWeights};
use crate::search::space::SearchSpace;
use crate::search::topn::TopN;
use crate::validate::validate_space;

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub top_n: usize,
    pub weights: ScoreWeights,
    /// Upper bound on the unfiltered product; larger spaces are refused.
    pub max_candidates: u64,
    /// Worker count. `None` uses the global rayon pool, `Some(1)` runs inline.
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_n: defaults::TOP_N,
            weights: defaults::default_weights(),
            max_candidates: defaults::MAX_CANDIDATES,
            threads: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CandidateResult {
    /// Position in the enumeration; breaks score ties.
    pub ordinal: u64,
    pub params: ParameterSet,
    pub metrics: ScoreMetrics,
    pub score: f64,
    pub image: RenderedImage,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Best first.
    pub ranked: Vec<CandidateResult>,
    pub evaluated: u64,
    pub raw_combinations: u128,
    pub elapsed_ms: u128,
}

type Keeper = TopN<CandidateResult>;

pub struct Searcher {
    geometry: Geometry,
    words: Vec<u16>,
}

impl Searcher {
    /// Fails up front when the buffer cannot fill the geometry.
    pub fn new(words: &[u16], geometry: Geometry) -> Result<Self> {
        let need = geometry.word_count();
        if words.len() < need {
            return Err(DecodeError::BufferTooSmall {
                expected: geometry.byte_count(),
                actual: words.len() * 2,
            });
        }
        Ok(Self {
            geometry,
            words: words[..need].to_vec(),
        })
    }

    pub fn from_le_bytes(bytes: &[u8], geometry: Geometry) -> Result<Self> {
        let words = words_from_le_bytes(bytes, geometry)?;
        Ok(Self { geometry, words })
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Render and score one parameter set outside of a sweep.
    pub fn evaluate(&self, params: &ParameterSet, weights: &ScoreWeights) -> Result<CandidateResult> {
        let assembled = assemble(&self.words, self.geometry, params.tile_order)?;
        self.evaluate_assembled(&assembled, 0, params.clone(), weights)
    }

    fn evaluate_assembled(
        &self,
        assembled: &Canvas,
        ordinal: u64,
        params: ParameterSet,
        weights: &ScoreWeights,
    ) -> Result<CandidateResult> {
        let canvas = decode_assembled(assembled, &params)?;
        let image = render_canvas(&canvas, params.byte_swap, params.channel_order);
        let metrics = compute_metrics(&image, self.geometry.tile_size, self.geometry.grid);
        let score = combine_score(&metrics, weights);
        trace!(ordinal, score, tag = %params, "candidate");
        Ok(CandidateResult {
            ordinal,
            params,
            metrics,
            score,
            image,
        })
    }

    fn keep(
        &self,
        mut keeper: Keeper,
        assembled: &HashMap<TileOrder, Canvas>,
        ordinal: u64,
        params: ParameterSet,
        weights: &ScoreWeights,
    ) -> Result<Keeper> {
        let base = assembled
            .get(&params.tile_order)
            .ok_or_else(|| DecodeError::InvalidGeometry(format!("tile order {:?} not assembled", params.tile_order)))?;
        let r = self.evaluate_assembled(base, ordinal, params, weights)?;
        keeper.offer(r.score, r.ordinal, r);
        Ok(keeper)
    }

    pub fn run(&self, space: &SearchSpace, config: &SearchConfig) -> Result<SearchReport> {
        let grid = self.geometry.grid;
        let raw = validate_space(space, self.geometry, config.max_candidates)?;

        info!(
            tile_size = self.geometry.tile_size,
            grid,
            raw_combinations = raw as u64,
            valid = space.valid_combinations(grid) as u64,
            top_n = config.top_n,
            "search start"
        );

        let t0 = Instant::now();

        let mut assembled = HashMap::new();
        for &order in &space.tile_orders {
            if !assembled.contains_key(&order) {
                assembled.insert(order, assemble(&self.words, self.geometry, order)?);
            }
        }

        let (keeper, evaluated) = match config.threads {
            Some(1) => self.sweep_inline(space, config, &assembled)?,
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| DecodeError::ThreadPool(e.to_string()))?;
                pool.install(|| self.sweep_parallel(space, config, &assembled, raw as u64))?
            }
            None => self.sweep_parallel(space, config, &assembled, raw as u64)?,
        };

        let ranked: Vec<CandidateResult> = keeper.into_sorted().into_iter().map(|(_, _, r)| r).collect();
        let elapsed_ms = t0.elapsed().as_millis();

        if let Some(best) = ranked.first() {
            info!(evaluated, elapsed_ms = elapsed_ms as u64, best_score = best.score, best = %best.params, "search done");
        } else {
            info!(evaluated, elapsed_ms = elapsed_ms as u64, "search done: no candidates");
        }

        Ok(SearchReport {
            ranked,
            evaluated,
            raw_combinations: raw,
            elapsed_ms,
        })
    }

    fn sweep_inline(
        &self,
        space: &SearchSpace,
        config: &SearchConfig,
        assembled: &HashMap<TileOrder, Canvas>,
    ) -> Result<(Keeper, u64)> {
        debug!("sweep: inline");
        let mut keeper = TopN::new(config.top_n);
        let mut evaluated = 0u64;
        for (ordinal, params) in space.candidates(self.geometry.grid) {
            keeper = self.keep(keeper, assembled, ordinal, params, &config.weights)?;
            evaluated += 1;
        }
        Ok((keeper, evaluated))
    }

    fn sweep_parallel(
        &self,
        space: &SearchSpace,
        config: &SearchConfig,
        assembled: &HashMap<TileOrder, Canvas>,
        raw: u64,
    ) -> Result<(Keeper, u64)> {
        let grid = self.geometry.grid;
        debug!(threads = rayon::current_num_threads(), "sweep: parallel");
        (0..raw)
            .into_par_iter()
            .filter_map(|i| space.candidate_at(i as u128, grid).map(|p| (i, p)))
            .try_fold(
                || (TopN::new(config.top_n), 0u64),
                |(keeper, evaluated), (ordinal, params)| {
                    let keeper = self.keep(keeper, assembled, ordinal, params, &config.weights)?;
                    Ok::<_, DecodeError>((keeper, evaluated + 1))
                },
            )
            .try_reduce(
                || (TopN::new(config.top_n), 0u64),
                |(a, na), (b, nb)| Ok((a.merge(b), na + nb)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_buffer_fails_before_search() {
        let g = Geometry::new(2, 3).unwrap();
        let err = Searcher::new(&[0u16; 35], g).err().unwrap();
        assert!(matches!(err, DecodeError::BufferTooSmall { expected: 72, actual: 70 }));
    }

    #[test]
    fn oversize_space_is_refused() {
        let g = Geometry::new(2, 3).unwrap();
        let s = Searcher::new(&[0u16; 36], g).unwrap();
        let space = defaults::default_search_space();
        let config = SearchConfig {
            max_candidates: 10,
            ..SearchConfig::default()
        };
        assert!(matches!(s.run(&space, &config), Err(DecodeError::SearchTooLarge { .. })));
    }

    #[test]
    fn top_n_larger_than_space_keeps_every_candidate() {
        let g = Geometry::new(2, 3).unwrap();
        let s = Searcher::new(&[0u16; 36], g).unwrap();
        let space = SearchSpace::single(&ParameterSet::plain(3));
        for threads in [Some(1), Some(2), None] {
            let config = SearchConfig {
                top_n: usize::MAX,
                threads,
                ..SearchConfig::default()
            };
            let report = s.run(&space, &config).unwrap();
            assert_eq!(report.evaluated, 1);
            assert_eq!(report.ranked.len(), 1);
        }
    }

    #[test]
    fn evaluate_agrees_with_sweep() {
        let g = Geometry::new(2, 3).unwrap();
        let words: Vec<u16> = (0..36u16).map(|i| i.wrapping_mul(0x9E37)).collect();
        let s = Searcher::new(&words, g).unwrap();
        let mut space = SearchSpace::single(&ParameterSet::plain(3));
        space.base_shifts = vec![0, 1];
        let weights = ScoreWeights { seam: 1.0, comb: 3.0, edge: 0.25 };
        let config = SearchConfig {
            top_n: 2,
            weights,
            threads: Some(1),
            ..SearchConfig::default()
        };
        let report = s.run(&space, &config).unwrap();
        for r in &report.ranked {
            let one = s.evaluate(&r.params, &weights).unwrap();
            assert_eq!(one.score, r.score);
            assert_eq!(one.image, r.image);
        }
    }

    #[test]
    fn flat_input_ranks_first_candidate_first() {
        let g = Geometry::new(2, 3).unwrap();
        let s = Searcher::new(&[0x1234u16; 36], g).unwrap();
        let mut space = SearchSpace::single(&ParameterSet::plain(3));
        space.base_shifts = vec![0, 1, 2];
        let config = SearchConfig {
            top_n: 2,
            threads: Some(1),
            ..SearchConfig::default()
        };
        let report = s.run(&space, &config).unwrap();
        assert_eq!(report.evaluated, 3);
        assert_eq!(report.ranked.len(), 2);
        assert!(report.ranked.iter().all(|r| r.score == 0.0));
        assert_eq!(report.ranked[0].ordinal, 0);
        assert_eq!(report.ranked[1].ordinal, 1);
    }
}
