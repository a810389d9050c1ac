// crates/uiqvga-core/src/validate.rs

use crate::canvas::Geometry;
use crate::error::{DecodeError, Result};
use crate::params::ParameterSet;
use crate::search::space::SearchSpace;

/// A ParameterSet only makes sense against a geometry with one band per offset.
pub fn validate_params(p: &ParameterSet, geometry: Geometry) -> Result<()> {
    if p.column_offsets.len() != geometry.grid {
        return Err(DecodeError::ColumnOffsetCount {
            expected: geometry.grid,
            actual: p.column_offsets.len(),
        });
    }
    Ok(())
}

/// Non-empty axes and a product under `cap`.
pub fn validate_space(space: &SearchSpace, geometry: Geometry, cap: u64) -> Result<u128> {
    space.validate()?;
    let raw = space.raw_combinations(geometry.grid);
    if raw > cap as u128 {
        return Err(DecodeError::SearchTooLarge { combinations: raw, cap });
    }
    Ok(raw)
}
