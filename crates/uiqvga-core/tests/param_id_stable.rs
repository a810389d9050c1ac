// crates/uiqvga-core/tests/param_id_stable.rs

use uiqvga_core::params::format::{decode, encode};
use uiqvga_core::{DecodeError, DriftSpec, ParameterSet};

fn sample() -> ParameterSet {
    ParameterSet {
        odd_row_base_shift: 3,
        drift: DriftSpec::new(1, 32).unwrap(),
        column_offsets: vec![1, -2, 0],
        ..ParameterSet::plain(3)
    }
}

#[test]
fn param_id_is_stable_for_equal_sets() {
    assert_eq!(sample().id_16(), sample().id_16());
    assert_eq!(sample().id_hex().len(), 32);
}

#[test]
fn param_id_changes_with_any_field() {
    let base = sample().id_16();

    let mut p = sample();
    p.column_offsets[2] = 1;
    assert_ne!(p.id_16(), base);

    let mut p = sample();
    p.byte_swap = true;
    assert_ne!(p.id_16(), base);

    let mut p = sample();
    p.drift = DriftSpec::new(1, 16).unwrap();
    assert_ne!(p.id_16(), base);
}

#[test]
fn encoded_file_survives_decode() {
    let bytes = encode(&sample());
    assert_eq!(decode(&bytes).unwrap(), sample());
}

#[test]
fn corrupted_file_is_rejected() {
    let mut bytes = encode(&sample());
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x01;
    assert!(matches!(decode(&bytes), Err(DecodeError::ParamFormat(_))));

    let short = &encode(&sample())[..6];
    assert!(decode(short).is_err());
}
