// crates/uiqvga-core/src/params/checksum.rs
//
// Integrity trailer appended to every encoded parameter body:
// crc32 of the body, then blake3 (first 16 bytes) of body + crc.

use std::fmt::Write;

use crate::error::{DecodeError, Result};

pub const TRAILER_LEN: usize = 4 + 16;

/// Append the trailer in place.
pub fn seal(buf: &mut Vec<u8>) {
    let crc = crc32fast::hash(&buf[..]);
    buf.extend_from_slice(&crc.to_le_bytes());
    let digest = blake3::hash(&buf[..]);
    buf.extend_from_slice(&digest.as_bytes()[..16]);
}

/// Check both trailer fields and return the body they cover.
pub fn unseal(bytes: &[u8]) -> Result<&[u8]> {
    let body_len = bytes
        .len()
        .checked_sub(TRAILER_LEN)
        .ok_or_else(|| DecodeError::ParamFormat("unexpected eof".into()))?;
    let (body, trailer) = bytes.split_at(body_len);
    let (crc, digest) = trailer.split_at(4);

    if crc != &crc32fast::hash(body).to_le_bytes()[..] {
        return Err(DecodeError::ParamFormat("crc32 mismatch".into()));
    }
    if digest != &blake3::hash(&bytes[..body_len + 4]).as_bytes()[..16] {
        return Err(DecodeError::ParamFormat("blake3 mismatch".into()));
    }
    Ok(body)
}

/// The blake3 half of the trailer, which doubles as the parameter id.
pub fn sealed_id(bytes: &[u8]) -> Result<[u8; 16]> {
    bytes
        .len()
        .checked_sub(16)
        .and_then(|at| <[u8; 16]>::try_from(&bytes[at..]).ok())
        .ok_or_else(|| DecodeError::ParamFormat("encoded params too small for id".into()))
}

pub fn hex_id(id: &[u8; 16]) -> String {
    id.iter().fold(String::with_capacity(32), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}
