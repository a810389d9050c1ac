// crates/uiqvga-core/src/params/format.rs

use crate::canvas::tiles::TileOrder;
use crate::color::ChannelOrder;
use crate::decode::keystream::{XorKeys, XorMode};
use crate::decode::row_phase::{DriftSpec, RowParity};
use crate::error::{DecodeError, Result};
use crate::params::checksum::{seal, sealed_id, unseal};
use crate::params::ParameterSet;

const MAGIC: &[u8; 4] = b"UQP1";
const VERSION: u16 = 1;

/// Binary-stable parameter file.
/// Layout (little-endian):
/// MAGIC[4]
/// version:u16
/// flags:u16          bits 0-1 tile order, 2-3 xor mode, 4 byte swap, 5 bgr, 6 even parity
/// key_primary:u16 key_secondary:u16
/// base_shift:i32
/// drift_step:i32 drift_period:u32
/// offsets_len:u16
/// offsets: repeated i32
/// crc32:u32          (over everything before crc32)
/// blake3_16:[16]     (over body and crc32)
pub fn encode(p: &ParameterSet) -> Vec<u8> {
    let mut b = Vec::with_capacity(32 + 4 * p.column_offsets.len());
    b.extend_from_slice(MAGIC);
    b.extend_from_slice(&VERSION.to_le_bytes());
    b.extend_from_slice(&pack_flags(p).to_le_bytes());
    b.extend_from_slice(&p.xor_keys.primary.to_le_bytes());
    b.extend_from_slice(&p.xor_keys.secondary.to_le_bytes());
    b.extend_from_slice(&p.odd_row_base_shift.to_le_bytes());
    b.extend_from_slice(&p.drift.step().to_le_bytes());
    b.extend_from_slice(&p.drift.period().to_le_bytes());

    let n: u16 = p.column_offsets.len().min(u16::MAX as usize) as u16;
    b.extend_from_slice(&n.to_le_bytes());
    for off in p.column_offsets.iter().take(n as usize) {
        b.extend_from_slice(&off.to_le_bytes());
    }

    seal(&mut b);
    b
}

pub fn decode(bytes: &[u8]) -> Result<ParameterSet> {
    if bytes.len() < 4 || &bytes[0..4] != MAGIC {
        return Err(DecodeError::ParamFormat("bad magic".into()));
    }
    let body = unseal(bytes)?;
    let mut i = 4usize;

    let version = read_u16(body, &mut i)?;
    if version != VERSION {
        return Err(DecodeError::ParamFormat(format!("unsupported version {version}")));
    }
    let flags = read_u16(body, &mut i)?;
    let primary = read_u16(body, &mut i)?;
    let secondary = read_u16(body, &mut i)?;
    let base_shift = read_i32(body, &mut i)?;
    let step = read_i32(body, &mut i)?;
    let period = read_u32(body, &mut i)?;

    let n = read_u16(body, &mut i)? as usize;
    let mut column_offsets = Vec::with_capacity(n);
    for _ in 0..n {
        column_offsets.push(read_i32(body, &mut i)?);
    }
    if i != body.len() {
        return Err(DecodeError::ParamFormat("trailing bytes".into()));
    }

    let (tile_order, xor_mode, byte_swap, channel_order, row_parity) = unpack_flags(flags)?;
    let drift = DriftSpec::new(step, period)
        .map_err(|e| DecodeError::ParamFormat(e.to_string()))?;

    Ok(ParameterSet {
        tile_order,
        xor_mode,
        xor_keys: XorKeys::new(primary, secondary),
        byte_swap,
        channel_order,
        row_parity,
        odd_row_base_shift: base_shift,
        drift,
        column_offsets,
    })
}

/// Stable identifier: the blake3 half of the trailer `encode()` seals with.
pub fn param_id_16(p: &ParameterSet) -> [u8; 16] {
    sealed_id(&encode(p)).unwrap_or_default()
}

fn pack_flags(p: &ParameterSet) -> u16 {
    let mut f = p.tile_order.code() as u16 & 0b11;
    f |= (p.xor_mode.code() as u16 & 0b11) << 2;
    if p.byte_swap {
        f |= 1 << 4;
    }
    if p.channel_order == ChannelOrder::Bgr {
        f |= 1 << 5;
    }
    if p.row_parity == RowParity::Even {
        f |= 1 << 6;
    }
    f
}

fn unpack_flags(flags: u16) -> Result<(TileOrder, XorMode, bool, ChannelOrder, RowParity)> {
    if flags >> 7 != 0 {
        return Err(DecodeError::ParamFormat(format!("unknown flag bits {flags:#06x}")));
    }
    let order = TileOrder::from_code((flags & 0b11) as u8)
        .ok_or_else(|| DecodeError::ParamFormat("unknown tile order".into()))?;
    let mode = XorMode::from_code(((flags >> 2) & 0b11) as u8)
        .ok_or_else(|| DecodeError::ParamFormat("unknown xor mode".into()))?;
    let swap = flags & (1 << 4) != 0;
    let channel = if flags & (1 << 5) != 0 {
        ChannelOrder::Bgr
    } else {
        ChannelOrder::Rgb
    };
    let parity = if flags & (1 << 6) != 0 {
        RowParity::Even
    } else {
        RowParity::Odd
    };
    Ok((order, mode, swap, channel, parity))
}

fn need(bytes: &[u8], i: usize, n: usize) -> Result<()> {
    if bytes.len() < i + n {
        return Err(DecodeError::ParamFormat("unexpected eof".into()));
    }
    Ok(())
}

fn take<const N: usize>(bytes: &[u8], i: &mut usize) -> Result<[u8; N]> {
    need(bytes, *i, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[*i..*i + N]);
    *i += N;
    Ok(out)
}

fn read_u16(bytes: &[u8], i: &mut usize) -> Result<u16> {
    Ok(u16::from_le_bytes(take(bytes, i)?))
}

fn read_u32(bytes: &[u8], i: &mut usize) -> Result<u32> {
    Ok(u32::from_le_bytes(take(bytes, i)?))
}

fn read_i32(bytes: &[u8], i: &mut usize) -> Result<i32> {
    Ok(i32::from_le_bytes(take(bytes, i)?))
}
