// crates/uiqvga-core/src/decode/keystream.rs
//
// Positional XOR keystream. XOR is its own inverse, so the same call both
// removes and re-applies the obfuscation.

use crate::canvas::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XorMode {
    /// Every word uses the primary key.
    Constant,
    /// Even rows primary, odd rows secondary.
    RowAlternating,
    /// Even columns primary, odd columns secondary.
    ColumnAlternating,
    /// Primary where (row + col) is even, secondary elsewhere.
    Checkerboard,
}

impl XorMode {
    pub const ALL: [XorMode; 4] = [
        XorMode::Constant,
        XorMode::RowAlternating,
        XorMode::ColumnAlternating,
        XorMode::Checkerboard,
    ];

    pub fn code(self) -> u8 {
        match self {
            XorMode::Constant => 0,
            XorMode::RowAlternating => 1,
            XorMode::ColumnAlternating => 2,
            XorMode::Checkerboard => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            XorMode::Constant => "const",
            XorMode::RowAlternating => "rowalt",
            XorMode::ColumnAlternating => "colalt",
            XorMode::Checkerboard => "checker",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Key for the word at (row, col).
    #[inline]
    pub fn key_at(self, keys: XorKeys, row: usize, col: usize) -> u16 {
        let primary = match self {
            XorMode::Constant => true,
            XorMode::RowAlternating => row % 2 == 0,
            XorMode::ColumnAlternating => col % 2 == 0,
            XorMode::Checkerboard => (row + col) % 2 == 0,
        };
        if primary {
            keys.primary
        } else {
            keys.secondary
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct XorKeys {
    pub primary: u16,
    pub secondary: u16,
}

impl XorKeys {
    pub const fn new(primary: u16, secondary: u16) -> Self {
        Self { primary, secondary }
    }

    /// Same key in both slots.
    pub const fn single(key: u16) -> Self {
        Self { primary: key, secondary: key }
    }
}

impl Default for XorKeys {
    fn default() -> Self {
        Self::new(0xAAAA, 0x5555)
    }
}

pub fn apply_keystream(canvas: &Canvas, mode: XorMode, keys: XorKeys) -> Canvas {
    canvas.map(|r, c, w| w ^ mode.key_at(keys, r, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Geometry;

    #[test]
    fn checkerboard_alternates_on_both_axes() {
        let keys = XorKeys::new(0xAAAA, 0x5555);
        let m = XorMode::Checkerboard;
        assert_eq!(m.key_at(keys, 0, 0), 0xAAAA);
        assert_eq!(m.key_at(keys, 0, 1), 0x5555);
        assert_eq!(m.key_at(keys, 1, 0), 0x5555);
        assert_eq!(m.key_at(keys, 1, 1), 0xAAAA);
    }

    #[test]
    fn constant_ignores_secondary() {
        let g = Geometry::new(2, 1).unwrap();
        let c = Canvas::from_fn(g, |_, _| 0);
        let x = apply_keystream(&c, XorMode::Constant, XorKeys::new(0x0F0F, 0xFFFF));
        assert!(x.words().iter().all(|&w| w == 0x0F0F));
    }
}
