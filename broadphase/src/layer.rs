use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Fixed-width layer bitset. There are exactly 32 layers; an entry whose
/// mask is empty can never be returned by a query.
///
/// Enum layers plug in through `From`: implement `From<MyLayer> for LayerMask`
/// returning the variant's bit and use the `*_layer` container methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const MAX_LAYERS: u32 = u32::BITS;

    /// Mask with only `layer` set; layers past the 32nd map to the empty mask.
    pub const fn from_layer(layer: u32) -> Self {
        match 1u32.checked_shl(layer) {
            Some(bit) => LayerMask(bit),
            None => LayerMask::NONE,
        }
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub const fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub const fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for LayerMask {
    fn from(bits: u32) -> Self {
        LayerMask(bits)
    }
}

impl From<LayerMask> for u32 {
    fn from(mask: LayerMask) -> Self {
        mask.0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        self.union(rhs)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: LayerMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LayerMask {
    type Output = LayerMask;

    fn bitand(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 & rhs.0)
    }
}
