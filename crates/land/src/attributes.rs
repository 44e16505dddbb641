use atlantis_common::ether::packing::PackedField;
use alloy::primitives::U256;

/// Where one attribute lives inside the packed land attribute word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    /// Human-readable field name, used in logs.
    pub name: &'static str,
    /// Bit offset of the field's least significant bit.
    pub offset: usize,
    /// Number of bits reserved for the field.
    pub width: usize,
}

impl FieldLayout {
    const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self { name, offset, width }
    }

    /// Place `value` into this slot.
    pub fn field(&self, value: u64) -> PackedField {
        PackedField::new(U256::from(value), self.offset, self.width)
    }
}

pub(crate) const GOLD_RATE: FieldLayout = FieldLayout::new("gold", 0, 16);
pub(crate) const WOOD_RATE: FieldLayout = FieldLayout::new("wood", 16, 16);
pub(crate) const WATER_RATE: FieldLayout = FieldLayout::new("water", 32, 16);
pub(crate) const FIRE_RATE: FieldLayout = FieldLayout::new("fire", 48, 16);
pub(crate) const SOIL_RATE: FieldLayout = FieldLayout::new("soil", 64, 16);
pub(crate) const IS_RESERVED: FieldLayout = FieldLayout::new("reserved", 80, 1);
pub(crate) const IS_SPECIAL: FieldLayout = FieldLayout::new("special", 81, 2);
pub(crate) const HAS_BOX: FieldLayout = FieldLayout::new("box", 83, 1);

/// The packed land attribute word, lowest bits first.
pub const LAND_ATTRIBUTE_LAYOUT: [FieldLayout; 8] =
    [GOLD_RATE, WOOD_RATE, WATER_RATE, FIRE_RATE, SOIL_RATE, IS_RESERVED, IS_SPECIAL, HAS_BOX];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_contiguous_and_disjoint() {
        let mut next = 0;
        for slot in LAND_ATTRIBUTE_LAYOUT {
            assert_eq!(slot.offset, next, "{} should start at bit {}", slot.name, next);
            next = slot.offset + slot.width;
        }
        assert!(next <= 256);
    }
}
