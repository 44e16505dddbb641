//! Bit-packing of narrow fields into a single 256-bit word.

use alloy::primitives::U256;

use crate::Error;

/// One field to pack: `value` placed at `offset`, occupying `width` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedField {
    /// The field value. Must fit within `width` bits.
    pub value: U256,
    /// Bit offset of the field's least significant bit.
    pub offset: usize,
    /// Number of bits reserved for the field.
    pub width: usize,
}

impl PackedField {
    /// Create a new field.
    pub fn new(value: impl Into<U256>, offset: usize, width: usize) -> Self {
        Self { value: value.into(), offset, width }
    }

    /// The field's bit mask, already shifted into position.
    fn mask(&self) -> Result<U256, Error> {
        let end = self.offset.checked_add(self.width);
        if self.width == 0 || end.map_or(true, |end| end > 256) {
            return Err(Error::FieldOutOfBounds { offset: self.offset, width: self.width });
        }

        let unshifted = if self.width == 256 {
            U256::MAX
        } else {
            (U256::from(1u64) << self.width) - U256::from(1u64)
        };
        if self.value > unshifted {
            return Err(Error::FieldOverflow {
                value: self.value.to_string(),
                offset: self.offset,
                width: self.width,
            });
        }

        Ok(unshifted << self.offset)
    }
}

/// OR every field's value into its bit range.
///
/// Fields must fit their width and must not share bits, so the result does not depend on the
/// order of `fields`.
///
/// ```
/// use alloy::primitives::U256;
/// use atlantis_common::ether::packing::{pack_attributes, PackedField};
///
/// let packed = pack_attributes(&[PackedField::new(U256::from(1u64), 0, 16), PackedField::new(U256::from(1u64), 16, 16)])
///     .expect("disjoint fields");
/// assert_eq!(packed, U256::from(0x0001_0001u64));
/// ```
pub fn pack_attributes(fields: &[PackedField]) -> Result<U256, Error> {
    let mut packed = U256::ZERO;
    let mut claimed: Vec<(usize, U256)> = Vec::with_capacity(fields.len());

    for field in fields {
        let mask = field.mask()?;

        if let Some((other, _)) = claimed.iter().find(|(_, taken)| *taken & mask != U256::ZERO) {
            return Err(Error::FieldOverlap(*other, field.offset));
        }
        claimed.push((field.offset, mask));

        packed |= field.value << field.offset;
    }

    Ok(packed)
}

/// Read back the `width`-bit field stored at `offset`.
pub fn unpack_field(packed: U256, offset: usize, width: usize) -> Result<U256, Error> {
    let mask = PackedField::new(U256::ZERO, offset, width).mask()?;
    Ok((packed & mask) >> offset)
}
