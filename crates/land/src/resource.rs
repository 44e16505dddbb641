use alloy::primitives::U256;
use atlantis_common::{
    ether::packing::{pack_attributes, PackedField},
    utils::io::file::read_file,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    attributes::{
        FIRE_RATE, GOLD_RATE, HAS_BOX, IS_RESERVED, IS_SPECIAL, SOIL_RATE, WATER_RATE, WOOD_RATE,
    },
    Coordinate, Error, IgnoreList, SkipReason,
};

/// One parcel's entry in the resource file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRecord {
    /// 0 for an ordinary parcel; 1 or 2 for parcels held back from genesis.
    #[serde(default)]
    pub is_special: u64,
    /// Reserved flag (0/1).
    #[serde(default)]
    pub is_reserved: u64,
    /// Whether the parcel carries a treasure box (0/1).
    #[serde(default)]
    pub has_box: u64,
    /// Gold production rate.
    pub gold: u64,
    /// Wood production rate.
    pub wood: u64,
    /// Water production rate.
    pub water: u64,
    /// Fire production rate.
    pub fire: u64,
    /// Soil production rate.
    #[serde(alias = "soil")]
    pub earth: u64,
}

impl LandRecord {
    /// The record's `(value, offset, width)` fields in land attribute layout order.
    pub fn attributes(&self) -> [PackedField; 8] {
        [
            GOLD_RATE.field(self.gold),
            WOOD_RATE.field(self.wood),
            WATER_RATE.field(self.water),
            FIRE_RATE.field(self.fire),
            SOIL_RATE.field(self.earth),
            IS_RESERVED.field(self.is_reserved),
            IS_SPECIAL.field(self.is_special),
            HAS_BOX.field(self.has_box),
        ]
    }

    /// Pack the record into a single attribute word.
    pub fn pack(&self) -> Result<U256, Error> {
        Ok(pack_attributes(&self.attributes())?)
    }

    /// Why this parcel must not enter a genesis batch, if at all.
    ///
    /// Special parcels are reported as [`SkipReason::Reserved`] even when they are also on the
    /// ignore list.
    pub fn skip_reason(&self, coordinate: Coordinate, ignore: &IgnoreList) -> Option<SkipReason> {
        if self.is_special != 0 {
            return Some(SkipReason::Reserved { is_special: self.is_special });
        }
        if ignore.contains(coordinate) {
            return Some(SkipReason::Ignored);
        }
        None
    }
}

/// Parse the JSON resource list.
pub fn parse_resources(contents: &str) -> Result<Vec<LandRecord>, Error> {
    serde_json::from_str(contents)
        .map_err(|e| Error::ResourceFile(format!("failed to parse resource list: {e}")))
}

/// Read the ordered resource list at `path`.
pub fn load_resources(path: &str) -> Result<Vec<LandRecord>, Error> {
    let contents = read_file(path).map_err(|e| Error::ResourceFile(e.to_string()))?;
    let records = parse_resources(&contents)?;
    debug!("loaded {} land records from '{}'", records.len(), path);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlantis_common::ether::packing::unpack_field;

    const RESOURCES: &str = r#"[
        {"isSpecial": 0, "gold": 3, "wood": 5, "water": 7, "fire": 11, "earth": 13},
        {"isSpecial": 2, "gold": 0, "wood": 0, "water": 0, "fire": 0, "earth": 0, "extra": "ignored"},
        {"isSpecial": 0, "isReserved": 1, "hasBox": 1, "gold": 1, "wood": 1, "water": 1, "fire": 1, "soil": 65535}
    ]"#;

    #[test]
    fn test_parse_resources() {
        let records = parse_resources(RESOURCES).expect("valid resource list");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].earth, 13);
        assert_eq!(records[1].is_special, 2);
        assert_eq!(records[2].earth, 65535);
        assert_eq!(records[2].has_box, 1);
    }

    #[test]
    fn test_parse_resources_rejects_missing_rates() {
        assert!(matches!(
            parse_resources(r#"[{"isSpecial": 0, "gold": 1}]"#),
            Err(Error::ResourceFile(_))
        ));
    }

    #[test]
    fn test_pack_record() {
        let records = parse_resources(RESOURCES).expect("valid resource list");
        let packed = records[2].pack().expect("fits layout");

        assert_eq!(unpack_field(packed, 0, 16).expect("ok"), U256::from(1u64));
        assert_eq!(unpack_field(packed, 64, 16).expect("ok"), U256::from(65535u64));
        assert_eq!(unpack_field(packed, 80, 1).expect("ok"), U256::from(1u64));
        assert_eq!(unpack_field(packed, 81, 2).expect("ok"), U256::ZERO);
        assert_eq!(unpack_field(packed, 83, 1).expect("ok"), U256::from(1u64));
    }

    #[test]
    fn test_pack_record_exact_value() {
        let record =
            LandRecord { gold: 1, wood: 2, water: 3, fire: 4, earth: 5, ..Default::default() };
        let expected = U256::from(1u64) |
            U256::from(2u64) << 16 |
            U256::from(3u64) << 32 |
            U256::from(4u64) << 48 |
            U256::from(5u64) << 64;

        assert_eq!(record.pack().expect("fits layout"), expected);
    }

    #[test]
    fn test_pack_record_overflow() {
        let record = LandRecord { gold: 70_000, ..Default::default() };
        assert!(matches!(
            record.pack(),
            Err(Error::Common(atlantis_common::Error::FieldOverflow { offset: 0, .. }))
        ));
    }

    #[test]
    fn test_skip_reason() {
        let ignore = IgnoreList::parse("-100,10").expect("valid ignore list");
        let ordinary = LandRecord::default();
        let special = LandRecord { is_special: 1, ..Default::default() };

        assert_eq!(ordinary.skip_reason(Coordinate::new(-101, 10), &ignore), None);
        assert_eq!(
            ordinary.skip_reason(Coordinate::new(-100, 10), &ignore),
            Some(SkipReason::Ignored)
        );
        assert_eq!(
            special.skip_reason(Coordinate::new(-100, 10), &ignore),
            Some(SkipReason::Reserved { is_special: 1 })
        );
    }
}
