//! WMO regional associations and their station index ranges

#[cfg(feature = "serde")]
use serde::Serialize;

/// WMO Regional Association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum WmoRegion {
    Antarctic,
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl WmoRegion {
    /// Region from code table 0 01 003 (the `A1` digit).
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => WmoRegion::Antarctic,
            1 => WmoRegion::I,
            2 => WmoRegion::II,
            3 => WmoRegion::III,
            4 => WmoRegion::IV,
            5 => WmoRegion::V,
            6 => WmoRegion::VI,
            _ => return None,
        })
    }

    /// The `A1` digit.
    pub fn code(&self) -> char {
        match self {
            WmoRegion::Antarctic => '0',
            WmoRegion::I => '1',
            WmoRegion::II => '2',
            WmoRegion::III => '3',
            WmoRegion::IV => '4',
            WmoRegion::V => '5',
            WmoRegion::VI => '6',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WmoRegion::Antarctic => "Antarctic",
            WmoRegion::I => "I",
            WmoRegion::II => "II",
            WmoRegion::III => "III",
            WmoRegion::IV => "IV",
            WmoRegion::V => "V",
            WmoRegion::VI => "VI",
        }
    }
}

/// Station index ranges `(first, last, region)`, ordered and disjoint.
static REGION_TABLE: &[(u32, u32, WmoRegion)] = &[
    (1, 19999, WmoRegion::VI),
    (20000, 20099, WmoRegion::II),
    (20100, 20199, WmoRegion::VI),
    (20200, 21999, WmoRegion::II),
    (22000, 22999, WmoRegion::VI),
    (23000, 25999, WmoRegion::II),
    (26000, 27999, WmoRegion::VI),
    (28000, 32999, WmoRegion::II),
    (33000, 34999, WmoRegion::VI),
    (35000, 36999, WmoRegion::II),
    (37000, 37999, WmoRegion::VI),
    (38000, 48599, WmoRegion::II),
    (48600, 48799, WmoRegion::V),
    (48800, 59999, WmoRegion::II),
    (60000, 69999, WmoRegion::I),
    (70000, 79999, WmoRegion::IV),
    (80000, 88999, WmoRegion::III),
    (89000, 89999, WmoRegion::Antarctic),
    (90000, 98999, WmoRegion::V),
];

/// Region of a WMO station index (`IIiii`), if a range covers it.
pub fn region_of_index(index: u32) -> Option<WmoRegion> {
    let pos = REGION_TABLE.partition_point(|(first, _, _)| *first <= index);
    let (first, last, region) = REGION_TABLE.get(pos.checked_sub(1)?)?;
    (*first..=*last).contains(&index).then_some(*region)
}

/// Returns the known region, or infers it from the block and station
/// numbers. Both numbers are needed for an inference.
pub fn infer_region(
    known: Option<WmoRegion>,
    block: Option<&str>,
    station: Option<&str>,
) -> Option<WmoRegion> {
    if known.is_some() {
        return known;
    }
    let (block, station) = (block?, station?);
    let index: u32 = format!("{block}{station}").parse().ok()?;
    region_of_index(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered() {
        for pair in REGION_TABLE.windows(2) {
            assert!(pair[0].1 < pair[1].0);
        }
    }

    #[test]
    fn test_region_of_index() {
        assert_eq!(region_of_index(8221), Some(WmoRegion::VI));
        assert_eq!(region_of_index(60030), Some(WmoRegion::I));
        assert_eq!(region_of_index(48650), Some(WmoRegion::V));
        assert_eq!(region_of_index(72520), Some(WmoRegion::IV));
        assert_eq!(region_of_index(89002), Some(WmoRegion::Antarctic));
        assert_eq!(region_of_index(0), None);
        assert_eq!(region_of_index(99500), None);
    }

    #[test]
    fn test_infer_region() {
        assert_eq!(
            infer_region(Some(WmoRegion::III), Some("08"), Some("221")),
            Some(WmoRegion::III)
        );
        assert_eq!(
            infer_region(None, Some("08"), Some("221")),
            Some(WmoRegion::VI)
        );
        assert_eq!(infer_region(None, Some("08"), None), None);
        assert_eq!(infer_region(None, None, Some("221")), None);
    }
}
