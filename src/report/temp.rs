//! FM 35 TEMP, FM 36 TEMP SHIP, FM 37 TEMP DROP and FM 38 TEMP MOBIL

#[cfg(feature = "serde")]
use serde::Serialize;
use smallvec::SmallVec;

use super::{Capped, SectionMask, TempVariant};
use crate::WmoRegion;

/// Most raw sounding points kept per ascent.
pub const MAX_POINTS: usize = 4096;
/// Most significant levels kept per part.
pub const MAX_SIGNIFICANT: usize = 256;
/// Most tropopause or maximum wind levels kept per part.
pub const MAX_SPECIAL: usize = 4;

/// One raw point of the ascent, as given by the sounding sequence.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SoundingPoint {
    /// Seconds since launch
    pub elapsed: i32,
    /// Extended vertical sounding significance (0 08 042)
    pub flags: u32,
    pub pressure: Option<f64>,
    pub height: Option<f64>,
    pub temperature: Option<f64>,
    pub dewpoint: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// Flags of 0 08 042, as bit values.
pub mod significance {
    pub const SURFACE: u32 = 1 << 17;
    pub const STANDARD: u32 = 1 << 16;
    pub const TROPOPAUSE: u32 = 1 << 15;
    pub const MAX_WIND: u32 = 1 << 14;
    pub const SIGNIFICANT_TEMP: u32 = 1 << 13;
    pub const SIGNIFICANT_HUMIDITY: u32 = 1 << 12;
    pub const SIGNIFICANT_WIND: u32 = 1 << 11;
}

/// Identification repeated at the head of every part:
/// `MiMiMjMj D....D YYGGId IIiii 99LaLaLa QcLoLoLoLo MMMUlaUlo h0h0h0h0im`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Identification {
    /// `MiMiMjMj`, e.g. `TTAA`
    pub type_code: Option<String>,
    pub callsign: Option<String>,
    pub region: Option<WmoRegion>,
    pub block: Option<String>,
    pub station: Option<String>,
    /// `YY`, plus 50 when winds are in knots
    pub day: Option<String>,
    /// `GG`
    pub hour: Option<String>,
    /// `Id` in parts A and C, `a4` in parts B and D
    pub indicator: Option<String>,
    pub latitude: Option<String>,
    pub quadrant: Option<String>,
    pub longitude: Option<String>,
    pub marsden_square: Option<String>,
    pub lat_units: Option<String>,
    pub lon_units: Option<String>,
    pub elevation: Option<String>,
    pub elevation_units: Option<String>,
}

/// A reported level. Fields not used by a given group stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Level {
    /// `nn` of significant levels
    pub number: Option<String>,
    /// `PnPn`, `PoPoPo`, `PPP`, `PtPtPt` or `PmPmPm`
    pub pressure: Option<String>,
    /// `hnhnhn`
    pub height: Option<String>,
    /// `TTTa`
    pub temperature: Option<String>,
    /// `DD`
    pub dewpoint: Option<String>,
    /// `dddff`
    pub wind: Option<String>,
}

/// `31313 srrarasasa 8GGgg`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SondeInfo {
    pub solar_correction: Option<String>,
    pub sonde_type: Option<String>,
    pub tracking: Option<String>,
    pub launch_time: Option<String>,
}

/// `41414 NhCLhCMCH`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CloudGroup {
    pub amount: Option<String>,
    pub low: Option<String>,
    pub base: Option<String>,
    pub middle: Option<String>,
    pub high: Option<String>,
}

/// Parts A and C: standard isobaric surfaces, tropopause, maximum wind.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StandardPart {
    pub sections: SectionMask,
    pub ident: Identification,
    /// `99PoPoPo` group (part A)
    pub surface: Option<Level>,
    pub levels: SmallVec<[Level; 11]>,
    /// `88PtPtPt` groups
    pub tropopauses: Capped<Level, MAX_SPECIAL>,
    /// `77PmPmPm` / `66PmPmPm` groups
    pub max_winds: Capped<Level, MAX_SPECIAL>,
    pub sonde: SondeInfo,
}

/// Parts B and D: significant levels.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SignificantPart {
    pub sections: SectionMask,
    pub ident: Identification,
    pub temperature_levels: Capped<Level, MAX_SIGNIFICANT>,
    /// `21212` section
    pub wind_levels: Capped<Level, MAX_SIGNIFICANT>,
    pub clouds: CloudGroup,
    pub sonde: SondeInfo,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TempReport {
    pub variant: Option<TempVariant>,
    pub a: StandardPart,
    pub b: SignificantPart,
    pub c: StandardPart,
    pub d: SignificantPart,
    pub points: Capped<SoundingPoint, MAX_POINTS>,
}

impl TempReport {
    /// The identification blocks of parts A to D.
    pub fn idents_mut(&mut self) -> [&mut Identification; 4] {
        [
            &mut self.a.ident,
            &mut self.b.ident,
            &mut self.c.ident,
            &mut self.d.ident,
        ]
    }

    /// Region of the station, inferred once from part A and shared with
    /// every other part.
    pub fn resolve_region(&mut self) -> Option<WmoRegion> {
        let ident = &self.a.ident;
        let region =
            crate::infer_region(ident.region, ident.block.as_deref(), ident.station.as_deref())?;
        for ident in self.idents_mut() {
            ident.region = Some(region);
        }
        Some(region)
    }
}
