//! FM 12 SYNOP, FM 13 SHIP and FM 14 SYNOP MOBIL

#[cfg(feature = "serde")]
use serde::Serialize;
use smallvec::SmallVec;

use super::{Capped, SectionMask};
use crate::WmoRegion;

/// Most supplementary 9-groups kept in section 3.
pub const MAX_SUPPLEMENTARY: usize = 20;
/// Most `8NsChshs` groups in section 3.
pub const MAX_CLOUD_LAYERS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SynopReport {
    pub sections: SectionMask,
    pub s0: Section0,
    pub s1: Section1,
    pub s2: Section2,
    pub s3: Section3,
    pub s4: Section4,
}

/// Identification: `MiMiMjMj D....D YYGGiw IIiii 99LaLaLa QcLoLoLoLo MMMUlaUlo h0h0h0h0im`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section0 {
    /// `MiMiMjMj`
    pub type_code: Option<String>,
    /// `D....D`
    pub callsign: Option<String>,
    /// `A1` cache, explicit or inferred from the station index
    pub region: Option<WmoRegion>,
    /// `II`
    pub block: Option<String>,
    /// `iii`
    pub station: Option<String>,
    /// `YY`
    pub day: Option<String>,
    /// `GG`
    pub hour: Option<String>,
    /// `iw`
    pub wind_indicator: Option<String>,
    /// `LaLaLa`
    pub latitude: Option<String>,
    /// `Qc`
    pub quadrant: Option<String>,
    /// `LoLoLoLo`
    pub longitude: Option<String>,
    /// `MMM`
    pub marsden_square: Option<String>,
    /// `Ula`
    pub lat_units: Option<String>,
    /// `Ulo`
    pub lon_units: Option<String>,
    /// `h0h0h0h0`
    pub elevation: Option<String>,
    /// `im`
    pub elevation_units: Option<String>,
}

/// Section 1: `iRiXhVV Nddff 00fff 1snTTT 2snTdTdTd 3PoPoPoPo 4PPPP 5appp 6RRRtR 7wwW1W2 8NhCLCMCH 9GGgg`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section1 {
    /// `iR`
    pub precip_indicator: Option<String>,
    /// `iX`
    pub station_operation: Option<String>,
    /// `h`
    pub cloud_base: Option<String>,
    /// `VV`
    pub visibility: Option<String>,
    /// `N`
    pub total_cloud: Option<String>,
    /// `dd`
    pub wind_direction: Option<String>,
    /// `ff`
    pub wind_speed: Option<String>,
    /// `fff` of the `00fff` group
    pub wind_speed_overflow: Option<String>,
    /// `sn` of group 1
    pub temp_sign: Option<String>,
    /// `TTT`
    pub temperature: Option<String>,
    /// `sn` of group 2
    pub dewpoint_sign: Option<String>,
    /// `TdTdTd`
    pub dewpoint: Option<String>,
    /// `UUU` (`29UUU`)
    pub humidity: Option<String>,
    /// `PoPoPoPo`
    pub station_pressure: Option<String>,
    /// `PPPP`
    pub sea_level_pressure: Option<String>,
    /// `a3`
    pub standard_level: Option<String>,
    /// `hhh`
    pub geopotential: Option<String>,
    /// `a`
    pub tendency_character: Option<String>,
    /// `ppp`
    pub tendency: Option<String>,
    /// `RRR`
    pub precipitation: Option<String>,
    /// `tR`
    pub precip_period: Option<String>,
    /// `ww`
    pub present_weather: Option<String>,
    /// `W1`
    pub past_weather1: Option<String>,
    /// `W2`
    pub past_weather2: Option<String>,
    /// `Nh`
    pub low_cloud_amount: Option<String>,
    /// `CL`
    pub low_cloud: Option<String>,
    /// `CM`
    pub middle_cloud: Option<String>,
    /// `CH`
    pub high_cloud: Option<String>,
    /// `GGgg` exact time of observation
    pub exact_time: Option<String>,
}

/// Section 2 (sea stations).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section2 {
    /// `Ds`
    pub ship_direction: Option<String>,
    /// `vs`
    pub ship_speed: Option<String>,
    /// `ss`
    pub sea_temp_sign: Option<String>,
    /// `TwTwTw`
    pub sea_temp: Option<String>,
    /// `PwaPwa`
    pub instr_wave_period: Option<String>,
    /// `HwaHwa`
    pub instr_wave_height: Option<String>,
    /// `PwPw`
    pub wind_wave_period: Option<String>,
    /// `HwHw`
    pub wind_wave_height: Option<String>,
    /// `dw1dw1`, `dw2dw2`
    pub swell_direction: [Option<String>; 2],
    /// `Pw1Pw1`, `Pw2Pw2`
    pub swell_period: [Option<String>; 2],
    /// `Hw1Hw1`, `Hw2Hw2`
    pub swell_height: [Option<String>; 2],
    /// `HwaHwaHwa` of the `70` group
    pub wave_height_tenths: Option<String>,
    /// `Is`
    pub ice_cause: Option<String>,
    /// `EsEs`
    pub ice_thickness: Option<String>,
    /// `Rs`
    pub ice_rate: Option<String>,
    /// `ci`
    pub sea_ice_concentration: Option<String>,
    /// `Si`
    pub sea_ice_stage: Option<String>,
    /// `bi`
    pub land_ice: Option<String>,
    /// `Di`
    pub ice_edge_bearing: Option<String>,
    /// `zi`
    pub ice_situation: Option<String>,
}

/// One `8NsChshs` group.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CloudLayer {
    pub amount: Option<String>,
    pub genus: Option<String>,
    pub height: Option<String>,
}

/// Radiation `j5FFFF` groups, indexed by `j5`.
pub type RadiationGroups = [Option<String>; 7];

/// Section 3 (regional data).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section3 {
    /// `sn` and `TxTxTx`
    pub max_sign: Option<String>,
    pub max_temp: Option<String>,
    /// `sn` and `TnTnTn`
    pub min_sign: Option<String>,
    pub min_temp: Option<String>,
    /// `E`
    pub ground_state: Option<String>,
    /// `sn` and `TgTg` (or `jjj` in Region I)
    pub ground_min_sign: Option<String>,
    pub ground_min: Option<String>,
    /// `E'`
    pub snow_ground_state: Option<String>,
    /// `sss`
    pub snow_depth: Option<String>,
    /// `EEE` and `iE`
    pub evaporation: Option<String>,
    pub evaporation_indicator: Option<String>,
    /// `j1` (8 rise, 9 fall) and `p24p24p24`
    pub pressure_24h_sign: Option<String>,
    pub pressure_24h: Option<String>,
    /// `SSS` of `55SSS`
    pub sunshine_daily: Option<String>,
    /// `SS` of `553SS`
    pub sunshine_hourly: Option<String>,
    pub radiation_daily: RadiationGroups,
    pub radiation_hourly: RadiationGroups,
    /// `RRR` and `tR` of section 3
    pub precipitation: Option<String>,
    pub precip_period: Option<String>,
    /// `R24R24R24R24`
    pub precipitation_24h: Option<String>,
    pub cloud_layers: SmallVec<[CloudLayer; MAX_CLOUD_LAYERS]>,
    /// `9SpSpspsp` groups
    pub supplementary: Capped<String, MAX_SUPPLEMENTARY>,
}

/// Section 4: `N'C'H'H'Ct`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section4 {
    pub amount: Option<String>,
    pub genus: Option<String>,
    pub top_height: Option<String>,
    pub top_description: Option<String>,
}
