//! FM 18 BUOY

#[cfg(feature = "serde")]
use serde::Serialize;

use super::{Capped, SectionMask};
use crate::WmoRegion;

/// Most sub-surface layers kept per profile.
pub const MAX_LAYERS: usize = 32;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BuoyReport {
    pub sections: SectionMask,
    pub s0: Section0,
    pub s1: Section1,
    pub s2: Section2,
    pub s3: Section3,
}

/// `ZZYY A1bwnbnbnb YYMMJ GGgg/ QcLaLaLaLaLa LoLoLoLoLoLo`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section0 {
    pub region: Option<WmoRegion>,
    /// `bw`
    pub subarea: Option<String>,
    /// `nbnbnb`
    pub buoy_number: Option<String>,
    /// `YY`
    pub day: Option<String>,
    /// `MM`
    pub month: Option<String>,
    /// `J`
    pub year_digit: Option<String>,
    /// `GG`
    pub hour: Option<String>,
    /// `gg`
    pub minute: Option<String>,
    /// `Qc`
    pub quadrant: Option<String>,
    /// `LaLaLaLaLa`
    pub latitude: Option<String>,
    /// `LoLoLoLoLoLo`
    pub longitude: Option<String>,
}

/// `111QdQx 0ddff 1snTTT 2snTdTdTd 29UUU 3PoPoPoPo 4PPPP 5appp`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section1 {
    pub wind_indicator: Option<String>,
    pub wind_direction: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_speed_overflow: Option<String>,
    pub temp_sign: Option<String>,
    pub temperature: Option<String>,
    pub dewpoint_sign: Option<String>,
    pub dewpoint: Option<String>,
    pub humidity: Option<String>,
    pub station_pressure: Option<String>,
    pub sea_level_pressure: Option<String>,
    pub tendency_character: Option<String>,
    pub tendency: Option<String>,
}

/// `222QdQx 0snTwTwTw 1PwaPwaHwaHwa 20PwaPwaPwa 21HwaHwaHwa`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section2 {
    pub sea_temp_sign: Option<String>,
    pub sea_temp: Option<String>,
    pub wave_period: Option<String>,
    pub wave_height: Option<String>,
    pub wave_period_tenths: Option<String>,
    pub wave_height_tenths: Option<String>,
}

/// `2z0z0z0z0 3T0T0T0T0 4S0S0S0S0`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProfileLayer {
    pub depth: Option<String>,
    pub temperature: Option<String>,
    pub salinity: Option<String>,
}

/// `2z0z0z0z0 d0d0c0c0c0`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CurrentLayer {
    pub depth: Option<String>,
    pub direction: Option<String>,
    pub speed: Option<String>,
}

/// Section 3: sub-surface profiles.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section3 {
    pub profile: Capped<ProfileLayer, MAX_LAYERS>,
    pub currents: Capped<CurrentLayer, MAX_LAYERS>,
}
