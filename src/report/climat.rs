//! FM 71 CLIMAT

#[cfg(feature = "serde")]
use serde::Serialize;

use super::SectionMask;
use crate::WmoRegion;

/// Conditions of 0 08 052 with a day count in section 3.
pub const DAY_COUNT_CONDITIONS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ClimatReport {
    pub sections: SectionMask,
    pub s0: Section0,
    /// Section 1: values of the month
    pub s1: MonthlyValues,
    /// Section 2: normals
    pub s2: Normals,
    /// Section 3: number of days beyond thresholds, by 0 08 052 condition
    pub s3: [Option<String>; DAY_COUNT_CONDITIONS],
    /// Section 4: extremes of the month
    pub s4: Extremes,
}

/// `CLIMAT MMJJJ IIiii`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section0 {
    pub month: Option<String>,
    /// `JJJ`: last three digits of the year
    pub year: Option<String>,
    pub block: Option<String>,
    pub station: Option<String>,
    pub region: Option<WmoRegion>,
}

/// Numbers of days missing from each monthly statistic.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MissingDays {
    pub pressure: Option<String>,
    pub temperature: Option<String>,
    pub max_temp: Option<String>,
    pub min_temp: Option<String>,
    pub vapour_pressure: Option<String>,
    pub precipitation: Option<String>,
    pub sunshine: Option<String>,
}

/// Groups 1 to 9 shared by sections 1 and 2.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MonthlyValues {
    /// `PoPoPoPo`
    pub station_pressure: Option<String>,
    /// `PPPP`
    pub sea_level_pressure: Option<String>,
    /// `snTTT` and `stst`
    pub temp_sign: Option<String>,
    pub temperature: Option<String>,
    pub temp_std_dev: Option<String>,
    /// `snTxTxTx`
    pub max_sign: Option<String>,
    pub max_temp: Option<String>,
    /// `snTnTnTn`
    pub min_sign: Option<String>,
    pub min_temp: Option<String>,
    /// `eee`
    pub vapour_pressure: Option<String>,
    /// `R1R1R1R1`, `Rd` and `nrnr`
    pub precipitation: Option<String>,
    pub precip_quintile: Option<String>,
    pub precip_days: Option<String>,
    /// `S1S1S1` and `pspsps`
    pub sunshine: Option<String>,
    pub sunshine_percent: Option<String>,
    pub missing: MissingDays,
}

/// Section 2: `222 0YbYbYcYc` followed by the normal values.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Normals {
    /// `YbYb`
    pub first_year: Option<String>,
    /// `YcYc`
    pub last_year: Option<String>,
    pub values: MonthlyValues,
}

/// An extreme value with its day of occurrence (`yy`, plus 50 when it
/// happened on more than one day).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Extreme {
    pub sign: Option<String>,
    pub value: Option<String>,
    pub day: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Extremes {
    /// `0snTxdTxdTxdyxyx`
    pub highest_daily_mean: Extreme,
    /// `1snTndTndTndynyn`
    pub lowest_daily_mean: Extreme,
    /// `2snTaxTaxTaxyaxyax`
    pub highest_max: Extreme,
    /// `3snTanTanTanyanyan`
    pub lowest_min: Extreme,
    /// `4RxRxRxRxiyryr`
    pub highest_precipitation: Extreme,
    /// `5iwfxfxfxyfxyfx`
    pub highest_wind: Extreme,
}
