//! Selection of the reported levels of parts A to D from the sounding points

use crate::convert::{self, MPS_TO_KNOTS};
use crate::report::temp::{
    Level, SignificantPart, SoundingPoint, StandardPart, TempReport, significance,
};

/// Levels at or below this pressure (Pa) go to parts A and B.
const PART_AB_TOP: f64 = 10000.0;

/// Standard isobaric surfaces of part A, in Pa, with their `PnPn`.
const PART_A_LEVELS: [(i32, &str); 11] = [
    (100000, "00"),
    (92500, "92"),
    (85000, "85"),
    (70000, "70"),
    (50000, "50"),
    (40000, "40"),
    (30000, "30"),
    (25000, "25"),
    (20000, "20"),
    (15000, "15"),
    (10000, "10"),
];

/// Standard isobaric surfaces of part C.
const PART_C_LEVELS: [(i32, &str); 5] = [
    (7000, "70"),
    (5000, "50"),
    (3000, "30"),
    (2000, "20"),
    (1000, "10"),
];

/// Fills the levels of every part from the sounding points.
pub(super) fn build(report: &mut TempReport, knots: bool) {
    let points = &report.points;
    let units = Units { knots };

    if let Some(surface) = points.iter().find(|p| p.flags & significance::SURFACE != 0) {
        report.a.surface = Some(Level {
            number: Some("99".to_string()),
            pressure: surface.pressure.and_then(convert::pressure_hpa),
            wind: units.wind(surface),
            ..units.thermo(surface)
        });
    }

    standard_levels(&mut report.a, points, &PART_A_LEVELS, &units);
    standard_levels(&mut report.c, points, &PART_C_LEVELS, &units);

    // a maximum wind at the top of the sounding is reported as 66
    let top_wind = points
        .iter()
        .rposition(|p| p.pressure.is_some() && units.wind(p).is_some());
    for (index, point) in points.iter().enumerate() {
        let Some(pressure) = point.pressure else {
            continue;
        };
        let low = pressure >= PART_AB_TOP;
        let (standard, coded) = if low {
            (&mut report.a, convert::pressure_hpa(pressure))
        } else {
            (&mut report.c, convert::pressure_tenths_hpa(pressure))
        };
        if point.flags & significance::TROPOPAUSE != 0 {
            standard.tropopauses.push_if_room(Level {
                number: Some("88".to_string()),
                pressure: coded.clone(),
                wind: units.wind(point),
                ..units.thermo(point)
            });
        }
        if point.flags & significance::MAX_WIND != 0 {
            if let Some(wind) = units.wind(point) {
                let number = if top_wind == Some(index) { "66" } else { "77" };
                standard.max_winds.push_if_room(Level {
                    number: Some(number.to_string()),
                    pressure: coded,
                    wind: Some(wind),
                    ..Default::default()
                });
            }
        }
    }
    for part in [&mut report.a, &mut report.c] {
        if part.tropopauses.is_empty() {
            part.tropopauses.push_if_room(nil_group("88"));
        }
        if part.max_winds.is_empty() {
            part.max_winds.push_if_room(nil_group("77"));
        }
    }

    significant_levels(report, &units);
}

fn standard_levels(
    part: &mut StandardPart,
    points: &[SoundingPoint],
    surfaces: &[(i32, &str)],
    units: &Units,
) {
    for (pa, pn) in surfaces {
        let found = points.iter().find(|p| {
            p.flags & significance::STANDARD != 0
                && p.pressure.is_some_and(|v| v.round() as i32 == *pa)
        });
        let Some(point) = found else {
            continue;
        };
        part.levels.push(Level {
            number: Some(pn.to_string()),
            height: point.height.and_then(|h| standard_height(*pa, h)),
            wind: units.wind(point),
            ..units.thermo(point)
        });
    }
}

/// `hhh` of a standard surface: metres up to 700 hPa, decametres above,
/// thousands dropped. A negative 1000 hPa height has 500 added.
pub(super) fn standard_height(pa: i32, metres: f64) -> Option<String> {
    if !metres.is_finite() {
        return None;
    }
    let h = metres.round() as i32;
    let hhh = match pa {
        100000 if h < 0 => 500 - h,
        _ if h < 0 => return None,
        100000 | 92500 | 85000 | 70000 => h % 1000,
        _ => (h / 10) % 1000,
    };
    Some(format!("{hhh:03}"))
}

/// Significant temperature and wind levels of parts B and D.
fn significant_levels(report: &mut TempReport, units: &Units) {
    let mut numbers = [LevelNumber::default(); 4];
    for point in report.points.iter() {
        let Some(pressure) = point.pressure else {
            continue;
        };
        let surface = point.flags & significance::SURFACE != 0;
        let low = pressure >= PART_AB_TOP;
        let (part, coded, counters): (&mut SignificantPart, _, _) = if low {
            (&mut report.b, convert::pressure_hpa(pressure), &mut numbers[..2])
        } else {
            (&mut report.d, convert::pressure_tenths_hpa(pressure), &mut numbers[2..])
        };
        let thermo = point.flags
            & (significance::SIGNIFICANT_TEMP | significance::SIGNIFICANT_HUMIDITY)
            != 0;
        if (surface || thermo) && point.temperature.is_some() {
            part.temperature_levels.push_if_room(Level {
                number: Some(counters[0].next(surface)),
                pressure: coded.clone(),
                ..units.thermo(point)
            });
        }
        let significant_wind = point.flags & significance::SIGNIFICANT_WIND != 0;
        if surface || significant_wind {
            if let Some(wind) = units.wind(point) {
                part.wind_levels.push_if_room(Level {
                    number: Some(counters[1].next(surface)),
                    pressure: coded,
                    wind: Some(wind),
                    ..Default::default()
                });
            }
        }
    }
}

/// `Id` of parts A and C: the hundreds (or tens) of hPa of the last
/// standard surface with a wind.
pub(super) fn wind_indicator(part: &StandardPart) -> String {
    part.levels
        .iter()
        .rev()
        .find(|level| level.wind.is_some())
        .and_then(|level| level.number.as_deref())
        .and_then(|pn| pn.get(..1))
        .unwrap_or("/")
        .to_string()
}

fn nil_group(number: &str) -> Level {
    Level {
        number: Some(number.to_string()),
        pressure: Some("999".to_string()),
        ..Default::default()
    }
}

/// `nn` of significant levels: 00 at the surface, then 11, 22, ... 99
/// and again from 11.
#[derive(Debug, Clone, Copy, Default)]
struct LevelNumber(u32);

impl LevelNumber {
    fn next(&mut self, surface: bool) -> String {
        if surface {
            return "00".to_string();
        }
        self.0 = if self.0 == 0 || self.0 >= 99 { 11 } else { self.0 + 11 };
        format!("{:02}", self.0)
    }
}

struct Units {
    knots: bool,
}

impl Units {
    /// `TTTa` and `DD` of a point.
    fn thermo(&self, point: &SoundingPoint) -> Level {
        let temperature = point.temperature;
        Level {
            temperature: temperature.and_then(convert::temperature_tenths_parity),
            dewpoint: temperature
                .zip(point.dewpoint)
                .and_then(|(t, td)| convert::dewpoint_depression(t, td)),
            ..Default::default()
        }
    }

    /// `dddff` of a point.
    fn wind(&self, point: &SoundingPoint) -> Option<String> {
        let (direction, speed) = point.wind_direction.zip(point.wind_speed)?;
        let speed = if self.knots { speed * MPS_TO_KNOTS } else { speed };
        convert::upper_wind(direction, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_height() {
        assert_eq!(standard_height(100000, 110.0).as_deref(), Some("110"));
        assert_eq!(standard_height(100000, -45.0).as_deref(), Some("545"));
        assert_eq!(standard_height(85000, 1504.0).as_deref(), Some("504"));
        assert_eq!(standard_height(70000, 3012.0).as_deref(), Some("012"));
        assert_eq!(standard_height(50000, 5580.0).as_deref(), Some("558"));
        assert_eq!(standard_height(25000, 10390.0).as_deref(), Some("039"));
        assert_eq!(standard_height(1000, 31000.0).as_deref(), Some("100"));
    }

    #[test]
    fn test_level_numbers() {
        let mut n = LevelNumber::default();
        assert_eq!(n.next(true), "00");
        let numbers: Vec<String> = (0..10).map(|_| n.next(false)).collect();
        assert_eq!(numbers[0], "11");
        assert_eq!(numbers[8], "99");
        assert_eq!(numbers[9], "11");
    }
}
