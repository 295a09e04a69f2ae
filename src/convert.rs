//! Conversions from physical quantities to the fixed width codes of the
//! traditional alphanumeric reports.
//!
//! Every function returns `None` when the input is outside the range the
//! code can express. Callers leave the target field empty in that case.

/// Metres per second to knots, used for mean wind.
pub const MPS_TO_KNOTS: f64 = 1.94384449;

/// Metres per second to knots, used for gusts and extreme winds.
pub const GUST_MPS_TO_KNOTS: f64 = 1.0 / 0.5144444;

const KELVIN_RANGE: std::ops::RangeInclusive<f64> = 150.0..=340.0;

/// Hundredths of degree Celsius, rounded at the 0.01 K grid.
fn centi_celsius(kelvin: f64) -> Option<i32> {
    if !KELVIN_RANGE.contains(&kelvin) {
        return None;
    }
    Some((100.0 * kelvin).round() as i32 - 27315)
}

/// `snTTT`: sign digit ('1' when negative) and tenths of degree Celsius.
pub fn temperature_tenths(kelvin: f64) -> Option<(char, String)> {
    let ic = centi_celsius(kelvin)?;
    Some(if ic < 0 {
        ('1', format!("{:03}", (-ic + 5) / 10))
    } else {
        ('0', format!("{:03}", (ic + 5) / 10))
    })
}

/// `snTT`: sign digit and whole degrees Celsius.
pub fn temperature_whole(kelvin: f64) -> Option<(char, String)> {
    let ic = centi_celsius(kelvin)?;
    Some(if ic < 0 {
        ('1', format!("{:02}", (-ic + 50) / 100))
    } else {
        ('0', format!("{:02}", (ic + 50) / 100))
    })
}

/// `TT` in whole degrees with 50 added to negative values (Region I usage).
pub fn temperature_region_i(kelvin: f64) -> Option<String> {
    let ic = centi_celsius(kelvin)?;
    Some(if ic < 0 {
        format!("{:02}", (-ic + 50) / 100 + 50)
    } else {
        format!("{:02}", (ic + 50) / 100)
    })
}

/// `TTTT` in tenths of degree, negative values offset by 5000.
pub fn temperature_offset_tenths(kelvin: f64) -> Option<String> {
    let ic = centi_celsius(kelvin)?;
    Some(if ic < 0 {
        format!("{:04}", 5000 + (-ic + 5) / 10)
    } else {
        format!("{:04}", (ic + 5) / 10)
    })
}

/// `TTTT` in hundredths of degree, negative values offset by 5000.
pub fn temperature_offset_hundredths(kelvin: f64) -> Option<String> {
    let ic = centi_celsius(kelvin)?;
    if ic.abs() > 4999 {
        return None;
    }
    Some(if ic < 0 {
        format!("{:04}", 5000 - ic)
    } else {
        format!("{:04}", ic)
    })
}

/// `TTTa`: tenths of degree whose last digit is even above zero and odd below.
pub fn temperature_tenths_parity(kelvin: f64) -> Option<String> {
    let ic = centi_celsius(kelvin)?;
    let mut tenths = (ic.abs() + 5) / 10;
    if ic < 0 {
        if tenths % 2 == 0 {
            tenths += 1;
        }
    } else if tenths % 2 == 1 {
        tenths -= 1;
    }
    Some(format!("{:03}", tenths))
}

/// `DD`: dew point depression, code table 0777.
pub fn dewpoint_depression(kelvin: f64, dewpoint: f64) -> Option<String> {
    centi_celsius(kelvin)?;
    centi_celsius(dewpoint)?;
    let diff = kelvin - dewpoint;
    if diff < 0.0 {
        return None;
    }
    let tenths = (diff * 10.0).round() as i32;
    Some(if tenths <= 50 {
        format!("{:02}", tenths)
    } else {
        format!("{:02}", (diff.round() as i32).clamp(6, 49) + 50)
    })
}

/// `ppp`: magnitude of a pressure change in tenths of hPa.
pub fn pressure_tendency(pascal: f64) -> Option<String> {
    if !pascal.is_finite() {
        return None;
    }
    let tenths = (pascal.abs() * 0.1) as i64;
    Some(format!("{:03}", tenths % 1000))
}

/// `PPPP`: pressure in tenths of hPa, thousands digit dropped. Truncates.
pub fn pressure_4digit(pascal: f64) -> Option<String> {
    if !pascal.is_finite() || pascal < 0.0 {
        return None;
    }
    let tenths = (pascal * 0.1) as i64;
    Some(format!("{:04}", tenths % 10000))
}

/// `tt`: time before the observation, code table 4077.
///
/// The displacement is negative ("N seconds ago"); its magnitude is used.
pub fn seconds_to_tt(seconds: i32) -> String {
    // Inclusive upper bounds in seconds of the coarse classes 61 to 67.
    // 18 hours and longer is 68.
    const LADDER: [(i32, u8); 7] = [
        (7 * 3600, 61),
        (8 * 3600, 62),
        (9 * 3600, 63),
        (10 * 3600, 64),
        (11 * 3600, 65),
        (12 * 3600, 66),
        (18 * 3600 - 1, 67),
    ];
    let secs = seconds.saturating_abs();
    if secs <= 6 * 3600 {
        return format!("{:02}", secs / 360);
    }
    let code = LADDER
        .iter()
        .find(|(limit, _)| secs <= *limit)
        .map(|(_, code)| *code)
        .unwrap_or(68);
    format!("{code:02}")
}

/// `MMM`: Marsden square of a position.
pub fn marsden_square(latitude: f64, longitude: f64) -> Option<String> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    // 180 E falls in the same column as 180 W
    let col = if longitude < 0.0 {
        (-longitude * 0.1) as i32 + 1
    } else {
        36 - ((longitude * 0.1) as i32).min(17)
    };
    let square = if latitude >= 80.0 {
        25 * 36 + col
    } else if latitude >= 0.0 {
        (latitude * 0.1) as i32 * 36 + col
    } else {
        300 + (-latitude * 0.1) as i32 * 36 + col
    };
    Some(format!("{square:03}"))
}

/// `Ula` / `Ulo`: units digit of the latitude or longitude.
pub fn units_digit(degrees: f64) -> String {
    format!("{}", (degrees.abs() as i32) % 10)
}

/// `Qc`: quadrant of the globe.
pub fn quadrant(latitude: f64, longitude: f64) -> &'static str {
    match (latitude >= 0.0, longitude >= 0.0) {
        (true, true) => "1",
        (false, true) => "3",
        (false, false) => "5",
        (true, false) => "7",
    }
}

/// `VV`: horizontal visibility, code table 4377.
pub fn visibility(metres: f64) -> Option<String> {
    if !metres.is_finite() || metres < 0.0 {
        return None;
    }
    let v = metres as i32;
    let code = if v < 100 {
        0
    } else if v <= 5000 {
        v / 100
    } else if v < 6000 {
        50
    } else if v <= 30000 {
        v / 1000 + 50
    } else if v <= 70000 {
        (v - 30000) / 5000 + 80
    } else {
        89
    };
    Some(format!("{code:02}"))
}

/// `h`: height of the base of the lowest cloud, code table 1600.
pub fn cloud_base(metres: f64) -> Option<String> {
    const LIMITS: [f64; 9] = [50.0, 100.0, 200.0, 300.0, 600.0, 1000.0, 1500.0, 2000.0, 2500.0];
    if !metres.is_finite() || metres < 0.0 {
        return None;
    }
    let code = LIMITS.iter().position(|l| metres < *l).unwrap_or(9);
    Some(code.to_string())
}

/// `hshs`: height of the base of a cloud layer, code table 1677.
pub fn layer_height(metres: f64) -> Option<String> {
    if !metres.is_finite() || metres < 0.0 {
        return None;
    }
    let h = metres as i32;
    let code = if h < 1530 {
        (h / 30).min(50)
    } else if h < 1800 {
        50
    } else if h <= 9000 {
        h / 300 + 50
    } else if h <= 21000 {
        (h - 9000) / 1500 + 80
    } else {
        89
    };
    Some(format!("{code:02}"))
}

/// `N`: total cloud cover in oktas from a percentage, code table 2700.
pub fn cloud_cover(percent: f64) -> Option<String> {
    if !percent.is_finite() || percent < 0.0 {
        return None;
    }
    if percent > 100.0 {
        // 113 is "sky obscured by fog or other phenomena"
        return Some("9".to_string());
    }
    let mut oktas = (percent * 8.0 / 100.0).round() as i32;
    if percent > 0.0 && oktas == 0 {
        oktas = 1;
    } else if percent < 100.0 && oktas == 8 {
        oktas = 7;
    }
    Some(oktas.to_string())
}

/// `RRR`: amount of precipitation in mm, code table 3590.
///
/// A negative amount is the BUFR encoding of a trace.
pub fn precipitation(mm: f64) -> Option<String> {
    if !mm.is_finite() {
        return None;
    }
    let code = if mm < 0.0 {
        990
    } else if mm == 0.0 {
        0
    } else if mm < 0.95 {
        990 + ((mm * 10.0).round() as i32).max(1)
    } else {
        (mm.round() as i32).min(989)
    };
    Some(format!("{code:03}"))
}

/// `R24R24R24R24`: 24 hour precipitation in tenths of mm, 9999 for a trace.
pub fn precipitation_24h(mm: f64) -> Option<String> {
    if !mm.is_finite() {
        return None;
    }
    if mm < 0.0 {
        return Some("9999".to_string());
    }
    Some(format!("{:04}", ((mm * 10.0).round() as i32).min(9998)))
}

/// `tR`: duration of the precipitation period, code table 4019.
pub fn precipitation_period(seconds: i32) -> Option<String> {
    if seconds % 3600 != 0 {
        return None;
    }
    let code = match seconds.saturating_abs() / 3600 {
        6 => 1,
        12 => 2,
        18 => 3,
        24 => 4,
        1 => 5,
        2 => 6,
        3 => 7,
        9 => 8,
        15 => 9,
        _ => return None,
    };
    Some(code.to_string())
}

/// `sss`: total snow depth in cm, code table 3889.
///
/// BUFR encodes "less than 0.5 cm" as -0.01 m and "snow cover not
/// continuous" as -0.02 m.
pub fn snow_depth(metres: f64) -> Option<String> {
    if !metres.is_finite() {
        return None;
    }
    let code = if metres <= -0.015 {
        998
    } else if metres < 0.0 {
        997
    } else {
        let cm = (metres * 100.0).round() as i32;
        if cm == 0 { 997 } else { cm.min(996) }
    };
    Some(format!("{code:03}"))
}

/// Wind speed in the display unit, split by the 2 digit overflow rule.
///
/// Returns `(ff, fff)`: speeds of 100 units or more give `ff = "99"` and the
/// full value in `fff`.
pub fn wind_speed(speed: f64) -> Option<(String, Option<String>)> {
    if !speed.is_finite() || speed < 0.0 {
        return None;
    }
    let v = speed.round() as i32;
    Some(if v < 100 {
        (format!("{v:02}"), None)
    } else {
        ("99".to_string(), Some(format!("{:03}", v.min(999))))
    })
}

/// `dd`: wind direction in tens of degrees.
pub fn wind_direction(degrees: f64) -> Option<String> {
    if !(0.0..=360.0).contains(&degrees) {
        return None;
    }
    Some(format!("{:02}", (degrees.round() as i32 + 5) / 10))
}

/// `dddff` of upper air reports: direction to 5 degrees with the hundreds of
/// the speed folded into its last digit.
pub fn upper_wind(degrees: f64, speed: f64) -> Option<String> {
    if !(0.0..=360.0).contains(&degrees) || !speed.is_finite() || speed < 0.0 {
        return None;
    }
    let mut ddd = ((degrees / 5.0).round() as i32) * 5;
    let ff = speed.round() as i32;
    if ff == 0 {
        return Some("00000".to_string());
    }
    if ddd == 0 {
        ddd = 360;
    }
    Some(format!("{:03}{:02}", ddd + ff / 100, ff % 100))
}

/// `ss` of the `931ss` group: depth of newly fallen snow, code table 3870.
pub fn fresh_snow(metres: f64) -> Option<String> {
    if !metres.is_finite() {
        return None;
    }
    let cm = metres * 100.0;
    let code = if cm < 0.1 {
        97
    } else if cm < 1.0 {
        (90 + (cm * 10.0).round() as i32).clamp(91, 96)
    } else if cm <= 55.0 {
        cm.round() as i32
    } else if cm <= 400.0 {
        50 + (cm / 10.0).round() as i32
    } else {
        98
    };
    Some(format!("{code:02}"))
}

/// Absolute value of a latitude or longitude, scaled and zero padded to
/// `width` digits (`LaLaLa` is tenths on 3 digits, for instance).
pub fn degrees_scaled(degrees: f64, scale: f64, width: usize) -> Option<String> {
    if !degrees.is_finite() || degrees.abs() > 180.0 {
        return None;
    }
    Some(format!("{:0width$}", (degrees.abs() * scale).round() as i64))
}

/// `Ds` / `Di`: compass direction in eight sectors, code table 0700.
/// A zero bearing means "no motion" (0).
pub fn compass_sector(degrees: f64) -> Option<String> {
    if !(0.0..=360.0).contains(&degrees) {
        return None;
    }
    let deg = degrees.round() as i32;
    if deg == 0 {
        return Some("0".to_string());
    }
    let sector = match ((deg + 22) / 45) % 8 {
        0 => 8,
        s => s,
    };
    Some(sector.to_string())
}

/// `vs`: ship speed in knots, code table 4451.
pub fn ship_speed(mps: f64) -> Option<String> {
    if !mps.is_finite() || mps < 0.0 {
        return None;
    }
    let knots = (mps * MPS_TO_KNOTS).round() as i32;
    Some(((knots + 4) / 5).min(9).to_string())
}

/// `HwHw`: wave height in units of 0.5 m.
pub fn wave_height(metres: f64) -> Option<String> {
    if !metres.is_finite() || metres < 0.0 {
        return None;
    }
    Some(format!("{:02}", ((metres * 2.0).round() as i32).min(99)))
}

/// `PoPoPo` / `PPP` of upper air reports: whole hPa, thousands dropped.
pub fn pressure_hpa(pascal: f64) -> Option<String> {
    if !pascal.is_finite() || pascal < 0.0 {
        return None;
    }
    Some(format!("{:03}", (pascal / 100.0).round() as i64 % 1000))
}

/// Pressure in tenths of hPa on 3 digits (levels above 100 hPa).
pub fn pressure_tenths_hpa(pascal: f64) -> Option<String> {
    if !pascal.is_finite() || pascal < 0.0 {
        return None;
    }
    Some(format!("{:03}", (pascal / 10.0).round() as i64 % 1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_tenths() {
        assert_eq!(temperature_tenths(100.0), None);
        assert_eq!(temperature_tenths(400.0), None);
        assert_eq!(temperature_tenths(273.15), Some(('0', "000".to_string())));
        assert_eq!(temperature_tenths(263.15), Some(('1', "100".to_string())));
        assert_eq!(temperature_tenths(288.15), Some(('0', "150".to_string())));
        assert_eq!(temperature_tenths(273.1), Some(('1', "001".to_string())));
    }

    #[test]
    fn test_temperature_whole_and_regional() {
        assert_eq!(temperature_whole(268.15), Some(('1', "05".to_string())));
        assert_eq!(temperature_whole(280.0), Some(('0', "07".to_string())));
        assert_eq!(temperature_region_i(268.15).as_deref(), Some("55"));
        assert_eq!(temperature_region_i(283.15).as_deref(), Some("10"));
        assert_eq!(temperature_region_i(120.0), None);
    }

    #[test]
    fn test_temperature_offsets() {
        assert_eq!(temperature_offset_tenths(261.65).as_deref(), Some("5115"));
        assert_eq!(temperature_offset_tenths(293.15).as_deref(), Some("0200"));
        assert_eq!(temperature_offset_hundredths(285.42).as_deref(), Some("1227"));
        assert_eq!(temperature_offset_hundredths(271.65).as_deref(), Some("5150"));
    }

    #[test]
    fn test_temperature_parity() {
        assert_eq!(temperature_tenths_parity(288.15).as_deref(), Some("150"));
        assert_eq!(temperature_tenths_parity(288.25).as_deref(), Some("150"));
        assert_eq!(temperature_tenths_parity(263.15).as_deref(), Some("101"));
        assert_eq!(temperature_tenths_parity(263.05).as_deref(), Some("101"));
    }

    #[test]
    fn test_dewpoint_depression() {
        assert_eq!(dewpoint_depression(288.15, 286.15).as_deref(), Some("20"));
        assert_eq!(dewpoint_depression(288.15, 278.15).as_deref(), Some("60"));
        assert_eq!(dewpoint_depression(288.15, 289.15), None);
    }

    #[test]
    fn test_pressure() {
        assert_eq!(pressure_4digit(101325.0).as_deref(), Some("0132"));
        assert_eq!(pressure_4digit(98500.0).as_deref(), Some("9850"));
        assert_eq!(pressure_4digit(99999.0).as_deref(), Some("9999"));
        assert_eq!(pressure_tendency(-250.0).as_deref(), Some("025"));
        assert_eq!(pressure_tendency(1234.0).as_deref(), Some("123"));
    }

    #[test]
    fn test_seconds_to_tt() {
        assert_eq!(seconds_to_tt(-360), "01");
        assert_eq!(seconds_to_tt(-3600), "10");
        assert_eq!(seconds_to_tt(-21600), "60");
        assert_eq!(seconds_to_tt(-21601), "61");
        assert_eq!(seconds_to_tt(-43200), "66");
        assert_eq!(seconds_to_tt(-64799), "67");
        assert_eq!(seconds_to_tt(-64800), "68");
        assert_eq!(seconds_to_tt(-86400), "68");
    }

    #[test]
    fn test_marsden_square() {
        assert_eq!(marsden_square(40.4, -3.7).as_deref(), Some("145"));
        assert_eq!(marsden_square(5.0, 5.0).as_deref(), Some("036"));
        assert_eq!(marsden_square(-15.0, 175.0).as_deref(), Some("355"));
        assert_eq!(marsden_square(85.0, -5.0).as_deref(), Some("901"));
        assert_eq!(marsden_square(95.0, 0.0), None);
        assert_eq!(marsden_square(5.0, 180.0).as_deref(), Some("019"));
        assert_eq!(marsden_square(5.0, -180.0).as_deref(), Some("019"));
        assert_eq!(marsden_square(5.0, 175.0).as_deref(), Some("019"));
    }

    #[test]
    fn test_cloud_codes() {
        assert_eq!(cloud_base(30.0).as_deref(), Some("0"));
        assert_eq!(cloud_base(700.0).as_deref(), Some("5"));
        assert_eq!(cloud_base(3000.0).as_deref(), Some("9"));
        assert_eq!(layer_height(600.0).as_deref(), Some("20"));
        assert_eq!(layer_height(2400.0).as_deref(), Some("58"));
        assert_eq!(layer_height(12000.0).as_deref(), Some("82"));
        assert_eq!(cloud_cover(0.0).as_deref(), Some("0"));
        assert_eq!(cloud_cover(5.0).as_deref(), Some("1"));
        assert_eq!(cloud_cover(75.0).as_deref(), Some("6"));
        assert_eq!(cloud_cover(98.0).as_deref(), Some("7"));
        assert_eq!(cloud_cover(113.0).as_deref(), Some("9"));
    }

    #[test]
    fn test_visibility() {
        assert_eq!(visibility(50.0).as_deref(), Some("00"));
        assert_eq!(visibility(2500.0).as_deref(), Some("25"));
        assert_eq!(visibility(20000.0).as_deref(), Some("70"));
        assert_eq!(visibility(45000.0).as_deref(), Some("83"));
        assert_eq!(visibility(90000.0).as_deref(), Some("89"));
    }

    #[test]
    fn test_precipitation() {
        assert_eq!(precipitation(0.0).as_deref(), Some("000"));
        assert_eq!(precipitation(-0.1).as_deref(), Some("990"));
        assert_eq!(precipitation(0.4).as_deref(), Some("994"));
        assert_eq!(precipitation(12.3).as_deref(), Some("012"));
        assert_eq!(precipitation_24h(12.3).as_deref(), Some("0123"));
        assert_eq!(precipitation_24h(-0.1).as_deref(), Some("9999"));
        assert_eq!(precipitation_period(-21600).as_deref(), Some("1"));
        assert_eq!(precipitation_period(-3600).as_deref(), Some("5"));
        assert_eq!(precipitation_period(-5400), None);
    }

    #[test]
    fn test_snow_depth() {
        assert_eq!(snow_depth(0.12).as_deref(), Some("012"));
        assert_eq!(snow_depth(-0.01).as_deref(), Some("997"));
        assert_eq!(snow_depth(-0.02).as_deref(), Some("998"));
    }

    #[test]
    fn test_wind() {
        assert_eq!(wind_speed(45.3), Some(("45".to_string(), None)));
        assert_eq!(
            wind_speed(123.4),
            Some(("99".to_string(), Some("123".to_string())))
        );
        assert_eq!(wind_direction(180.0).as_deref(), Some("18"));
        assert_eq!(wind_direction(356.0).as_deref(), Some("36"));
        assert_eq!(upper_wind(272.0, 120.0).as_deref(), Some("27120"));
        assert_eq!(upper_wind(93.0, 15.4).as_deref(), Some("09515"));
        assert_eq!(upper_wind(0.0, 0.0).as_deref(), Some("00000"));
    }

    #[test]
    fn test_fresh_snow() {
        assert_eq!(fresh_snow(0.0).as_deref(), Some("97"));
        assert_eq!(fresh_snow(0.003).as_deref(), Some("93"));
        assert_eq!(fresh_snow(0.12).as_deref(), Some("12"));
        assert_eq!(fresh_snow(0.8).as_deref(), Some("58"));
        assert_eq!(fresh_snow(5.0).as_deref(), Some("98"));
    }

    #[test]
    fn test_marine_codes() {
        assert_eq!(degrees_scaled(-3.7, 10.0, 4).as_deref(), Some("0037"));
        assert_eq!(degrees_scaled(40.4, 10.0, 3).as_deref(), Some("404"));
        assert_eq!(degrees_scaled(12.3456, 1000.0, 5).as_deref(), Some("12346"));
        assert_eq!(compass_sector(0.0).as_deref(), Some("0"));
        assert_eq!(compass_sector(45.0).as_deref(), Some("1"));
        assert_eq!(compass_sector(360.0).as_deref(), Some("8"));
        assert_eq!(compass_sector(200.0).as_deref(), Some("4"));
        assert_eq!(ship_speed(0.0).as_deref(), Some("0"));
        assert_eq!(ship_speed(5.0).as_deref(), Some("2"));
        assert_eq!(ship_speed(40.0).as_deref(), Some("9"));
        assert_eq!(wave_height(1.5).as_deref(), Some("03"));
    }

    #[test]
    fn test_upper_air_pressure() {
        assert_eq!(pressure_hpa(100000.0).as_deref(), Some("000"));
        assert_eq!(pressure_hpa(96530.0).as_deref(), Some("965"));
        assert_eq!(pressure_tenths_hpa(7000.0).as_deref(), Some("700"));
        assert_eq!(pressure_tenths_hpa(1000.0).as_deref(), Some("100"));
    }
}
