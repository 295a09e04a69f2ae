//! Pressure, wind and temperature (classes 10, 11 and 12)

use super::Synop;
use crate::convert::{self, GUST_MPS_TO_KNOTS, MPS_TO_KNOTS};
use crate::{Atom, Have, ParseState, SetOnce, WmoRegion, infer_region};

/// Extremes are reported for windows that are whole multiples of 3 hours.
fn is_extreme_window(window: i32) -> bool {
    window != 0 && window % 10800 == 0
}

impl Synop {
    pub(super) fn pressure(&mut self, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let s1 = &mut self.report.s1;
        match atom.descriptor.y {
            4 => {
                if let Some(p) = convert::pressure_4digit(v) {
                    s1.station_pressure.set_once(p);
                }
            }
            51 => {
                if let Some(p) = convert::pressure_4digit(v) {
                    s1.sea_level_pressure.set_once(p);
                }
            }
            9 => {
                if s1.standard_level.is_none() {
                    return;
                }
                let metres = v.round() as i32;
                if metres < 0 {
                    return;
                }
                // geopotential metres without the thousands digit
                s1.geopotential.set_once(format!("{:03}", metres % 1000));
            }
            61 => {
                if let Some(ppp) = convert::pressure_tendency(v) {
                    s1.tendency.set_once(ppp);
                }
            }
            63 => {
                if let Some(a) = atom.as_i32().filter(|a| (0..=8).contains(a)) {
                    s1.tendency_character.set_once(a.to_string());
                }
            }
            62 => {
                let s3 = &mut self.report.s3;
                let Some(p24) = convert::pressure_tendency(v) else {
                    return;
                };
                if s3.pressure_24h.set_once(p24) {
                    s3.pressure_24h_sign = Some(if v >= 0.0 { "8" } else { "9" }.to_string());
                }
            }
            _ => {}
        }
    }

    pub(super) fn wind(&mut self, st: &mut ParseState, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let s1 = &mut self.report.s1;
        match atom.descriptor.y {
            1 | 11 => {
                if let Some(dd) = convert::wind_direction(v) {
                    s1.wind_direction.set_once(dd);
                }
            }
            2 | 12 => {
                if s1.wind_speed.is_some() {
                    return;
                }
                let speed = if st.wind_in_knots { v * MPS_TO_KNOTS } else { v };
                if let Some((ff, fff)) = convert::wind_speed(speed) {
                    s1.wind_speed = Some(ff);
                    s1.wind_speed_overflow = fff;
                }
            }
            41 => self.gust(st, v),
            42 => {
                if let Some((ff, fff)) = convert::wind_speed(gust_speed(st, v)) {
                    self.supplementary(vec![format!("912{ff}")], fff);
                }
            }
            43 => {
                if let Some(dd) = convert::wind_direction(v) {
                    self.supplementary(vec![format!("915{dd}")], None);
                }
            }
            _ => {}
        }
    }

    /// `910ff` for the last 10 minutes, `907tt 911ff` for other periods.
    fn gust(&mut self, st: &mut ParseState, v: f64) {
        let Some((ff, fff)) = convert::wind_speed(gust_speed(st, v)) else {
            return;
        };
        let window = st.window();
        if window == -600 {
            if st.have.contains(Have::GUST) {
                return;
            }
            st.have.insert(Have::GUST);
            self.supplementary(vec![format!("910{ff}")], fff);
        } else {
            let tt = convert::seconds_to_tt(window);
            self.supplementary(vec![format!("907{tt}"), format!("911{ff}")], fff);
        }
    }

    pub(super) fn temperature(&mut self, st: &mut ParseState, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let y = atom.descriptor.y;
        match y {
            1 | 4 | 101 | 104 => {
                let s1 = &mut self.report.s1;
                if s1.temperature.is_some() {
                    return;
                }
                if let Some((sn, ttt)) = convert::temperature_tenths(v) {
                    s1.temp_sign = Some(sn.to_string());
                    s1.temperature = Some(ttt);
                }
            }
            3 | 6 | 103 | 106 => {
                let s1 = &mut self.report.s1;
                if s1.dewpoint.is_some() {
                    return;
                }
                if let Some((sn, tdtdtd)) = convert::temperature_tenths(v) {
                    s1.dewpoint_sign = Some(sn.to_string());
                    s1.dewpoint = Some(tdtdtd);
                }
            }
            111 | 14 | 16 | 112 | 15 | 17 => {
                let window = match y {
                    14 | 15 => -43200,
                    16 | 17 => -86400,
                    _ => st.window(),
                };
                if !is_extreme_window(window) {
                    log::trace!("{} over {window} s ignored", atom.descriptor);
                    return;
                }
                let s3 = &mut self.report.s3;
                let (sign, field) = match y {
                    111 | 14 | 16 => (&mut s3.max_sign, &mut s3.max_temp),
                    _ => (&mut s3.min_sign, &mut s3.min_temp),
                };
                if field.is_some() {
                    return;
                }
                if let Some((sn, ttt)) = convert::temperature_tenths(v) {
                    *sign = Some(sn.to_string());
                    *field = Some(ttt);
                }
            }
            113 | 121 => self.ground_minimum(v),
            _ => {}
        }
    }

    /// `3EsnTgTg` in Region VI, `3Ejjj` in Region I; not reported elsewhere.
    fn ground_minimum(&mut self, kelvin: f64) {
        let s0 = &mut self.report.s0;
        s0.region = infer_region(s0.region, s0.block.as_deref(), s0.station.as_deref());
        let s3 = &mut self.report.s3;
        if s3.ground_min.is_some() {
            return;
        }
        match s0.region {
            Some(WmoRegion::VI) => {
                if let Some((sn, tgtg)) = convert::temperature_whole(kelvin) {
                    s3.ground_min_sign = Some(sn.to_string());
                    s3.ground_min = Some(tgtg);
                }
            }
            Some(WmoRegion::I) => {
                s3.ground_min = convert::temperature_region_i(kelvin);
            }
            region => log::trace!("ground minimum temperature not reported in {region:?}"),
        }
    }
}

/// Gust speed in the display unit.
fn gust_speed(st: &ParseState, mps: f64) -> f64 {
    if st.wind_in_knots {
        mps * GUST_MPS_TO_KNOTS
    } else {
        mps
    }
}
