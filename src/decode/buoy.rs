//! BUOY

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::{Accumulate, DecodeOptions, arm_gate, check_mandatory, envelope, first_pass, observed};
use crate::convert::{self, MPS_TO_KNOTS};
use crate::report::buoy::{BuoyReport, CurrentLayer, ProfileLayer};
use crate::{
    Atom, Error, Have, ParseState, Report, ReportBody, ReportKind, SetOnce, WmoRegion,
};

pub(crate) fn decode(
    st: &mut ParseState,
    atoms: &[Atom],
    options: &DecodeOptions,
) -> Result<Report, Error> {
    let mut buoy = Buoy::default();
    first_pass(&mut buoy, st, atoms);

    check_mandatory(st, Have::GEO_TIME)?;
    let observed = observed(st)?;
    buoy.second_pass(st, observed);

    let s0 = &buoy.report.s0;
    let index = match (s0.region, &s0.subarea, &s0.buoy_number) {
        (Some(region), Some(bw), Some(nb)) => Some(format!("{}{bw}{nb}", region.code())),
        _ => None,
    };
    let envelope = envelope(st, ReportKind::Buoy, index, s0.region, observed, options)?;
    Ok(Report {
        envelope,
        body: ReportBody::Buoy(Box::new(buoy.report)),
    })
}

#[derive(Default)]
struct Buoy {
    report: BuoyReport,
    /// `z0z0z0z0` of the current sub-surface layer
    depth: Option<String>,
}

impl Accumulate for Buoy {
    fn qualifier(&mut self, st: &mut ParseState, atom: &Atom) {
        match atom.descriptor.y {
            22 | 24 => arm_gate(st, atom),
            23 => {
                st.statistic = atom.as_i32();
                arm_gate(st, atom);
            }
            _ => log::trace!("{} ignored", atom.descriptor),
        }
    }

    fn element(&mut self, st: &mut ParseState, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let (x, y) = (atom.descriptor.x, atom.descriptor.y);
        let s1 = &mut self.report.s1;
        match (x, y) {
            (1, _) => self.identification(atom),
            (2, 2) => {
                let flags = v.round() as i32;
                st.wind_in_knots = flags & 4 != 0;
                let iw = if st.wind_in_knots { "4" } else { "1" };
                s1.wind_indicator.set_once(iw);
            }
            // Profile depth. 0 07 063 is a sensor depth and opens no layer.
            (7, 62) => {
                st.next_layer();
                self.depth = Some(format!("{:04}", (v.round() as i32).clamp(0, 9999)));
            }
            (10, 4) => {
                if let Some(p) = convert::pressure_4digit(v) {
                    s1.station_pressure.set_once(p);
                }
            }
            (10, 51) => {
                if let Some(p) = convert::pressure_4digit(v) {
                    s1.sea_level_pressure.set_once(p);
                }
            }
            (10, 61) => {
                if let Some(ppp) = convert::pressure_tendency(v) {
                    s1.tendency.set_once(ppp);
                }
            }
            (10, 63) => {
                if let Some(a) = atom.as_i32().filter(|a| (0..=8).contains(a)) {
                    s1.tendency_character.set_once(a.to_string());
                }
            }
            (11, 1 | 11) => {
                if let Some(dd) = convert::wind_direction(v) {
                    s1.wind_direction.set_once(dd);
                }
            }
            (11, 2 | 12) => {
                if s1.wind_speed.is_some() {
                    return;
                }
                let speed = if st.wind_in_knots { v * MPS_TO_KNOTS } else { v };
                if let Some((ff, fff)) = convert::wind_speed(speed) {
                    s1.wind_speed = Some(ff);
                    s1.wind_speed_overflow = fff;
                }
            }
            (12, 1 | 4 | 101 | 104) => {
                if s1.temperature.is_some() {
                    return;
                }
                if let Some((sn, ttt)) = convert::temperature_tenths(v) {
                    s1.temp_sign = Some(sn.to_string());
                    s1.temperature = Some(ttt);
                }
            }
            (12, 3 | 6 | 103 | 106) => {
                if s1.dewpoint.is_some() {
                    return;
                }
                if let Some((sn, tdtdtd)) = convert::temperature_tenths(v) {
                    s1.dewpoint_sign = Some(sn.to_string());
                    s1.dewpoint = Some(tdtdtd);
                }
            }
            (13, 3) => {
                let uuu = v.round().clamp(0.0, 100.0) as i32;
                s1.humidity.set_once(format!("{uuu:03}"));
            }
            (22, _) => self.sea(st, atom, v),
            _ => {}
        }
    }
}

impl Buoy {
    /// `A1bwnbnbnb` from its parts or from a 5 digit WMO buoy identifier.
    fn identification(&mut self, atom: &Atom) {
        let s0 = &mut self.report.s0;
        let Some(v) = atom.as_i32() else {
            return;
        };
        match atom.descriptor.y {
            3 => {
                if s0.region.is_none() {
                    s0.region = WmoRegion::from_code(v);
                }
            }
            20 => {
                if (0..=9).contains(&v) {
                    s0.subarea.set_once(v.to_string());
                }
            }
            5 => {
                s0.buoy_number.set_once(format!("{:03}", v % 1000));
            }
            87 if (10000..100000).contains(&v) => {
                if s0.region.is_none() {
                    s0.region = WmoRegion::from_code(v / 10000);
                }
                s0.subarea.set_once(((v / 1000) % 10).to_string());
                s0.buoy_number.set_once(format!("{:03}", v % 1000));
            }
            _ => {}
        }
    }

    /// Section 2 at the surface, section 3 below a depth.
    fn sea(&mut self, st: &ParseState, atom: &Atom, v: f64) {
        let s2 = &mut self.report.s2;
        match atom.descriptor.y {
            43 | 45 if self.depth.is_some() => {
                let Some(t0) = convert::temperature_offset_hundredths(v) else {
                    return;
                };
                if let Some(layer) = self.profile_layer(st.layer()) {
                    layer.temperature.set_once(t0);
                }
            }
            42 | 43 | 49 => {
                if s2.sea_temp.is_some() {
                    return;
                }
                if let Some((sn, twtwtw)) = convert::temperature_tenths(v) {
                    s2.sea_temp_sign = Some(sn.to_string());
                    s2.sea_temp = Some(twtwtw);
                }
            }
            11 => {
                if v >= 0.0 {
                    s2.wave_period.set_once(format!("{:02}", (v.round() as i32).min(99)));
                    let tenths = ((v * 10.0).round() as i32).min(999);
                    s2.wave_period_tenths.set_once(format!("{tenths:03}"));
                }
            }
            21 => {
                if let Some(hwa) = convert::wave_height(v) {
                    s2.wave_height.set_once(hwa);
                    let tenths = ((v * 10.0).round() as i32).min(999);
                    s2.wave_height_tenths.set_once(format!("{tenths:03}"));
                }
            }
            59 | 62 if self.depth.is_some() => {
                if v < 0.0 {
                    return;
                }
                let s0 = format!("{:04}", ((v * 100.0).round() as i32).min(9999));
                if let Some(layer) = self.profile_layer(st.layer()) {
                    layer.salinity.set_once(s0);
                }
            }
            4 if self.depth.is_some() => {
                let Some(d0d0) = convert::wind_direction(v) else {
                    return;
                };
                if let Some(layer) = self.current_layer(st.layer()) {
                    layer.direction.set_once(d0d0);
                }
            }
            31 if self.depth.is_some() => {
                if v < 0.0 {
                    return;
                }
                let c0 = format!("{:03}", ((v * 100.0).round() as i32).min(999));
                if let Some(layer) = self.current_layer(st.layer()) {
                    layer.speed.set_once(c0);
                }
            }
            _ => {}
        }
    }

    fn profile_layer(&mut self, index: usize) -> Option<&mut ProfileLayer> {
        let profile = &mut self.report.s3.profile;
        while profile.len() <= index {
            let layer = ProfileLayer {
                depth: self.depth.clone(),
                ..Default::default()
            };
            if !profile.push_if_room(layer) {
                return None;
            }
        }
        profile.get_mut(index)
    }

    fn current_layer(&mut self, index: usize) -> Option<&mut CurrentLayer> {
        let currents = &mut self.report.s3.currents;
        while currents.len() <= index {
            let layer = CurrentLayer {
                depth: self.depth.clone(),
                ..Default::default()
            };
            if !currents.push_if_room(layer) {
                return None;
            }
        }
        currents.get_mut(index)
    }

    fn second_pass(&mut self, st: &ParseState, observed: NaiveDateTime) {
        let r = &mut self.report;
        let s0 = &mut r.s0;
        s0.day = Some(format!("{:02}", observed.day()));
        s0.month = Some(format!("{:02}", observed.month()));
        s0.year_digit = Some((observed.year().rem_euclid(10)).to_string());
        s0.hour = Some(format!("{:02}", observed.hour()));
        s0.minute = Some(format!("{:02}", observed.minute()));
        s0.quadrant = Some(convert::quadrant(st.latitude, st.longitude).to_string());
        s0.latitude = convert::degrees_scaled(st.latitude, 1000.0, 5);
        s0.longitude = convert::degrees_scaled(st.longitude, 1000.0, 6);

        if r.s1.wind_indicator.is_none() && r.s1.wind_speed.is_some() {
            let iw = if st.wind_in_knots { "4" } else { "1" };
            r.s1.wind_indicator = Some(iw.to_string());
        }

        r.sections.mark(0);
        if r.s1 != Default::default() {
            r.sections.mark(1);
        }
        if r.s2 != Default::default() {
            r.sections.mark(2);
        }
        if r.s3 != Default::default() {
            r.sections.mark(3);
        }
    }
}
