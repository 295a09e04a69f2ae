//! SYNOP, SHIP and SYNOP MOBIL

mod marine;
mod surface;
mod weather;

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::{
    Accumulate, DecodeOptions, arm_gate, check_mandatory, check_station_index, envelope,
    first_pass, observed, station_index, synoptic_hour,
};
use crate::convert;
use crate::report::synop::{CloudLayer, MAX_CLOUD_LAYERS, SynopReport};
use crate::{
    Atom, CloudContext, Error, Have, ParseState, Report, ReportBody, ReportKind, SetOnce,
    SynopKind, WmoRegion, infer_region,
};

pub(crate) fn decode(
    kind: SynopKind,
    st: &mut ParseState,
    atoms: &[Atom],
    options: &DecodeOptions,
) -> Result<Report, Error> {
    let mut synop = Synop::new(kind);
    first_pass(&mut synop, st, atoms);

    check_mandatory(st, Have::GEO_TIME)?;
    if kind == SynopKind::Fixed {
        check_station_index(st.block.as_ref(), st.station.as_ref())?;
    }
    let observed = observed(st)?;
    synop.second_pass(st, observed);

    let index = match kind {
        SynopKind::Fixed => station_index(st.block.as_ref(), st.station.as_ref()),
        _ => st
            .callsign
            .clone()
            .or_else(|| station_index(st.block.as_ref(), st.station.as_ref())),
    };
    let envelope = envelope(
        st,
        ReportKind::Synop(kind),
        index,
        synop.report.s0.region,
        observed,
        options,
    )?;
    Ok(Report {
        envelope,
        body: ReportBody::Synop(Box::new(synop.report)),
    })
}

struct Synop {
    kind: SynopKind,
    report: SynopReport,
    /// `ww` came from the automatic station code table
    automatic_weather: bool,
    /// Swell system the period and height descriptors refer to
    swell: usize,
}

impl Accumulate for Synop {
    fn qualifier(&mut self, st: &mut ParseState, atom: &Atom) {
        match atom.descriptor.y {
            2 => self.cloud_context(st, atom),
            22 | 24 => arm_gate(st, atom),
            23 => {
                st.statistic = atom.as_i32();
                arm_gate(st, atom);
            }
            _ => log::trace!("{} ignored", atom.descriptor),
        }
    }

    fn element(&mut self, st: &mut ParseState, atom: &Atom) {
        match atom.descriptor.x {
            1 => self.identification(atom),
            2 => self.instrumentation(st, atom),
            7 => self.vertical(atom),
            10 => self.pressure(atom),
            11 => self.wind(st, atom),
            12 => self.temperature(st, atom),
            13 => self.precipitation(st, atom),
            14 => self.radiation(st, atom),
            20 => self.weather(st, atom),
            22 => self.sea(atom),
            4 | 5 | 6 | 31 => {}
            _ => log::trace!("{} ignored", atom.descriptor),
        }
    }
}

impl Synop {
    fn new(kind: SynopKind) -> Self {
        Synop {
            kind,
            report: SynopReport::default(),
            automatic_weather: false,
            swell: 0,
        }
    }

    fn identification(&mut self, atom: &Atom) {
        let s0 = &mut self.report.s0;
        match atom.descriptor.y {
            1 => {
                if let Some(v) = atom.as_i32() {
                    s0.block.set_once(format!("{v:02}"));
                }
            }
            2 => {
                if let Some(v) = atom.as_i32() {
                    s0.station.set_once(format!("{v:03}"));
                }
            }
            3 => {
                if s0.region.is_none() {
                    s0.region = atom.as_i32().and_then(WmoRegion::from_code);
                }
            }
            11 => {
                if let Some(callsign) = atom.as_str() {
                    s0.callsign.set_once(callsign);
                }
            }
            12 | 13 => self.ship_motion(atom),
            _ => {}
        }
    }

    fn instrumentation(&mut self, st: &mut ParseState, atom: &Atom) {
        match atom.descriptor.y {
            // A station of unknown type still has an explicit ix
            1 if atom.is_missing() => {
                self.report.s1.station_operation.set_once("/");
            }
            2 => {
                let Some(flags) = atom.as_i32() else {
                    return;
                };
                st.wind_in_knots = flags & 4 != 0;
                let iw = if st.wind_in_knots { "4" } else { "1" };
                self.report.s0.wind_indicator.set_once(iw);
            }
            4 => {
                if let Some(v) = atom.as_i32().filter(|v| (0..=9).contains(v)) {
                    self.report.s3.evaporation_indicator.set_once(v.to_string());
                }
            }
            _ => {}
        }
    }

    fn vertical(&mut self, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        match atom.descriptor.y {
            4 => {
                let a3 = match v.round() as i32 {
                    100000 => "1",
                    92500 => "2",
                    85000 => "8",
                    70000 => "7",
                    50000 => "5",
                    _ => return,
                };
                self.report.s1.standard_level.set_once(a3);
            }
            1 | 30 if self.kind == SynopKind::Mobile => {
                let s0 = &mut self.report.s0;
                if s0.elevation.set_once(format!("{:04}", v.round() as i32)) {
                    s0.elevation_units = Some("1".to_string());
                }
            }
            _ => {}
        }
    }

    /// 0 08 002 selects the cloud group the next cloud elements describe.
    /// Individual layers (observed or instrument detected) and the
    /// cumulonimbus layer take the next layer index.
    fn cloud_context(&mut self, st: &mut ParseState, atom: &Atom) {
        st.cloud = match atom.as_i32() {
            Some(1..=5 | 21..=24) => CloudContext::Layer(st.next_layer()),
            Some(10 | 11) => CloudContext::BelowStation,
            _ => CloudContext::General,
        };
    }

    /// The section 3 cloud layer selected by the cloud context.
    fn cloud_layer(&mut self, st: &ParseState) -> Option<&mut CloudLayer> {
        let CloudContext::Layer(index) = st.cloud else {
            return None;
        };
        let layers = &mut self.report.s3.cloud_layers;
        while layers.len() <= index {
            if layers.len() >= MAX_CLOUD_LAYERS {
                log::trace!("cloud layer {} dropped", index + 1);
                return None;
            }
            layers.push(CloudLayer::default());
        }
        layers.get_mut(index)
    }

    /// Appends `9SpSpspsp` groups that belong together, followed by `00fff`
    /// when the speed overflows. They are dropped together when the list
    /// has no room for all of them.
    fn supplementary(&mut self, mut groups: Vec<String>, overflow: Option<String>) {
        if let Some(fff) = overflow {
            groups.push(format!("00{fff}"));
        }
        self.report.s3.supplementary.push_all_if_room(groups);
    }

    fn second_pass(&mut self, st: &ParseState, observed: NaiveDateTime) {
        let ix = self.station_operation(st);
        let kind = self.kind;
        let r = &mut self.report;

        r.s0.type_code = Some(ReportKind::Synop(kind).type_code().to_string());
        let nominal = synoptic_hour(observed);
        r.s0.day = Some(format!("{:02}", nominal.day()));
        r.s0.hour = Some(format!("{:02}", nominal.hour()));
        if observed.minute() != 0 {
            r.s1.exact_time
                .set_once(format!("{:02}{:02}", observed.hour(), observed.minute()));
        }

        let ir = match (r.s1.precipitation.is_some(), r.s3.precipitation.is_some()) {
            (true, true) => "0",
            (true, false) => "1",
            (false, true) => "2",
            (false, false) => "4",
        };
        r.s1.precip_indicator.set_once(ir);

        if r.s0.wind_indicator.is_none() && r.s1.wind_speed.is_some() {
            let iw = if st.wind_in_knots { "4" } else { "1" };
            r.s0.wind_indicator = Some(iw.to_string());
        }
        if let Some(ix) = ix {
            r.s1.station_operation.set_once(ix);
        }

        if kind != SynopKind::Fixed {
            r.s0.quadrant = Some(convert::quadrant(st.latitude, st.longitude).to_string());
            r.s0.latitude = convert::degrees_scaled(st.latitude, 10.0, 3);
            r.s0.longitude = convert::degrees_scaled(st.longitude, 10.0, 4);
        }
        if kind == SynopKind::Mobile {
            r.s0.marsden_square = convert::marsden_square(st.latitude, st.longitude);
            r.s0.lat_units = Some(convert::units_digit(st.latitude));
            r.s0.lon_units = Some(convert::units_digit(st.longitude));
        }

        r.s0.region = infer_region(r.s0.region, r.s0.block.as_deref(), r.s0.station.as_deref());

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
        if r.s4 != Default::default() {
            r.sections.mark(4);
        }
    }

    /// `iX` from the station type and the weather reported.
    fn station_operation(&self, st: &ParseState) -> Option<&'static str> {
        let reported = self.report.s1.present_weather.is_some();
        let nothing = st.have.contains(Have::NO_SIGNIFICANT_WW);
        match st.station_type? {
            0 => Some(match (reported, nothing) {
                (true, _) if self.automatic_weather => "7",
                (true, _) => "4",
                (false, true) => "5",
                (false, false) => "6",
            }),
            1 | 2 => Some(match (reported, nothing) {
                (true, _) => "1",
                (false, true) => "2",
                (false, false) => "3",
            }),
            _ => None,
        }
    }
}
