//! TEMP, TEMP SHIP, TEMP MOBIL and TEMP DROP

mod levels;

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::{
    Accumulate, DecodeOptions, check_mandatory, envelope, first_pass, observed, station_index,
    synoptic_hour,
};
use crate::convert;
use crate::report::temp::{CloudGroup, Identification, SondeInfo, SoundingPoint, TempReport};
use crate::{
    Atom, Error, Have, Header, ParseState, Report, ReportBody, ReportKind, SetOnce, TempVariant,
    WmoRegion,
};

/// International sub-category of TEMP SHIP reports.
const SHIP_SUB_CATEGORY: u8 = 5;

pub(crate) fn decode(
    st: &mut ParseState,
    header: &Header,
    atoms: &[Atom],
    options: &DecodeOptions,
) -> Result<Report, Error> {
    let mut temp = Temp::new(header.international_data_sub_category);
    first_pass(&mut temp, st, atoms);

    check_mandatory(st, Have::GEO_TIME | Have::SECOND)?;
    let variant = temp.variant(st)?;
    let observed = observed(st)?;
    temp.second_pass(st, variant, observed);

    let index = match variant {
        TempVariant::Land => station_index(st.block.as_ref(), st.station.as_ref()),
        TempVariant::Ship | TempVariant::Mobile => st.callsign.clone(),
        TempVariant::Drop => temp.drop_id.clone(),
    };
    let envelope = envelope(
        st,
        ReportKind::Temp(variant),
        index,
        temp.report.a.ident.region,
        observed,
        options,
    )?;
    Ok(Report {
        envelope,
        body: ReportBody::Temp(Box::new(temp.report)),
    })
}

struct Temp {
    sub_category: u8,
    report: TempReport,
    /// Identification shared by the four parts
    ident: Identification,
    sonde: SondeInfo,
    clouds: CloudGroup,
    /// `a4`, type of measuring equipment
    equipment: Option<String>,
    /// Flight number or aircraft registration of a drop sonde
    drop_id: Option<String>,
    /// Whether the latest 0 04 086 opened a point (the list may be full)
    point_open: bool,
}

impl Accumulate for Temp {
    fn qualifier(&mut self, _st: &mut ParseState, atom: &Atom) {
        match atom.descriptor.y {
            42 => {
                if let (Some(point), Some(flags)) = (self.point(), atom.as_i32()) {
                    point.flags = flags.max(0) as u32;
                }
            }
            _ => log::trace!("{} ignored", atom.descriptor),
        }
    }

    fn element(&mut self, st: &mut ParseState, atom: &Atom) {
        let desc = atom.descriptor;
        match (desc.x, desc.y) {
            (1, 1) => {
                if let Some(v) = atom.as_i32() {
                    self.ident.block.set_once(format!("{v:02}"));
                }
            }
            (1, 2) => {
                if let Some(v) = atom.as_i32() {
                    self.ident.station.set_once(format!("{v:03}"));
                }
            }
            (1, 3) => {
                if self.ident.region.is_none() {
                    self.ident.region = atom.as_i32().and_then(WmoRegion::from_code);
                }
            }
            (1, 11) => {
                if let Some(callsign) = atom.as_str() {
                    self.ident.callsign.set_once(callsign);
                }
            }
            (1, 6 | 8) => {
                if let Some(id) = atom.as_str() {
                    self.drop_id.set_once(id);
                }
            }
            (2, 3 | 11 | 13 | 14) => self.equipment(atom),
            (4, 86) => {
                let point = SoundingPoint {
                    elapsed: atom.as_i32().unwrap_or(0),
                    ..Default::default()
                };
                self.point_open = self.report.points.push_if_room(point);
            }
            (7, 30) => {
                let Some(v) = atom.as_f64() else {
                    return;
                };
                if st.block.is_none() && self.sub_category != SHIP_SUB_CATEGORY {
                    let ident = &mut self.ident;
                    if ident.elevation.set_once(format!("{:04}", v.round() as i32)) {
                        ident.elevation_units = Some("1".to_string());
                    }
                }
            }
            (20, 11 | 12 | 13) => self.cloud(atom),
            (7, 4) | (10, 9) | (11, 1 | 2) | (12, 1 | 3 | 101 | 103) => {
                let Some(v) = atom.as_f64() else {
                    return;
                };
                let Some(point) = self.point() else {
                    log::trace!("{desc} outside of a sounding point");
                    return;
                };
                let slot = match (desc.x, desc.y) {
                    (7, _) => &mut point.pressure,
                    (10, _) => &mut point.height,
                    (11, 1) => &mut point.wind_direction,
                    (11, _) => &mut point.wind_speed,
                    (12, 1 | 101) => &mut point.temperature,
                    _ => &mut point.dewpoint,
                };
                slot.get_or_insert(v);
            }
            _ => {}
        }
    }
}

impl Temp {
    fn new(sub_category: u8) -> Self {
        Temp {
            sub_category,
            report: TempReport::default(),
            ident: Identification::default(),
            sonde: SondeInfo::default(),
            clouds: CloudGroup::default(),
            equipment: None,
            drop_id: None,
            point_open: false,
        }
    }

    /// The point opened by the latest 0 04 086.
    fn point(&mut self) -> Option<&mut SoundingPoint> {
        if !self.point_open {
            return None;
        }
        self.report.points.last_mut()
    }

    /// `a4` and the `31313 srrarasasa` group.
    fn equipment(&mut self, atom: &Atom) {
        let Some(v) = atom.as_i32() else {
            return;
        };
        match atom.descriptor.y {
            3 if (0..=9).contains(&v) => {
                self.equipment.set_once(v.to_string());
            }
            11 => {
                self.sonde.sonde_type.set_once(format!("{:02}", v % 100));
            }
            13 if (0..=9).contains(&v) => {
                self.sonde.solar_correction.set_once(v.to_string());
            }
            14 => {
                self.sonde.tracking.set_once(format!("{:02}", v % 100));
            }
            _ => {}
        }
    }

    /// `41414 NhCLhCMCH`
    fn cloud(&mut self, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let code = v.round() as i32;
        let clouds = &mut self.clouds;
        match atom.descriptor.y {
            11 => {
                let nh = if (0..=9).contains(&code) {
                    code.to_string()
                } else {
                    "/".to_string()
                };
                clouds.amount.set_once(nh);
            }
            12 => {
                match code {
                    30..=39 => clouds.low.set_once((code - 30).to_string()),
                    20..=29 => clouds.middle.set_once((code - 20).to_string()),
                    10..=19 => clouds.high.set_once((code - 10).to_string()),
                    _ => false,
                };
            }
            _ => {
                if let Some(h) = convert::cloud_base(v) {
                    clouds.base.set_once(h);
                }
            }
        }
    }

    /// The variant follows the identification that was found.
    fn variant(&self, st: &ParseState) -> Result<TempVariant, Error> {
        if st.block.is_some() && st.station.is_some() {
            Ok(TempVariant::Land)
        } else if self.ident.elevation.is_some() {
            Ok(TempVariant::Mobile)
        } else if st.callsign.is_some() {
            Ok(TempVariant::Ship)
        } else if self.drop_id.is_some() {
            Ok(TempVariant::Drop)
        } else {
            Err(Error::UnknownTempType)
        }
    }

    fn second_pass(&mut self, st: &ParseState, variant: TempVariant, observed: NaiveDateTime) {
        let nominal = synoptic_hour(observed);
        let day = nominal.day() + if st.wind_in_knots { 50 } else { 0 };
        let ident = &mut self.ident;
        ident.day = Some(format!("{day:02}"));
        ident.hour = Some(format!("{:02}", nominal.hour()));
        match variant {
            TempVariant::Land => {
                ident.callsign = None;
            }
            TempVariant::Drop => {
                ident.callsign = self.drop_id.clone();
            }
            TempVariant::Ship | TempVariant::Mobile => {}
        }
        if variant != TempVariant::Land {
            ident.latitude = convert::degrees_scaled(st.latitude, 10.0, 3);
            ident.quadrant = Some(convert::quadrant(st.latitude, st.longitude).to_string());
            ident.longitude = convert::degrees_scaled(st.longitude, 10.0, 4);
            ident.marsden_square = convert::marsden_square(st.latitude, st.longitude);
            ident.lat_units = Some(convert::units_digit(st.latitude));
            ident.lon_units = Some(convert::units_digit(st.longitude));
        }

        self.sonde.launch_time = Some(format!("8{:02}{:02}", observed.hour(), observed.minute()));

        let report = &mut self.report;
        report.variant = Some(variant);
        levels::build(report, st.wind_in_knots);

        let prefix = ReportKind::Temp(variant).type_code();
        let indicators = [
            levels::wind_indicator(&report.a),
            self.equipment.clone().unwrap_or_else(|| "/".to_string()),
            levels::wind_indicator(&report.c),
            self.equipment.clone().unwrap_or_else(|| "/".to_string()),
        ];
        let parts = ["AA", "BB", "CC", "DD"];
        for ((target, part), indicator) in report.idents_mut().into_iter().zip(parts).zip(indicators)
        {
            *target = Identification {
                type_code: Some(format!("{prefix}{part}")),
                indicator: Some(indicator),
                ..self.ident.clone()
            };
        }
        report.resolve_region();

        report.a.sonde = self.sonde.clone();
        report.b.sonde = self.sonde.clone();
        report.b.clouds = self.clouds.clone();

        for part in [&mut report.a, &mut report.c] {
            part.sections.mark(1);
            if part.surface.is_some() || !part.levels.is_empty() {
                part.sections.mark(2);
            }
            part.sections.mark(3);
            part.sections.mark(4);
        }
        for part in [&mut report.b, &mut report.d] {
            part.sections.mark(1);
            if !part.temperature_levels.is_empty() {
                part.sections.mark(5);
            }
            if !part.wind_levels.is_empty() {
                part.sections.mark(6);
            }
        }
        report.a.sections.mark(7);
        report.b.sections.mark(7);
    }
}
