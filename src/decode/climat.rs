//! CLIMAT

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::{Accumulate, DecodeOptions, check_mandatory, check_station_index, envelope, first_pass};
use crate::convert::{self, GUST_MPS_TO_KNOTS};
use crate::report::climat::{ClimatReport, DAY_COUNT_CONDITIONS, Extreme, MonthlyValues};
use crate::{
    Atom, Error, Have, ParseState, Report, ReportBody, ReportKind, SetOnce, infer_region,
};

pub(crate) fn decode(
    st: &mut ParseState,
    atoms: &[Atom],
    options: &DecodeOptions,
) -> Result<Report, Error> {
    let mut climat = Climat::default();
    first_pass(&mut climat, st, atoms);

    check_mandatory(st, Have::LATITUDE | Have::LONGITUDE | Have::YEAR | Have::MONTH)?;
    check_station_index(st.block.as_ref(), st.station.as_ref())?;
    let observed = NaiveDate::from_ymd_opt(st.year, st.month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            Error::OutOfRange(format!("invalid month {:04}-{:02}", st.year, st.month))
        })?;
    climat.second_pass(st, observed);

    let s0 = &climat.report.s0;
    let index = super::station_index(st.block.as_ref(), st.station.as_ref());
    let envelope = envelope(st, ReportKind::Climat, index, s0.region, observed, options)?;
    Ok(Report {
        envelope,
        body: ReportBody::Climat(Box::new(climat.report)),
    })
}

/// Part of the bulletin the following values belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    Monthly,
    Normals,
    Extremes,
}

/// Extremes of section 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtremeKind {
    HighestDailyMean,
    LowestDailyMean,
    HighestMax,
    LowestMin,
    HighestPrecipitation,
    HighestWind,
}

#[derive(Default)]
struct Climat {
    report: ClimatReport,
    section: Section,
    /// Latched 0 08 050, kind of the next missing value count
    missing_kind: Option<i32>,
    /// Latched 0 08 052, condition of the next day count
    condition: Option<usize>,
    /// 0 08 053 says the extreme occurred on more than one day
    several_days: bool,
    /// `yy` read before its extreme value
    pending_day: Option<String>,
    last_extreme: Option<ExtremeKind>,
}

impl Accumulate for Climat {
    fn qualifier(&mut self, st: &mut ParseState, atom: &Atom) {
        let v = atom.as_i32();
        match atom.descriptor.y {
            50 => self.missing_kind = v,
            20 => {
                let (Some(kind), Some(count)) = (self.missing_kind.take(), v) else {
                    return;
                };
                self.missing_days(kind, count);
            }
            52 => {
                self.condition = v
                    .and_then(|c| usize::try_from(c).ok())
                    .filter(|c| *c < DAY_COUNT_CONDITIONS);
            }
            22 => {
                let Some(days) = v.filter(|d| *d >= 0) else {
                    return;
                };
                let days = format!("{:02}", days.min(99));
                match self.condition.take() {
                    Some(condition) => {
                        self.report.s3[condition].set_once(days);
                    }
                    None => {
                        self.values().precip_days.set_once(days);
                    }
                }
            }
            53 => self.several_days = v == Some(1),
            23 => st.statistic = v,
            _ => log::trace!("{} ignored", atom.descriptor),
        }
    }

    fn element(&mut self, st: &mut ParseState, atom: &Atom) {
        let desc = atom.descriptor;
        if desc.is(4, 1) {
            self.year(st, atom);
            return;
        }
        if desc.is(4, 3) {
            self.day(atom);
            return;
        }
        let Some(v) = atom.as_f64() else {
            return;
        };
        match (desc.x, desc.y) {
            (1, 1) => {
                if let Some(v) = atom.as_i32() {
                    self.report.s0.block.set_once(format!("{v:02}"));
                }
            }
            (1, 2) => {
                if let Some(v) = atom.as_i32() {
                    self.report.s0.station.set_once(format!("{v:03}"));
                }
            }
            (10, 4) => {
                if let Some(p) = convert::pressure_4digit(v) {
                    self.values().station_pressure.set_once(p);
                }
            }
            (10, 51) => {
                if let Some(p) = convert::pressure_4digit(v) {
                    self.values().sea_level_pressure.set_once(p);
                }
            }
            (12, 101) => {
                if self.section == Section::Extremes {
                    match st.statistic {
                        Some(2) => self.extreme_temperature(ExtremeKind::HighestDailyMean, v),
                        Some(3) => self.extreme_temperature(ExtremeKind::LowestDailyMean, v),
                        _ => log::trace!("{desc} without statistic in section 4"),
                    }
                    return;
                }
                let values = self.values();
                if values.temperature.is_none() {
                    if let Some((sn, ttt)) = convert::temperature_tenths(v) {
                        values.temp_sign = Some(sn.to_string());
                        values.temperature = Some(ttt);
                    }
                }
            }
            (12, 151) => {
                if v >= 0.0 {
                    let stst = ((v * 10.0).round() as i32).min(999);
                    self.values().temp_std_dev.set_once(format!("{stst:03}"));
                }
            }
            (12, 118) => self.monthly_extreme_temperature(true, v),
            (12, 119) => self.monthly_extreme_temperature(false, v),
            (12, 152) => self.extreme_temperature(ExtremeKind::HighestDailyMean, v),
            (12, 153) => self.extreme_temperature(ExtremeKind::LowestDailyMean, v),
            (12, 111) => {
                if self.section == Section::Extremes {
                    self.extreme_temperature(ExtremeKind::HighestMax, v);
                } else {
                    self.monthly_extreme_temperature(true, v);
                }
            }
            (12, 112) => {
                if self.section == Section::Extremes {
                    self.extreme_temperature(ExtremeKind::LowestMin, v);
                } else {
                    self.monthly_extreme_temperature(false, v);
                }
            }
            (13, 4) => {
                if v >= 0.0 {
                    let eee = ((v / 10.0).round() as i32).min(999);
                    self.values().vapour_pressure.set_once(format!("{eee:03}"));
                }
            }
            (13, 60) => {
                // negative amounts are traces
                let r1 = if v < 0.0 {
                    "9999".to_string()
                } else {
                    format!("{:04}", (v.round() as i32).min(8899))
                };
                self.values().precipitation.set_once(r1);
            }
            (13, 51) => {
                if let Some(rd) = atom.as_i32().filter(|q| (0..=6).contains(q)) {
                    self.values().precip_quintile.set_once(rd.to_string());
                }
            }
            (13, 52) => {
                let rx = if v < 0.0 {
                    "9999".to_string()
                } else {
                    format!("{:04}", ((v * 10.0).round() as i32).min(9998))
                };
                self.extreme(ExtremeKind::HighestPrecipitation, None, rx);
            }
            (14, 32) => {
                if v >= 0.0 {
                    let s1 = (v.round() as i32).min(999);
                    self.values().sunshine.set_once(format!("{s1:03}"));
                }
            }
            (14, 33) => {
                if v >= 0.0 {
                    let ps = (v.round() as i32).min(999);
                    self.values().sunshine_percent.set_once(format!("{ps:03}"));
                }
            }
            (11, 46) => {
                if v < 0.0 {
                    return;
                }
                let (iw, speed) = if st.wind_in_knots {
                    ('4', v * GUST_MPS_TO_KNOTS)
                } else {
                    ('1', v)
                };
                let fx = format!("{:03}", (speed.round() as i32).min(999));
                self.extreme(ExtremeKind::HighestWind, Some(iw), fx);
            }
            _ => {}
        }
    }
}

impl Climat {
    /// Values of the section being read: the month or the normals.
    fn values(&mut self) -> &mut MonthlyValues {
        match self.section {
            Section::Normals => &mut self.report.s2.values,
            _ => &mut self.report.s1,
        }
    }

    /// `JJJ`, then `YbYb` opening the normals, then `YcYc` right after it.
    fn year(&mut self, st: &ParseState, atom: &Atom) {
        let Some(year) = atom.as_i32() else {
            return;
        };
        let yy = format!("{:02}", year.rem_euclid(100));
        if st.previous_is(4, 1) && self.section == Section::Normals {
            self.report.s2.last_year.set_once(yy);
        } else if self.report.s0.year.is_none() {
            self.report.s0.year = Some(format!("{:03}", year.rem_euclid(1000)));
        } else {
            self.report.s2.first_year.set_once(yy);
            self.section = Section::Normals;
        }
    }

    /// `yy` of an extreme. Attached to the extreme read just before it when
    /// that one has no day yet, otherwise kept for the next extreme.
    fn day(&mut self, atom: &Atom) {
        self.section = Section::Extremes;
        let Some(day) = atom.as_i32().filter(|d| (1..=31).contains(d)) else {
            return;
        };
        let day = day + if self.several_days { 50 } else { 0 };
        let yy = format!("{day:02}");
        if let Some(kind) = self.last_extreme {
            let extreme = self.extreme_mut(kind);
            if extreme.value.is_some() && extreme.day.is_none() {
                extreme.day = Some(yy);
                return;
            }
        }
        self.pending_day = Some(yy);
    }

    fn missing_days(&mut self, kind: i32, count: i32) {
        if count < 0 {
            return;
        }
        let count = format!("{:02}", count.min(99));
        let missing = &mut self.values().missing;
        let fields = match kind {
            1 => vec![&mut missing.pressure],
            2 => vec![&mut missing.temperature],
            3 => vec![&mut missing.max_temp, &mut missing.min_temp],
            4 => vec![&mut missing.vapour_pressure],
            5 => vec![&mut missing.precipitation],
            6 => vec![&mut missing.sunshine],
            7 => vec![&mut missing.max_temp],
            8 => vec![&mut missing.min_temp],
            _ => {
                log::trace!("missing value kind {kind} ignored");
                return;
            }
        };
        for field in fields {
            field.set_once(count.clone());
        }
    }

    /// Mean daily maximum or minimum of the month (or of the normals).
    fn monthly_extreme_temperature(&mut self, max: bool, kelvin: f64) {
        let values = self.values();
        let (sign, field) = if max {
            (&mut values.max_sign, &mut values.max_temp)
        } else {
            (&mut values.min_sign, &mut values.min_temp)
        };
        if field.is_some() {
            return;
        }
        if let Some((sn, ttt)) = convert::temperature_tenths(kelvin) {
            *sign = Some(sn.to_string());
            *field = Some(ttt);
        }
    }

    fn extreme_temperature(&mut self, kind: ExtremeKind, kelvin: f64) {
        if let Some((sn, ttt)) = convert::temperature_tenths(kelvin) {
            self.extreme(kind, Some(sn), ttt);
        }
    }

    fn extreme(&mut self, kind: ExtremeKind, sign: Option<char>, value: String) {
        self.section = Section::Extremes;
        let pending = self.pending_day.take();
        let extreme = self.extreme_mut(kind);
        if extreme.value.is_some() {
            return;
        }
        extreme.sign = sign.map(String::from);
        extreme.value = Some(value);
        extreme.day = pending;
        self.last_extreme = Some(kind);
    }

    fn extreme_mut(&mut self, kind: ExtremeKind) -> &mut Extreme {
        let s4 = &mut self.report.s4;
        match kind {
            ExtremeKind::HighestDailyMean => &mut s4.highest_daily_mean,
            ExtremeKind::LowestDailyMean => &mut s4.lowest_daily_mean,
            ExtremeKind::HighestMax => &mut s4.highest_max,
            ExtremeKind::LowestMin => &mut s4.lowest_min,
            ExtremeKind::HighestPrecipitation => &mut s4.highest_precipitation,
            ExtremeKind::HighestWind => &mut s4.highest_wind,
        }
    }

    fn second_pass(&mut self, st: &ParseState, observed: NaiveDateTime) {
        let r = &mut self.report;
        let s0 = &mut r.s0;
        s0.month = Some(format!("{:02}", observed.month()));
        if s0.block.is_none() {
            s0.block = st.block.clone();
        }
        if s0.station.is_none() {
            s0.station = st.station.clone();
        }
        s0.region = infer_region(s0.region, s0.block.as_deref(), s0.station.as_deref());

        r.sections.mark(0);
        if r.s1 != Default::default() {
            r.sections.mark(1);
        }
        if r.s2 != Default::default() {
            r.sections.mark(2);
        }
        if r.s3.iter().any(Option::is_some) {
            r.sections.mark(3);
        }
        if r.s4 != Default::default() {
            r.sections.mark(4);
        }
    }
}
