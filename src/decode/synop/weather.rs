//! Humidity, precipitation, radiation, present weather and clouds
//! (classes 13, 14 and 20)

use super::Synop;
use crate::convert;
use crate::{Atom, CloudContext, Have, ParseState, SetOnce};

const DAY: i32 = -86400;
const HOUR: i32 = -3600;

impl Synop {
    pub(super) fn precipitation(&mut self, st: &mut ParseState, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        match atom.descriptor.y {
            3 => {
                let uuu = v.round().clamp(0.0, 100.0) as i32;
                self.report.s1.humidity.set_once(format!("{uuu:03}"));
            }
            11 => {
                let window = st.window();
                if window == DAY {
                    self.precipitation_24h(v);
                } else if let Some(tr) = convert::precipitation_period(window) {
                    self.precipitation_rrr(v, &tr);
                } else {
                    log::trace!("precipitation over {window} s ignored");
                }
            }
            19 => self.precipitation_rrr(v, "5"),
            20 => self.precipitation_rrr(v, "7"),
            21 => self.precipitation_rrr(v, "1"),
            22 => self.precipitation_rrr(v, "2"),
            23 => self.precipitation_24h(v),
            12 => {
                if let Some(ss) = convert::fresh_snow(v) {
                    self.supplementary(vec![format!("931{ss}")], None);
                }
            }
            13 => {
                if let Some(sss) = convert::snow_depth(v) {
                    self.report.s3.snow_depth.set_once(sss);
                }
            }
            33 => {
                if v >= 0.0 {
                    let eee = ((v * 10.0).round() as i32).min(999);
                    self.report.s3.evaporation.set_once(format!("{eee:03}"));
                }
            }
            _ => {}
        }
    }

    /// `6RRRtR` goes to section 1 first, then to section 3.
    fn precipitation_rrr(&mut self, mm: f64, tr: &str) {
        let Some(rrr) = convert::precipitation(mm) else {
            return;
        };
        let (s1, s3) = (&mut self.report.s1, &mut self.report.s3);
        if s1.precipitation.is_none() {
            s1.precipitation = Some(rrr);
            s1.precip_period = Some(tr.to_string());
        } else if s3.precipitation.is_none() {
            s3.precipitation = Some(rrr);
            s3.precip_period = Some(tr.to_string());
        }
    }

    fn precipitation_24h(&mut self, mm: f64) {
        if let Some(r24) = convert::precipitation_24h(mm) {
            self.report.s3.precipitation_24h.set_once(r24);
        }
    }

    /// Sunshine and radiation over the last hour or the last day.
    pub(super) fn radiation(&mut self, st: &mut ParseState, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let window = st.window();
        let s3 = &mut self.report.s3;
        let y = atom.descriptor.y;
        match y {
            31 | 32 => {
                // tenths of hour, from minutes or hours
                let tenths = if y == 31 { v / 6.0 } else { v * 10.0 };
                let tenths = tenths.round().max(0.0) as i32;
                match window {
                    DAY => {
                        s3.sunshine_daily.set_once(format!("{:03}", tenths.min(240)));
                    }
                    HOUR => {
                        s3.sunshine_hourly.set_once(format!("{:02}", tenths.min(10)));
                    }
                    _ => log::trace!("sunshine over {window} s ignored"),
                }
            }
            2 | 4 | 16 | 28 | 29 => {
                let j5 = match (y, v >= 0.0) {
                    (16, true) => 0,
                    (16, false) => 1,
                    (28, _) => 2,
                    (29, _) => 3,
                    (2, true) => 4,
                    (2, false) => 5,
                    _ => 6,
                };
                // J/cm2 over a day, kJ/m2 over an hour
                let (groups, amount) = match window {
                    DAY => (&mut s3.radiation_daily, v.abs() / 10000.0),
                    HOUR => (&mut s3.radiation_hourly, v.abs() / 1000.0),
                    _ => {
                        log::trace!("radiation over {window} s ignored");
                        return;
                    }
                };
                let ffff = (amount.round() as i64).min(9999);
                groups[j5].set_once(format!("{ffff:04}"));
            }
            _ => {}
        }
    }

    pub(super) fn weather(&mut self, st: &mut ParseState, atom: &Atom) {
        let y = atom.descriptor.y;
        if (31..=38).contains(&y) {
            self.ice(atom);
            return;
        }
        let Some(v) = atom.as_f64() else {
            return;
        };
        let code = atom.as_i32().unwrap_or(-1);
        match y {
            1 => {
                if let Some(vv) = convert::visibility(v) {
                    self.report.s1.visibility.set_once(vv);
                }
            }
            3 => self.present_weather(st, code),
            4 | 5 => self.past_weather(st, y, code),
            10 => {
                if let Some(n) = convert::cloud_cover(v) {
                    self.report.s1.total_cloud.set_once(n);
                }
            }
            11 => self.cloud_amount(st, code),
            12 => self.cloud_type(st, code),
            13 => self.cloud_height(st, v),
            14 => {
                if st.cloud == CloudContext::BelowStation && v >= 0.0 {
                    let hh = ((v / 100.0).round() as i32).min(99);
                    self.report.s4.top_height.set_once(format!("{hh:02}"));
                }
            }
            17 => {
                if (0..=9).contains(&code) {
                    self.report.s4.top_description.set_once(code.to_string());
                }
            }
            62 => {
                let s3 = &mut self.report.s3;
                match code {
                    0..=9 => {
                        s3.ground_state.set_once(code.to_string());
                    }
                    10..=19 => {
                        s3.snow_ground_state.set_once((code - 10).to_string());
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// `ww`: 100 to 199 come from the automatic station table. 508 says
    /// that no significant weather was observed; 509 and 510 mean there was
    /// no observation.
    fn present_weather(&mut self, st: &mut ParseState, code: i32) {
        let s1 = &mut self.report.s1;
        match code {
            0..=99 => {
                s1.present_weather.set_once(format!("{code:02}"));
            }
            100..=199 => {
                if s1.present_weather.set_once(format!("{:02}", code - 100)) {
                    self.automatic_weather = true;
                }
            }
            508 => st.have.insert(Have::NO_SIGNIFICANT_WW),
            // not observed: iX falls back to "no observation"
            509 | 510 => log::trace!("present weather {code} not observed"),
            _ => {}
        }
    }

    fn past_weather(&mut self, st: &mut ParseState, y: u8, code: i32) {
        let s1 = &mut self.report.s1;
        let (field, flag) = if y == 4 {
            (&mut s1.past_weather1, Have::NO_SIGNIFICANT_W1)
        } else {
            (&mut s1.past_weather2, Have::NO_SIGNIFICANT_W2)
        };
        match code {
            0..=9 => {
                field.set_once(code.to_string());
            }
            10 => st.have.insert(flag),
            11..=19 => {
                field.set_once((code - 10).to_string());
            }
            _ => {}
        }
    }

    fn cloud_amount(&mut self, st: &ParseState, code: i32) {
        let amount = match code {
            0..=9 => code.to_string(),
            _ => "/".to_string(),
        };
        match st.cloud {
            CloudContext::General => {
                self.report.s1.low_cloud_amount.set_once(amount);
            }
            CloudContext::BelowStation => {
                self.report.s4.amount.set_once(amount);
            }
            _ => {
                if let Some(layer) = self.cloud_layer(st) {
                    layer.amount.set_once(amount);
                }
            }
        }
    }

    /// `CL`, `CM` and `CH` from their code ranges, or the genus of a layer.
    fn cloud_type(&mut self, st: &ParseState, code: i32) {
        match st.cloud {
            CloudContext::General => {
                let s1 = &mut self.report.s1;
                match code {
                    30..=39 => s1.low_cloud.set_once((code - 30).to_string()),
                    20..=29 => s1.middle_cloud.set_once((code - 20).to_string()),
                    10..=19 => s1.high_cloud.set_once((code - 10).to_string()),
                    60 => s1.high_cloud.set_once("/"),
                    61 => s1.middle_cloud.set_once("/"),
                    62 => s1.low_cloud.set_once("/"),
                    _ => false,
                };
            }
            CloudContext::BelowStation => {
                if (0..=9).contains(&code) {
                    self.report.s4.genus.set_once(code.to_string());
                }
            }
            _ => {
                if !(0..=9).contains(&code) {
                    return;
                }
                if let Some(layer) = self.cloud_layer(st) {
                    layer.genus.set_once(code.to_string());
                }
            }
        }
    }

    fn cloud_height(&mut self, st: &ParseState, metres: f64) {
        match st.cloud {
            CloudContext::General => {
                if let Some(h) = convert::cloud_base(metres) {
                    self.report.s1.cloud_base.set_once(h);
                }
            }
            CloudContext::BelowStation => {}
            _ => {
                let Some(hshs) = convert::layer_height(metres) else {
                    return;
                };
                if let Some(layer) = self.cloud_layer(st) {
                    layer.height.set_once(hshs);
                }
            }
        }
    }
}
