//! Section 2 of SHIP reports: ship motion, sea temperature, waves and ice

use super::Synop;
use crate::convert;
use crate::{Atom, SetOnce};

/// Bits of flag table 0 20 033 (4 bits wide).
const ICING_FROM_SPRAY: i32 = 8;
const ICING_FROM_FOG: i32 = 4;
const ICING_FROM_RAIN: i32 = 2;

impl Synop {
    /// `Ds` and `vs`
    pub(super) fn ship_motion(&mut self, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let s2 = &mut self.report.s2;
        let code = match atom.descriptor.y {
            12 => convert::compass_sector(v).map(|ds| s2.ship_direction.set_once(ds)),
            _ => convert::ship_speed(v).map(|vs| s2.ship_speed.set_once(vs)),
        };
        if code.is_none() {
            log::trace!("{} out of range: {v}", atom.descriptor);
        }
    }

    /// `6IsEsEsRs` and `ICE ciSibiDizi`
    pub(super) fn ice(&mut self, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let code = atom.as_i32().unwrap_or(-1);
        let digit = (0..=9).contains(&code).then(|| code.to_string());
        let s2 = &mut self.report.s2;
        match atom.descriptor.y {
            31 => {
                if v >= 0.0 {
                    let eses = ((v * 100.0).round() as i32).min(99);
                    s2.ice_thickness.set_once(format!("{eses:02}"));
                }
            }
            32 => {
                if let Some(rs) = digit {
                    s2.ice_rate.set_once(rs);
                }
            }
            33 => {
                let causes = code & (ICING_FROM_SPRAY | ICING_FROM_FOG | ICING_FROM_RAIN);
                let is = match causes {
                    ICING_FROM_SPRAY => "1",
                    ICING_FROM_FOG => "2",
                    c if c == ICING_FROM_SPRAY | ICING_FROM_FOG => "3",
                    ICING_FROM_RAIN => "4",
                    c if c == ICING_FROM_SPRAY | ICING_FROM_RAIN => "5",
                    _ => return,
                };
                s2.ice_cause.set_once(is);
            }
            34 => {
                if let Some(ci) = digit {
                    s2.sea_ice_concentration.set_once(ci);
                }
            }
            35 => {
                if let Some(bi) = digit {
                    s2.land_ice.set_once(bi);
                }
            }
            36 => {
                if let Some(zi) = digit {
                    s2.ice_situation.set_once(zi);
                }
            }
            37 => {
                if let Some(si) = digit {
                    s2.sea_ice_stage.set_once(si);
                }
            }
            38 => {
                if let Some(di) = convert::compass_sector(v) {
                    s2.ice_edge_bearing.set_once(di);
                }
            }
            _ => {}
        }
    }

    /// Class 22: sea temperature, wind waves and swell.
    pub(super) fn sea(&mut self, atom: &Atom) {
        let Some(v) = atom.as_f64() else {
            return;
        };
        let s2 = &mut self.report.s2;
        let seconds = || format!("{:02}", (v.round() as i32).clamp(0, 99));
        match atom.descriptor.y {
            42 | 43 | 49 => {
                if s2.sea_temp.is_some() {
                    return;
                }
                if let Some((ss, twtwtw)) = convert::temperature_tenths(v) {
                    s2.sea_temp_sign = Some(ss.to_string());
                    s2.sea_temp = Some(twtwtw);
                }
            }
            11 => {
                s2.instr_wave_period.set_once(seconds());
            }
            21 => {
                if let Some(h) = convert::wave_height(v) {
                    s2.instr_wave_height.set_once(h);
                }
            }
            12 => {
                s2.wind_wave_period.set_once(seconds());
            }
            22 => {
                if let Some(h) = convert::wave_height(v) {
                    s2.wind_wave_height.set_once(h);
                }
            }
            3 => {
                let Some(slot) = s2.swell_direction.iter().position(Option::is_none) else {
                    log::trace!("third swell system dropped");
                    return;
                };
                s2.swell_direction[slot] = convert::wind_direction(v);
                self.swell = slot;
            }
            13 => {
                s2.swell_period[self.swell].set_once(seconds());
            }
            23 => {
                if let Some(h) = convert::wave_height(v) {
                    s2.swell_height[self.swell].set_once(h);
                }
            }
            70 => {
                if v >= 0.0 {
                    let tenths = ((v * 10.0).round() as i32).min(999);
                    s2.wave_height_tenths.set_once(format!("{tenths:03}"));
                }
            }
            _ => {}
        }
    }
}
