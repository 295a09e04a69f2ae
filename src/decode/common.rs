//! Parse state updates shared by every report family: identification,
//! date and time, position, altitude and replication.

use crate::{Atom, Have, ParseState};

pub(crate) fn element(st: &mut ParseState, atom: &Atom) {
    match atom.descriptor.x {
        1 => identification(st, atom),
        2 => station_type(st, atom),
        4 => date_time(st, atom),
        5 | 6 => position(st, atom),
        7 => altitude(st, atom),
        31 => replication(st, atom),
        _ => {}
    }
}

fn identification(st: &mut ParseState, atom: &Atom) {
    let y = atom.descriptor.y;
    match y {
        1 => {
            if st.block.is_none() {
                st.block = atom.as_i32().map(|v| format!("{v:02}"));
            }
        }
        2 => {
            if st.station.is_none() {
                st.station = atom.as_i32().map(|v| format!("{v:03}"));
            }
        }
        11 => {
            if st.callsign.is_none() {
                st.callsign = atom.as_str().map(str::to_string);
            }
        }
        15 | 18 | 19 => {
            if st.have.contains(Have::NAME) {
                return;
            }
            if let Some(name) = atom.as_str() {
                st.name = Some(name.to_string());
                st.have.insert(Have::NAME);
            }
        }
        101 => {
            if st.have.contains(Have::COUNTRY) {
                return;
            }
            let country = match (&atom.explanation, atom.as_i32()) {
                (Some(text), _) => Some(text.trim().to_string()),
                (None, Some(code)) => Some(code.to_string()),
                _ => None,
            };
            if country.is_some() {
                st.country = country;
                st.have.insert(Have::COUNTRY);
            }
        }
        125..=128 => {
            let slot = &mut st.wigos[(y - 125) as usize];
            if slot.is_none() {
                *slot = match y {
                    128 => atom.as_str().map(str::to_string),
                    _ => atom.as_i32().map(|v| v.to_string()),
                };
            }
        }
        _ => {}
    }
}

fn station_type(st: &mut ParseState, atom: &Atom) {
    if atom.descriptor.y != 1 || st.have.contains(Have::STATION_TYPE) {
        return;
    }
    if let Some(v) = atom.as_i32() {
        st.station_type = Some(v);
        st.have.insert(Have::STATION_TYPE);
    }
}

fn date_time(st: &mut ParseState, atom: &Atom) {
    let y = atom.descriptor.y;
    if (23..=26).contains(&y) {
        let unit = match y {
            23 => 86400,
            24 => 3600,
            25 => 60,
            _ => 1,
        };
        st.shift_displacement(atom.as_i32().map(|v| v.saturating_mul(unit)));
        return;
    }
    let Some(v) = atom.as_i32() else {
        return;
    };
    let (flag, slot): (Have, &mut u32) = match y {
        1 => {
            if !st.have.contains(Have::YEAR) {
                st.year = v;
                st.have.insert(Have::YEAR);
            }
            return;
        }
        2 => (Have::MONTH, &mut st.month),
        3 => (Have::DAY, &mut st.day),
        4 => (Have::HOUR, &mut st.hour),
        5 => (Have::MINUTE, &mut st.minute),
        6 => (Have::SECOND, &mut st.second),
        _ => return,
    };
    if !st.have.contains(flag) && v >= 0 {
        *slot = v as u32;
        st.have.insert(flag);
    }
}

fn position(st: &mut ParseState, atom: &Atom) {
    let Some(v) = atom.as_f64() else {
        return;
    };
    match (atom.descriptor.x, atom.descriptor.y) {
        (5, 1 | 2) if !st.have.contains(Have::LATITUDE) => {
            st.latitude = v;
            st.have.insert(Have::LATITUDE);
        }
        (6, 1 | 2) if !st.have.contains(Have::LONGITUDE) => {
            st.longitude = v;
            st.have.insert(Have::LONGITUDE);
        }
        _ => {}
    }
}

fn altitude(st: &mut ParseState, atom: &Atom) {
    if !matches!(atom.descriptor.y, 1 | 30) || st.have.contains(Have::ALTITUDE) {
        return;
    }
    if let Some(v) = atom.as_f64() {
        st.altitude = v;
        st.have.insert(Have::ALTITUDE);
    }
}

fn replication(st: &mut ParseState, atom: &Atom) {
    if atom.descriptor.y <= 2 {
        st.set_replicator();
    }
}
