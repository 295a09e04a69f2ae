#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tinytac::{Atom, DecodeOptions, Descriptor, Header};

pub fn num(x: u8, y: u8, value: f64) -> Atom {
    Atom::number(Descriptor::element(x, y), value)
}

pub fn text(x: u8, y: u8, value: &str) -> Atom {
    Atom::text(Descriptor::element(x, y), value)
}

pub fn missing(x: u8, y: u8) -> Atom {
    Atom::missing(Descriptor::element(x, y))
}

pub fn header(category: u8, sub_category: u8, sequences: &[u32]) -> Header {
    Header {
        data_category: category,
        international_data_sub_category: sub_category,
        local_data_sub_category: 0,
        descriptors: sequences
            .iter()
            .map(|code| Descriptor::from_code(*code).unwrap())
            .collect(),
    }
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

/// Options with a fixed processing time in 2030.
pub fn options() -> DecodeOptions {
    DecodeOptions {
        reference_time: Some(datetime(2030, 1, 1, 0, 0)),
        ..Default::default()
    }
}

pub fn station_index(block: i32, station: i32) -> Vec<Atom> {
    vec![num(1, 1, block as f64), num(1, 2, station as f64)]
}

/// Year to minute, as 0 04 001 to 0 04 005.
pub fn time(y: i32, m: u32, d: u32, h: u32, mi: u32) -> Vec<Atom> {
    vec![
        num(4, 1, y as f64),
        num(4, 2, m as f64),
        num(4, 3, d as f64),
        num(4, 4, h as f64),
        num(4, 5, mi as f64),
    ]
}

pub fn position(latitude: f64, longitude: f64) -> Vec<Atom> {
    vec![num(5, 1, latitude), num(6, 1, longitude)]
}
