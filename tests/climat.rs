use tinytac::report::ClimatReport;
use tinytac::*;

mod common;
use common::*;

fn decode(atoms: &[Atom]) -> Result<Report, Error> {
    Decoder::new(options()).decode_subset(&header(0, 20, &[307073]), atoms)
}

fn climat(report: &Report) -> &ClimatReport {
    match &report.body {
        ReportBody::Climat(climat) => climat,
        body => panic!("not a CLIMAT: {body:?}"),
    }
}

fn month() -> Vec<Atom> {
    let mut atoms = station_index(8, 221);
    atoms.extend(position(40.4, -3.7));
    atoms.extend([
        num(4, 1, 2020.0),
        num(4, 2, 3.0),
        num(10, 4, 94510.0),
        num(12, 101, 283.15),
        num(8, 50, 2.0),
        num(8, 20, 1.0),
        num(13, 4, 854.0),
        num(13, 60, 31.0),
        num(13, 51, 2.0),
        num(8, 22, 6.0),
        num(14, 32, 201.0),
    ]);
    atoms
}

#[test]
fn test_monthly_values() {
    let report = decode(&month()).unwrap();
    assert_eq!(report.envelope.type_code, "CLIMAT");
    assert_eq!(report.envelope.index.as_deref(), Some("08221"));
    assert_eq!(report.envelope.observed, datetime(2020, 3, 1, 0, 0));

    let r = climat(&report);
    assert_eq!(r.s0.month.as_deref(), Some("03"));
    assert_eq!(r.s0.year.as_deref(), Some("020"));
    assert_eq!(r.s0.region, Some(WmoRegion::VI));
    assert_eq!(r.s1.station_pressure.as_deref(), Some("9451"));
    assert_eq!(r.s1.temp_sign.as_deref(), Some("0"));
    assert_eq!(r.s1.temperature.as_deref(), Some("100"));
    assert_eq!(r.s1.missing.temperature.as_deref(), Some("01"));
    assert_eq!(r.s1.vapour_pressure.as_deref(), Some("085"));
    assert_eq!(r.s1.precipitation.as_deref(), Some("0031"));
    assert_eq!(r.s1.precip_quintile.as_deref(), Some("2"));
    assert_eq!(r.s1.precip_days.as_deref(), Some("06"));
    assert_eq!(r.s1.sunshine.as_deref(), Some("201"));
    assert!(r.sections.has(0) && r.sections.has(1));
    assert!(!r.sections.has(2) && !r.sections.has(4));
}

#[test]
fn test_normals_and_extremes() {
    let mut atoms = month();
    atoms.extend([
        num(4, 1, 1991.0),
        num(4, 1, 2020.0),
        num(12, 101, 281.15),
        num(13, 60, 40.0),
        num(8, 52, 1.0),
        num(8, 22, 3.0),
        num(8, 53, 0.0),
        num(4, 3, 21.0),
        num(12, 111, 299.65),
        num(8, 53, 1.0),
        num(4, 3, 2.0),
        num(12, 112, 268.15),
        num(11, 46, 23.0),
    ]);
    let report = decode(&atoms).unwrap();
    let r = climat(&report);
    assert_eq!(r.s2.first_year.as_deref(), Some("91"));
    assert_eq!(r.s2.last_year.as_deref(), Some("20"));
    assert_eq!(r.s2.values.temperature.as_deref(), Some("080"));
    assert_eq!(r.s2.values.precipitation.as_deref(), Some("0040"));
    // the month keeps its own values
    assert_eq!(r.s1.temperature.as_deref(), Some("100"));
    assert_eq!(r.s3[1].as_deref(), Some("03"));

    let s4 = &r.s4;
    assert_eq!(s4.highest_max.value.as_deref(), Some("265"));
    assert_eq!(s4.highest_max.day.as_deref(), Some("21"));
    assert_eq!(s4.lowest_min.sign.as_deref(), Some("1"));
    assert_eq!(s4.lowest_min.value.as_deref(), Some("050"));
    assert_eq!(s4.lowest_min.day.as_deref(), Some("52"));
    assert_eq!(s4.highest_wind.sign.as_deref(), Some("1"));
    assert_eq!(s4.highest_wind.value.as_deref(), Some("023"));
    assert!(r.sections.has(2) && r.sections.has(3) && r.sections.has(4));
}

#[test]
fn test_station_index_is_mandatory() {
    let mut atoms = month();
    atoms.retain(|a| !a.descriptor.is(1, 1));
    let err = decode(&atoms).unwrap_err();
    assert_eq!(err.to_string(), "lack of mandatory descriptor: station index");
}
