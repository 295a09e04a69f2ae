use tinytac::*;

mod common;
use common::*;

fn fixed(block: i32, station: i32, extra: &[Atom]) -> Vec<Atom> {
    let mut atoms = station_index(block, station);
    atoms.extend(time(2020, 3, 15, 12, 0));
    atoms.extend(position(40.4, -3.7));
    atoms.extend([
        num(12, 101, 288.15),
        num(11, 1, 180.0),
        num(11, 2, 5.2),
        num(10, 4, 98500.0),
    ]);
    atoms.extend_from_slice(extra);
    atoms
}

fn madrid(extra: &[Atom]) -> Vec<Atom> {
    fixed(8, 221, extra)
}

fn synop(report: &Report) -> &report::SynopReport {
    match &report.body {
        ReportBody::Synop(synop) => synop,
        body => panic!("not a SYNOP: {body:?}"),
    }
}

fn decode(atoms: &[Atom]) -> Result<Report, Error> {
    Decoder::new(options()).decode_subset(&header(0, 2, &[307080]), atoms)
}

fn supplementary(r: &report::SynopReport) -> Vec<&str> {
    r.s3.supplementary.iter().map(String::as_str).collect()
}

#[test]
fn test_fixed_station() {
    let report = decode(&madrid(&[])).unwrap();
    let env = &report.envelope;
    assert_eq!(env.type_code, "AAXX");
    assert_eq!(env.kind, ReportKind::Synop(SynopKind::Fixed));
    assert_eq!(env.index.as_deref(), Some("08221"));
    assert_eq!(env.region, Some(WmoRegion::VI));
    assert_eq!(env.observed, datetime(2020, 3, 15, 12, 0));

    let r = synop(&report);
    assert_eq!(r.s0.block.as_deref(), Some("08"));
    assert_eq!(r.s0.station.as_deref(), Some("221"));
    assert_eq!(r.s0.day.as_deref(), Some("15"));
    assert_eq!(r.s0.hour.as_deref(), Some("12"));
    assert_eq!(r.s0.wind_indicator.as_deref(), Some("1"));
    assert_eq!(r.s1.temp_sign.as_deref(), Some("0"));
    assert_eq!(r.s1.temperature.as_deref(), Some("150"));
    assert_eq!(r.s1.wind_direction.as_deref(), Some("18"));
    assert_eq!(r.s1.wind_speed.as_deref(), Some("05"));
    assert_eq!(r.s1.station_pressure.as_deref(), Some("9850"));
    assert_eq!(r.s1.precip_indicator.as_deref(), Some("4"));
    assert!(r.sections.has(0) && r.sections.has(1));
    assert!(!r.sections.has(2));
}

#[test]
fn test_first_temperature_wins() {
    let mut atoms = madrid(&[]);
    atoms.retain(|a| !a.descriptor.is(12, 101));
    atoms.extend([num(12, 1, 288.15), num(12, 4, 290.15)]);
    let report = decode(&atoms).unwrap();
    assert_eq!(synop(&report).s1.temperature.as_deref(), Some("150"));
}

#[test]
fn test_maximum_temperature_window() {
    let report = decode(&madrid(&[num(4, 24, -3.0), num(12, 111, 300.15)])).unwrap();
    assert_eq!(synop(&report).s3.max_temp.as_deref(), Some("270"));
    assert!(synop(&report).sections.has(3));

    let report = decode(&madrid(&[num(4, 25, -90.0), num(12, 111, 300.15)])).unwrap();
    assert_eq!(synop(&report).s3.max_temp, None);
}

#[test]
fn test_statistic_gate() {
    // the qualifier suppresses the element right after it only
    let atoms = madrid(&[num(8, 23, 4.0), num(13, 3, 55.0), num(12, 103, 280.15)]);
    let report = decode(&atoms).unwrap();
    let r = synop(&report);
    assert_eq!(r.s1.humidity, None);
    assert_eq!(r.s1.dewpoint.as_deref(), Some("070"));
}

#[test]
fn test_missing_latitude() {
    let mut atoms = madrid(&[]);
    atoms.retain(|a| !a.descriptor.is(5, 1));
    let err = decode(&atoms).unwrap_err();
    assert!(matches!(err, Error::MissingMandatory(_)));
    assert!(err.to_string().starts_with("lack of mandatory descriptor"));
    assert!(err.to_string().contains("latitude"));
}

#[test]
fn test_missing_station_index() {
    let mut atoms = madrid(&[]);
    atoms.retain(|a| !a.descriptor.is(1, 2));
    // still classified from the message descriptors
    let err = decode(&atoms).unwrap_err();
    assert_eq!(err.to_string(), "lack of mandatory descriptor: station index");
}

#[test]
fn test_unknown_report_type() {
    let result = Decoder::new(options()).decode_subset(&header(21, 0, &[]), &madrid(&[]));
    assert!(matches!(result, Err(Error::UnknownReportType(_))));
}

#[test]
fn test_future_observation() {
    let decoder = Decoder::new(DecodeOptions {
        reference_time: Some(datetime(2020, 3, 15, 11, 0)),
        ..Default::default()
    });
    let result = decoder.decode_subset(&header(0, 2, &[307080]), &madrid(&[]));
    assert!(matches!(result, Err(Error::OutOfRange(_))));

    let decoder = Decoder::new(DecodeOptions {
        reference_time: Some(datetime(2020, 3, 15, 11, 0)),
        reject_future: false,
        ..Default::default()
    });
    assert!(decoder
        .decode_subset(&header(0, 2, &[307080]), &madrid(&[]))
        .is_ok());
}

#[test]
fn test_decoding_is_repeatable() {
    let atoms = madrid(&[num(20, 3, 61.0), num(13, 11, 1.2), num(4, 24, -6.0)]);
    assert_eq!(decode(&atoms).unwrap(), decode(&atoms).unwrap());
}

#[test]
fn test_message_subsets_are_independent() {
    let mut bad = madrid(&[]);
    bad.retain(|a| !a.descriptor.is(4, 4));
    let message = Message {
        header: header(0, 2, &[307080]),
        subsets: vec![madrid(&[]), bad],
    };
    let results = Decoder::new(options()).decode_message(&message);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::MissingMandatory(_))));
}

#[test]
fn test_ship() {
    let mut atoms = vec![text(1, 11, "EREH")];
    atoms.extend(time(2020, 3, 15, 11, 40));
    atoms.extend(position(-33.25, 151.5));
    atoms.extend([
        num(11, 1, 90.0),
        num(11, 2, 12.0),
        num(22, 43, 293.15),
        missing(22, 11),
    ]);
    let report = Decoder::new(options())
        .decode_subset(&header(1, 0, &[308009]), &atoms)
        .unwrap();
    assert_eq!(report.envelope.type_code, "BBXX");
    assert_eq!(report.envelope.index.as_deref(), Some("EREH"));
    let r = synop(&report);
    assert_eq!(r.s0.hour.as_deref(), Some("12"));
    assert_eq!(r.s1.exact_time.as_deref(), Some("1140"));
    assert_eq!(r.s0.quadrant.as_deref(), Some("3"));
    assert_eq!(r.s2.sea_temp_sign.as_deref(), Some("0"));
    assert_eq!(r.s2.sea_temp.as_deref(), Some("200"));
    assert!(r.sections.has(2));
}

#[test]
fn test_gusts() {
    let atoms = madrid(&[
        num(4, 25, -10.0),
        num(11, 41, 15.0),
        num(4, 24, -3.0),
        num(11, 41, 20.0),
        // one 910ff only
        num(4, 25, -10.0),
        num(11, 41, 30.0),
    ]);
    let report = decode(&atoms).unwrap();
    assert_eq!(supplementary(synop(&report)), ["91015", "90730", "91120"]);
}

#[test]
fn test_wind_in_knots() {
    let mut atoms = vec![num(2, 2, 4.0)];
    atoms.extend(madrid(&[num(4, 25, -10.0), num(11, 41, 60.0)]));
    atoms.retain(|a| !a.descriptor.is(11, 2));
    atoms.push(num(11, 2, 55.0));

    let report = decode(&atoms).unwrap();
    let r = synop(&report);
    assert_eq!(r.s0.wind_indicator.as_deref(), Some("4"));
    assert_eq!(r.s1.wind_speed.as_deref(), Some("99"));
    assert_eq!(r.s1.wind_speed_overflow.as_deref(), Some("107"));
    assert_eq!(supplementary(r), ["91099", "00117"]);
}

#[test]
fn test_supplementary_groups_stay_together() {
    let mut extra = vec![num(4, 25, -10.0), num(11, 41, 10.0)];
    for hours in 1..=10 {
        extra.extend([num(4, 24, -hours as f64), num(11, 41, 12.0)]);
    }
    extra.push(num(11, 43, 90.0));
    let report = decode(&madrid(&extra)).unwrap();
    let groups = supplementary(synop(&report));

    // nine 907tt 911ff pairs fit after 910ff, the tenth does not
    assert_eq!(groups.len(), 20);
    assert_eq!(groups[..3], ["91010", "90710", "91112"]);
    assert_eq!(groups.iter().filter(|g| g.starts_with("907")).count(), 9);
    assert_eq!(groups.iter().filter(|g| g.starts_with("911")).count(), 9);
    assert_eq!(groups[17..], ["90763", "91112", "91509"]);
}

#[test]
fn test_ground_minimum_by_region() {
    let ground = [num(12, 113, 268.15)];

    let report = decode(&madrid(&ground)).unwrap();
    let s3 = &synop(&report).s3;
    assert_eq!(s3.ground_min_sign.as_deref(), Some("1"));
    assert_eq!(s3.ground_min.as_deref(), Some("05"));

    let report = decode(&fixed(60, 30, &ground)).unwrap();
    assert_eq!(report.envelope.region, Some(WmoRegion::I));
    let s3 = &synop(&report).s3;
    assert_eq!(s3.ground_min_sign, None);
    assert_eq!(s3.ground_min.as_deref(), Some("55"));

    let report = decode(&fixed(20, 50, &ground)).unwrap();
    assert_eq!(report.envelope.region, Some(WmoRegion::II));
    assert_eq!(synop(&report).s3.ground_min, None);
}

#[test]
fn test_station_operation() {
    let ix = |extra: &[Atom]| {
        let report = decode(&madrid(extra)).unwrap();
        synop(&report).s1.station_operation.clone()
    };
    assert_eq!(ix(&[]), None);
    assert_eq!(ix(&[missing(2, 1)]).as_deref(), Some("/"));

    // manned
    assert_eq!(ix(&[num(2, 1, 1.0), num(20, 3, 61.0)]).as_deref(), Some("1"));
    assert_eq!(ix(&[num(2, 1, 1.0), num(20, 3, 508.0)]).as_deref(), Some("2"));
    assert_eq!(ix(&[num(2, 1, 1.0), num(20, 3, 509.0)]).as_deref(), Some("3"));

    // automatic
    assert_eq!(ix(&[num(2, 1, 0.0), num(20, 3, 61.0)]).as_deref(), Some("4"));
    assert_eq!(ix(&[num(2, 1, 0.0), num(20, 3, 508.0)]).as_deref(), Some("5"));
    assert_eq!(ix(&[num(2, 1, 0.0)]).as_deref(), Some("6"));
    assert_eq!(ix(&[num(2, 1, 0.0), num(20, 3, 161.0)]).as_deref(), Some("7"));

    let report = decode(&madrid(&[num(2, 1, 0.0), num(20, 3, 161.0)])).unwrap();
    assert_eq!(synop(&report).s1.present_weather.as_deref(), Some("61"));
}

#[test]
fn test_precipitation_groups() {
    let report = decode(&madrid(&[num(4, 24, -6.0), num(13, 11, 1.2)])).unwrap();
    let r = synop(&report);
    assert_eq!(r.s1.precipitation.as_deref(), Some("001"));
    assert_eq!(r.s1.precip_period.as_deref(), Some("1"));
    assert_eq!(r.s1.precip_indicator.as_deref(), Some("1"));

    // the second amount goes to section 3, the daily one to 7R24R24R24R24
    let atoms = madrid(&[
        num(4, 24, -6.0),
        num(13, 11, 1.2),
        num(4, 24, -12.0),
        num(13, 11, 3.0),
        num(4, 24, -24.0),
        num(13, 11, 5.0),
    ]);
    let report = decode(&atoms).unwrap();
    let r = synop(&report);
    assert_eq!(r.s1.precipitation.as_deref(), Some("001"));
    assert_eq!(r.s3.precipitation.as_deref(), Some("003"));
    assert_eq!(r.s3.precip_period.as_deref(), Some("2"));
    assert_eq!(r.s3.precipitation_24h.as_deref(), Some("0050"));
    assert_eq!(r.s1.precip_indicator.as_deref(), Some("0"));
}

#[test]
fn test_sunshine_and_radiation() {
    let atoms = madrid(&[
        num(4, 24, -24.0),
        num(14, 31, 480.0),
        num(14, 2, -300000.0),
        num(14, 28, 25000000.0),
        num(4, 24, -1.0),
        num(14, 28, 720000.0),
    ]);
    let report = decode(&atoms).unwrap();
    let s3 = &synop(&report).s3;
    assert_eq!(s3.sunshine_daily.as_deref(), Some("080"));
    assert_eq!(s3.radiation_daily[5].as_deref(), Some("0030"));
    assert_eq!(s3.radiation_daily[2].as_deref(), Some("2500"));
    assert_eq!(s3.radiation_daily[4], None);
    assert_eq!(s3.radiation_hourly[2].as_deref(), Some("0720"));
}

#[test]
fn test_standard_level_geopotential() {
    let report = decode(&madrid(&[num(7, 4, 50000.0), num(10, 9, 5580.0)])).unwrap();
    let s1 = &synop(&report).s1;
    assert_eq!(s1.standard_level.as_deref(), Some("5"));
    assert_eq!(s1.geopotential.as_deref(), Some("580"));

    let report = decode(&madrid(&[num(7, 4, 85000.0), num(10, 9, 1504.0)])).unwrap();
    let s1 = &synop(&report).s1;
    assert_eq!(s1.standard_level.as_deref(), Some("8"));
    assert_eq!(s1.geopotential.as_deref(), Some("504"));
}

fn layer(significance: f64, amount: f64, genus: f64, metres: f64) -> [Atom; 4] {
    [
        num(8, 2, significance),
        num(20, 11, amount),
        num(20, 12, genus),
        num(20, 13, metres),
    ]
}

#[test]
fn test_replicated_cloud_layers() {
    let mut extra = vec![num(31, 1, 2.0)];
    extra.extend(layer(21.0, 3.0, 6.0, 600.0));
    extra.extend(layer(22.0, 5.0, 4.0, 2400.0));
    let report = decode(&madrid(&extra)).unwrap();
    let r = synop(&report);

    let layers: Vec<_> = r
        .s3
        .cloud_layers
        .iter()
        .map(|l| (l.amount.as_deref(), l.genus.as_deref(), l.height.as_deref()))
        .collect();
    assert_eq!(
        layers,
        [
            (Some("3"), Some("6"), Some("20")),
            (Some("5"), Some("4"), Some("58")),
        ]
    );
    // section 1 keeps its own cloud fields
    assert_eq!(r.s1.low_cloud_amount, None);
    assert_eq!(r.s1.cloud_base, None);
    assert!(r.sections.has(3));
}

#[test]
fn test_cloud_groups() {
    let mut extra = vec![
        num(20, 10, 75.0),
        num(8, 2, 7.0),
        num(20, 11, 2.0),
        num(20, 13, 800.0),
        num(20, 12, 35.0),
        num(20, 12, 22.0),
        num(20, 12, 12.0),
        num(31, 1, 1.0),
    ];
    extra.extend(layer(1.0, 2.0, 6.0, 600.0));
    // cumulonimbus after the individual layers
    extra.extend(layer(5.0, 1.0, 9.0, 900.0));
    extra.extend([
        num(8, 2, 11.0),
        num(20, 11, 4.0),
        num(20, 12, 8.0),
        num(20, 14, 300.0),
        num(20, 17, 1.0),
    ]);
    let report = decode(&madrid(&extra)).unwrap();
    let r = synop(&report);

    assert_eq!(r.s1.total_cloud.as_deref(), Some("6"));
    assert_eq!(r.s1.low_cloud_amount.as_deref(), Some("2"));
    assert_eq!(r.s1.cloud_base.as_deref(), Some("5"));
    assert_eq!(r.s1.low_cloud.as_deref(), Some("5"));
    assert_eq!(r.s1.middle_cloud.as_deref(), Some("2"));
    assert_eq!(r.s1.high_cloud.as_deref(), Some("2"));

    assert_eq!(r.s3.cloud_layers.len(), 2);
    let cb = &r.s3.cloud_layers[1];
    assert_eq!(cb.genus.as_deref(), Some("9"));
    assert_eq!(cb.height.as_deref(), Some("30"));

    assert_eq!(r.s4.amount.as_deref(), Some("4"));
    assert_eq!(r.s4.genus.as_deref(), Some("8"));
    assert_eq!(r.s4.top_height.as_deref(), Some("03"));
    assert_eq!(r.s4.top_description.as_deref(), Some("1"));
    assert!(r.sections.has(4));
}
