//! Sequential decoding of one subset
//!
//! A subset goes through classification, a first pass over its atoms, the
//! mandatory field check and a family specific second pass. Each family
//! implements [`Accumulate`] for the first pass; the driver owns the gate
//! and the common parse state updates.

mod buoy;
mod climat;
mod common;
mod synop;
mod temp;

use chrono::{Duration, NaiveDateTime, Timelike, Utc};
#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{
    Atom, Classifier, Envelope, Error, Family, Have, Header, MAX_ATOMS, Message, ParseState,
    Report, ReportKind, WmoRegion,
};

/// Decoding options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct DecodeOptions {
    /// Processing time for the future observation check. `None` uses the
    /// current UTC time.
    pub reference_time: Option<NaiveDateTime>,
    /// Reject observations later than the processing time.
    pub reject_future: bool,
    /// Wind unit to assume when the subset does not say (`true` for knots).
    pub wind_in_knots: Option<bool>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            reference_time: None,
            reject_future: true,
            wind_in_knots: None,
        }
    }
}

/// First pass hooks of a report family.
pub(crate) trait Accumulate {
    /// Handles a class 8 qualifier. Runs before the gate check and may arm
    /// the gate for the next atom.
    fn qualifier(&mut self, st: &mut ParseState, atom: &Atom);

    /// Handles any other element that passed the gate.
    fn element(&mut self, st: &mut ParseState, atom: &Atom);
}

/// Runs the first pass of `acc` over `atoms`.
pub(crate) fn first_pass(acc: &mut impl Accumulate, st: &mut ParseState, atoms: &[Atom]) {
    if atoms.len() > MAX_ATOMS {
        log::trace!(
            "subset of {} atoms truncated to {MAX_ATOMS}",
            atoms.len()
        );
    }
    for (index, atom) in atoms.iter().take(MAX_ATOMS).enumerate() {
        st.enter(index, atom);
        let desc = atom.descriptor;
        if desc.f != 0 {
            continue;
        }
        if desc.x == 8 {
            acc.qualifier(st, atom);
            continue;
        }
        if let Some(qualifier) = st.gate.take() {
            log::trace!("{desc} suppressed by qualifier {qualifier}");
            continue;
        }
        common::element(st, atom);
        acc.element(st, atom);
    }
}

/// Arms the gate for a statistical qualifier with a significant value.
pub(crate) fn arm_gate(st: &mut ParseState, atom: &Atom) {
    if let Some(q) = atom.as_i32().filter(|q| *q != 0) {
        st.gate = crate::Gate::SuppressNext(q);
    }
}

/// Rejects the subset unless every mark of `required` is set.
pub(crate) fn check_mandatory(st: &ParseState, required: Have) -> Result<(), Error> {
    let lacking = st.have.lacking(required);
    if lacking.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingMandatory(lacking.names().join(", ")))
    }
}

/// Rejects a subset without a station index.
pub(crate) fn check_station_index(
    block: Option<&String>,
    station: Option<&String>,
) -> Result<(), Error> {
    match (block, station) {
        (Some(_), Some(_)) => Ok(()),
        _ => Err(Error::MissingMandatory("station index".to_string())),
    }
}

/// `IIiii` of a station, when both parts are known.
pub(crate) fn station_index(block: Option<&String>, station: Option<&String>) -> Option<String> {
    Some(format!("{}{}", block?, station?))
}

/// The observation time of the subset.
pub(crate) fn observed(st: &ParseState) -> Result<NaiveDateTime, Error> {
    st.observed().ok_or_else(|| {
        Error::OutOfRange(format!(
            "invalid date {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            st.year, st.month, st.day, st.hour, st.minute, st.second
        ))
    })
}

/// Nearest standard hour: 1799 seconds are added before truncating to the
/// hour.
pub(crate) fn synoptic_hour(time: NaiveDateTime) -> NaiveDateTime {
    let shifted = time + Duration::seconds(1799);
    shifted
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(shifted)
}

/// Builds the envelope of a report after the range and future checks.
pub(crate) fn envelope(
    st: &ParseState,
    kind: ReportKind,
    index: Option<String>,
    region: Option<WmoRegion>,
    observed: NaiveDateTime,
    options: &DecodeOptions,
) -> Result<Envelope, Error> {
    if !(-90.0..=90.0).contains(&st.latitude) {
        return Err(Error::OutOfRange(format!("latitude {}", st.latitude)));
    }
    if !(-180.0..=180.0).contains(&st.longitude) {
        return Err(Error::OutOfRange(format!("longitude {}", st.longitude)));
    }
    if options.reject_future {
        let now = options
            .reference_time
            .unwrap_or_else(|| Utc::now().naive_utc());
        if observed > now {
            return Err(Error::OutOfRange(format!(
                "observation time {observed} is in the future"
            )));
        }
    }
    Ok(Envelope {
        kind,
        type_code: kind.type_code(),
        index,
        wigos_id: st.wigos_id(),
        name: st.name.clone(),
        country: st.country.clone(),
        latitude: st.latitude,
        longitude: st.longitude,
        altitude: st.have.contains(Have::ALTITUDE).then_some(st.altitude),
        observed,
        region,
    })
}

/// Decoder of subsets with fixed options.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes one subset of a message described by `header`.
    pub fn decode_subset(&self, header: &Header, atoms: &[Atom]) -> Result<Report, Error> {
        self.decode_classified(&Classifier::new(header), header, atoms)
    }

    /// Decodes every subset of a message. A rejected subset does not affect
    /// the others.
    pub fn decode_message(&self, message: &Message) -> Vec<Result<Report, Error>> {
        let classifier = Classifier::new(&message.header);
        message
            .subsets
            .iter()
            .map(|atoms| self.decode_classified(&classifier, &message.header, atoms))
            .collect()
    }

    fn decode_classified(
        &self,
        classifier: &Classifier,
        header: &Header,
        atoms: &[Atom],
    ) -> Result<Report, Error> {
        let result = classifier.classify(atoms).and_then(|family| {
            let mut st = ParseState::new();
            st.wind_in_knots = self.options.wind_in_knots.unwrap_or(false);
            match family {
                Family::Synop(kind) => synop::decode(kind, &mut st, atoms, &self.options),
                Family::Buoy => buoy::decode(&mut st, atoms, &self.options),
                Family::Temp => temp::decode(&mut st, header, atoms, &self.options),
                Family::Climat => climat::decode(&mut st, atoms, &self.options),
            }
        });
        if let Err(e) = &result {
            log::debug!("subset rejected: {e}");
        }
        result
    }
}

/// Decodes one subset with the default options.
pub fn decode_subset(header: &Header, atoms: &[Atom]) -> Result<Report, Error> {
    Decoder::default().decode_subset(header, atoms)
}

/// Decodes every subset of a message with the default options.
pub fn decode_message(message: &Message) -> Vec<Result<Report, Error>> {
    Decoder::default().decode_message(message)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_synoptic_hour() {
        assert_eq!(synoptic_hour(at(11, 30, 1)), at(12, 0, 0));
        assert_eq!(synoptic_hour(at(11, 30, 0)), at(11, 0, 0));
        assert_eq!(synoptic_hour(at(12, 0, 0)), at(12, 0, 0));
        assert_eq!(
            synoptic_hour(at(23, 45, 0)),
            NaiveDate::from_ymd_opt(2020, 3, 16)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_check_mandatory() {
        let mut st = ParseState::new();
        st.have.insert(Have::LATITUDE | Have::LONGITUDE);
        let err = check_mandatory(&st, Have::GEO_TIME).unwrap_err();
        assert_eq!(
            err.to_string(),
            "lack of mandatory descriptor: year, month, day, hour"
        );
        assert!(check_mandatory(&st, Have::LATITUDE).is_ok());
    }

    #[test]
    fn test_envelope_checks() {
        let options = DecodeOptions {
            reference_time: Some(at(12, 0, 0)),
            ..Default::default()
        };
        let mut st = ParseState::new();
        st.latitude = 91.0;
        let kind = ReportKind::Climat;
        assert!(matches!(
            envelope(&st, kind, None, None, at(6, 0, 0), &options),
            Err(Error::OutOfRange(_))
        ));
        st.latitude = 40.0;
        assert!(envelope(&st, kind, None, None, at(12, 0, 1), &options).is_err());
        let env = envelope(&st, kind, None, None, at(6, 0, 0), &options).unwrap();
        assert_eq!(env.type_code, "CLIMAT");
        assert_eq!(env.altitude, None);
    }
}
