//! Interpretive state carried along the descriptor sequence of one subset

use std::ops::BitOr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Atom, Descriptor};

/// Set of "already seen" marks for one subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Have(u32);

impl Have {
    pub const LATITUDE: Have = Have(1 << 0);
    pub const LONGITUDE: Have = Have(1 << 1);
    pub const YEAR: Have = Have(1 << 2);
    pub const MONTH: Have = Have(1 << 3);
    pub const DAY: Have = Have(1 << 4);
    pub const HOUR: Have = Have(1 << 5);
    pub const MINUTE: Have = Have(1 << 6);
    pub const SECOND: Have = Have(1 << 7);
    pub const STATION_TYPE: Have = Have(1 << 8);
    pub const ALTITUDE: Have = Have(1 << 9);
    pub const NAME: Have = Have(1 << 10);
    pub const COUNTRY: Have = Have(1 << 11);
    pub const GUST: Have = Have(1 << 12);
    pub const NO_SIGNIFICANT_WW: Have = Have(1 << 13);
    pub const NO_SIGNIFICANT_W1: Have = Have(1 << 14);
    pub const NO_SIGNIFICANT_W2: Have = Have(1 << 15);

    const NAMES: [(Have, &'static str); 16] = [
        (Have::LATITUDE, "latitude"),
        (Have::LONGITUDE, "longitude"),
        (Have::YEAR, "year"),
        (Have::MONTH, "month"),
        (Have::DAY, "day"),
        (Have::HOUR, "hour"),
        (Have::MINUTE, "minute"),
        (Have::SECOND, "second"),
        (Have::STATION_TYPE, "station type"),
        (Have::ALTITUDE, "altitude"),
        (Have::NAME, "name"),
        (Have::COUNTRY, "country"),
        (Have::GUST, "gust"),
        (Have::NO_SIGNIFICANT_WW, "no significant ww"),
        (Have::NO_SIGNIFICANT_W1, "no significant W1"),
        (Have::NO_SIGNIFICANT_W2, "no significant W2"),
    ];

    /// Marks required by every report family.
    pub const GEO_TIME: Have = Have(
        Have::LATITUDE.0 | Have::LONGITUDE.0 | Have::YEAR.0 | Have::MONTH.0 | Have::DAY.0 | Have::HOUR.0,
    );

    pub fn contains(self, other: Have) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Have) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The marks of `required` that are not set in `self`.
    pub fn lacking(self, required: Have) -> Have {
        Have(required.0 & !self.0)
    }

    pub fn names(self) -> Vec<&'static str> {
        Have::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for Have {
    type Output = Have;

    fn bitor(self, rhs: Have) -> Have {
        Have(self.0 | rhs.0)
    }
}

/// One-shot gate armed by a statistical qualifier: the next element after
/// it is not accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    #[default]
    Idle,
    SuppressNext(i32),
}

impl Gate {
    /// Consumes the gate. Returns the qualifier that suppresses the current
    /// element, if any.
    pub fn take(&mut self) -> Option<i32> {
        match std::mem::take(self) {
            Gate::Idle => None,
            Gate::SuppressNext(q) => Some(q),
        }
    }
}

/// Which cloud group the following cloud descriptors describe
/// (set by 0 08 002).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloudContext {
    /// Lowest cloud and cloud types of section 1
    #[default]
    General,
    /// Individual or cumulonimbus layer of section 3, by index
    Layer(usize),
    /// Cloud with base below the station level (section 4)
    BelowStation,
}

/// Parse state of one subset. Created fresh for every subset.
#[derive(Debug, Default)]
pub struct ParseState {
    pub index: usize,
    pub current: Option<Descriptor>,
    pub previous: Option<Descriptor>,
    /// Integer view of the current value
    pub ival: i32,
    /// Real view of the current value
    pub val: f64,

    /// Time displacement in seconds, current and the one before it
    pub displacement: i32,
    pub prev_displacement: i32,

    pub gate: Gate,
    /// Latest first-order statistic qualifier (0 08 023)
    pub statistic: Option<i32>,

    pub station_type: Option<i32>,
    pub cloud: CloudContext,
    /// Index of the current layer, `None` until one is opened
    pub layer: Option<usize>,
    /// Position of the latest replication count (class 31)
    pub replicator: Option<usize>,
    /// Wind reported in knots (from 0 02 002 or the options)
    pub wind_in_knots: bool,

    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub name: Option<String>,
    pub country: Option<String>,
    pub block: Option<String>,
    pub station: Option<String>,
    pub callsign: Option<String>,
    pub wigos: [Option<String>; 4],

    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,

    pub have: Have,
}

impl ParseState {
    pub fn new() -> Self {
        ParseState::default()
    }

    /// Moves the cursor to the atom at `index`.
    pub fn enter(&mut self, index: usize, atom: &Atom) {
        self.index = index;
        self.previous = self.current.replace(atom.descriptor);
        self.val = atom.as_f64().unwrap_or(0.0);
        self.ival = atom.as_i32().unwrap_or(0);
    }

    /// Whether the previous atom carried the element 0 `x` `y`.
    pub fn previous_is(&self, x: u8, y: u8) -> bool {
        self.previous.is_some_and(|d| d.is(x, y))
    }

    /// Shifts the displacement history. `None` (a missing displacement)
    /// resets the current register.
    pub fn shift_displacement(&mut self, seconds: Option<i32>) {
        self.prev_displacement = self.displacement;
        self.displacement = seconds.unwrap_or(0);
    }

    /// The accumulation window the next value refers to: the current
    /// displacement, or the previous one when the current is zero
    /// (a "from -N to 0" pair).
    pub fn window(&self) -> i32 {
        if self.displacement != 0 {
            self.displacement
        } else {
            self.prev_displacement
        }
    }

    /// Opens the next layer: the first one right after a replication count
    /// or when none is open yet, otherwise one further.
    pub fn next_layer(&mut self) -> usize {
        let after_count = self.replicator.is_some_and(|at| at + 1 == self.index);
        let layer = match self.layer {
            Some(layer) if !after_count => layer + 1,
            _ => 0,
        };
        self.layer = Some(layer);
        layer
    }

    /// The current layer index. The first layer before any is opened.
    pub fn layer(&self) -> usize {
        self.layer.unwrap_or(0)
    }

    pub fn set_replicator(&mut self) {
        self.replicator = Some(self.index);
    }

    /// Observation time from the date and time parts seen so far.
    pub fn observed(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }

    pub fn wigos_id(&self) -> Option<String> {
        let [series, issuer, issue, local] = &self.wigos;
        Some(format!(
            "{}-{}-{}-{}",
            series.as_ref()?,
            issuer.as_ref()?,
            issue.as_ref()?,
            local.as_ref()?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_have() {
        let mut have = Have::default();
        have.insert(Have::LATITUDE | Have::YEAR);
        assert!(have.contains(Have::LATITUDE));
        assert!(!have.contains(Have::GEO_TIME));
        let lacking = have.lacking(Have::GEO_TIME);
        assert_eq!(lacking.names(), vec!["longitude", "month", "day", "hour"]);
        assert!(have.lacking(Have::YEAR).is_empty());
    }

    #[test]
    fn test_gate_is_one_shot() {
        let mut gate = Gate::SuppressNext(4);
        assert_eq!(gate.take(), Some(4));
        assert_eq!(gate.take(), None);
    }

    #[test]
    fn test_displacement_history() {
        let mut state = ParseState::new();
        state.shift_displacement(Some(-43200));
        assert_eq!(state.window(), -43200);
        state.shift_displacement(Some(0));
        assert_eq!((state.displacement, state.prev_displacement), (0, -43200));
        assert_eq!(state.window(), -43200);
        state.shift_displacement(None);
        assert_eq!(state.window(), 0);
    }

    #[test]
    fn test_next_layer() {
        let mut state = ParseState::new();
        state.index = 10;
        state.set_replicator();
        state.index = 11;
        assert_eq!(state.next_layer(), 0);
        state.index = 13;
        assert_eq!(state.next_layer(), 1);
        state.index = 15;
        assert_eq!(state.next_layer(), 2);

        // a new replication starts over
        state.index = 20;
        state.set_replicator();
        state.index = 21;
        assert_eq!(state.next_layer(), 0);
    }

    #[test]
    fn test_first_layer_without_replication() {
        let mut state = ParseState::new();
        assert_eq!(state.layer(), 0);
        state.index = 4;
        assert_eq!(state.next_layer(), 0);
        state.index = 8;
        assert_eq!(state.next_layer(), 1);
        assert_eq!(state.layer(), 1);
    }
}
