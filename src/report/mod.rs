//! Structured reports produced from decoded subsets
//!
//! Each report is split into the sections of its WMO bulletin; every field
//! holds the fixed width text of one symbolic group element.

pub mod buoy;
pub mod climat;
pub mod synop;
pub mod temp;

use std::ops::Deref;

use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::WmoRegion;

pub use buoy::BuoyReport;
pub use climat::ClimatReport;
pub use synop::SynopReport;
pub use temp::TempReport;

/// Variant of a surface synoptic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SynopKind {
    /// FM 12 SYNOP, fixed land station
    Fixed,
    /// FM 13 SHIP
    Ship,
    /// FM 14 SYNOP MOBIL
    Mobile,
}

/// Variant of an upper air report, known once the identification is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TempVariant {
    /// FM 35 TEMP
    Land,
    /// FM 36 TEMP SHIP
    Ship,
    /// FM 38 TEMP MOBIL
    Mobile,
    /// FM 37 TEMP DROP
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ReportKind {
    Synop(SynopKind),
    Buoy,
    Temp(TempVariant),
    Climat,
}

impl ReportKind {
    /// WMO type code: `AAXX`, `BBXX`, `OOXX`, `ZZYY`, `TT`, `UU`, `II`,
    /// `XX` or `CLIMAT`. TEMP parts append `AA`..`DD` to theirs.
    pub fn type_code(&self) -> &'static str {
        match self {
            ReportKind::Synop(SynopKind::Fixed) => "AAXX",
            ReportKind::Synop(SynopKind::Ship) => "BBXX",
            ReportKind::Synop(SynopKind::Mobile) => "OOXX",
            ReportKind::Buoy => "ZZYY",
            ReportKind::Temp(TempVariant::Land) => "TT",
            ReportKind::Temp(TempVariant::Ship) => "UU",
            ReportKind::Temp(TempVariant::Mobile) => "II",
            ReportKind::Temp(TempVariant::Drop) => "XX",
            ReportKind::Climat => "CLIMAT",
        }
    }
}

/// Data every report carries regardless of its family.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Envelope {
    pub kind: ReportKind,
    pub type_code: &'static str,
    /// `IIiii`, ship call sign or buoy number
    pub index: Option<String>,
    pub wigos_id: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub observed: NaiveDateTime,
    pub region: Option<WmoRegion>,
}

/// A decoded report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    pub envelope: Envelope,
    pub body: ReportBody,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ReportBody {
    Synop(Box<SynopReport>),
    Buoy(Box<BuoyReport>),
    Temp(Box<TempReport>),
    Climat(Box<ClimatReport>),
}

/// Sections that received at least one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct SectionMask(u8);

impl SectionMask {
    pub fn mark(&mut self, section: u8) {
        self.0 |= 1 << section;
    }

    pub fn has(&self, section: u8) -> bool {
        self.0 & (1 << section) != 0
    }
}

/// "First wins" writes into optional text fields.
pub trait SetOnce {
    /// Stores `value` unless the field already holds one. Returns whether
    /// the value was stored.
    fn set_once(&mut self, value: impl Into<String>) -> bool;
}

impl SetOnce for Option<String> {
    fn set_once(&mut self, value: impl Into<String>) -> bool {
        if self.is_some() {
            return false;
        }
        *self = Some(value.into());
        true
    }
}

/// A list that silently stops growing at `N` entries, matching the group
/// count limits of the bulletins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Capped<T, const N: usize>(Vec<T>);

impl<T, const N: usize> Default for Capped<T, N> {
    fn default() -> Self {
        Capped(Vec::new())
    }
}

impl<T, const N: usize> Capped<T, N> {
    /// Appends `item` if there is room. A full list drops it.
    pub fn push_if_room(&mut self, item: T) -> bool {
        if self.0.len() >= N {
            log::trace!("list full ({N} entries), entry dropped");
            return false;
        }
        self.0.push(item);
        true
    }

    /// Appends all of `items` if they fit together. Otherwise none is kept.
    pub fn push_all_if_room(&mut self, items: Vec<T>) -> bool {
        if self.0.len() + items.len() > N {
            log::trace!("list full ({N} entries), {} entries dropped", items.len());
            return false;
        }
        self.0.extend(items);
        true
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.0.last_mut()
    }
}

impl<T, const N: usize> Deref for Capped<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_once() {
        let mut field: Option<String> = None;
        assert!(field.set_once("0150"));
        assert!(!field.set_once("0160"));
        assert_eq!(field.as_deref(), Some("0150"));
    }

    #[test]
    fn test_capped_saturates() {
        let mut list: Capped<u8, 3> = Capped::default();
        for i in 0..5 {
            list.push_if_room(i);
        }
        assert_eq!(&list[..], &[0, 1, 2]);
        assert!(!list.push_if_room(9));
    }

    #[test]
    fn test_capped_keeps_entries_together() {
        let mut list: Capped<u8, 4> = Capped::default();
        assert!(list.push_all_if_room(vec![0, 1, 2]));
        assert!(!list.push_all_if_room(vec![3, 4]));
        assert_eq!(&list[..], &[0, 1, 2]);
        assert!(list.push_all_if_room(vec![3]));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_section_mask() {
        let mut mask = SectionMask::default();
        mask.mark(1);
        mask.mark(3);
        assert!(mask.has(1) && mask.has(3));
        assert!(!mask.has(2));
    }
}
