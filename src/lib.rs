//! A decoder from expanded BUFR subsets to WMO traditional alphanumeric
//! report structures (SYNOP, SHIP, SYNOP MOBIL, BUOY, TEMP and CLIMAT).
//!
//! The input is the flat sequence of decoded elements of one subset, as
//! produced by a BUFR reader after table expansion. The output is one
//! [`Report`] per subset whose section fields hold the fixed width codes of
//! the corresponding bulletin.

mod classify;
pub mod convert;
mod decode;
mod descriptor;
mod region;
pub mod report;
mod state;
mod subset;

pub use classify::{Classifier, Family};
pub use decode::{DecodeOptions, Decoder, decode_message, decode_subset};
pub use descriptor::*;
pub use region::{WmoRegion, infer_region, region_of_index};
pub use report::{
    Envelope, Report, ReportBody, ReportKind, SectionMask, SetOnce, SynopKind, TempVariant,
};
pub use state::{CloudContext, Gate, Have, ParseState};
pub use subset::{Atom, Header, MAX_ATOMS, Message, Value};

/// The error type used by this crate.
///
/// Every variant rejects one subset only; the other subsets of a message
/// are decoded independently.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unrecognized report type ({0})")]
    UnknownReportType(String),
    #[error("lack of mandatory descriptor: {0}")]
    MissingMandatory(String),
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("unknown TEMP type")]
    UnknownTempType,
    #[error("Invalid data: {0}")]
    Invalid(String),
}
