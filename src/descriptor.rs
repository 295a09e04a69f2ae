//! Descriptors (FXY)

use std::fmt::{Debug, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// Descriptor (FXY)
#[derive(Hash, Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Descriptor {
    pub f: u8,
    pub x: u8,
    pub y: u8,
}

impl Descriptor {
    pub const fn new(f: u8, x: u8, y: u8) -> Self {
        Descriptor { f, x, y }
    }

    /// Element descriptor (f = 0).
    pub const fn element(x: u8, y: u8) -> Self {
        Descriptor { f: 0, x, y }
    }

    /// The descriptor as the integer FXXYYY, e.g. `12101` for 0 12 101.
    pub fn code(&self) -> u32 {
        self.f as u32 * 100_000 + self.x as u32 * 1000 + self.y as u32
    }

    pub fn from_code(code: u32) -> Result<Self, Error> {
        let (f, x, y) = (code / 100_000, (code / 1000) % 100, code % 1000);
        if f > 3 || x > 63 || y > 255 {
            return Err(Error::Invalid(format!("Not a descriptor code: {code:06}")));
        }
        Ok(Descriptor {
            f: f as u8,
            x: x as u8,
            y: y as u8,
        })
    }

    /// Whether this is the element descriptor 0 `x` `y`.
    pub fn is(&self, x: u8, y: u8) -> bool {
        self.f == 0 && self.x == x && self.y == y
    }
}

impl Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Descriptor {0:1}{1:02}{2:03}", self.f, self.x, self.y)
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0:1}{1:02}{2:03}", self.f, self.x, self.y)
    }
}

impl FromStr for Descriptor {
    type Err = Error;

    /// Parses the canonical six digit form, e.g. `"012101"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Invalid(format!("Not a descriptor code: {s:?}")));
        }
        let code: u32 = s
            .parse()
            .map_err(|_| Error::Invalid(format!("Not a descriptor code: {s:?}")))?;
        Descriptor::from_code(code)
    }
}
