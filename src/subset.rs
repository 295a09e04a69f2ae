//! Decoded subsets as handed over by a BUFR expansion layer

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Descriptor;

/// Longest sequence of atoms interpreted for one subset.
pub const MAX_ATOMS: usize = 16384;

/// Primitive value of one decoded element, already converted to SI units.
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Missing value
    #[default]
    Missing,
    /// Numeric value (Kelvin, Pascal, metres, degrees, seconds, ...)
    Number(f64),
    /// String value
    String(String),
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => write!(f, "Missing"),
            Value::Number(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{s}\""),
        }
    }
}

/// One slot of a decoded subset: descriptor, value and the optional
/// code/flag table meaning already resolved by the expansion layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atom {
    pub descriptor: Descriptor,
    pub value: Value,
    #[cfg_attr(feature = "serde", serde(default))]
    pub explanation: Option<String>,
}

impl Atom {
    pub fn new(descriptor: Descriptor, value: Value) -> Self {
        Atom {
            descriptor,
            value,
            explanation: None,
        }
    }

    pub fn number(descriptor: Descriptor, value: f64) -> Self {
        Atom::new(descriptor, Value::Number(value))
    }

    pub fn text(descriptor: Descriptor, value: &str) -> Self {
        Atom::new(descriptor, Value::String(value.to_string()))
    }

    pub fn missing(descriptor: Descriptor) -> Self {
        Atom::new(descriptor, Value::Missing)
    }

    pub fn with_explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.value, Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Number(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    /// Integer view of the value (nearest integer).
    pub fn as_i32(&self) -> Option<i32> {
        self.as_f64().map(|v| v.round() as i32)
    }

    /// Text view of the value with the padding blanks removed.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then_some(s)
            }
            _ => None,
        }
    }
}

/// Message level metadata shared by every subset of a message.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    pub data_category: u8,
    pub international_data_sub_category: u8,
    pub local_data_sub_category: u8,
    /// The unexpanded descriptors of the data description section
    #[cfg_attr(feature = "serde", serde(default))]
    pub descriptors: Vec<Descriptor>,
}

/// A message made of independent subsets.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    pub header: Header,
    pub subsets: Vec<Vec<Atom>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_fmt() {
        assert_eq!(format!("{:?}", Value::Missing), "Missing");
        assert_eq!(format!("{:?}", Value::Number(12.5)), "12.5");
        assert_eq!(
            format!("{:?}", Value::String("Hello".to_string())),
            "\"Hello\""
        );
    }

    #[test]
    fn test_atom_views() {
        let d = Descriptor::element(1, 15);
        assert_eq!(Atom::text(d, "MADRID  ").as_str(), Some("MADRID"));
        assert_eq!(Atom::text(d, "   ").as_str(), None);
        assert_eq!(Atom::number(d, 179.6).as_i32(), Some(180));
        assert_eq!(Atom::number(d, f64::NAN).as_f64(), None);
        assert!(Atom::missing(d).is_missing());
    }
}
