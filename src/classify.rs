//! Choosing the report family of a subset

use hashbrown::HashSet;

use crate::{Atom, Error, Header, SynopKind};

/// Report family chosen before decoding. The TEMP variant is only known
/// after the identification has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Synop(SynopKind),
    Buoy,
    Temp,
    Climat,
}

/// Presence tests over the unexpanded descriptors of a message.
pub struct Classifier {
    category: u8,
    sub_category: u8,
    codes: HashSet<u32>,
}

impl Classifier {
    pub fn new(header: &Header) -> Self {
        Classifier {
            category: header.data_category,
            sub_category: header.international_data_sub_category,
            codes: header.descriptors.iter().map(|d| d.code()).collect(),
        }
    }

    fn has(&self, code: u32) -> bool {
        self.codes.contains(&code)
    }

    fn has_any(&self, codes: &[u32]) -> bool {
        codes.iter().any(|c| self.has(*c))
    }

    fn has_range(&self, first: u32, last: u32) -> bool {
        self.codes.iter().any(|c| (first..=last).contains(c))
    }

    /// Picks the family of one subset.
    pub fn classify(&self, atoms: &[Atom]) -> Result<Family, Error> {
        let carries = |x: u8, y: u8| atoms.iter().any(|a| a.descriptor.is(x, y));
        match self.category {
            0 => {
                if self.has_range(307071, 307073) || self.sub_category == 20 {
                    Ok(Family::Climat)
                } else if self.has_range(307090, 307091) || (3..=5).contains(&self.sub_category)
                {
                    Ok(Family::Synop(SynopKind::Mobile))
                } else if self.has_any(&[301090, 301001, 301004])
                    || self.has_range(307079, 307096)
                    || (carries(1, 1) && carries(1, 2))
                {
                    Ok(Family::Synop(SynopKind::Fixed))
                } else {
                    Err(unrecognized(self.category, self.sub_category))
                }
            }
            1 => {
                let buoy_id = carries(1, 5) || carries(1, 87);
                if self.has_any(&[315008, 315009, 308003]) || (buoy_id && !carries(1, 11)) {
                    Ok(Family::Buoy)
                } else if self.has_any(&[308009, 308004, 301093]) || carries(1, 11) {
                    Ok(Family::Synop(SynopKind::Ship))
                } else {
                    Err(unrecognized(self.category, self.sub_category))
                }
            }
            2 => {
                if self.has_any(&[309052, 309053, 309057]) || (carries(4, 86) && carries(7, 4)) {
                    Ok(Family::Temp)
                } else {
                    Err(unrecognized(self.category, self.sub_category))
                }
            }
            _ => Err(unrecognized(self.category, self.sub_category)),
        }
    }
}

fn unrecognized(category: u8, sub_category: u8) -> Error {
    Error::UnknownReportType(format!(
        "category {category}, sub-category {sub_category}"
    ))
}
