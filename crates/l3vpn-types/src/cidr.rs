//! CIDR address handling for attachment circuits.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated `address/mask` pair as carried by an attachment circuit.
///
/// The address part is kept verbatim; only the mask is interpreted.
/// The mask must be an integer in `[0, 32]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CidrAddress {
    address: String,
    mask: u8,
}

impl CidrAddress {
    /// Returns the full `address/mask` string as received.
    pub fn address(&self) -> String {
        format!("{}/{}", self.address, self.mask)
    }

    /// Returns the host part, without the mask suffix.
    pub fn host(&self) -> &str {
        &self.address
    }

    /// Returns the subnet mask length.
    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl fmt::Display for CidrAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.mask)
    }
}

impl FromStr for CidrAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, mask) = s
            .split_once('/')
            .ok_or_else(|| ParseError::InvalidCidr(s.to_string()))?;
        if address.is_empty() {
            return Err(ParseError::InvalidCidr(s.to_string()));
        }
        let mask: u8 = mask
            .parse()
            .map_err(|_| ParseError::InvalidMask(mask.to_string()))?;
        if mask > 32 {
            return Err(ParseError::InvalidMask(mask.to_string()));
        }
        Ok(CidrAddress {
            address: address.to_string(),
            mask,
        })
    }
}
