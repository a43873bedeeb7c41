//! BGP import-protocol bindings carried by VRF records.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocol types a VRF may import routes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BgpProtocolType {
    Direct,
    Bgp,
    Isis,
    Ospf,
}

impl fmt::Display for BgpProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BgpProtocolType::Direct => "direct",
            BgpProtocolType::Bgp => "bgp",
            BgpProtocolType::Isis => "isis",
            BgpProtocolType::Ospf => "ospf",
        };
        f.write_str(s)
    }
}

impl FromStr for BgpProtocolType {
    type Err = ParseError;

    /// Case-insensitive parse. Unknown values are a hard error rather
    /// than being silently dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(BgpProtocolType::Direct),
            "bgp" => Ok(BgpProtocolType::Bgp),
            "isis" => Ok(BgpProtocolType::Isis),
            "ospf" => Ok(BgpProtocolType::Ospf),
            _ => Err(ParseError::InvalidBgpProtocol(s.to_string())),
        }
    }
}

/// One import-protocol binding (protocol plus optional process id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpImportProtocol {
    pub protocol: BgpProtocolType,
    pub process_id: Option<String>,
}

impl BgpImportProtocol {
    /// Creates a binding without a process id.
    pub fn new(protocol: BgpProtocolType) -> Self {
        Self {
            protocol,
            process_id: None,
        }
    }

    /// Creates a binding with an explicit process id.
    pub fn with_process_id(protocol: BgpProtocolType, process_id: impl Into<String>) -> Self {
        Self {
            protocol,
            process_id: Some(process_id.into()),
        }
    }
}

/// BGP configuration attached to a VRF record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpConfig {
    pub import_protocols: Vec<BgpImportProtocol>,
}

impl BgpConfig {
    /// Creates a configuration with the given bindings.
    pub fn new(import_protocols: Vec<BgpImportProtocol>) -> Self {
        Self { import_protocols }
    }
}

impl Default for BgpConfig {
    /// A single Direct binding with process id "0", the default for
    /// every freshly decomposed VRF.
    fn default() -> Self {
        Self {
            import_protocols: vec![BgpImportProtocol::with_process_id(
                BgpProtocolType::Direct,
                "0",
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_protocol_round_trip() {
        for p in [
            BgpProtocolType::Direct,
            BgpProtocolType::Bgp,
            BgpProtocolType::Isis,
            BgpProtocolType::Ospf,
        ] {
            assert_eq!(p.to_string().parse::<BgpProtocolType>().unwrap(), p);
        }
    }

    #[test]
    fn test_protocol_case_insensitive() {
        assert_eq!(
            "OSPF".parse::<BgpProtocolType>().unwrap(),
            BgpProtocolType::Ospf
        );
        assert_eq!(
            "Direct".parse::<BgpProtocolType>().unwrap(),
            BgpProtocolType::Direct
        );
    }

    #[test]
    fn test_unknown_protocol_rejected() {
        assert!(matches!(
            "rip".parse::<BgpProtocolType>(),
            Err(ParseError::InvalidBgpProtocol(_))
        ));
    }

    #[test]
    fn test_default_bgp_config() {
        let bgp = BgpConfig::default();
        assert_eq!(bgp.import_protocols.len(), 1);
        assert_eq!(bgp.import_protocols[0].protocol, BgpProtocolType::Direct);
        assert_eq!(bgp.import_protocols[0].process_id.as_deref(), Some("0"));
    }
}
