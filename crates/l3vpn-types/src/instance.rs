//! Customer-facing VPN instance model.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topology mode of a VPN instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopoMode {
    None,
    HubSpoke,
    FullMesh,
}

impl fmt::Display for TopoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TopoMode::None => "None",
            TopoMode::HubSpoke => "HubSpoke",
            TopoMode::FullMesh => "FullMesh",
        };
        f.write_str(s)
    }
}

impl FromStr for TopoMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(TopoMode::None),
            "HubSpoke" => Ok(TopoMode::HubSpoke),
            "FullMesh" => Ok(TopoMode::FullMesh),
            _ => Err(ParseError::InvalidTopoMode(s.to_string())),
        }
    }
}

/// A customer-facing logical interface bound to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentCircuit {
    /// Circuit id, unique within the instance.
    pub id: String,
    /// Owning device id.
    pub device_id: String,
    /// Logical termination point on the device.
    pub ltp_id: String,
    /// L3 address in `address/mask` form.
    pub address: String,
}

impl AttachmentCircuit {
    pub fn new(
        id: impl Into<String>,
        device_id: impl Into<String>,
        ltp_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            device_id: device_id.into(),
            ltp_id: ltp_id.into(),
            address: address.into(),
        }
    }
}

/// A normalized multi-site L3VPN service description.
///
/// Produced by the topology parser from a raw descriptor; immutable
/// once a provisioning run has committed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnInstance {
    /// Unique instance id.
    pub id: String,
    /// Instance name, intended unique among active instances.
    pub name: String,
    /// Topology mode.
    pub mode: TopoMode,
    /// Member device ids, in submission order.
    pub device_ids: Vec<String>,
    /// Attachment circuits across all member devices.
    pub acs: Vec<AttachmentCircuit>,
}

impl VpnInstance {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mode: TopoMode,
        device_ids: Vec<String>,
        acs: Vec<AttachmentCircuit>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mode,
            device_ids,
            acs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_topo_mode_round_trip() {
        for mode in [TopoMode::None, TopoMode::HubSpoke, TopoMode::FullMesh] {
            assert_eq!(mode.to_string().parse::<TopoMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_topo_mode_unknown_rejected() {
        assert!(matches!(
            "PartialMesh".parse::<TopoMode>(),
            Err(ParseError::InvalidTopoMode(_))
        ));
    }

    #[test]
    fn test_instance_construction() {
        let instance = VpnInstance::new(
            "vpn1",
            "vpn-A",
            TopoMode::FullMesh,
            vec!["d1".to_string(), "d2".to_string()],
            vec![AttachmentCircuit::new("a1", "d1", "ltp1", "10.1.1.1/30")],
        );
        assert_eq!(instance.device_ids.len(), 2);
        assert_eq!(instance.acs[0].device_id, "d1");
    }

    #[test]
    fn test_instance_serde() {
        let instance = VpnInstance::new(
            "vpn1",
            "vpn-A",
            TopoMode::FullMesh,
            vec!["d1".to_string()],
            vec![],
        );
        let json = serde_json::to_string(&instance).unwrap();
        let back: VpnInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }
}
