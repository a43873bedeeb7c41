//! Per-device VRF records derived from a VPN instance.

use crate::BgpConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Routing identifiers drawn from the shared pool for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedResources {
    /// Route targets shared by every member VRF (a single element).
    pub route_targets: Vec<String>,
    /// Device id -> route distinguisher, one per member device.
    pub route_distinguishers: HashMap<String, String>,
    /// VRF name shared by the whole instance.
    pub vrf_name: String,
}

impl AllocatedResources {
    pub fn new(
        route_targets: Vec<String>,
        route_distinguishers: HashMap<String, String>,
        vrf_name: impl Into<String>,
    ) -> Self {
        Self {
            route_targets,
            route_distinguishers,
            vrf_name: vrf_name.into(),
        }
    }
}

/// A device-local isolated routing table instance for one VPN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrfEntity {
    /// VRF name shared across the instance.
    pub vrf_name: String,
    /// Owning VPN instance id.
    pub vpn_id: String,
    /// Route distinguisher unique to this device.
    pub route_distinguisher: String,
    /// Import route targets.
    pub import_targets: Vec<String>,
    /// Export route targets (same list as import).
    pub export_targets: Vec<String>,
    /// Ids of the attachment circuits bound to this device.
    pub ac_ids: Vec<String>,
    /// BGP import-protocol bindings.
    pub bgp: BgpConfig,
}

/// Per-device VPN configuration record, keyed by device id in the
/// replicated store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceVpnConfig {
    pub device_id: String,
    pub vrfs: Vec<VrfEntity>,
}

impl DeviceVpnConfig {
    pub fn new(device_id: impl Into<String>, vrfs: Vec<VrfEntity>) -> Self {
        Self {
            device_id: device_id.into(),
            vrfs,
        }
    }
}

/// Per-circuit record with the physical port name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnAc {
    /// Owning VPN instance id.
    pub vpn_id: String,
    /// Attachment circuit id, the store key.
    pub ac_id: String,
    /// Physical port name resolved from the device's logical port.
    pub port_name: String,
    /// L3 address in `address/mask` form, as received.
    pub address: String,
    /// Subnet mask length, 0-32.
    pub mask: u8,
}

impl VpnAc {
    pub fn new(
        vpn_id: impl Into<String>,
        ac_id: impl Into<String>,
        port_name: impl Into<String>,
        address: impl Into<String>,
        mask: u8,
    ) -> Self {
        Self {
            vpn_id: vpn_id.into(),
            ac_id: ac_id.into(),
            port_name: port_name.into(),
            address: address.into(),
            mask,
        }
    }
}

/// Full decomposition output for one instance; the payload handed to
/// the device-provisioning dispatch service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionBundle {
    /// One entry per member device, in member order.
    pub device_configs: Vec<DeviceVpnConfig>,
    /// One entry per attachment circuit, device order then per-device
    /// insertion order.
    pub acs: Vec<VpnAc>,
}

impl ProvisionBundle {
    pub fn new(device_configs: Vec<DeviceVpnConfig>, acs: Vec<VpnAc>) -> Self {
        Self {
            device_configs,
            acs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_allocated_resources() {
        let mut rds = HashMap::new();
        rds.insert("d1".to_string(), "100:2050".to_string());
        let res = AllocatedResources::new(vec!["100:2049".to_string()], rds, "VRF_2051");
        assert_eq!(res.route_targets.len(), 1);
        assert_eq!(res.route_distinguishers.get("d1").unwrap(), "100:2050");
        assert_eq!(res.vrf_name, "VRF_2051");
    }

    #[test]
    fn test_vpn_ac_construction() {
        let ac = VpnAc::new("vpn1", "a1", "GigabitEthernet0/0/1", "10.1.1.1/30", 30);
        assert_eq!(ac.ac_id, "a1");
        assert_eq!(ac.mask, 30);
    }

    #[test]
    fn test_bundle_serde() {
        let bundle = ProvisionBundle::new(
            vec![DeviceVpnConfig::new("d1", vec![])],
            vec![VpnAc::new("vpn1", "a1", "port1", "10.1.1.1/30", 30)],
        );
        let json = serde_json::to_string(&bundle).unwrap();
        let back: ProvisionBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
