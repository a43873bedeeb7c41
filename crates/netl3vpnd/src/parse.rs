//! Topology parser: raw descriptor to normalized instance.
//!
//! Pure transform, no I/O and no lookups. Anything the later stages
//! rely on being present is checked here.

use crate::descriptor::InstanceDescriptor;
use l3vpn_common::{L3vpnError, L3vpnResult};
use l3vpn_types::{AttachmentCircuit, TopoMode, VpnInstance};

/// Normalizes a raw descriptor into a [`VpnInstance`].
///
/// A missing required field (instance id or name, device id, any AC
/// field) fails with a validation error. A missing topology mode
/// defaults to `FullMesh`; an unrecognized one is rejected.
pub fn parse_instance(descriptor: &InstanceDescriptor) -> L3vpnResult<VpnInstance> {
    let id = descriptor
        .id
        .as_deref()
        .ok_or_else(|| L3vpnError::validation("instance id is missing"))?;
    let name = descriptor
        .name
        .as_deref()
        .ok_or_else(|| L3vpnError::validation("instance name is missing"))?;

    let mode = match descriptor.mode.as_deref() {
        Some(s) => s
            .parse::<TopoMode>()
            .map_err(|e| L3vpnError::validation(e.to_string()))?,
        None => TopoMode::FullMesh,
    };

    if descriptor.devices.is_empty() {
        return Err(L3vpnError::validation("member device list is empty"));
    }
    let mut device_ids = Vec::with_capacity(descriptor.devices.len());
    for device in &descriptor.devices {
        let device_id = device
            .id
            .as_deref()
            .ok_or_else(|| L3vpnError::validation("member device id is missing"))?;
        device_ids.push(device_id.to_string());
    }

    let mut acs = Vec::with_capacity(descriptor.acs.len());
    for ac in &descriptor.acs {
        let ac_id = ac
            .id
            .as_deref()
            .ok_or_else(|| L3vpnError::validation("attachment circuit id is missing"))?;
        let device_id = ac.device_id.as_deref().ok_or_else(|| {
            L3vpnError::validation(format!("attachment circuit '{ac_id}' has no device id"))
        })?;
        let ltp_id = ac.ltp_id.as_deref().ok_or_else(|| {
            L3vpnError::validation(format!("attachment circuit '{ac_id}' has no port reference"))
        })?;
        let address = ac.address.as_deref().ok_or_else(|| {
            L3vpnError::validation(format!("attachment circuit '{ac_id}' has no address"))
        })?;
        acs.push(AttachmentCircuit::new(ac_id, device_id, ltp_id, address));
    }

    Ok(VpnInstance::new(id, name, mode, device_ids, acs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AcDescriptor;
    use pretty_assertions::assert_eq;

    fn full_descriptor() -> InstanceDescriptor {
        InstanceDescriptor::new("vpn1", "vpn-A")
            .with_device("d1")
            .with_device("d2")
            .with_ac(AcDescriptor::new("a1", "d1", "ltp1", "10.1.1.1/30"))
            .with_ac(AcDescriptor::new("a2", "d2", "ltp2", "10.2.2.1/30"))
    }

    #[test]
    fn test_parse_full_descriptor() {
        let instance = parse_instance(&full_descriptor()).unwrap();

        assert_eq!(instance.id, "vpn1");
        assert_eq!(instance.name, "vpn-A");
        assert_eq!(instance.mode, TopoMode::FullMesh);
        assert_eq!(instance.device_ids, vec!["d1", "d2"]);
        assert_eq!(instance.acs.len(), 2);
        assert_eq!(instance.acs[1].ltp_id, "ltp2");
    }

    #[test]
    fn test_mode_defaults_to_full_mesh() {
        let mut desc = full_descriptor();
        desc.mode = None;
        assert_eq!(parse_instance(&desc).unwrap().mode, TopoMode::FullMesh);

        desc.mode = Some("HubSpoke".to_string());
        assert_eq!(parse_instance(&desc).unwrap().mode, TopoMode::HubSpoke);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let mut desc = full_descriptor();
        desc.mode = Some("Ring".to_string());
        assert!(matches!(
            parse_instance(&desc),
            Err(L3vpnError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut desc = full_descriptor();
        desc.name = None;
        assert!(matches!(
            parse_instance(&desc),
            Err(L3vpnError::Validation { .. })
        ));

        let mut desc = full_descriptor();
        desc.devices[1].id = None;
        assert!(matches!(
            parse_instance(&desc),
            Err(L3vpnError::Validation { .. })
        ));

        let mut desc = full_descriptor();
        desc.acs[0].address = None;
        assert!(matches!(
            parse_instance(&desc),
            Err(L3vpnError::Validation { .. })
        ));
    }

    #[test]
    fn test_empty_device_list_rejected() {
        let desc = InstanceDescriptor::new("vpn1", "vpn-A");
        assert!(matches!(
            parse_instance(&desc),
            Err(L3vpnError::Validation { .. })
        ));
    }

    #[test]
    fn test_parser_does_not_validate_cidr() {
        // CIDR syntax is the decomposer's concern.
        let desc = InstanceDescriptor::new("vpn1", "vpn-A")
            .with_device("d1")
            .with_ac(AcDescriptor::new("a1", "d1", "ltp1", "not-a-cidr"));
        assert!(parse_instance(&desc).is_ok());
    }
}
