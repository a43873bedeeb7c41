//! Decomposer: one instance plus allocated resources to per-device and
//! per-circuit records.
//!
//! Output ordering is deterministic: device records follow the
//! instance's member order, circuit records follow device order then
//! per-device insertion order. Neither list is sorted on its own.

use l3vpn_common::{DeviceService, L3vpnError, L3vpnResult};
use l3vpn_types::{
    AllocatedResources, AttachmentCircuit, BgpConfig, CidrAddress, DeviceVpnConfig,
    ProvisionBundle, VpnAc, VpnInstance, VrfEntity,
};
use std::collections::HashMap;
use tracing::debug;

/// Decomposes `instance` into a [`ProvisionBundle`].
///
/// Fails as a whole on any malformed CIDR or unresolvable port; no
/// partial output is returned.
pub async fn decompose(
    instance: &VpnInstance,
    resources: &AllocatedResources,
    devices: &dyn DeviceService,
) -> L3vpnResult<ProvisionBundle> {
    let mut ac_ids_by_device: HashMap<&str, Vec<String>> = HashMap::new();
    let mut acs_by_device: HashMap<&str, Vec<&AttachmentCircuit>> = HashMap::new();
    for ac in &instance.acs {
        ac_ids_by_device
            .entry(&ac.device_id)
            .or_default()
            .push(ac.id.clone());
        acs_by_device.entry(&ac.device_id).or_default().push(ac);
    }

    let device_configs = decompose_vrfs(instance, resources, &ac_ids_by_device)?;
    let acs = decompose_acs(instance, &acs_by_device, devices).await?;

    debug!(
        "Decomposed instance {} into {} device configs and {} circuit records",
        instance.id,
        device_configs.len(),
        acs.len()
    );
    Ok(ProvisionBundle::new(device_configs, acs))
}

/// One VRF record per member device, in member order.
fn decompose_vrfs(
    instance: &VpnInstance,
    resources: &AllocatedResources,
    ac_ids_by_device: &HashMap<&str, Vec<String>>,
) -> L3vpnResult<Vec<DeviceVpnConfig>> {
    let mut device_configs = Vec::with_capacity(instance.device_ids.len());
    for device_id in &instance.device_ids {
        let route_distinguisher = resources
            .route_distinguishers
            .get(device_id)
            .ok_or_else(|| {
                L3vpnError::validation(format!(
                    "no route distinguisher allocated for device '{device_id}'"
                ))
            })?
            .clone();
        // A member device without circuits still gets a VRF record.
        let ac_ids = ac_ids_by_device
            .get(device_id.as_str())
            .cloned()
            .unwrap_or_default();

        let vrf = VrfEntity {
            vrf_name: resources.vrf_name.clone(),
            vpn_id: instance.id.clone(),
            route_distinguisher,
            import_targets: resources.route_targets.clone(),
            export_targets: resources.route_targets.clone(),
            ac_ids,
            bgp: BgpConfig::default(),
        };
        device_configs.push(DeviceVpnConfig::new(device_id.clone(), vec![vrf]));
    }
    Ok(device_configs)
}

/// One circuit record per AC, device order then insertion order.
async fn decompose_acs(
    instance: &VpnInstance,
    acs_by_device: &HashMap<&str, Vec<&AttachmentCircuit>>,
    devices: &dyn DeviceService,
) -> L3vpnResult<Vec<VpnAc>> {
    let mut vpn_acs = Vec::with_capacity(instance.acs.len());
    for device_id in &instance.device_ids {
        let Some(device_acs) = acs_by_device.get(device_id.as_str()) else {
            continue;
        };
        for ac in device_acs {
            let port_name = devices
                .resolve_port(device_id, &ac.ltp_id)
                .await
                .ok_or_else(|| {
                    L3vpnError::precondition(
                        device_id,
                        format!("port '{}' not found", ac.ltp_id),
                    )
                })?;
            let cidr: CidrAddress = ac.address.parse()?;
            vpn_acs.push(VpnAc::new(
                instance.id.clone(),
                ac.id.clone(),
                port_name,
                cidr.address(),
                cidr.mask(),
            ));
        }
    }
    Ok(vpn_acs)
}
