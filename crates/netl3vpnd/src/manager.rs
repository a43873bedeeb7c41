//! Provisioning orchestrator.
//!
//! Sequences one create request through device checks, parsing, the
//! duplicate-name scan, resource allocation, decomposition, replicated
//! store writes, and dispatch. Any stage failure aborts the run and
//! compensates: records written and labels drawn for the failed request
//! are removed and released, in reverse order.

use crate::decomp::decompose;
use crate::descriptor::InstanceDescriptor;
use crate::label::{LabelAllocator, LabelKind};
use crate::parse::parse_instance;
use l3vpn_common::{
    DeviceService, EcStore, L3vpnError, L3vpnResult, ResourcePool, VpnDispatchService,
};
use l3vpn_types::{AllocatedResources, DeviceVpnConfig, VpnAc, VpnInstance};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Everything drawn or written on behalf of one request, for rollback.
#[derive(Debug, Default)]
struct ProvisionAttempt {
    label_ids: Vec<u64>,
    instance_key: Option<String>,
    device_keys: Vec<String>,
    ac_keys: Vec<String>,
}

/// The L3VPN provisioning service for one cluster node.
///
/// Built with all collaborators at startup; holds no hidden globals.
/// Multiple nodes may run managers concurrently against the same pool
/// and stores — per-device exclusivity comes from the mastership
/// precondition, not from any lock in here.
pub struct NetL3vpnManager {
    devices: Arc<dyn DeviceService>,
    allocator: LabelAllocator,
    instance_store: Arc<dyn EcStore<VpnInstance>>,
    device_config_store: Arc<dyn EcStore<DeviceVpnConfig>>,
    ac_store: Arc<dyn EcStore<VpnAc>>,
    dispatcher: Arc<dyn VpnDispatchService>,
}

impl NetL3vpnManager {
    pub fn new(
        devices: Arc<dyn DeviceService>,
        pool: Arc<dyn ResourcePool>,
        instance_store: Arc<dyn EcStore<VpnInstance>>,
        device_config_store: Arc<dyn EcStore<DeviceVpnConfig>>,
        ac_store: Arc<dyn EcStore<VpnAc>>,
        dispatcher: Arc<dyn VpnDispatchService>,
    ) -> Self {
        Self {
            devices,
            allocator: LabelAllocator::new(pool),
            instance_store,
            device_config_store,
            ac_store,
            dispatcher,
        }
    }

    /// Reserves the global label range. Safe to call on every node;
    /// the first reservation wins.
    pub async fn start(&self) {
        self.allocator.reserve_global_pool().await;
        info!("netl3vpn manager started");
    }

    /// Provisions one L3VPN instance end to end.
    ///
    /// Not idempotent: resubmitting after a failure is a fresh request
    /// and draws fresh identifiers.
    #[instrument(skip(self, descriptor))]
    pub async fn create_l3vpn(&self, descriptor: &InstanceDescriptor) -> L3vpnResult<()> {
        let mut attempt = ProvisionAttempt::default();
        match self.provision(descriptor, &mut attempt).await {
            Ok(()) => {
                info!(
                    "Provisioned instance {}",
                    attempt.instance_key.as_deref().unwrap_or("<unknown>")
                );
                Ok(())
            }
            Err(err) => {
                warn!("Provisioning failed: {err}");
                self.rollback(&attempt).await;
                Err(err)
            }
        }
    }

    async fn provision(
        &self,
        descriptor: &InstanceDescriptor,
        attempt: &mut ProvisionAttempt,
    ) -> L3vpnResult<()> {
        self.check_devices(descriptor).await?;

        let instance = parse_instance(descriptor)?;

        self.check_name_free(&instance.name).await?;
        self.instance_store
            .put(&instance.id, instance.clone())
            .await;
        attempt.instance_key = Some(instance.id.clone());

        let resources = self.allocate_resources(&instance, attempt).await?;

        let bundle = decompose(&instance, &resources, self.devices.as_ref()).await?;

        for config in &bundle.device_configs {
            self.device_config_store
                .put(&config.device_id, config.clone())
                .await;
            attempt.device_keys.push(config.device_id.clone());
        }
        for ac in &bundle.acs {
            self.ac_store.put(&ac.ac_id, ac.clone()).await;
            attempt.ac_keys.push(ac.ac_id.clone());
        }

        if !self.dispatcher.push(&bundle).await {
            return Err(L3vpnError::dispatch(format!(
                "device provisioning rejected instance {}",
                instance.id
            )));
        }
        Ok(())
    }

    /// Every member device must exist, be available, and be mastered by
    /// this node. One failing device aborts the whole instance.
    async fn check_devices(&self, descriptor: &InstanceDescriptor) -> L3vpnResult<()> {
        for device in &descriptor.devices {
            let Some(device_id) = device.id.as_deref() else {
                // Caught by the parser with a proper message.
                continue;
            };
            if !self.devices.exists(device_id).await {
                return Err(L3vpnError::precondition(device_id, "not found in inventory"));
            }
            if !self.devices.is_available(device_id).await {
                return Err(L3vpnError::precondition(
                    device_id,
                    "administratively unavailable",
                ));
            }
            if !self.devices.is_local_master(device_id).await {
                return Err(L3vpnError::precondition(device_id, "not locally mastered"));
            }
        }
        Ok(())
    }

    /// Advisory duplicate-name scan over the locally visible entries.
    ///
    /// Eventually-consistent replication means a same-name create on
    /// another node inside the convergence window can slip through.
    async fn check_name_free(&self, name: &str) -> L3vpnResult<()> {
        for (_, stored) in self.instance_store.entries().await {
            if stored.name == name {
                return Err(L3vpnError::conflict(name));
            }
        }
        Ok(())
    }

    /// One route target, one route distinguisher per member device, and
    /// one shared VRF name, all from the same pool counter.
    async fn allocate_resources(
        &self,
        instance: &VpnInstance,
        attempt: &mut ProvisionAttempt,
    ) -> L3vpnResult<AllocatedResources> {
        let route_target = self.allocator.allocate(LabelKind::RouteTarget).await?;
        attempt.label_ids.push(route_target.id);

        let mut route_distinguishers = HashMap::new();
        for device_id in &instance.device_ids {
            let rd = self
                .allocator
                .allocate(LabelKind::RouteDistinguisher)
                .await?;
            attempt.label_ids.push(rd.id);
            route_distinguishers.insert(device_id.clone(), rd.value);
        }

        let vrf_name = self.allocator.allocate(LabelKind::VrfName).await?;
        attempt.label_ids.push(vrf_name.id);

        Ok(AllocatedResources::new(
            vec![route_target.value],
            route_distinguishers,
            vrf_name.value,
        ))
    }

    /// Best-effort compensation, reverse order of the writes.
    async fn rollback(&self, attempt: &ProvisionAttempt) {
        for key in attempt.ac_keys.iter().rev() {
            self.ac_store.remove(key).await;
        }
        for key in attempt.device_keys.iter().rev() {
            self.device_config_store.remove(key).await;
        }
        if let Some(key) = &attempt.instance_key {
            self.instance_store.remove(key).await;
        }
        for id in attempt.label_ids.iter().rev() {
            self.allocator.release(*id).await;
        }
        if attempt.instance_key.is_some() || !attempt.label_ids.is_empty() {
            debug!(
                "Rolled back {} store keys and {} labels",
                attempt.ac_keys.len() + attempt.device_keys.len() + 1,
                attempt.label_ids.len()
            );
        }
    }
}
