//! Standalone in-process backends.
//!
//! A single netl3vpnd node with no cluster attached still needs every
//! collaborator the manager is built with. This module provides the
//! local stand-ins: an empty device inventory, a free-set label pool,
//! and a dispatcher that accepts and logs. Replicated stores come from
//! [`MemoryStore`], named after the cluster-wide maps they stand in
//! for.

use crate::manager::NetL3vpnManager;
use crate::tables::{DEVICE_AC_STORE, DEVICE_INSTANCE_STORE, NET_INSTANCE_STORE};
use async_trait::async_trait;
use l3vpn_common::{DeviceService, MemoryStore, ResourcePool, VpnDispatchService};
use l3vpn_types::{DeviceVpnConfig, ProvisionBundle, VpnAc, VpnInstance};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Device service with an empty inventory.
///
/// Every precondition check fails until a real topology backend is
/// wired, so create requests are rejected before any state is touched.
#[derive(Debug, Default)]
pub struct NullDeviceService;

#[async_trait]
impl DeviceService for NullDeviceService {
    async fn exists(&self, _device_id: &str) -> bool {
        false
    }

    async fn is_available(&self, _device_id: &str) -> bool {
        false
    }

    async fn is_local_master(&self, _device_id: &str) -> bool {
        false
    }

    async fn resolve_port(&self, _device_id: &str, _ltp_id: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Default)]
struct LocalPoolState {
    reserved: bool,
    free: BTreeSet<u64>,
}

/// Single-node label pool over a free set.
///
/// `reserve` seeds the set with the full range; `allocate` draws the
/// smallest free id and `release` returns it for reuse. Cluster-wide
/// uniqueness needs a shared pool backend instead.
#[derive(Debug, Default)]
pub struct LocalLabelPool {
    state: Mutex<LocalPoolState>,
}

impl LocalLabelPool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourcePool for LocalLabelPool {
    async fn reserve(&self, low: u64, high: u64) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.reserved {
            return false;
        }
        state.reserved = true;
        state.free = (low..=high).collect();
        true
    }

    async fn allocate(&self) -> Option<u64> {
        let mut state = self.state.lock().unwrap();
        let id = state.free.iter().next().copied()?;
        state.free.remove(&id);
        Some(id)
    }

    async fn release(&self, id: u64) {
        let mut state = self.state.lock().unwrap();
        if state.reserved {
            state.free.insert(id);
        }
    }
}

/// Dispatcher that accepts every bundle and logs what it would push.
#[derive(Debug, Default)]
pub struct LoggingDispatcher;

#[async_trait]
impl VpnDispatchService for LoggingDispatcher {
    async fn push(&self, bundle: &ProvisionBundle) -> bool {
        info!(
            "Dispatching {} device configs and {} circuit records",
            bundle.device_configs.len(),
            bundle.acs.len()
        );
        debug!("Bundle: {bundle:?}");
        true
    }
}

/// Builds a manager wired entirely from in-process backends, with the
/// replicated stores named after their cluster-wide maps.
pub fn standalone_manager() -> NetL3vpnManager {
    NetL3vpnManager::new(
        Arc::new(NullDeviceService),
        Arc::new(LocalLabelPool::new()),
        Arc::new(MemoryStore::<VpnInstance>::named(NET_INSTANCE_STORE)),
        Arc::new(MemoryStore::<DeviceVpnConfig>::named(DEVICE_INSTANCE_STORE)),
        Arc::new(MemoryStore::<VpnAc>::named(DEVICE_AC_STORE)),
        Arc::new(LoggingDispatcher),
    )
}
