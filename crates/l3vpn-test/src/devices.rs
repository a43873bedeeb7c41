//! Configurable device inventory double.

use async_trait::async_trait;
use l3vpn_common::DeviceService;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// In-memory [`DeviceService`] with per-device knobs.
///
/// Added devices start available and locally mastered; tests flip the
/// knobs to drive precondition failures.
#[derive(Debug, Default)]
pub struct MockDeviceService {
    inner: RwLock<Inventory>,
}

#[derive(Debug, Default)]
struct Inventory {
    devices: HashSet<String>,
    unavailable: HashSet<String>,
    unmastered: HashSet<String>,
    ports: HashMap<(String, String), String>,
}

impl MockDeviceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device as existing, available, and locally mastered.
    pub fn add_device(&self, device_id: &str) {
        self.inner
            .write()
            .unwrap()
            .devices
            .insert(device_id.to_string());
    }

    /// Marks a device administratively unavailable.
    pub fn set_unavailable(&self, device_id: &str) {
        self.inner
            .write()
            .unwrap()
            .unavailable
            .insert(device_id.to_string());
    }

    /// Revokes local mastership of a device.
    pub fn set_unmastered(&self, device_id: &str) {
        self.inner
            .write()
            .unwrap()
            .unmastered
            .insert(device_id.to_string());
    }

    /// Maps a (device, logical port) pair to a physical port name.
    pub fn add_port(&self, device_id: &str, ltp_id: &str, port_name: &str) {
        self.inner.write().unwrap().ports.insert(
            (device_id.to_string(), ltp_id.to_string()),
            port_name.to_string(),
        );
    }
}

#[async_trait]
impl DeviceService for MockDeviceService {
    async fn exists(&self, device_id: &str) -> bool {
        self.inner.read().unwrap().devices.contains(device_id)
    }

    async fn is_available(&self, device_id: &str) -> bool {
        let inner = self.inner.read().unwrap();
        inner.devices.contains(device_id) && !inner.unavailable.contains(device_id)
    }

    async fn is_local_master(&self, device_id: &str) -> bool {
        let inner = self.inner.read().unwrap();
        inner.devices.contains(device_id) && !inner.unmastered.contains(device_id)
    }

    async fn resolve_port(&self, device_id: &str, ltp_id: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .ports
            .get(&(device_id.to_string(), ltp_id.to_string()))
            .cloned()
    }
}
