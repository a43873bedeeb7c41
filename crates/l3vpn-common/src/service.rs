//! Trait contracts for the external collaborators of the pipeline.
//!
//! The core never talks to a device, a Redis-style store, or a real
//! identifier pool directly; it goes through these seams. Every trait
//! is object-safe so the orchestrator can hold `Arc<dyn ...>` handles
//! wired up at startup.

use async_trait::async_trait;
use l3vpn_types::ProvisionBundle;

/// Device and topology lookups.
///
/// Backed by the controller's device inventory; the core only reads.
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Returns true if the device is known to the inventory.
    async fn exists(&self, device_id: &str) -> bool;

    /// Returns true if the device is administratively available.
    async fn is_available(&self, device_id: &str) -> bool;

    /// Returns true if this cluster node holds exclusive mastership
    /// of the device.
    async fn is_local_master(&self, device_id: &str) -> bool;

    /// Resolves a logical termination point to the physical port name.
    async fn resolve_port(&self, device_id: &str, ltp_id: &str) -> Option<String>;
}

/// Cluster-wide shared pool of integer identifiers.
///
/// `allocate` must behave as an atomic, linearizable counter increment
/// at the pool: no two concurrent callers ever observe the same id.
#[async_trait]
pub trait ResourcePool: Send + Sync {
    /// Registers the usable range once, cluster-wide. Returns false if
    /// the pool was already reserved (first-writer-wins; callers treat
    /// a repeat as a no-op, not an error).
    async fn reserve(&self, low: u64, high: u64) -> bool;

    /// Draws exactly one id. `None` when the pool is exhausted or
    /// unreachable.
    async fn allocate(&self) -> Option<u64>;

    /// Returns a previously drawn id to the pool. Used by rollback.
    async fn release(&self, id: u64);
}

/// Eventually-consistent replicated key-value store.
///
/// Writes are visible to local reads immediately; visibility to other
/// cluster nodes converges within an unbounded delay. There are no
/// cross-key transactions, so multi-record writes are individually
/// replicated and a scan over `entries` is advisory under concurrent
/// writers on other nodes.
#[async_trait]
pub trait EcStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Returns the value for a key, if present locally.
    async fn get(&self, key: &str) -> Option<V>;

    /// Writes a value; immediately visible to local reads.
    async fn put(&self, key: &str, value: V);

    /// Snapshot of all locally visible entries.
    async fn entries(&self) -> Vec<(String, V)>;

    /// Removes a key, returning the removed value. Used by rollback.
    async fn remove(&self, key: &str) -> Option<V>;
}

/// Downstream device-provisioning dispatch.
///
/// Hands the full per-device bundle to the service that builds and
/// sends the vendor-specific configuration. The boolean verdict is the
/// only feedback channel the downstream offers.
#[async_trait]
pub trait VpnDispatchService: Send + Sync {
    /// Pushes one decomposed bundle. Returns false on any downstream
    /// failure.
    async fn push(&self, bundle: &ProvisionBundle) -> bool;
}
