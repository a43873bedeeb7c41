//! Shared infrastructure for the netl3vpn provisioning pipeline.
//!
//! This crate provides the pieces every stage of the pipeline depends
//! on:
//!
//! - [`error`]: the structured error taxonomy ([`L3vpnError`])
//! - [`service`]: trait contracts for the external collaborators
//!   (device/topology service, shared resource pool, replicated store,
//!   device-provisioning dispatch)
//! - [`store`]: [`MemoryStore`], the node-local [`EcStore`] backend
//!   used by standalone daemons and tests
//!
//! Apart from the in-memory store, the service contracts are consumed,
//! not implemented, here: real backends live outside the core, and
//! `l3vpn-test` provides doubles for the rest.

pub mod error;
pub mod service;
pub mod store;

pub use error::{L3vpnError, L3vpnResult};
pub use service::{DeviceService, EcStore, ResourcePool, VpnDispatchService};
pub use store::MemoryStore;
