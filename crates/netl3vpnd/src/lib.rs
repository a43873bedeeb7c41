//! Multi-site L3VPN provisioning daemon.
//!
//! Translates one customer-facing service description into per-device
//! routing configuration: parse, precondition-check, allocate
//! identifiers from the cluster-wide pool, decompose into VRF and
//! circuit records, replicate, dispatch.

mod backend;
mod decomp;
mod descriptor;
mod label;
mod manager;
mod parse;
mod tables;

pub use backend::{standalone_manager, LocalLabelPool, LoggingDispatcher, NullDeviceService};
pub use decomp::decompose;
pub use descriptor::{AcDescriptor, DeviceDescriptor, InstanceDescriptor};
pub use label::{
    AllocatedLabel, LabelAllocator, LabelKind, GLOBAL_LABEL_SPACE_MAX, GLOBAL_LABEL_SPACE_MIN,
};
pub use manager::NetL3vpnManager;
pub use parse::parse_instance;
pub use tables::*;
