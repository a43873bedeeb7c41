//! Common L3VPN domain types for the netl3vpn control plane.
//!
//! This crate provides the entity model shared by the provisioning
//! pipeline and its collaborators:
//!
//! - [`VpnInstance`]: the customer-facing, multi-site VPN description
//! - [`AttachmentCircuit`]: a customer interface bound to one device
//! - [`CidrAddress`]: a validated `address/mask` pair
//! - [`VrfEntity`] / [`DeviceVpnConfig`]: per-device routing records
//! - [`VpnAc`]: per-circuit records with resolved port names
//! - [`ProvisionBundle`]: the full per-device payload handed to dispatch

mod bgp;
mod cidr;
mod instance;
mod vrf;

pub use bgp::{BgpConfig, BgpImportProtocol, BgpProtocolType};
pub use cidr::CidrAddress;
pub use instance::{AttachmentCircuit, TopoMode, VpnInstance};
pub use vrf::{AllocatedResources, DeviceVpnConfig, ProvisionBundle, VpnAc, VrfEntity};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid CIDR address: {0} (expected address/mask)")]
    InvalidCidr(String),

    #[error("invalid subnet mask: {0} (must be 0-32)")]
    InvalidMask(String),

    #[error("invalid topology mode: {0}")]
    InvalidTopoMode(String),

    #[error("invalid BGP import protocol: {0}")]
    InvalidBgpProtocol(String),
}
