//! Replicated store names used by the provisioning pipeline.

/// Customer-facing instances, keyed by instance id.
pub const NET_INSTANCE_STORE: &str = "netl3vpn-instance";

/// Per-device VPN configuration records, keyed by device id.
pub const DEVICE_INSTANCE_STORE: &str = "nel3vpn-instance";

/// Per-circuit records, keyed by attachment circuit id.
pub const DEVICE_AC_STORE: &str = "nel3vpn-ac";
