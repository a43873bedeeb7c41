//! Raw service descriptor as received from the ingestion layer.
//!
//! Field presence is not guaranteed at this point; the topology parser
//! is responsible for rejecting incomplete descriptors. The HTTP/JSON
//! transport itself is outside this daemon.

use serde::Deserialize;

/// One member device reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceDescriptor {
    pub id: Option<String>,
}

impl DeviceDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

/// One attachment circuit as described by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AcDescriptor {
    pub id: Option<String>,
    pub device_id: Option<String>,
    pub ltp_id: Option<String>,
    pub address: Option<String>,
}

impl AcDescriptor {
    pub fn new(
        id: impl Into<String>,
        device_id: impl Into<String>,
        ltp_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            device_id: Some(device_id.into()),
            ltp_id: Some(ltp_id.into()),
            address: Some(address.into()),
        }
    }
}

/// The customer-facing service description, one per create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstanceDescriptor {
    pub id: Option<String>,
    pub name: Option<String>,
    pub mode: Option<String>,
    #[serde(default)]
    pub devices: Vec<DeviceDescriptor>,
    #[serde(default)]
    pub acs: Vec<AcDescriptor>,
}

impl InstanceDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.devices.push(DeviceDescriptor::new(device_id));
        self
    }

    pub fn with_ac(mut self, ac: AcDescriptor) -> Self {
        self.acs.push(ac);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_helpers() {
        let desc = InstanceDescriptor::new("vpn1", "vpn-A")
            .with_device("d1")
            .with_ac(AcDescriptor::new("a1", "d1", "ltp1", "10.1.1.1/30"));

        assert_eq!(desc.devices.len(), 1);
        assert_eq!(desc.acs[0].address.as_deref(), Some("10.1.1.1/30"));
    }

    #[test]
    fn test_deserialize_partial_descriptor() {
        let desc: InstanceDescriptor = serde_json::from_str(
            r#"{"id": "vpn1", "devices": [{"id": "d1"}], "acs": [{"id": "a1"}]}"#,
        )
        .unwrap();

        assert_eq!(desc.id.as_deref(), Some("vpn1"));
        assert_eq!(desc.name, None);
        assert_eq!(desc.acs[0].device_id, None);
    }
}
