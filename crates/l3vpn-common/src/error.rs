//! Error types for provisioning operations.
//!
//! Every failure of a provisioning run maps to exactly one of these
//! variants, so callers can distinguish a malformed request from a
//! precondition miss, a name conflict, pool exhaustion, or a
//! downstream dispatch failure. All are terminal for the current call;
//! none are retried internally.

use thiserror::Error;

/// Result type alias for provisioning operations.
pub type L3vpnResult<T> = Result<T, L3vpnError>;

/// Errors that can occur during a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum L3vpnError {
    /// Malformed service descriptor or CIDR string.
    #[error("Invalid descriptor: {message}")]
    Validation {
        /// What was malformed.
        message: String,
    },

    /// A member device is missing, unavailable, or not locally mastered.
    #[error("Device '{device_id}' failed precondition: {reason}")]
    Precondition {
        /// The failing device.
        device_id: String,
        /// Which precondition failed.
        reason: String,
    },

    /// An active instance with the same name already exists.
    #[error("Instance name '{name}' is already in use")]
    Conflict {
        /// The contested name.
        name: String,
    },

    /// The shared identifier pool is exhausted or unreachable.
    #[error("Resource allocation failed for {kind}")]
    ResourceExhausted {
        /// The label kind being drawn when allocation failed.
        kind: String,
    },

    /// The device-provisioning service rejected the bundle.
    #[error("Dispatch failed: {message}")]
    Dispatch {
        /// Error message.
        message: String,
    },

    /// Replicated store access failed.
    #[error("Store operation failed: {message}")]
    Store {
        /// Error message.
        message: String,
    },
}

impl L3vpnError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a device precondition error.
    pub fn precondition(device_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Precondition {
            device_id: device_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate-name conflict error.
    pub fn conflict(name: impl Into<String>) -> Self {
        Self::Conflict { name: name.into() }
    }

    /// Creates a resource exhaustion error.
    pub fn resource_exhausted(kind: impl Into<String>) -> Self {
        Self::ResourceExhausted { kind: kind.into() }
    }

    /// Creates a dispatch error.
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }

    /// Creates a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<l3vpn_types::ParseError> for L3vpnError {
    fn from(err: l3vpn_types::ParseError) -> Self {
        L3vpnError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = L3vpnError::precondition("d1", "not locally mastered");
        assert_eq!(
            err.to_string(),
            "Device 'd1' failed precondition: not locally mastered"
        );
    }

    #[test]
    fn test_conflict_display() {
        let err = L3vpnError::conflict("vpn-A");
        assert_eq!(err.to_string(), "Instance name 'vpn-A' is already in use");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = "10.0.0.1".parse::<l3vpn_types::CidrAddress>().unwrap_err();
        let err: L3vpnError = parse_err.into();
        assert!(matches!(err, L3vpnError::Validation { .. }));
    }
}
