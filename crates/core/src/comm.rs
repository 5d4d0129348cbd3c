//! Error classification for device communication.
//!
//! The core performs no retries or recovery of its own — transport
//! failures pass through to the caller untouched. This module only
//! classifies errors so the UI layers can present a meaningful status.

use crate::device;
use crate::error::Error;

/// Classification of communication errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transient errors that may clear on their own (timeout, busy).
    Transient,
    /// Device is disconnected.
    Disconnected,
    /// Permission denied — likely Windows HID exclusive access.
    PermissionDenied,
    /// Malformed or unrecognized report data.
    InvalidReport,
    /// Caller supplied a bad value; retrying with the same input cannot help.
    InvalidInput,
}

impl ErrorClass {
    /// Classify an error for status display.
    pub fn classify(err: &Error) -> Self {
        match err {
            Error::Timeout(_) => Self::Transient,
            Error::PermissionDenied(_) => Self::PermissionDenied,
            Error::DeviceNotFound(_) => Self::Disconnected,
            Error::UnrecognizedReport { .. } | Error::TruncatedReport { .. } => Self::InvalidReport,
            Error::OutOfRange { .. } => Self::InvalidInput,
            Error::Hid(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("disconnect")
                    || lower.contains("not found")
                    || lower.contains("no such device")
                {
                    Self::Disconnected
                } else if lower.contains("permission")
                    || lower.contains("access denied")
                    || lower.contains("access is denied")
                {
                    Self::PermissionDenied
                } else if lower.contains("timeout") || lower.contains("timed out") {
                    Self::Transient
                } else {
                    Self::InvalidReport
                }
            }
        }
    }
}

/// Device connection status for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// A controller is connected.
    Connected,
    /// No controller found.
    Disconnected,
    /// Permission denied — needs driver/udev setup.
    PermissionError,
    /// Enumeration failed for another reason.
    Error,
}

/// Check whether a supported controller is currently present.
pub fn device_status() -> DeviceStatus {
    match device::discover_devices() {
        Ok(devices) if !devices.is_empty() => DeviceStatus::Connected,
        Ok(_) => DeviceStatus::Disconnected,
        Err(ref e) => match ErrorClass::classify(e) {
            ErrorClass::PermissionDenied => DeviceStatus::PermissionError,
            _ => DeviceStatus::Error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_timeout_as_transient() {
        let err = Error::Timeout("1s elapsed".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Transient);
    }

    #[test]
    fn classify_permission_denied() {
        let err = Error::PermissionDenied("access denied".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::PermissionDenied);
    }

    #[test]
    fn classify_disconnect() {
        let err = Error::DeviceNotFound("DualSense".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Disconnected);
    }

    #[test]
    fn classify_hid_disconnect_message() {
        let err = Error::Hid("device disconnect detected".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Disconnected);
    }

    #[test]
    fn classify_hid_permission_message() {
        let err = Error::Hid("Access is denied".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::PermissionDenied);
    }

    #[test]
    fn classify_hid_timeout_message() {
        let err = Error::Hid("timed out waiting for report".into());
        assert_eq!(ErrorClass::classify(&err), ErrorClass::Transient);
    }

    #[test]
    fn classify_decode_errors_as_invalid_report() {
        let err = Error::UnrecognizedReport { report_id: 0x05 };
        assert_eq!(ErrorClass::classify(&err), ErrorClass::InvalidReport);

        let err = Error::TruncatedReport {
            report_id: 0x01,
            len: 10,
            needed: 54,
        };
        assert_eq!(ErrorClass::classify(&err), ErrorClass::InvalidReport);
    }

    #[test]
    fn classify_out_of_range_as_invalid_input() {
        let err = Error::OutOfRange {
            field: "red",
            value: 300,
            min: 0,
            max: 255,
        };
        assert_eq!(ErrorClass::classify(&err), ErrorClass::InvalidInput);
    }
}
