//! Error types for open-ds-hub-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Value out of safe range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Input report with a leading identifier this decoder does not know.
    ///
    /// Not a fault: the controller emits report types beyond the ones
    /// decoded here. Kept distinct from [`Error::TruncatedReport`] so
    /// callers can tell "nothing understood" from "malformed".
    #[error("unrecognized input report ID 0x{report_id:02X}")]
    UnrecognizedReport { report_id: u8 },

    /// Input report shorter than the minimum length its identifier requires.
    #[error("truncated input report 0x{report_id:02X}: {len} bytes (need {needed})")]
    TruncatedReport {
        report_id: u8,
        len: usize,
        needed: usize,
    },

    /// Permission denied (likely Windows HID exclusive access).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Operation timed out.
    #[error("timeout: {0}")]
    Timeout(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
