//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface. Outbound writes are opaque byte
//! sequences; inbound input reports are polled with a timeout (standing in
//! for the asynchronous "data received" event of the underlying HID
//! stack). Transport failures pass through untouched — the core never
//! retries or suppresses them.

use crate::error::Result;

/// Abstraction over raw HID write and input-report read.
pub trait HidTransport: Send {
    /// Write a raw output report. Returns the number of bytes written.
    fn write_report(&self, data: &[u8]) -> Result<usize>;

    /// Read one input report into `buf`, waiting up to `timeout_ms`.
    /// Returns the number of bytes read.
    fn read_input_report(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize>;
}
