//! open-ds-hub-core: DualSense HID report codec, device discovery, and lightbar control.
//!
//! This crate provides the cross-platform core logic for communicating with
//! Sony DualSense controllers over USB or Bluetooth HID. The wire format
//! differs between the two transports (report length, field offsets, and a
//! CRC-32 trailer on Bluetooth), so every codec operation takes the
//! connection mode as an explicit parameter.

pub mod comm;
pub mod device;
pub mod error;
pub mod input;
pub mod lightbar;
pub mod report;
pub mod safety;
pub mod transport;

/// Sony USB Vendor ID.
pub const SONY_VID: u16 = 0x054C;

/// Known DualSense product IDs.
pub mod pids {
    /// DualSense wireless controller.
    pub const DUALSENSE: u16 = 0x0CE6;
    /// DualSense Edge wireless controller.
    pub const DUALSENSE_EDGE: u16 = 0x0DF2;
}
