//! Device model: discovery, connection mode, and shared value types.

use crate::error::{Error, Result};
use crate::{pids, SONY_VID};
use tracing::{debug, info};

/// Supported Sony controller models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerModel {
    DualSense,
    DualSenseEdge,
}

impl ControllerModel {
    /// Look up model from USB product ID.
    pub fn from_pid(pid: u16) -> Option<Self> {
        match pid {
            pids::DUALSENSE => Some(Self::DualSense),
            pids::DUALSENSE_EDGE => Some(Self::DualSenseEdge),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DualSense => "Sony DualSense",
            Self::DualSenseEdge => "Sony DualSense Edge",
        }
    }

    /// USB Product ID.
    pub fn pid(&self) -> u16 {
        match self {
            Self::DualSense => pids::DUALSENSE,
            Self::DualSenseEdge => pids::DUALSENSE_EDGE,
        }
    }
}

/// How the controller is reached.
///
/// The mode determines output report length, field offsets, and whether a
/// CRC-32 trailer is appended. It is fixed when the device is opened and
/// passed explicitly to every codec operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ConnectionMode {
    Usb,
    Bluetooth,
}

impl ConnectionMode {
    /// Derive the mode from the HID interface number reported at enumeration.
    ///
    /// Bluetooth HID devices report interface `-1`; any real interface
    /// number means USB.
    pub fn from_interface_number(interface: i32) -> Self {
        if interface == -1 {
            Self::Bluetooth
        } else {
            Self::Usb
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Usb => "USB",
            Self::Bluetooth => "Bluetooth",
        }
    }
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An RGB lightbar color. Each channel is a full 8-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color from a CLI-friendly hex string.
    ///
    /// Accepts "RRGGBB", "#RRGGBB", and "0xRRGGBB" (case-insensitive).
    pub fn from_hex(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let raw = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if raw.len() != 6 {
            return None;
        }

        let value = u32::from_str_radix(raw, 16).ok()?;
        Some(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Information about a discovered DualSense controller.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub model: ControllerModel,
    pub vid: u16,
    pub pid: u16,
    pub path: String,
    pub serial: Option<String>,
    pub mode: ConnectionMode,
}

/// Discover all connected DualSense controllers.
///
/// Enumerates HID devices and returns info for any recognized models,
/// with the connection mode derived from the interface number.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;

    let mut devices = Vec::new();
    for info in api.device_list() {
        if info.vendor_id() != SONY_VID {
            continue;
        }

        if let Some(model) = ControllerModel::from_pid(info.product_id()) {
            let mode = ConnectionMode::from_interface_number(info.interface_number());
            info!(
                model = model.name(),
                vid = format_args!("0x{:04X}", info.vendor_id()),
                pid = format_args!("0x{:04X}", info.product_id()),
                mode = mode.label(),
                path = %info.path().to_string_lossy(),
                "Found DualSense controller"
            );
            devices.push(DeviceInfo {
                model,
                vid: info.vendor_id(),
                pid: info.product_id(),
                path: info.path().to_string_lossy().into_owned(),
                serial: info.serial_number().map(|s| s.to_string()),
                mode,
            });
        }
    }

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}
