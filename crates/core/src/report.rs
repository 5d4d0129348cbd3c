//! DualSense output report encoding.
//!
//! The controller accepts "set lightbar color" output reports in two wire
//! formats:
//! - USB: 64 bytes, report ID 0x02
//! - Bluetooth: 78 bytes, report ID 0x31, CRC-32 trailer in the last
//!   4 bytes (the Bluetooth link layer does not integrity-check the HID
//!   payload the way USB does)
//!
//! The per-mode byte layouts are protocol constants reverse-engineered
//! from hardware traffic. They are kept as static tables rather than
//! inline code so a layout revision is a data change.

use crate::device::{Color, ConnectionMode};
use crate::error::Result;

/// USB output report length (including report ID).
pub const USB_OUTPUT_REPORT_LEN: usize = 64;
/// Bluetooth output report length (including report ID and CRC trailer).
pub const BT_OUTPUT_REPORT_LEN: usize = 78;

/// Header byte prepended to the CRC input for Bluetooth output reports.
/// 0xA2 is the HID "DATA, output" transaction header on the BT link.
pub const BT_CHECKSUM_SEED: u8 = 0xA2;
/// Number of report bytes covered by the Bluetooth checksum.
pub const BT_CHECKSUM_COVERAGE: usize = 74;

/// One byte placed at one offset in an output report.
///
/// Layouts are ordered lists of these; later writes at the same offset win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWrite {
    pub offset: usize,
    pub value: u8,
}

const fn fw(offset: usize, value: u8) -> FieldWrite {
    FieldWrite { offset, value }
}

/// Wire layout of a lightbar output report for one connection mode.
#[derive(Debug, Clone, Copy)]
pub struct ReportLayout {
    /// Total report length, including report ID (and trailer, if any).
    pub report_len: usize,
    /// Fixed bytes: report ID plus the feature-flag bytes that select the
    /// lightbar sub-feature. Opaque protocol constants, not derived.
    pub prelude: &'static [FieldWrite],
    /// Offsets of the red, green, and blue channel bytes.
    pub color_offsets: [usize; 3],
    /// Whether a CRC-32 trailer is appended.
    pub checksum: bool,
}

/// USB lightbar report: report ID 0x02, flags at byte 2, RGB at 45..=47.
const USB_LAYOUT: ReportLayout = ReportLayout {
    report_len: USB_OUTPUT_REPORT_LEN,
    prelude: &[fw(0, 0x02), fw(2, 0x04)],
    color_offsets: [45, 46, 47],
    checksum: false,
};

/// Bluetooth lightbar report: report ID 0x31, flags at bytes 2 and 4,
/// RGB at 47..=49, CRC-32 over 0xA2 ++ bytes 0..74 stored at 74..78.
const BT_LAYOUT: ReportLayout = ReportLayout {
    report_len: BT_OUTPUT_REPORT_LEN,
    prelude: &[fw(0, 0x31), fw(2, 0x10), fw(4, 0xF7)],
    color_offsets: [47, 48, 49],
    checksum: true,
};

impl ConnectionMode {
    /// The output report layout for this connection mode.
    pub fn layout(&self) -> &'static ReportLayout {
        match self {
            Self::Usb => &USB_LAYOUT,
            Self::Bluetooth => &BT_LAYOUT,
        }
    }
}

/// Compute the checksum a Bluetooth output report must carry: CRC-32
/// (reflected, zlib polynomial) over the 0xA2 header byte followed by the
/// report's first [`BT_CHECKSUM_COVERAGE`] bytes.
pub fn bt_report_checksum(report: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[BT_CHECKSUM_SEED]);
    hasher.update(&report[..BT_CHECKSUM_COVERAGE]);
    hasher.finalize()
}

/// Build a lightbar output report for the given connection mode.
///
/// The buffer is zero-initialized, the mode's fixed field writes and the
/// color channels are applied, and for Bluetooth the CRC-32 trailer is
/// stamped last so it covers the final field values. The returned buffer
/// is ready to write verbatim to the HID transport; this function itself
/// performs no I/O.
pub fn build_color_report(mode: ConnectionMode, color: Color) -> Result<Vec<u8>> {
    let layout = mode.layout();
    let mut buf = vec![0u8; layout.report_len];

    for field in layout.prelude {
        buf[field.offset] = field.value;
    }

    let [r_off, g_off, b_off] = layout.color_offsets;
    buf[r_off] = color.r;
    buf[g_off] = color.g;
    buf[b_off] = color.b;

    if layout.checksum {
        let crc = bt_report_checksum(&buf);
        buf[BT_CHECKSUM_COVERAGE..].copy_from_slice(&crc.to_le_bytes());
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usb_report_length_and_prelude() {
        let report = build_color_report(ConnectionMode::Usb, Color::new(0, 0, 0)).unwrap();
        assert_eq!(report.len(), USB_OUTPUT_REPORT_LEN);
        assert_eq!(report[0], 0x02);
        assert_eq!(report[2], 0x04);
    }

    #[test]
    fn usb_report_color_placement() {
        let report =
            build_color_report(ConnectionMode::Usb, Color::new(255, 128, 17)).unwrap();
        assert_eq!(report[45], 255);
        assert_eq!(report[46], 128);
        assert_eq!(report[47], 17);
    }

    #[test]
    fn usb_report_untouched_bytes_are_zero() {
        let report = build_color_report(ConnectionMode::Usb, Color::new(1, 2, 3)).unwrap();
        for (i, &byte) in report.iter().enumerate() {
            if ![0, 2, 45, 46, 47].contains(&i) {
                assert_eq!(byte, 0, "byte {i} should be zero");
            }
        }
    }

    #[test]
    fn bt_report_length_and_prelude() {
        let report = build_color_report(ConnectionMode::Bluetooth, Color::new(0, 0, 0)).unwrap();
        assert_eq!(report.len(), BT_OUTPUT_REPORT_LEN);
        assert_eq!(report[0], 0x31);
        assert_eq!(report[2], 0x10);
        assert_eq!(report[4], 0xF7);
    }

    #[test]
    fn bt_report_color_placement() {
        let report =
            build_color_report(ConnectionMode::Bluetooth, Color::new(10, 20, 30)).unwrap();
        assert_eq!(report[47], 10);
        assert_eq!(report[48], 20);
        assert_eq!(report[49], 30);
    }

    #[test]
    fn bt_report_checksum_trailer_verifies() {
        let report =
            build_color_report(ConnectionMode::Bluetooth, Color::new(255, 255, 0)).unwrap();
        let stored = u32::from_le_bytes(report[74..78].try_into().unwrap());
        assert_eq!(stored, bt_report_checksum(&report));
    }

    #[test]
    fn bt_report_checksum_covers_color_bytes() {
        let a = build_color_report(ConnectionMode::Bluetooth, Color::new(0, 0, 0)).unwrap();
        let b = build_color_report(ConnectionMode::Bluetooth, Color::new(0, 0, 1)).unwrap();
        assert_ne!(&a[74..78], &b[74..78]);
    }

    #[test]
    fn bt_report_checksum_matches_known_vector() {
        // CRC-32 of "123456789" is 0xCBF43926 for the zlib polynomial.
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(b"123456789");
        assert_eq!(hasher.finalize(), 0xCBF4_3926);
    }

    #[test]
    fn usb_report_has_no_checksum_region() {
        let report = build_color_report(ConnectionMode::Usb, Color::new(9, 9, 9)).unwrap();
        // USB reports end at byte 63; the BT trailer region does not exist.
        assert_eq!(report.len(), 64);
        assert_eq!(&report[48..], &[0u8; 16]);
    }

    #[test]
    fn layouts_stay_within_report_bounds() {
        for mode in [ConnectionMode::Usb, ConnectionMode::Bluetooth] {
            let layout = mode.layout();
            let data_len = if layout.checksum {
                BT_CHECKSUM_COVERAGE
            } else {
                layout.report_len
            };
            for field in layout.prelude {
                assert!(field.offset < data_len);
            }
            for off in layout.color_offsets {
                assert!(off < data_len);
            }
        }
    }
}
