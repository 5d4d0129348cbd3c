//! DualSense input report decoding.
//!
//! Two report layouts are understood:
//! - 0x01: basic report (USB, or Bluetooth before full-feature mode)
//! - 0x31: extended Bluetooth report
//!
//! Only the fields this tool surfaces are decoded: left stick, the cross
//! button, and battery state. Each buffer is decoded independently; no
//! state is carried between calls.

use crate::error::{Error, Result};

/// Report ID of the basic input report.
pub const INPUT_REPORT_BASIC: u8 = 0x01;
/// Report ID of the extended Bluetooth input report.
pub const INPUT_REPORT_EXTENDED: u8 = 0x31;

/// Minimum length of a basic report (battery byte sits at offset 53).
pub const INPUT_REPORT_BASIC_MIN_LEN: usize = 54;
/// Minimum length of an extended report (battery byte sits at offset 54).
pub const INPUT_REPORT_EXTENDED_MIN_LEN: usize = 55;

/// Cross (X) button bit within the face-button byte.
const BUTTON_CROSS: u8 = 0x20;

/// Decoded controller state from one input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct InputSnapshot {
    /// Report ID the snapshot was decoded from.
    pub report_id: u8,
    /// Left stick X position (0x00 left .. 0xFF right, 0x80 center).
    pub stick_x: u8,
    /// Left stick Y position (0x00 up .. 0xFF down, 0x80 center).
    pub stick_y: u8,
    /// Whether the cross (X) button is held.
    pub cross_pressed: bool,
    /// Battery level as a percentage, 0..=100.
    pub battery_percent: u8,
    /// Whether the battery is charging. Only the extended report carries
    /// charging state; `None` for basic reports.
    pub charging: Option<bool>,
}

/// Convert the raw battery byte's low nibble to a percentage.
///
/// The nibble encodes charge in ~10% steps; +5 rounds to the middle of a
/// step, and the result is clamped so a full nibble doesn't read past 100.
fn battery_percent(battery_byte: u8) -> u8 {
    (((battery_byte & 0x0F) * 10) + 5).min(100)
}

/// Decode a raw input report into a state snapshot.
///
/// Buffers with an unknown leading identifier yield
/// [`Error::UnrecognizedReport`]; buffers too short for their identifier
/// yield [`Error::TruncatedReport`]. Neither panics on any input.
pub fn parse_input_report(data: &[u8]) -> Result<InputSnapshot> {
    let Some(&report_id) = data.first() else {
        return Err(Error::TruncatedReport {
            report_id: 0,
            len: 0,
            needed: 1,
        });
    };

    match report_id {
        INPUT_REPORT_BASIC => {
            if data.len() < INPUT_REPORT_BASIC_MIN_LEN {
                return Err(Error::TruncatedReport {
                    report_id,
                    len: data.len(),
                    needed: INPUT_REPORT_BASIC_MIN_LEN,
                });
            }
            Ok(InputSnapshot {
                report_id,
                stick_x: data[1],
                stick_y: data[2],
                cross_pressed: data[8] & BUTTON_CROSS != 0,
                battery_percent: battery_percent(data[53]),
                charging: None,
            })
        }
        INPUT_REPORT_EXTENDED => {
            if data.len() < INPUT_REPORT_EXTENDED_MIN_LEN {
                return Err(Error::TruncatedReport {
                    report_id,
                    len: data.len(),
                    needed: INPUT_REPORT_EXTENDED_MIN_LEN,
                });
            }
            let battery_byte = data[54];
            Ok(InputSnapshot {
                report_id,
                stick_x: data[2],
                stick_y: data[3],
                cross_pressed: data[9] & BUTTON_CROSS != 0,
                battery_percent: battery_percent(battery_byte),
                charging: Some((battery_byte & 0xF0) >> 4 != 0),
            })
        }
        other => Err(Error::UnrecognizedReport { report_id: other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_report() -> Vec<u8> {
        let mut data = vec![0u8; 64];
        data[0] = INPUT_REPORT_BASIC;
        data
    }

    fn extended_report() -> Vec<u8> {
        let mut data = vec![0u8; 78];
        data[0] = INPUT_REPORT_EXTENDED;
        data
    }

    #[test]
    fn decode_basic_sticks_and_button() {
        let mut data = basic_report();
        data[1] = 0x40;
        data[2] = 0xC0;
        data[8] = BUTTON_CROSS;

        let snap = parse_input_report(&data).unwrap();
        assert_eq!(snap.report_id, 0x01);
        assert_eq!(snap.stick_x, 0x40);
        assert_eq!(snap.stick_y, 0xC0);
        assert!(snap.cross_pressed);
        assert_eq!(snap.charging, None);
    }

    #[test]
    fn decode_basic_cross_released() {
        let mut data = basic_report();
        data[8] = 0xDF; // every bit except cross
        let snap = parse_input_report(&data).unwrap();
        assert!(!snap.cross_pressed);
    }

    #[test]
    fn decode_basic_battery_levels() {
        let mut data = basic_report();
        data[53] = 0x07;
        assert_eq!(parse_input_report(&data).unwrap().battery_percent, 75);

        data[53] = 0x00;
        assert_eq!(parse_input_report(&data).unwrap().battery_percent, 5);

        // 0x0F would compute to 155; clamped to full charge.
        data[53] = 0x0F;
        assert_eq!(parse_input_report(&data).unwrap().battery_percent, 100);
    }

    #[test]
    fn decode_extended_sticks_and_button() {
        let mut data = extended_report();
        data[2] = 0x11;
        data[3] = 0x22;
        data[9] = BUTTON_CROSS | 0x01;

        let snap = parse_input_report(&data).unwrap();
        assert_eq!(snap.report_id, 0x31);
        assert_eq!(snap.stick_x, 0x11);
        assert_eq!(snap.stick_y, 0x22);
        assert!(snap.cross_pressed);
    }

    #[test]
    fn decode_extended_charging_flag() {
        let mut data = extended_report();
        data[54] = 0x08; // high nibble clear
        assert_eq!(parse_input_report(&data).unwrap().charging, Some(false));

        data[54] = 0x18; // high nibble set
        let snap = parse_input_report(&data).unwrap();
        assert_eq!(snap.charging, Some(true));
        assert_eq!(snap.battery_percent, 85);
    }

    #[test]
    fn decode_unknown_report_id() {
        let data = [0x05u8; 64];
        match parse_input_report(&data) {
            Err(Error::UnrecognizedReport { report_id }) => assert_eq!(report_id, 0x05),
            other => panic!("expected UnrecognizedReport, got {other:?}"),
        }
    }

    #[test]
    fn decode_truncated_basic_report() {
        let mut data = basic_report();
        data.truncate(53);
        match parse_input_report(&data) {
            Err(Error::TruncatedReport {
                report_id,
                len,
                needed,
            }) => {
                assert_eq!(report_id, 0x01);
                assert_eq!(len, 53);
                assert_eq!(needed, INPUT_REPORT_BASIC_MIN_LEN);
            }
            other => panic!("expected TruncatedReport, got {other:?}"),
        }
    }

    #[test]
    fn decode_truncated_extended_report() {
        let mut data = extended_report();
        data.truncate(10);
        assert!(matches!(
            parse_input_report(&data),
            Err(Error::TruncatedReport { report_id: 0x31, .. })
        ));
    }

    #[test]
    fn decode_empty_buffer() {
        assert!(matches!(
            parse_input_report(&[]),
            Err(Error::TruncatedReport { len: 0, .. })
        ));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut data = extended_report();
        data[54] = 0x17;
        let snap = parse_input_report(&data).unwrap();
        let json = serde_json::to_string(&snap).expect("serialize snapshot");
        assert!(json.contains("\"battery_percent\":75"));
        assert!(json.contains("\"charging\":true"));
    }
}
