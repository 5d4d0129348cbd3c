//! Lightbar control: validate, encode, and optionally commit color reports.
//!
//! This is the single operation the application shells (CLI/GUI) call:
//! it takes raw channel values and a commit flag, validates, builds the
//! mode-specific output report, and writes it to the transport only when
//! `commit` is set. The built report is always returned so callers can
//! inspect or display it without touching hardware.

use crate::device::{Color, ConnectionMode};
use crate::error::Result;
use crate::input::{self, InputSnapshot};
use crate::report;
use crate::safety;
use crate::transport::HidTransport;
use tracing::{debug, trace};

/// Set the lightbar color.
///
/// Steps:
/// 1. Validate each channel (0..=255); out-of-range fails before any
///    buffer is built.
/// 2. Build the output report for `mode`.
/// 3. If `commit`, write the report to the transport.
///
/// Returns the built report buffer.
pub fn set_color(
    transport: &dyn HidTransport,
    mode: ConnectionMode,
    r: u16,
    g: u16,
    b: u16,
    commit: bool,
) -> Result<Vec<u8>> {
    let color = safety::validate_color(r, g, b)?;
    let report = build_report(mode, color)?;

    if commit {
        let n = transport.write_report(&report)?;
        debug!(
            mode = mode.label(),
            color = %color,
            bytes = n,
            "Lightbar color committed"
        );
    } else {
        debug!(mode = mode.label(), color = %color, "Lightbar report built (not committed)");
    }

    Ok(report)
}

/// Build a lightbar report for an already-validated color, with trace
/// logging of the byte map.
pub fn build_report(mode: ConnectionMode, color: Color) -> Result<Vec<u8>> {
    let report = report::build_color_report(mode, color)?;
    trace!(
        mode = mode.label(),
        len = report.len(),
        report_hex = format_args!("{:02X?}", report),
        "Lightbar TX report"
    );
    Ok(report)
}

/// Read one input report from the transport and decode it.
///
/// Each inbound buffer is decoded independently; arrival order relative
/// to outbound writes carries no meaning.
pub fn read_status(transport: &dyn HidTransport, timeout_ms: i32) -> Result<InputSnapshot> {
    let mut buf = [0u8; report::BT_OUTPUT_REPORT_LEN];
    let n = transport.read_input_report(&mut buf, timeout_ms)?;
    let snapshot = input::parse_input_report(&buf[..n])?;
    trace!(
        report_id = format_args!("0x{:02X}", snapshot.report_id),
        battery = snapshot.battery_percent,
        "Lightbar RX snapshot"
    );
    Ok(snapshot)
}
