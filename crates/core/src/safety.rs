//! Safety layer: validates all write parameters before anything is sent
//! to the controller.
//!
//! # Lightbar bounds
//!
//! Each color channel is an 8-bit hardware register: 0–255. The
//! application boundary accepts wider integers so an out-of-range request
//! is representable and rejected here with a precise error instead of
//! silently wrapping or clamping. Validation is all-or-nothing: if any
//! channel is out of range, no report is built and nothing reaches the
//! device.

use crate::device::Color;
use crate::error::{Error, Result};

/// Maximum value of a color channel.
pub const CHANNEL_MAX: u16 = 255;

/// Validate a single color channel value.
pub fn validate_channel(field: &'static str, value: u16) -> Result<u8> {
    if value > CHANNEL_MAX {
        return Err(Error::OutOfRange {
            field,
            value: value as u32,
            min: 0,
            max: CHANNEL_MAX as u32,
        });
    }
    Ok(value as u8)
}

/// Validate a full RGB triple. Fails on the first out-of-range channel.
pub fn validate_color(r: u16, g: u16, b: u16) -> Result<Color> {
    Ok(Color {
        r: validate_channel("red", r)?,
        g: validate_channel("green", g)?,
        b: validate_channel("blue", b)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_channel_in_range() {
        assert_eq!(validate_channel("red", 0).unwrap(), 0);
        assert_eq!(validate_channel("red", 128).unwrap(), 128);
        assert_eq!(validate_channel("red", 255).unwrap(), 255);
    }

    #[test]
    fn validate_channel_rejects_out_of_range() {
        assert!(validate_channel("red", 256).is_err());
        assert!(validate_channel("red", 1000).is_err());
    }

    #[test]
    fn validate_color_in_range() {
        let c = validate_color(255, 255, 0).unwrap();
        assert_eq!(c, Color::new(255, 255, 0));
    }

    #[test]
    fn validate_color_rejects_any_bad_channel() {
        assert!(validate_color(256, 0, 0).is_err());
        assert!(validate_color(0, 256, 0).is_err());
        assert!(validate_color(0, 0, 256).is_err());
    }

    #[test]
    fn validate_color_error_names_the_channel() {
        match validate_color(0, 300, 0) {
            Err(Error::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "green");
                assert_eq!(value, 300);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }
}
