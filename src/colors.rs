//! Color helpers for building fade schedules.
//!
//! Provides HSV construction (handy for color wheels and hue rotations), a
//! ready-made twelve color palette, an ease-in-out blend for precomputing
//! intermediate fade steps, and gamma correction for perceptually even
//! brightness on PWM-driven LEDs.
//!
//! All functions return `palette::Srgb` for direct use in a schedule.

use palette::{FromColor, Hsv, Mix, Srgb};

/// Gamma used by [`gamma_correct`] callers that have no better figure for their LED.
pub const GAMMA: f32 = 2.2;

const fn from_12bit(red: u16, green: u16, blue: u16) -> Srgb {
    Srgb::new(
        red as f32 / 4095.0,
        green as f32 / 4095.0,
        blue as f32 / 4095.0,
    )
}

/// Twelve saturated base colors, from red through violet to sky blue.
pub const BASE_PALETTE: [Srgb; 12] = [
    from_12bit(4095, 0, 0),
    from_12bit(4095, 1650, 0),
    from_12bit(4095, 4095, 0),
    from_12bit(0, 4095, 0),
    from_12bit(0, 0, 4095),
    from_12bit(75, 0, 130),
    from_12bit(148, 0, 211),
    from_12bit(4095, 2048, 0),
    from_12bit(4095, 0, 2048),
    from_12bit(2048, 4095, 0),
    from_12bit(0, 4095, 2048),
    from_12bit(0, 2048, 4095),
];

/// Converts a hue in degrees plus saturation and value (0.0-1.0) to RGB.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    Srgb::from_color(Hsv::new(hue, saturation, value))
}

/// The fully saturated, full brightness color at `hue` degrees. Used by the
/// rainbow transition.
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Blends `start` toward `end` along a quadratic ease-in-out curve.
///
/// `progress` is clamped to 0.0-1.0. The curve is `2p²` for the first half and
/// `-1 + (4 - 2p)p` for the second, so the blend starts and ends slowly.
pub fn ease_in_out(start: Srgb, end: Srgb, progress: f32) -> Srgb {
    let p = progress.clamp(0.0, 1.0);
    let eased = if p < 0.5 {
        2.0 * p * p
    } else {
        -1.0 + (4.0 - 2.0 * p) * p
    };

    start.mix(end, eased)
}

/// Applies a power curve to each channel: `channel ^ gamma`.
///
/// Channels are clamped to 0.0-1.0 first.
pub fn gamma_correct(color: Srgb, gamma: f32) -> Srgb {
    let curve = |value: f32| libm::powf(value.clamp(0.0, 1.0), gamma);
    Srgb::new(curve(color.red), curve(color.green), curve(color.blue))
}
