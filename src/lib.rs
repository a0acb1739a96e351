#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`FadeController`**: Drives one RGB LED forward through a color list, then back
//! - **`FadeSchedule`**: A validated pair of color and hold-time slices
//! - **`ScheduleBuilder`** / **`OwnedSchedule`**: Fixed-capacity schedule storage
//! - **`Phase`**: Where the animation is (`Start`, `Forward` or `Reverse`)
//! - **`HoldPolicy`**: How the hold counter is compared against a color's hold time
//! - **`RgbLed`**: Trait to implement for your LED hardware
//! - **`DimmableLed`**: Sink wrapper adding power toggling and brightness levels
//! - **`TransitionPlayer`**: Runs the dissolve, rainbow or breathing animation, switched by `TransitionMode`
//! - **`Debouncer`** / **`ControlEvent`**: Button input feeding the controller or player
//!
//! Time is counted in ticks: one tick is one call to [`FadeController::update`].
//! The caller decides how often that happens.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod controller;
pub mod input;
pub mod output;
pub mod schedule;
pub mod time;
pub mod transition;
pub mod types;

pub use controller::{ControllerState, FadeController, RgbLed};
pub use input::{ControlEvent, DEFAULT_DEBOUNCE_MS, Debouncer};
pub use output::{BrightnessLevel, DimmableLed, PWM_MAX, PwmDuty, channel_duty};
pub use schedule::{FadeSchedule, OwnedSchedule, ScheduleBuilder};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use transition::{Animation, Breathing, Dissolve, Rainbow, TransitionMode, TransitionPlayer};
pub use types::{FadeError, HoldPolicy, Phase, Ticks};

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

pub const BLACK: Srgb = COLOR_OFF;
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);
pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_idle_with_tolerant_holds() {
        assert_eq!(Phase::default(), Phase::Start);
        assert_eq!(HoldPolicy::default(), HoldPolicy::AtLeast);
        assert_eq!(TransitionMode::default(), TransitionMode::Dissolve);
    }

    #[test]
    fn hold_policies_differ_only_past_the_hold() {
        assert!(HoldPolicy::AtLeast.expired(3, 3));
        assert!(HoldPolicy::Exact.expired(3, 3));
        assert!(!HoldPolicy::AtLeast.expired(2, 3));
        assert!(!HoldPolicy::Exact.expired(2, 3));
        assert!(HoldPolicy::AtLeast.expired(1, 0));
        assert!(!HoldPolicy::Exact.expired(1, 0));
    }
}
