//! Core types shared by the controller and schedules.

/// Hold durations are counted in ticks, one tick per `update` call.
pub type Ticks = u32;

/// Where the fade animation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Not yet started, or a full cycle just finished. The next tick writes the first color.
    #[default]
    Start,

    /// Walking from the first color toward the last.
    Forward,

    /// Walking from the last color back toward the first.
    Reverse,
}

/// How the hold counter is compared against a color's hold time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldPolicy {
    /// Advance once `elapsed >= hold`.
    ///
    /// A zero hold keeps its color for a single tick.
    #[default]
    AtLeast,

    /// Advance only when `elapsed == hold`.
    ///
    /// A zero hold never matches, so the animation stops on that color.
    Exact,
}

impl HoldPolicy {
    /// Returns true if a hold of `hold` ticks has run out after `elapsed` ticks.
    #[inline]
    pub fn expired(self, elapsed: Ticks, hold: Ticks) -> bool {
        match self {
            HoldPolicy::AtLeast => elapsed >= hold,
            HoldPolicy::Exact => elapsed == hold,
        }
    }
}

/// Schedule validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeError {
    /// No colors provided.
    EmptySchedule,

    /// Colors and hold times have different lengths.
    LengthMismatch {
        /// Number of colors supplied
        colors: usize,
        /// Number of hold times supplied
        timings: usize,
    },

    /// Schedule capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for FadeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FadeError::EmptySchedule => {
                write!(f, "schedule must have at least one color")
            }
            FadeError::LengthMismatch { colors, timings } => {
                write!(
                    f,
                    "schedule has {} colors but {} hold times",
                    colors, timings
                )
            }
            FadeError::CapacityExceeded => {
                write!(f, "schedule capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FadeError {}
