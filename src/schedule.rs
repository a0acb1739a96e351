use crate::types::{FadeError, Ticks};
use heapless::Vec;
use palette::Srgb;

/// The colors a fade walks through and how long each one is held.
///
/// Both slices are borrowed; a schedule is only a validated view over them.
/// `colors[i]` is held for `timings[i]` ticks.
///
/// # Invariants
/// * at least one color
/// * `colors.len() == timings.len()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSchedule<'a> {
    colors: &'a [Srgb],
    timings: &'a [Ticks],
}

impl<'a> FadeSchedule<'a> {
    /// Validates and wraps a color list and its hold times.
    ///
    /// # Errors
    /// * `EmptySchedule` - `colors` is empty
    /// * `LengthMismatch` - the slices have different lengths
    pub fn new(colors: &'a [Srgb], timings: &'a [Ticks]) -> Result<Self, FadeError> {
        if colors.is_empty() {
            return Err(FadeError::EmptySchedule);
        }

        if colors.len() != timings.len() {
            return Err(FadeError::LengthMismatch {
                colors: colors.len(),
                timings: timings.len(),
            });
        }

        Ok(Self { colors, timings })
    }

    /// Returns the number of colors. Never zero.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &'a [Srgb] {
        self.colors
    }

    pub fn timings(&self) -> &'a [Ticks] {
        self.timings
    }

    /// Returns the color at `index`, if in range.
    #[inline]
    pub fn color(&self, index: usize) -> Option<Srgb> {
        self.colors.get(index).copied()
    }

    /// Returns the hold time at `index`, if in range.
    #[inline]
    pub fn hold(&self, index: usize) -> Option<Ticks> {
        self.timings.get(index).copied()
    }

    /// Number of ticks in one full forward-and-back cycle with [`HoldPolicy::AtLeast`].
    ///
    /// Every color is held for `max(hold, 1)` ticks on the way out and again on the
    /// way back, plus one tick for the restart. Saturates at `Ticks::MAX`.
    ///
    /// [`HoldPolicy::AtLeast`]: crate::HoldPolicy::AtLeast
    pub fn cycle_ticks(&self) -> Ticks {
        let one_way = self
            .timings
            .iter()
            .fold(0 as Ticks, |acc, &hold| acc.saturating_add(hold.max(1)));

        one_way.saturating_mul(2).saturating_add(1)
    }
}

/// A schedule that owns its storage, for colors computed at run time.
///
/// # Type Parameters
/// * `N` - Maximum number of colors
#[derive(Debug, Clone)]
pub struct OwnedSchedule<const N: usize> {
    colors: Vec<Srgb, N>,
    timings: Vec<Ticks, N>,
}

impl<const N: usize> OwnedSchedule<N> {
    /// Creates a new schedule builder.
    pub fn builder() -> ScheduleBuilder<N> {
        ScheduleBuilder::new()
    }

    /// Lends the stored colors as a [`FadeSchedule`].
    pub fn as_schedule(&self) -> FadeSchedule<'_> {
        // Only the builder creates these, and it rejects empty input.
        FadeSchedule {
            colors: &self.colors,
            timings: &self.timings,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Builder for [`OwnedSchedule`].
#[derive(Debug)]
pub struct ScheduleBuilder<const N: usize> {
    colors: Vec<Srgb, N>,
    timings: Vec<Ticks, N>,
}

impl<const N: usize> ScheduleBuilder<N> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            timings: Vec::new(),
        }
    }

    /// Appends a color held for `ticks` ticks.
    ///
    /// # Errors
    /// * `CapacityExceeded` - the builder already holds `N` colors
    pub fn hold(mut self, color: Srgb, ticks: Ticks) -> Result<Self, FadeError> {
        if self.colors.is_full() {
            return Err(FadeError::CapacityExceeded);
        }

        self.colors
            .push(color)
            .map_err(|_| FadeError::CapacityExceeded)?;
        self.timings
            .push(ticks)
            .map_err(|_| FadeError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds the schedule.
    ///
    /// # Errors
    /// * `EmptySchedule` - no colors were added
    pub fn build(self) -> Result<OwnedSchedule<N>, FadeError> {
        if self.colors.is_empty() {
            return Err(FadeError::EmptySchedule);
        }

        Ok(OwnedSchedule {
            colors: self.colors,
            timings: self.timings,
        })
    }
}

impl<const N: usize> Default for ScheduleBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
