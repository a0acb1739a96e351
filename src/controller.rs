//! Two-way color fade controller.
//!
//! Provides [`FadeController`] which walks a single RGB LED forward through a
//! [`FadeSchedule`], then back again, holding each color for its configured
//! number of ticks. Also defines the [`RgbLed`] trait for hardware abstraction.

use crate::schedule::FadeSchedule;
use crate::types::{FadeError, HoldPolicy, Phase, Ticks};
use palette::Srgb;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.) to allow
/// the controller to drive it.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// convert these to their hardware's native format (e.g., PWM duty cycles,
    /// 8-bit RGB values). Handle any hardware errors internally - this method
    /// cannot fail.
    fn set_color(&mut self, color: Srgb);
}

// Lets a controller borrow an LED owned elsewhere.
impl<L: RgbLed + ?Sized> RgbLed for &mut L {
    #[inline]
    fn set_color(&mut self, color: Srgb) {
        (**self).set_color(color);
    }
}

/// Snapshot of a controller's position in its animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    /// Current phase
    pub phase: Phase,
    /// Index of the color being held
    pub index: usize,
    /// Ticks since the current hold began
    pub elapsed: Ticks,
}

/// Fades one RGB LED forward through a color list, then back, forever.
///
/// Each call to [`update`](Self::update) is one tick. The controller holds
/// `colors[i]` for `timings[i]` ticks, writes the next color, and on reaching
/// either end of the list turns around:
///
/// ```text
/// Start -> Forward (0, 1, .., N-1) -> Reverse (N-1, .., 0) -> Start -> ...
/// ```
///
/// The controller never reads the LED back and never allocates. It does not
/// own a clock either; the caller's loop cadence defines how long a tick is.
///
/// # Type Parameters
/// * `'a` - Lifetime of the borrowed color and hold-time slices
/// * `L` - LED implementation type (owned, or `&mut` to a caller-owned LED)
pub struct FadeController<'a, L: RgbLed> {
    led: L,
    schedule: FadeSchedule<'a>,
    policy: HoldPolicy,
    phase: Phase,
    index: usize,
    elapsed: Ticks,
    current_color: Option<Srgb>,
}

impl<'a, L: RgbLed> FadeController<'a, L> {
    /// Creates a controller in the `Start` phase. The LED is not touched until
    /// the first [`update`](Self::update).
    ///
    /// # Errors
    /// * `EmptySchedule` - `colors` is empty
    /// * `LengthMismatch` - `colors` and `timings` differ in length
    pub fn new(led: L, colors: &'a [Srgb], timings: &'a [Ticks]) -> Result<Self, FadeError> {
        let schedule = FadeSchedule::new(colors, timings)?;
        Ok(Self::from_schedule(led, schedule))
    }

    /// Creates a controller from an already validated schedule.
    pub fn from_schedule(led: L, schedule: FadeSchedule<'a>) -> Self {
        Self {
            led,
            schedule,
            policy: HoldPolicy::default(),
            phase: Phase::Start,
            index: 0,
            elapsed: 0,
            current_color: None,
        }
    }

    /// Selects how hold times are compared. Default is [`HoldPolicy::AtLeast`].
    pub fn with_policy(mut self, policy: HoldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Advances the animation by one tick, writing the LED when the color changes.
    pub fn update(&mut self) {
        match self.phase {
            Phase::Start => {
                self.set_phase(Phase::Forward);
                self.index = 0;
                self.write_color(0);
            }
            Phase::Forward => {
                if self.hold_expired() {
                    self.elapsed = 0;
                    self.index += 1;

                    if self.index < self.schedule.len() {
                        self.write_color(self.index);
                    } else {
                        // Turn around on the last color; it gets held again on the way back.
                        self.index = self.schedule.len() - 1;
                        self.set_phase(Phase::Reverse);
                    }
                }
            }
            Phase::Reverse => {
                if self.hold_expired() {
                    self.elapsed = 0;

                    match self.index.checked_sub(1) {
                        Some(previous) => {
                            self.index = previous;
                            self.write_color(previous);
                        }
                        None => self.set_phase(Phase::Start),
                    }
                }
            }
        }

        self.elapsed = self.elapsed.saturating_add(1);
    }

    /// Calls [`update`](Self::update) `ticks` times.
    pub fn advance(&mut self, ticks: Ticks) {
        for _ in 0..ticks {
            self.update();
        }
    }

    /// Restarts the animation. The next tick writes the first color again.
    pub fn reset(&mut self) {
        self.set_phase(Phase::Start);
        self.index = 0;
        self.elapsed = 0;
    }

    fn hold_expired(&self) -> bool {
        self.schedule
            .hold(self.index)
            .is_some_and(|hold| self.policy.expired(self.elapsed, hold))
    }

    fn write_color(&mut self, index: usize) {
        if let Some(color) = self.schedule.color(index) {
            #[cfg(feature = "defmt")]
            defmt::trace!("color {} -> ({}, {}, {})", index, color.red, color.green, color.blue);

            self.led.set_color(color);
            self.current_color = Some(color);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        #[cfg(feature = "defmt")]
        defmt::debug!("fade phase {} -> {}", self.phase, phase);

        self.phase = phase;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the index of the color currently being held.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the ticks counted since the current hold began.
    pub fn elapsed(&self) -> Ticks {
        self.elapsed
    }

    /// Returns a snapshot of phase, index and elapsed ticks.
    pub fn state(&self) -> ControllerState {
        ControllerState {
            phase: self.phase,
            index: self.index,
            elapsed: self.elapsed,
        }
    }

    /// Returns the hold comparison in use.
    pub fn policy(&self) -> HoldPolicy {
        self.policy
    }

    /// Returns the schedule this controller walks through.
    pub fn schedule(&self) -> FadeSchedule<'a> {
        self.schedule
    }

    /// Returns the last color written to the LED, or `None` before the first write.
    pub fn current_color(&self) -> Option<Srgb> {
        self.current_color
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns a mutable reference to the LED.
    pub fn led_mut(&mut self) -> &mut L {
        &mut self.led
    }

    /// Consumes the controller and hands back the LED.
    pub fn into_led(self) -> L {
        self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    // Mock LED that records color changes
    struct MockLed {
        color_history: Vec<Srgb, 64>,
    }

    impl MockLed {
        fn new() -> Self {
            Self {
                color_history: Vec::new(),
            }
        }

        fn last(&self) -> Option<Srgb> {
            self.color_history.last().copied()
        }
    }

    impl RgbLed for MockLed {
        fn set_color(&mut self, color: Srgb) {
            let _ = self.color_history.push(color);
        }
    }

    const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
    const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
    const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);

    #[test]
    fn construction_does_not_touch_led() {
        let colors = [RED, GREEN];
        let timings = [2, 3];
        let controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        assert_eq!(controller.phase(), Phase::Start);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.elapsed(), 0);
        assert!(controller.led().color_history.is_empty());
        assert_eq!(controller.current_color(), None);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let colors = [RED, GREEN];
        let timings = [2];
        let result = FadeController::new(MockLed::new(), &colors, &timings);

        assert!(matches!(
            result,
            Err(FadeError::LengthMismatch {
                colors: 2,
                timings: 1
            })
        ));
    }

    #[test]
    fn empty_colors_are_rejected() {
        let result = FadeController::new(MockLed::new(), &[], &[]);
        assert!(matches!(result, Err(FadeError::EmptySchedule)));
    }

    #[test]
    fn first_update_writes_first_color() {
        let colors = [RED, GREEN];
        let timings = [2, 3];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        controller.update();

        assert_eq!(controller.phase(), Phase::Forward);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.elapsed(), 1);
        assert_eq!(controller.led().last(), Some(RED));
    }

    #[test]
    fn forward_holds_each_color_for_its_timing() {
        let colors = [RED, GREEN];
        let timings = [2, 3];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        // RED after ticks 1 and 2
        controller.update();
        controller.update();
        assert_eq!(controller.led().last(), Some(RED));

        // GREEN from tick 3 through tick 5
        controller.update();
        assert_eq!(controller.led().last(), Some(GREEN));
        controller.update();
        controller.update();
        assert_eq!(controller.phase(), Phase::Forward);
        assert_eq!(controller.led().last(), Some(GREEN));

        // Tick 6 turns around without writing
        controller.update();
        assert_eq!(controller.phase(), Phase::Reverse);
        assert_eq!(controller.index(), 1);
        assert_eq!(controller.led().color_history.len(), 2);
    }

    #[test]
    fn reverse_walks_back_and_restarts() {
        let colors = [RED, GREEN, BLUE];
        let timings = [1, 1, 1];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        // One full cycle is 2 * 3 + 1 ticks, then the restart tick writes RED again.
        controller.advance(8);

        assert_eq!(
            controller.led().color_history.as_slice(),
            &[RED, GREEN, BLUE, GREEN, RED, RED]
        );
        assert_eq!(controller.phase(), Phase::Forward);
    }

    #[test]
    fn single_color_only_ever_writes_that_color() {
        let colors = [BLUE];
        let timings = [1];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        controller.advance(30);

        assert!(!controller.led().color_history.is_empty());
        assert!(controller.led().color_history.iter().all(|&c| c == BLUE));
    }

    #[test]
    fn exact_policy_stalls_on_zero_hold() {
        let colors = [RED, GREEN];
        let timings = [0, 1];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings)
            .unwrap()
            .with_policy(HoldPolicy::Exact);

        controller.advance(20);

        assert_eq!(controller.phase(), Phase::Forward);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.led().color_history.as_slice(), &[RED]);
    }

    #[test]
    fn at_least_policy_skips_zero_hold_after_one_tick() {
        let colors = [RED, GREEN];
        let timings = [0, 1];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        controller.update();
        assert_eq!(controller.led().last(), Some(RED));
        controller.update();
        assert_eq!(controller.led().last(), Some(GREEN));
    }

    #[test]
    fn reset_returns_to_start() {
        let colors = [RED, GREEN, BLUE];
        let timings = [1, 1, 1];
        let mut controller = FadeController::new(MockLed::new(), &colors, &timings).unwrap();

        controller.advance(3);
        assert_eq!(controller.current_color(), Some(BLUE));

        controller.reset();
        assert_eq!(controller.phase(), Phase::Start);
        assert_eq!(controller.elapsed(), 0);

        controller.update();
        assert_eq!(controller.current_color(), Some(RED));
        assert_eq!(controller.index(), 0);
    }

    #[test]
    fn controller_can_borrow_led() {
        let mut led = MockLed::new();
        let colors = [RED, GREEN];
        let timings = [1, 1];

        {
            let mut controller = FadeController::new(&mut led, &colors, &timings).unwrap();
            controller.advance(2);
        }

        assert_eq!(led.color_history.as_slice(), &[RED, GREEN]);
    }
}
