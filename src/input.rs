//! Button input: debouncing and the events a button press maps to.

use crate::controller::{FadeController, RgbLed};
use crate::output::DimmableLed;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::transition::TransitionPlayer;

/// Debounce window used by most mechanical push buttons.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// What a (debounced) button press asks the animation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    /// Step to the next transition mode.
    NextMode,
    /// Switch the LED output off or back on.
    TogglePower,
    /// Step to the next brightness level.
    CycleBrightness,
}

/// Drops presses that arrive too soon after the last accepted one.
///
/// Call [`accept`](Self::accept) from wherever the press is noticed (an
/// interrupt flag, a polled pin). Only accepted presses should be turned into
/// a [`ControlEvent`].
#[derive(Debug, Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    window: I::Duration,
    last_accepted: Option<I>,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer that accepts at most one press per `window`.
    pub fn new(window: I::Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Creates a debouncer with the [`DEFAULT_DEBOUNCE_MS`] window.
    pub fn with_default_window() -> Self {
        Self::new(I::Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Returns true if a press at `now` should be acted on.
    ///
    /// The first press is always accepted, even one arriving within `window`
    /// of power-up; boot time is not treated as a press. Later ones need
    /// strictly more than the window since the last accepted press.
    pub fn accept(&mut self, now: I) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(last) => now.duration_since(last).as_millis() > self.window.as_millis(),
        };

        if accepted {
            self.last_accepted = Some(now);
        }

        accepted
    }

    /// Same as [`accept`](Self::accept), reading the time from `source`.
    pub fn poll<T: TimeSource<I>>(&mut self, source: &T) -> bool {
        self.accept(source.now())
    }

    /// Forgets the last accepted press.
    pub fn clear(&mut self) {
        self.last_accepted = None;
    }
}

impl<'a, L: RgbLed> FadeController<'a, DimmableLed<L>> {
    /// Applies a button event to the controller and its dimmable output.
    ///
    /// A fade controller runs a single animation, so `NextMode` restarts it
    /// from the first color.
    pub fn handle_event(&mut self, event: ControlEvent) {
        #[cfg(feature = "defmt")]
        defmt::debug!("control event {}", event);

        match event {
            ControlEvent::NextMode => self.reset(),
            ControlEvent::TogglePower => {
                self.led_mut().toggle_power();
            }
            ControlEvent::CycleBrightness => {
                self.led_mut().cycle_brightness();
            }
        }
    }
}

impl<L: RgbLed> TransitionPlayer<DimmableLed<L>> {
    /// Applies a button event to the player and its dimmable output.
    pub fn handle_event(&mut self, event: ControlEvent) {
        #[cfg(feature = "defmt")]
        defmt::debug!("control event {}", event);

        match event {
            ControlEvent::NextMode => {
                self.next_mode();
            }
            ControlEvent::TogglePower => {
                self.led_mut().toggle_power();
            }
            ControlEvent::CycleBrightness => {
                self.led_mut().cycle_brightness();
            }
        }
    }
}
