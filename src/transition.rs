//! Switchable full-LED transition animations.
//!
//! Alongside the two-way [`FadeController`](crate::FadeController), the crate
//! ships three continuous animations that a mode button steps through:
//!
//! - [`Dissolve`]: eases through white into the next palette color, then holds it
//! - [`Rainbow`]: rotates the hue a few degrees per tick
//! - [`Breathing`]: swells one palette color up and down, then moves to the next
//!
//! Like the fade, every animation is tick driven: each call produces exactly one
//! color. [`TransitionPlayer`] owns the LED, the current [`TransitionMode`] and
//! the state of all three animations.

use crate::WHITE;
use crate::colors::{self, BASE_PALETTE, GAMMA};
use crate::controller::RgbLed;
use core::f32::consts::PI;
use palette::Srgb;

/// Ticks in one fade ramp (inclusive of both ends, so a ramp is `FADE_STEPS + 1` frames).
pub const FADE_STEPS: u32 = 100;

/// Ticks a dissolved-in color is held before the next dissolve starts.
pub const DISSOLVE_HOLD_STEPS: u32 = 50;

/// Degrees the rainbow hue moves per tick.
pub const RAINBOW_HUE_STEP: f32 = 3.0;

/// Lowest brightness reached while breathing.
pub const BREATHING_FLOOR: f32 = 0.1;

/// Ticks spent at the bottom of a breath before switching color.
pub const BREATHING_PAUSE_STEPS: u32 = 8;

/// Which animation a [`TransitionPlayer`] is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionMode {
    #[default]
    Dissolve,
    Rainbow,
    Breathing,
}

impl TransitionMode {
    /// Returns the mode after this one, wrapping from `Breathing` back to `Dissolve`.
    pub fn next(self) -> Self {
        match self {
            TransitionMode::Dissolve => TransitionMode::Rainbow,
            TransitionMode::Rainbow => TransitionMode::Breathing,
            TransitionMode::Breathing => TransitionMode::Dissolve,
        }
    }
}

/// A tick-driven color generator.
pub trait Animation {
    /// Returns the color for this tick and advances one step.
    fn next_color(&mut self) -> Srgb;

    /// Starts the current cycle over. State that carries across mode switches
    /// (the rainbow's hue, the breathing color) is kept.
    fn restart(&mut self);
}

/// Steps `step` toward `last`. Returns true once the frame at `last` has been produced.
fn step_ramp(step: &mut u32, last: u32) -> bool {
    if *step >= last {
        return true;
    }
    *step += 1;
    false
}

fn ramp_progress(step: u32) -> f32 {
    step as f32 / FADE_STEPS as f32
}

fn scale(color: Srgb, level: f32) -> Srgb {
    Srgb::new(color.red * level, color.green * level, color.blue * level)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DissolveStage {
    Intro,
    ToWhite,
    ToColor,
    Hold,
}

/// Eases from the current palette color up to white and down into the next one.
///
/// The first cycle dissolves in from white; after that every cycle is
/// color → white → next color → hold.
#[derive(Debug, Clone)]
pub struct Dissolve {
    color_idx: usize,
    stage: DissolveStage,
    step: u32,
}

impl Dissolve {
    pub fn new() -> Self {
        Self {
            color_idx: 0,
            stage: DissolveStage::Intro,
            step: 0,
        }
    }

    /// Returns the palette index of the color being dissolved into or held.
    pub fn color_index(&self) -> usize {
        self.color_idx
    }

    fn color(&self) -> Srgb {
        BASE_PALETTE[self.color_idx % BASE_PALETTE.len()]
    }
}

impl Default for Dissolve {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Dissolve {
    fn next_color(&mut self) -> Srgb {
        let progress = ramp_progress(self.step);

        match self.stage {
            DissolveStage::Intro => {
                let color = colors::ease_in_out(WHITE, self.color(), progress);
                if step_ramp(&mut self.step, FADE_STEPS) {
                    self.stage = DissolveStage::ToWhite;
                    self.step = 0;
                }
                color
            }
            DissolveStage::ToWhite => {
                let color = colors::ease_in_out(self.color(), WHITE, progress);
                if step_ramp(&mut self.step, FADE_STEPS) {
                    self.color_idx = (self.color_idx + 1) % BASE_PALETTE.len();
                    self.stage = DissolveStage::ToColor;
                    self.step = 0;
                }
                color
            }
            DissolveStage::ToColor => {
                let color = colors::ease_in_out(WHITE, self.color(), progress);
                if step_ramp(&mut self.step, FADE_STEPS) {
                    self.stage = DissolveStage::Hold;
                    self.step = 0;
                }
                color
            }
            DissolveStage::Hold => {
                let color = self.color();
                self.step += 1;
                if self.step >= DISSOLVE_HOLD_STEPS {
                    self.stage = DissolveStage::ToWhite;
                    self.step = 0;
                }
                color
            }
        }
    }

    fn restart(&mut self) {
        *self = Self::new();
    }
}

/// Walks the hue wheel at full saturation and value.
#[derive(Debug, Clone, Default)]
pub struct Rainbow {
    hue: f32,
}

impl Rainbow {
    pub fn new() -> Self {
        Self { hue: 0.0 }
    }

    /// Returns the hue (degrees) the next tick will show.
    pub fn hue(&self) -> f32 {
        self.hue
    }
}

impl Animation for Rainbow {
    fn next_color(&mut self) -> Srgb {
        let color = colors::hue(self.hue);

        self.hue += RAINBOW_HUE_STEP;
        if self.hue >= 360.0 {
            self.hue -= 360.0;
        }

        color
    }

    fn restart(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreathStage {
    Rise,
    Fall,
    Pause,
}

/// Swells a palette color from dim to full and back, then moves to the next color.
///
/// Brightness follows a raised cosine between [`BREATHING_FLOOR`] and 1.0. The
/// rising half is gamma corrected; the falling half is linear, so the color
/// lingers near full brightness before it drops.
#[derive(Debug, Clone)]
pub struct Breathing {
    color_idx: usize,
    stage: BreathStage,
    step: u32,
}

impl Breathing {
    pub fn new() -> Self {
        Self {
            color_idx: 0,
            stage: BreathStage::Rise,
            step: 0,
        }
    }

    /// Returns the palette index of the color currently breathing.
    pub fn color_index(&self) -> usize {
        self.color_idx
    }

    /// Brightness at `step` of a ramp, from [`BREATHING_FLOOR`] at 0 to 1.0 at [`FADE_STEPS`].
    pub fn level(step: u32) -> f32 {
        let wave = 0.5 - 0.5 * libm::cosf(PI * ramp_progress(step));
        BREATHING_FLOOR + (1.0 - BREATHING_FLOOR) * wave
    }

    fn color(&self) -> Srgb {
        BASE_PALETTE[self.color_idx % BASE_PALETTE.len()]
    }
}

impl Default for Breathing {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Breathing {
    fn next_color(&mut self) -> Srgb {
        let base = self.color();

        match self.stage {
            BreathStage::Rise => {
                let color = colors::gamma_correct(scale(base, Self::level(self.step)), GAMMA);
                if step_ramp(&mut self.step, FADE_STEPS) {
                    self.stage = BreathStage::Fall;
                }
                color
            }
            BreathStage::Fall => {
                let color = scale(base, Self::level(self.step));
                if self.step == 0 {
                    self.stage = BreathStage::Pause;
                } else {
                    self.step -= 1;
                }
                color
            }
            BreathStage::Pause => {
                let color = scale(base, BREATHING_FLOOR);
                self.step += 1;
                if self.step >= BREATHING_PAUSE_STEPS {
                    self.color_idx = (self.color_idx + 1) % BASE_PALETTE.len();
                    self.stage = BreathStage::Rise;
                    self.step = 0;
                }
                color
            }
        }
    }

    fn restart(&mut self) {
        self.stage = BreathStage::Rise;
        self.step = 0;
    }
}

/// Runs one of the three transition animations on an LED.
///
/// Every [`update`](Self::update) writes one color. Switching modes restarts
/// the newly selected animation.
pub struct TransitionPlayer<L: RgbLed> {
    led: L,
    mode: TransitionMode,
    dissolve: Dissolve,
    rainbow: Rainbow,
    breathing: Breathing,
}

impl<L: RgbLed> TransitionPlayer<L> {
    /// Creates a player in [`TransitionMode::Dissolve`]. The LED is not touched
    /// until the first update.
    pub fn new(led: L) -> Self {
        Self {
            led,
            mode: TransitionMode::default(),
            dissolve: Dissolve::new(),
            rainbow: Rainbow::new(),
            breathing: Breathing::new(),
        }
    }

    /// Sets the starting mode.
    pub fn with_mode(mut self, mode: TransitionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Advances the active animation by one tick and writes its color.
    pub fn update(&mut self) {
        let color = self.animation_mut().next_color();
        self.led.set_color(color);
    }

    /// Switches to `mode` and restarts it.
    pub fn set_mode(&mut self, mode: TransitionMode) {
        #[cfg(feature = "defmt")]
        defmt::info!("transition mode {} -> {}", self.mode, mode);

        self.mode = mode;
        self.animation_mut().restart();
    }

    /// Steps to the next mode and returns it.
    pub fn next_mode(&mut self) -> TransitionMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Returns the active mode.
    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns a mutable reference to the LED.
    pub fn led_mut(&mut self) -> &mut L {
        &mut self.led
    }

    /// Consumes the player and hands back the LED.
    pub fn into_led(self) -> L {
        self.led
    }

    fn animation_mut(&mut self) -> &mut dyn Animation {
        match self.mode {
            TransitionMode::Dissolve => &mut self.dissolve,
            TransitionMode::Rainbow => &mut self.rainbow,
            TransitionMode::Breathing => &mut self.breathing,
        }
    }
}
