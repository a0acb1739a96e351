//! Output-side helpers: brightness levels, power switching and PWM duty conversion.
//!
//! [`DimmableLed`] sits between a [`FadeController`](crate::FadeController) and
//! the real LED. The controller keeps writing full-scale colors; the wrapper
//! scales them to the selected [`BrightnessLevel`] and swallows them while
//! the output is switched off.

use crate::COLOR_OFF;
use crate::controller::RgbLed;
use palette::Srgb;

/// Largest duty value of a 12-bit PWM channel.
pub const PWM_MAX: u16 = 4095;

/// Three brightness steps, cycled by a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl BrightnessLevel {
    /// Returns the level after this one, wrapping from `Low` back to `High`.
    pub fn next(self) -> Self {
        match self {
            BrightnessLevel::High => BrightnessLevel::Medium,
            BrightnessLevel::Medium => BrightnessLevel::Low,
            BrightnessLevel::Low => BrightnessLevel::High,
        }
    }

    /// Returns the factor applied to every color channel.
    pub fn scale(self) -> f32 {
        let duty: u16 = match self {
            BrightnessLevel::High => 4000,
            BrightnessLevel::Medium => 2000,
            BrightnessLevel::Low => 800,
        };
        duty as f32 / PWM_MAX as f32
    }

    /// Scales `color` to this level.
    pub fn apply(self, color: Srgb) -> Srgb {
        let scale = self.scale();
        Srgb::new(color.red * scale, color.green * scale, color.blue * scale)
    }
}

/// An LED wrapper that adds an on/off switch and brightness levels.
///
/// The most recent requested color is remembered, so switching back on or
/// changing brightness shows it again without waiting for the next write.
pub struct DimmableLed<L: RgbLed> {
    inner: L,
    on: bool,
    brightness: BrightnessLevel,
    requested: Srgb,
}

impl<L: RgbLed> DimmableLed<L> {
    /// Wraps `inner`, switched on at [`BrightnessLevel::Medium`].
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            on: true,
            brightness: BrightnessLevel::default(),
            requested: COLOR_OFF,
        }
    }

    /// Sets the starting brightness.
    pub fn with_brightness(mut self, level: BrightnessLevel) -> Self {
        self.brightness = level;
        self
    }

    /// Flips the power state and returns the new one.
    pub fn toggle_power(&mut self) -> bool {
        self.set_power(!self.on);
        self.on
    }

    /// Switches the output on or off.
    ///
    /// Off writes black to the LED. On re-emits the last requested color.
    pub fn set_power(&mut self, on: bool) {
        if self.on == on {
            return;
        }

        self.on = on;

        #[cfg(feature = "defmt")]
        defmt::info!("led output {}", if on { "on" } else { "off" });

        if on {
            self.refresh();
        } else {
            self.inner.set_color(COLOR_OFF);
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Steps to the next brightness level and returns it.
    pub fn cycle_brightness(&mut self) -> BrightnessLevel {
        self.set_brightness(self.brightness.next());
        self.brightness
    }

    pub fn set_brightness(&mut self, level: BrightnessLevel) {
        self.brightness = level;

        #[cfg(feature = "defmt")]
        defmt::info!("brightness {}", level);

        if self.on {
            self.refresh();
        }
    }

    pub fn brightness(&self) -> BrightnessLevel {
        self.brightness
    }

    /// Returns the last color written to this wrapper, before scaling.
    pub fn requested_color(&self) -> Srgb {
        self.requested
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }

    fn refresh(&mut self) {
        self.inner.set_color(self.brightness.apply(self.requested));
    }
}

impl<L: RgbLed> RgbLed for DimmableLed<L> {
    fn set_color(&mut self, color: Srgb) {
        self.requested = color;
        if self.on {
            self.refresh();
        }
    }
}

/// Duty setting for one 12-bit PWM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmDuty {
    /// Channel driven at this duty, out of [`PWM_MAX`].
    On(u16),

    /// Channel fully off (the controller's dedicated full-off bit).
    FullOff,
}

/// Converts a 0.0-1.0 channel value to a 12-bit duty.
///
/// Zero (after clamping) is [`PwmDuty::FullOff`]. Common-anode LEDs light when
/// the pin is low, so their duty is inverted.
pub fn channel_duty(value: f32, common_anode: bool) -> PwmDuty {
    let duty = (value.clamp(0.0, 1.0) * PWM_MAX as f32) as u16;

    if duty == 0 {
        return PwmDuty::FullOff;
    }

    if common_anode {
        PwmDuty::On(PWM_MAX - duty)
    } else {
        PwmDuty::On(duty)
    }
}
