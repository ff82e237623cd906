//! Tunables for every animated element on the page.
//!
//! Defaults reproduce the shipped landing page. A page may override any subset
//! by embedding a JSON block:
//!
//! ```html
//! <script type="application/json" id="landingConfig">
//!   { "typing": { "char_delay_ms": 20.0 }, "debug": true }
//! </script>
//! ```

use serde::Deserialize;

use crate::error::SetupError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub waveform: WaveformConfig,
    pub typing: TypingConfig,
    pub carousel: CarouselConfig,
    /// Raise the console log level to `Debug`.
    pub debug: bool,
}

/// Most waveform layers a page may ask for.
pub const MAX_LAYERS: usize = 8;

impl Config {
    /// Parse and validate a JSON override block.
    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SetupError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or corrupt the animations.
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: &str| Err(SetupError::Config(msg.to_owned()));
        let w = &self.waveform;
        if !(w.sample_step.is_finite() && w.sample_step > 0.0) {
            return invalid("waveform.sample_step must be a positive number");
        }
        if !w.time_step.is_finite() {
            return invalid("waveform.time_step must be finite");
        }
        if w.sparkle_life == 0 {
            return invalid("waveform.sparkle_life must be at least 1");
        }
        if w.layers > MAX_LAYERS {
            return Err(SetupError::Config(format!(
                "waveform.layers must be at most {MAX_LAYERS}"
            )));
        }
        if !(w.spawn_chance.is_finite() && w.peak_threshold.is_finite()) {
            return invalid("waveform spawn settings must be finite");
        }

        let t = &self.typing;
        let delays = [
            t.start_delay_ms,
            t.char_delay_ms,
            t.char_jitter_ms,
            t.erase_factor,
            t.blink_ms,
            t.label_fade_ms,
            t.category_pause_ms,
            t.tagline_hold_ms,
        ];
        if delays.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return invalid("typing delays must be finite and non-negative");
        }
        if t.char_delay_ms <= 0.0 {
            return invalid("typing.char_delay_ms must be positive");
        }

        if self.carousel.interval_ms == 0 {
            return invalid("carousel.interval_ms must be positive");
        }
        if !self.carousel.swipe_threshold_px.is_finite() {
            return invalid("carousel.swipe_threshold_px must be finite");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    /// Stroke and glow colour as `[r, g, b]`.
    pub accent: [u8; 3],
    /// Horizontal distance between samples, in CSS pixels.
    pub sample_step: f64,
    /// Clock increment per rendered frame.
    pub time_step: f64,
    pub layers: usize,
    /// Frames a sparkle lives before it is dropped.
    pub sparkle_life: u32,
    /// Probability that a qualifying peak spawns a sparkle.
    pub spawn_chance: f64,
    /// Minimum peak distance from the centre line, as a fraction of height.
    pub peak_threshold: f64,
    pub center_glow: bool,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            accent: [196, 138, 63],
            sample_step: 1.5,
            time_step: 0.018,
            layers: 3,
            sparkle_life: 60,
            spawn_chance: 0.08,
            peak_threshold: 0.12,
            center_glow: true,
        }
    }
}

/// Timings for the transcript animation, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub start_delay_ms: f64,
    pub char_delay_ms: f64,
    /// Upper bound of the uniform jitter added to every typed character.
    pub char_jitter_ms: f64,
    /// Erase delay as a fraction of `char_delay_ms`.
    pub erase_factor: f64,
    pub blink_ms: f64,
    pub label_fade_ms: f64,
    pub category_pause_ms: f64,
    pub tagline_hold_ms: f64,
    /// Viewports at most this wide show the tagline without typing it.
    pub compact_max_width: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 300.0,
            char_delay_ms: 15.0,
            char_jitter_ms: 8.0,
            erase_factor: 0.6,
            blink_ms: 1600.0,
            label_fade_ms: 200.0,
            category_pause_ms: 1000.0,
            tagline_hold_ms: 1500.0,
            compact_max_width: 768.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u32,
    /// How long the leaving step keeps its `exit` class.
    pub exit_ms: u32,
    /// Minimum horizontal travel for a touch gesture to count as a swipe.
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1500,
            exit_ms: 400,
            swipe_threshold_px: 50.0,
        }
    }
}
