//! Short-lived sparkles that pop up on the tallest waveform peaks.

use std::f64::consts::PI;

use fastrand::Rng;

use crate::config::WaveformConfig;

/// Fraction of a sparkle's life spent fading in.
const FADE_IN: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    pub x: f64,
    pub y: f64,
    /// Frames elapsed since spawn.
    pub age: u32,
    pub size: f64,
}

impl Sparkle {
    /// Position in the lifetime, `0.0` at spawn and `1.0` at `max_age`.
    pub fn progress(&self, max_age: u32) -> f64 {
        self.age as f64 / max_age as f64
    }

    /// Linear fade in over the first 20% of life, then linear fade out.
    pub fn alpha(&self, max_age: u32) -> f64 {
        let p = self.progress(max_age);
        if p < FADE_IN {
            p / FADE_IN
        } else {
            1.0 - (p - FADE_IN) / (1.0 - FADE_IN)
        }
    }

    /// Drawn size, swelling to 1.2x mid-life.
    pub fn pulse_size(&self, max_age: u32) -> f64 {
        self.size * (0.8 + 0.4 * (self.progress(max_age) * PI).sin())
    }
}

/// True when `mid` is a strict local minimum or maximum of the three samples.
pub fn is_peak(before: f64, mid: f64, after: f64) -> bool {
    (mid < before && mid < after) || (mid > before && mid > after)
}

pub struct ParticleSystem {
    sparkles: Vec<Sparkle>,
    rng: Rng,
    max_age: u32,
    spawn_chance: f64,
    peak_threshold: f64,
}

impl ParticleSystem {
    pub fn new(cfg: &WaveformConfig, rng: Rng) -> Self {
        Self {
            sparkles: Vec::new(),
            rng,
            max_age: cfg.sparkle_life,
            spawn_chance: cfg.spawn_chance,
            peak_threshold: cfg.peak_threshold,
        }
    }

    /// Convenience for tests and headless use.
    pub fn with_seed(cfg: &WaveformConfig, seed: u64) -> Self {
        Self::new(cfg, Rng::with_seed(seed))
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Inspect the middle sample of a triple and maybe spawn a sparkle there.
    ///
    /// The random draw is only consumed for peaks far enough from the centre
    /// line, so a seeded generator gives reproducible spawn sequences.
    /// Returns whether a sparkle was added.
    pub fn maybe_spawn(
        &mut self,
        prev_prev_y: f64,
        prev: (f64, f64),
        current_y: f64,
        center_y: f64,
        height: f64,
    ) -> bool {
        let (px, py) = prev;
        let far_enough = (py - center_y).abs() > height * self.peak_threshold;
        if is_peak(prev_prev_y, py, current_y) && far_enough && self.rng.f64() < self.spawn_chance {
            let size = 2.0 + self.rng.f64() * 2.0;
            self.push(Sparkle { x: px, y: py, age: 0, size });
            return true;
        }
        false
    }

    pub fn push(&mut self, sparkle: Sparkle) {
        self.sparkles.push(sparkle);
    }

    /// Age every sparkle by one frame and drop the expired ones.
    pub fn tick(&mut self) {
        let max_age = self.max_age;
        self.sparkles.retain_mut(|s| {
            s.age += 1;
            s.age <= max_age
        });
    }

    /// Hand every live sparkle to `draw_star(x, y, size, alpha)`, newest first.
    pub fn render(&self, mut draw_star: impl FnMut(f64, f64, f64, f64)) {
        for s in self.sparkles.iter().rev() {
            draw_star(s.x, s.y, s.pulse_size(self.max_age), s.alpha(self.max_age));
        }
    }
}
