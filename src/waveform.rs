//! Per-frame waveform renderer.
//!
//! [`Waveform::frame`] draws everything for one animation frame onto any
//! [`Surface`]. The browser implementation wraps a `CanvasRenderingContext2d`;
//! tests record the calls instead.

use crate::config::WaveformConfig;
use crate::signal;
use crate::sparkle::ParticleSystem;

/// Straight RGB colour with a separate alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(rgb: [u8; 3], a: f64) -> Self {
        Self { r: rgb[0], g: rgb[1], b: rgb[2], a }
    }

    /// CSS `rgba(..)` string for canvas style properties.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// The drawing primitives a frame needs.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);

    /// Stroke one open polyline through `points`.
    fn stroke_path(&mut self, points: &[(f64, f64)], color: Rgba, line_width: f64);

    /// Filled disc with a radial gradient from `color` at the centre to fully
    /// transparent at `radius`.
    fn radial_glow(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);

    /// Four-pointed sparkle glyph.
    fn draw_star(&mut self, x: f64, y: f64, size: f64, alpha: f64);
}

/// Stroke style of one waveform layer at the given energy.
pub fn layer_style(layer: usize, energy: f64) -> (f64, f64) {
    let l = layer as f64;
    let alpha = (0.5 - l * 0.13) * energy;
    let width = 2.0 - l * 0.5;
    (alpha, width)
}

pub struct Waveform {
    cfg: WaveformConfig,
    t: f64,
    particles: ParticleSystem,
    points: Vec<(f64, f64)>,
}

impl Waveform {
    pub fn new(cfg: WaveformConfig, particles: ParticleSystem) -> Self {
        Self {
            cfg,
            t: 0.0,
            particles,
            points: Vec::new(),
        }
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    /// Render one frame of `width` x `height` CSS pixels and advance the clock.
    ///
    /// A collapsed surface draws nothing, but sparkles still age.
    pub fn frame<S: Surface>(&mut self, surface: &mut S, width: f64, height: f64) {
        let visible = width > 0.0 && height > 0.0;
        if visible {
            self.draw_waves(surface, width, height);
        }
        self.particles.tick();
        if visible {
            self.particles
                .render(|x, y, size, alpha| surface.draw_star(x, y, size, alpha));
        }
        self.t += self.cfg.time_step;
    }

    fn draw_waves<S: Surface>(&mut self, surface: &mut S, w: f64, h: f64) {
        let cy = h / 2.0;
        let energy = signal::energy(self.t);
        surface.clear(w, h);

        for layer in 0..self.cfg.layers {
            self.sample_layer(layer, w, h, cy, energy);
            let (alpha, line_width) = layer_style(layer, energy);
            surface.stroke_path(&self.points, Rgba::new(self.cfg.accent, alpha), line_width);
        }

        if self.cfg.center_glow {
            let glow = 2.0 + energy * 3.0;
            let color = Rgba::new(self.cfg.accent, 0.3 * energy);
            surface.radial_glow(w / 2.0, cy, glow * 4.0, color);
        }
    }

    /// Fill `self.points` with one layer's samples; layer 0 also feeds the
    /// sparkle spawner.
    fn sample_layer(&mut self, layer: usize, w: f64, h: f64, cy: f64, energy: f64) {
        self.points.clear();
        let step = self.cfg.sample_step;
        let mut x = 0.0;
        while x <= w {
            let y = signal::displacement(x, w, h, cy, energy, self.t, layer as f64);
            if layer == 0 {
                if let [.., pp, p] = self.points.as_slice() {
                    self.particles.maybe_spawn(pp.1, *p, y, cy, h);
                }
            }
            self.points.push((x, y));
            x += step;
        }
    }
}
