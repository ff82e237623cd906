//! Waveform signal field.
//!
//! Maps a horizontal position and the frame clock to a vertical displacement.
//! Three sine terms travel at different speeds inside a `sin(pi * x / w)`
//! envelope, so every layer is pinned to the centre line at both edges.

use std::f64::consts::PI;

/// Fraction of the canvas height reached by the envelope at full energy.
pub const AMPLITUDE_FRACTION: f64 = 0.38;

/// `(weight, spatial frequency, temporal speed, phase scale)` per sine term.
const TERMS: [(f64, f64, f64, f64); 3] = [
    (0.55, 0.035, 3.2, 1.8),
    (0.30, 0.065, 4.8, 0.9),
    (0.15, 0.12, 2.1, 3.2),
];

/// Slow amplitude modulation imitating speech intensity. Always in `[0.1, 1.0]`.
pub fn energy(t: f64) -> f64 {
    0.55 + 0.45 * (t * 1.8).sin() * (t * 0.7).sin()
}

/// Envelope value at `x`; zero at `0` and `width`, one at the centre.
pub fn envelope(x: f64, width: f64) -> f64 {
    (x / width * PI).sin()
}

/// Vertical position of the waveform at `x`.
///
/// `layer_phase` is the layer index as a float; each sine term scales it by
/// its own factor, so layer 0 has no phase shift at all.
pub fn displacement(
    x: f64,
    width: f64,
    height: f64,
    center_y: f64,
    energy: f64,
    t: f64,
    layer_phase: f64,
) -> f64 {
    let amp = envelope(x, width) * energy * (height * AMPLITUDE_FRACTION);
    let wave: f64 = TERMS
        .iter()
        .map(|&(weight, freq, speed, phase)| {
            (x * freq - t * speed + layer_phase * phase).sin() * weight
        })
        .sum();
    center_y + amp * wave
}
