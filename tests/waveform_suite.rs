use landing_wasm::config::WaveformConfig;
use landing_wasm::signal::{displacement, energy, envelope, AMPLITUDE_FRACTION};
use landing_wasm::sparkle::{is_peak, ParticleSystem, Sparkle};
use landing_wasm::viewport::CanvasGeometry;
use landing_wasm::waveform::{layer_style, Rgba, Surface, Waveform};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear(f64, f64),
    Stroke { points: Vec<(f64, f64)>, color: Rgba, width: f64 },
    Glow { cx: f64, cy: f64, radius: f64, color: Rgba },
    Star { x: f64, y: f64, size: f64, alpha: f64 },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    fn strokes(&self) -> Vec<(&[(f64, f64)], Rgba, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Stroke { points, color, width } => Some((points.as_slice(), *color, *width)),
                _ => None,
            })
            .collect()
    }

    fn stars(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Star { .. })).count()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.calls.push(Call::Clear(width, height));
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], color: Rgba, line_width: f64) {
        self.calls.push(Call::Stroke {
            points: points.to_vec(),
            color,
            width: line_width,
        });
    }

    fn radial_glow(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.calls.push(Call::Glow { cx, cy, radius, color });
    }

    fn draw_star(&mut self, x: f64, y: f64, size: f64, alpha: f64) {
        self.calls.push(Call::Star { x, y, size, alpha });
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn always_spawn() -> WaveformConfig {
    WaveformConfig {
        spawn_chance: 1.0,
        ..WaveformConfig::default()
    }
}

#[test]
fn displacement_is_pinned_to_center_at_both_edges() {
    let (w, h, cy) = (640.0, 200.0, 100.0);
    for step in 0..200 {
        let t = step as f64 * 0.37;
        for layer in 0..3 {
            let e = energy(t);
            assert_eq!(displacement(0.0, w, h, cy, e, t, layer as f64), cy);
            assert!((displacement(w, w, h, cy, e, t, layer as f64) - cy).abs() < 1e-9);
        }
    }
}

#[test]
fn displacement_stays_inside_envelope() {
    let (w, h, cy) = (500.0, 180.0, 90.0);
    for step in 0..50 {
        let t = step as f64 * 0.9;
        let e = energy(t);
        let mut x = 0.0;
        while x <= w {
            let y = displacement(x, w, h, cy, e, t, 1.0);
            let bound = envelope(x, w) * e * h * AMPLITUDE_FRACTION;
            assert!((y - cy).abs() <= bound + 1e-9, "x={x} t={t}");
            x += 1.5;
        }
    }
}

#[test]
fn energy_is_bounded() {
    let mut t = -500.0;
    while t < 5000.0 {
        let e = energy(t);
        assert!((0.1 - 1e-12..=1.0 + 1e-12).contains(&e), "energy({t}) = {e}");
        t += 0.013;
    }
}

#[test]
fn sparkle_fades_in_then_out() {
    let at = |age| Sparkle { x: 0.0, y: 0.0, age, size: 3.0 };
    assert_eq!(at(0).alpha(60), 0.0);
    assert!(approx(at(6).alpha(60), 0.5));
    assert!(approx(at(12).alpha(60), 1.0));
    assert!(approx(at(36).alpha(60), 0.5));
    assert!(approx(at(60).alpha(60), 0.0));
    // Pulse peaks mid-life.
    assert!(approx(at(0).pulse_size(60), 2.4));
    assert!(approx(at(30).pulse_size(60), 3.6));
}

#[test]
fn sparkles_expire_after_max_age() {
    let mut system = ParticleSystem::with_seed(&WaveformConfig::default(), 1);
    assert_eq!(system.max_age(), 60);
    system.push(Sparkle { x: 1.0, y: 2.0, age: 0, size: 2.0 });
    for _ in 0..60 {
        system.tick();
    }
    assert_eq!(system.len(), 1);
    assert_eq!(system.sparkles()[0].age, 60);
    system.tick();
    assert!(system.is_empty());
}

#[test]
fn tick_removes_only_expired_sparkles() {
    let mut system = ParticleSystem::with_seed(&WaveformConfig::default(), 1);
    system.push(Sparkle { x: 0.0, y: 0.0, age: 60, size: 2.0 });
    system.push(Sparkle { x: 1.0, y: 0.0, age: 10, size: 2.0 });
    system.push(Sparkle { x: 2.0, y: 0.0, age: 59, size: 2.0 });
    system.tick();
    let ages: Vec<u32> = system.sparkles().iter().map(|s| s.age).collect();
    assert_eq!(ages, vec![11, 60]);
}

#[test]
fn peaks_are_strict_extrema() {
    assert!(is_peak(1.0, 2.0, 1.0));
    assert!(is_peak(1.0, 0.0, 1.0));
    assert!(!is_peak(1.0, 2.0, 3.0));
    assert!(!is_peak(2.0, 2.0, 1.0));
}

#[test]
fn spawn_requires_peak_far_from_center() {
    let mut system = ParticleSystem::with_seed(&always_spawn(), 7);
    let (cy, h) = (100.0, 200.0);
    // Peak, but only 10px from the centre line (threshold is 24px).
    assert!(!system.maybe_spawn(105.0, (3.0, 110.0), 105.0, cy, h));
    // Far from centre but monotonic.
    assert!(!system.maybe_spawn(10.0, (3.0, 20.0), 30.0, cy, h));
    assert!(system.is_empty());

    assert!(system.maybe_spawn(40.0, (4.5, 30.0), 40.0, cy, h));
    let s = &system.sparkles()[0];
    assert_eq!((s.x, s.y, s.age), (4.5, 30.0, 0));
    assert!((2.0..4.0).contains(&s.size));
}

#[test]
fn spawn_chance_zero_never_spawns() {
    let cfg = WaveformConfig {
        spawn_chance: 0.0,
        ..WaveformConfig::default()
    };
    let mut system = ParticleSystem::with_seed(&cfg, 3);
    for _ in 0..1000 {
        system.maybe_spawn(40.0, (0.0, 10.0), 40.0, 100.0, 200.0);
    }
    assert!(system.is_empty());
}

#[test]
fn seeded_spawns_are_reproducible() {
    let run = |seed| {
        let mut system = ParticleSystem::with_seed(&WaveformConfig::default(), seed);
        (0..500)
            .map(|i| system.maybe_spawn(40.0, (i as f64, 10.0), 40.0, 100.0, 200.0))
            .collect::<Vec<_>>()
    };
    let first = run(42);
    assert_eq!(first, run(42));
    assert!(first.iter().any(|&s| s));
    assert!(first.iter().any(|&s| !s));
}

#[test]
fn render_reports_alpha_and_pulse() {
    let mut system = ParticleSystem::with_seed(&WaveformConfig::default(), 1);
    system.push(Sparkle { x: 5.0, y: 6.0, age: 12, size: 2.0 });
    let mut drawn = Vec::new();
    system.render(|x, y, size, alpha| drawn.push((x, y, size, alpha)));
    assert_eq!(drawn.len(), 1);
    let (x, y, size, alpha) = drawn[0];
    assert_eq!((x, y), (5.0, 6.0));
    assert!(approx(alpha, 1.0));
    assert!(approx(size, 2.0 * (0.8 + 0.4 * (0.2 * std::f64::consts::PI).sin())));
}

#[test]
fn frame_strokes_three_layers_across_full_width() {
    let cfg = WaveformConfig::default();
    let mut wave = Waveform::new(cfg.clone(), ParticleSystem::with_seed(&cfg, 9));
    let mut rec = Recorder::default();
    wave.frame(&mut rec, 300.0, 120.0);

    assert_eq!(rec.calls[0], Call::Clear(300.0, 120.0));
    let strokes = rec.strokes();
    assert_eq!(strokes.len(), 3);
    let e = energy(0.0);
    for (layer, (points, color, width)) in strokes.iter().enumerate() {
        assert_eq!(points.len(), 201);
        assert_eq!(points[0], (0.0, 60.0));
        assert_eq!(points[200].0, 300.0);
        let (alpha, line_width) = layer_style(layer, e);
        assert!(approx(color.a, alpha));
        assert_eq!(*width, line_width);
        assert_eq!((color.r, color.g, color.b), (196, 138, 63));
    }
    assert!(approx(strokes[0].1.a, 0.5 * e));
    assert_eq!(strokes[2].2, 1.0);
    assert!(approx(wave.time(), 0.018));
}

#[test]
fn frame_draws_center_glow_when_enabled() {
    let cfg = WaveformConfig::default();
    let mut wave = Waveform::new(cfg.clone(), ParticleSystem::with_seed(&cfg, 9));
    let mut rec = Recorder::default();
    wave.frame(&mut rec, 300.0, 120.0);
    let e = energy(0.0);
    let glow = rec.calls.iter().find_map(|c| match c {
        Call::Glow { cx, cy, radius, color } => Some((*cx, *cy, *radius, color.a)),
        _ => None,
    });
    let (cx, cy, radius, a) = glow.expect("center glow");
    assert_eq!((cx, cy), (150.0, 60.0));
    assert!(approx(radius, (2.0 + 3.0 * e) * 4.0));
    assert!(approx(a, 0.3 * e));

    let quiet = WaveformConfig {
        center_glow: false,
        ..WaveformConfig::default()
    };
    let mut wave = Waveform::new(quiet.clone(), ParticleSystem::with_seed(&quiet, 9));
    let mut rec = Recorder::default();
    wave.frame(&mut rec, 300.0, 120.0);
    assert!(!rec.calls.iter().any(|c| matches!(c, Call::Glow { .. })));
}

#[test]
fn sparkles_spawn_on_front_layer_peaks() {
    let cfg = always_spawn();
    let mut wave = Waveform::new(cfg.clone(), ParticleSystem::with_seed(&cfg, 5));
    let mut rec = Recorder::default();
    // t = 0 has layer 0 peaks well clear of the threshold on a wide canvas.
    wave.frame(&mut rec, 800.0, 300.0);

    let front = rec.strokes()[0].0.to_vec();
    let sparkles = wave.particles().sparkles();
    assert!(!sparkles.is_empty());
    for s in sparkles {
        // Ticked once in the frame that spawned them.
        assert_eq!(s.age, 1);
        assert!(front.contains(&(s.x, s.y)));
        assert!((s.y - 150.0).abs() > 0.12 * 300.0);
    }
    assert_eq!(rec.stars(), sparkles.len());
}

#[test]
fn empty_surface_skips_drawing_but_time_advances() {
    let cfg = WaveformConfig::default();
    let mut wave = Waveform::new(cfg.clone(), ParticleSystem::with_seed(&cfg, 1));
    let mut rec = Recorder::default();
    wave.frame(&mut rec, 0.0, 0.0);
    wave.frame(&mut rec, 300.0, 0.0);
    assert!(rec.calls.is_empty());
    assert!(approx(wave.time(), 0.036));
}

#[test]
fn sparkles_keep_aging_while_canvas_is_collapsed() {
    let cfg = always_spawn();
    let mut wave = Waveform::new(cfg.clone(), ParticleSystem::with_seed(&cfg, 5));
    let mut rec = Recorder::default();
    wave.frame(&mut rec, 800.0, 300.0);
    assert!(!wave.particles().is_empty());
    let drawn = rec.calls.len();

    // Spawned at age 0 and ticked once, so 59 more frames reach the limit.
    for _ in 0..59 {
        wave.frame(&mut rec, 0.0, 0.0);
    }
    assert!(wave.particles().sparkles().iter().all(|s| s.age == 60));
    wave.frame(&mut rec, 0.0, 300.0);
    assert!(wave.particles().is_empty());
    assert_eq!(rec.calls.len(), drawn);
}

#[test]
fn backing_store_scales_by_pixel_ratio() {
    let geo = CanvasGeometry::new(320.5, 160.0, 2.0);
    assert_eq!(geo.backing_size(), (641, 320));
    assert_eq!(CanvasGeometry::logical_size(641, 320, 2.0), (320.5, 160.0));

    // Recomputing from the same box is stable.
    let again = CanvasGeometry::new(320.5, 160.0, 2.0);
    assert_eq!(again.backing_size(), geo.backing_size());
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    for dpr in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let geo = CanvasGeometry::new(100.0, 50.0, dpr);
        assert_eq!(geo.dpr, 1.0);
        assert_eq!(geo.backing_size(), (100, 50));
    }
    assert_eq!(CanvasGeometry::new(-5.0, 10.0, 1.0).backing_size(), (0, 10));
}

#[test]
fn rgba_formats_as_css() {
    assert_eq!(Rgba::new([196, 138, 63], 0.25).css(), "rgba(196, 138, 63, 0.25)");
}
