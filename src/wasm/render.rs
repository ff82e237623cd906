use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

use fastrand::Rng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::config::WaveformConfig;
use crate::error::{SetupError, SetupResult};
use crate::sparkle::ParticleSystem;
use crate::viewport::{fit_canvas, CanvasGeometry};
use crate::waveform::{Rgba, Surface, Waveform};

const CANVAS_ID: &str = "waveformCanvas";

/// Diagonal arm length of the star glyph relative to its size.
const STAR_DIAGONAL: f64 = 0.35;

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    accent: [u8; 3],
}

impl CanvasSurface {
    fn glow(&self, cx: f64, cy: f64, radius: f64, color: Rgba) -> Result<(), JsValue> {
        let grad = self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius)?;
        grad.add_color_stop(0.0, &color.css())?;
        grad.add_color_stop(1.0, &Rgba { a: 0.0, ..color }.css())?;
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, radius, 0.0, PI * 2.0)?;
        self.ctx.fill();
        Ok(())
    }

    fn star(&self, x: f64, y: f64, size: f64, alpha: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let d = size * STAR_DIAGONAL;
        ctx.set_global_alpha(alpha);
        ctx.set_stroke_style_str(&Rgba::new(self.accent, 1.0).css());
        ctx.set_line_width(0.7);
        ctx.begin_path();
        ctx.move_to(x, y - size);
        ctx.line_to(x, y + size);
        ctx.move_to(x - size, y);
        ctx.line_to(x + size, y);
        ctx.move_to(x - d, y - d);
        ctx.line_to(x + d, y + d);
        ctx.move_to(x + d, y - d);
        ctx.line_to(x - d, y + d);
        ctx.stroke();
        self.glow(x, y, size * 1.5, Rgba::new(self.accent, alpha * 0.4))
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], color: Rgba, line_width: f64) {
        let Some(&(x0, y0)) = points.first() else { return };
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.move_to(x0, y0);
        for &(x, y) in &points[1..] {
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
    }

    fn radial_glow(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let _ = self.glow(cx, cy, radius, color);
    }

    fn draw_star(&mut self, x: f64, y: f64, size: f64, alpha: f64) {
        self.ctx.save();
        let _ = self.star(x, y, size, alpha);
        self.ctx.restore();
    }
}

/// Start the waveform render loop. Pages without the canvas are left alone.
pub fn start(window: &Window, document: &Document, cfg: &WaveformConfig) -> SetupResult<()> {
    let Some(el) = document.get_element_by_id(CANVAS_ID) else {
        log::debug!("no #{CANVAS_ID}; waveform disabled");
        return Ok(());
    };
    let canvas: HtmlCanvasElement = el
        .dyn_into()
        .map_err(|_| SetupError::Js(format!("#{CANVAS_ID} is not a canvas")))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(SetupError::NoContext)?
        .dyn_into()
        .map_err(|_| SetupError::NoContext)?;

    let dpr = Rc::new(Cell::new(CanvasGeometry::new(0.0, 0.0, window.device_pixel_ratio()).dpr));
    fit_canvas(&canvas, &ctx, dpr.get())?;

    // Resize canvas to fit its container
    let resize_closure = {
        let canvas = canvas.clone();
        let ctx = ctx.clone();
        let dpr = dpr.clone();
        Closure::wrap(Box::new(move || {
            if let Some(win) = web_sys::window() {
                dpr.set(CanvasGeometry::new(0.0, 0.0, win.device_pixel_ratio()).dpr);
            }
            if let Err(e) = fit_canvas(&canvas, &ctx, dpr.get()) {
                log::warn!("canvas resize failed: {e}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let particles = ParticleSystem::new(cfg, Rng::with_seed(super::entropy_seed()));
    let mut waveform = Waveform::new(cfg.clone(), particles);
    let mut surface = CanvasSurface { ctx, accent: cfg.accent };

    // Animation loop
    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let (w, h) = CanvasGeometry::logical_size(canvas.width(), canvas.height(), dpr.get());
        waveform.frame(&mut surface, w, h);

        // schedule next
        if let (Some(win), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = g.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    log::info!("waveform started");
    Ok(())
}
