//! Canvas backing-store sizing.

/// A CSS-pixel box and the device pixel ratio it is displayed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

impl CanvasGeometry {
    /// A missing or non-positive ratio falls back to 1.
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            dpr,
        }
    }

    /// Pixel size of the canvas bitmap.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.css_width * self.dpr) as u32,
            (self.css_height * self.dpr) as u32,
        )
    }

    /// Drawing size in CSS pixels, recovered from the bitmap like the frame
    /// loop does.
    pub fn logical_size(width: u32, height: u32, dpr: f64) -> (f64, f64) {
        (width as f64 / dpr, height as f64 / dpr)
    }
}

/// Size `canvas` to its container times `dpr` and scale `ctx` to match.
///
/// The transform goes back to identity first, so calling this on every resize
/// never stacks scale factors.
#[cfg(target_arch = "wasm32")]
pub fn fit_canvas(
    canvas: &web_sys::HtmlCanvasElement,
    ctx: &web_sys::CanvasRenderingContext2d,
    dpr: f64,
) -> crate::error::SetupResult<CanvasGeometry> {
    let container = canvas
        .parent_element()
        .ok_or(crate::error::SetupError::MissingElement("canvas container"))?;
    let rect = container.get_bounding_client_rect();
    let geometry = CanvasGeometry::new(rect.width(), rect.height(), dpr);
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    let (w, h) = geometry.backing_size();
    canvas.set_width(w);
    canvas.set_height(h);
    ctx.scale(geometry.dpr, geometry.dpr)?;
    Ok(geometry)
}
