#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Landing page interactivity: the hero waveform, the typing transcript and
//! the smaller page widgets.
//!
//! Everything outside `wasm` is plain Rust and runs (and is tested) on the
//! host; the browser glue only compiles for wasm32.

pub mod accordion;
pub mod carousel;
pub mod config;
pub mod error;
pub mod lightbox;
pub mod nav;
pub mod platform;
pub mod script;
pub mod signal;
pub mod sparkle;
pub mod typing;
pub mod viewport;
pub mod waveform;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod gallery;
    mod page;
    mod render;
    mod transcript;

    /// Seed for the page's random generators.
    fn entropy_seed() -> u64 {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Debug).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = page::load_config(&document);
        if !config.debug {
            log::set_max_level(log::LevelFilter::Info);
        }

        // Each widget is independent; one failing to mount leaves the rest running.
        if let Err(e) = page::gate_downloads(&window, &document) {
            log::error!("download gating: {e}");
        }
        if let Err(e) = render::start(&window, &document, &config.waveform) {
            log::error!("waveform: {e}");
        }
        if let Err(e) = transcript::start(&window, &document, &config.typing) {
            log::error!("transcript: {e}");
        }
        if let Err(e) = gallery::start_carousel(&window, &document, &config.carousel) {
            log::error!("carousel: {e}");
        }
        if let Err(e) = gallery::start_lightbox(&document) {
            log::error!("lightbox: {e}");
        }
        if let Err(e) = page::start_nav(&window, &document) {
            log::error!("nav: {e}");
        }
        if let Err(e) = page::start_faq(&document) {
            log::error!("faq: {e}");
        }
        if let Err(e) = page::start_reveal(&window, &document) {
            log::error!("reveal: {e}");
        }

        log::info!("landing page ready");
        Ok(())
    }
}
