use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use fastrand::Rng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Text, Window};

use crate::config::TypingConfig;
use crate::error::SetupResult;
use crate::script::Script;
use crate::typing::{Sequencer, Transcript};

const TRANSCRIPT_ID: &str = "appTranscript";
const CATEGORY_ID: &str = "appCategory";
const CURSOR_CLASS: &str = "visualizer__cursor";
const TAGLINE_CLASS: &str = "visualizer__transcript--tagline";
const FADE_CLASS: &str = "fade-out";
const BLINK_ANIMATION: &str = "cursorBlink 0.8s step-end 2";

/// The transcript line and its category label.
struct DomTranscript {
    document: Document,
    transcript: Element,
    category: Element,
    cursor: Option<HtmlElement>,
    text: Option<Text>,
}

fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(e) = el.class_list().toggle_with_force(class, on) {
        log::warn!("class `{class}`: {e:?}");
    }
}

impl DomTranscript {
    fn cursor_attached(&self) -> bool {
        self.cursor
            .as_ref()
            .is_some_and(|c| c.parent_element().is_some())
    }

    fn ensure_cursor(&mut self) -> Result<(), JsValue> {
        let cursor = match self.cursor.take() {
            Some(c) => c,
            None => {
                let c: HtmlElement = self.document.create_element("span")?.dyn_into()?;
                c.set_class_name(CURSOR_CLASS);
                c
            }
        };
        self.transcript.append_child(&cursor)?;
        self.cursor = Some(cursor);
        Ok(())
    }

    fn append(&mut self, ch: char) -> Result<(), JsValue> {
        if let Some(c) = self.cursor.as_ref().filter(|c| c.parent_element().is_some()) {
            c.remove();
        }
        let text = match self.text.take() {
            Some(t) if t.parent_node().is_some() => t,
            _ => {
                let t = self.document.create_text_node("");
                self.transcript.append_child(&t)?;
                t
            }
        };
        let mut buf = [0u8; 4];
        text.append_data(ch.encode_utf8(&mut buf))?;
        self.text = Some(text);
        self.ensure_cursor()
    }
}

impl Transcript for DomTranscript {
    fn show_cursor(&mut self) {
        if let Err(e) = self.ensure_cursor() {
            log::warn!("cursor: {e:?}");
        }
    }

    fn push_char(&mut self, ch: char) {
        if let Err(e) = self.append(ch) {
            log::warn!("typing: {e:?}");
        }
    }

    fn pop_char(&mut self) {
        if let Some(text) = &self.text {
            let mut data = text.data();
            data.pop();
            text.set_data(&data);
        }
    }

    fn clear(&mut self) {
        self.transcript.set_inner_html("");
        self.text = None;
    }

    fn blink_cursor(&mut self) {
        if !self.cursor_attached() {
            return;
        }
        if let Some(cursor) = &self.cursor {
            let style = cursor.style();
            let _ = style.set_property("animation", "none");
            // Reading layout restarts the CSS animation.
            let _ = cursor.offset_height();
            let _ = style.set_property("animation", BLINK_ANIMATION);
        }
    }

    fn fade_label(&mut self) {
        set_class(&self.category, FADE_CLASS, true);
    }

    fn set_label(&mut self, label: &str, icon: &str) {
        self.category.set_inner_html(&format!("{icon} {label}"));
        set_class(&self.category, FADE_CLASS, false);
    }

    fn clear_label(&mut self) {
        self.category.set_text_content(Some(""));
        set_class(&self.category, FADE_CLASS, false);
    }

    fn set_tagline(&mut self, on: bool) {
        set_class(&self.transcript, TAGLINE_CLASS, on);
    }

    fn show_text(&mut self, text: &str) {
        self.transcript.set_text_content(Some(text));
        self.text = None;
    }
}

fn arm(cb: &Closure<dyn FnMut()>, delay: Duration) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
}

/// Start the typing loop. Pages without the transcript elements are left alone.
pub fn start(window: &Window, document: &Document, cfg: &TypingConfig) -> SetupResult<()> {
    let (Some(transcript), Some(category)) = (
        document.get_element_by_id(TRANSCRIPT_ID),
        document.get_element_by_id(CATEGORY_ID),
    ) else {
        log::debug!("no #{TRANSCRIPT_ID} / #{CATEGORY_ID}; transcript disabled");
        return Ok(());
    };

    let query = format!("(max-width: {}px)", cfg.compact_max_width);
    let compact = window.match_media(&query)?.is_some_and(|m| m.matches());

    let mut out = DomTranscript {
        document: document.clone(),
        transcript,
        category,
        cursor: None,
        text: None,
    };
    let rng = Rng::with_seed(super::entropy_seed());
    let mut sequencer = Sequencer::new(Script::landing(), cfg.clone(), compact, rng);
    let first = sequencer.start(&mut out);

    // One closure re-arms itself with the delay each step returns, so only a
    // single timeout is ever pending.
    let pending: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = pending.clone();
    *pending.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let delay = sequencer.step(&mut out);
        if let Some(cb) = handle.borrow().as_ref() {
            if let Err(e) = arm(cb, delay) {
                log::error!("transcript timer: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = pending.borrow().as_ref() {
        arm(cb, first)?;
    }
    log::info!("transcript started (compact: {compact})");
    Ok(())
}
