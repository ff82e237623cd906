use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlImageElement, KeyboardEvent, TouchEvent, Window};

use super::page::elements;
use crate::carousel::{Carousel, Swipe, SwipeDirection, Transition};
use crate::config::CarouselConfig;
use crate::error::SetupResult;
use crate::lightbox::Lightbox;

const CAROUSEL_ID: &str = "stepCarousel";
const LIGHTBOX_ID: &str = "lightbox";
const LIGHTBOX_IMAGE_ID: &str = "lightboxImage";

struct StepView {
    steps: Vec<Element>,
    dots: Vec<Element>,
    exit_ms: i32,
}

impl StepView {
    fn show(&self, t: Transition) -> Result<(), JsValue> {
        if !t.changed() {
            return Ok(());
        }
        if let Some(prev) = self.steps.get(t.previous) {
            prev.class_list().remove_1("active")?;
            prev.class_list().add_1("exit")?;
            let prev = prev.clone();
            let done = Closure::once_into_js(move || {
                let _ = prev.class_list().remove_1("exit");
            });
            let window = web_sys::window().ok_or("no window")?;
            window.set_timeout_with_callback_and_timeout_and_arguments_0(
                done.unchecked_ref(),
                self.exit_ms,
            )?;
        }
        if let Some(dot) = self.dots.get(t.previous) {
            dot.class_list().remove_1("active")?;
        }
        if let Some(step) = self.steps.get(t.current) {
            step.class_list().add_1("active")?;
        }
        if let Some(dot) = self.dots.get(t.current) {
            dot.class_list().add_1("active")?;
        }
        Ok(())
    }
}

fn first_touch(ev: &Event) -> Option<(f64, f64)> {
    let touch = ev.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

/// Auto-advancing step carousel with dot navigation and touch swipe.
pub fn start_carousel(window: &Window, document: &Document, cfg: &CarouselConfig) -> SetupResult<()> {
    let Some(root) = document.get_element_by_id(CAROUSEL_ID) else {
        log::debug!("no #{CAROUSEL_ID}; carousel disabled");
        return Ok(());
    };
    let view = Rc::new(StepView {
        steps: elements(root.query_selector_all(".carousel__step")?),
        dots: elements(root.query_selector_all(".carousel__dot")?),
        exit_ms: cfg.exit_ms as i32,
    });
    if view.steps.is_empty() {
        return Ok(());
    }
    let carousel = Rc::new(RefCell::new(Carousel::new(view.steps.len())));
    // A manual move skips the next automatic one so it doesn't fire right after.
    let skip_tick = Rc::new(Cell::new(false));

    let tick = {
        let (view, carousel, skip_tick) = (view.clone(), carousel.clone(), skip_tick.clone());
        Closure::wrap(Box::new(move || {
            if skip_tick.replace(false) {
                return;
            }
            let t = carousel.borrow_mut().advance();
            if let Err(e) = view.show(t) {
                log::warn!("carousel: {e:?}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        cfg.interval_ms as i32,
    )?;
    tick.forget();

    for (i, dot) in view.dots.iter().enumerate() {
        let (view, carousel, skip_tick) = (view.clone(), carousel.clone(), skip_tick.clone());
        let on_click = Closure::wrap(Box::new(move || {
            let t = carousel.borrow_mut().go_to(i as isize);
            skip_tick.set(true);
            if let Err(e) = view.show(t) {
                log::warn!("carousel: {e:?}");
            }
        }) as Box<dyn FnMut()>);
        dot.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    let count = view.steps.len();
    let swipe = Rc::new(RefCell::new(Swipe::default()));
    let on_start = {
        let swipe = swipe.clone();
        Closure::wrap(Box::new(move |ev: Event| {
            if let Some((x, y)) = first_touch(&ev) {
                swipe.borrow_mut().begin(x, y);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let threshold = cfg.swipe_threshold_px;
    let on_end = Closure::wrap(Box::new(move |ev: Event| {
        let Some((x, y)) = first_touch(&ev) else {
            swipe.borrow_mut().cancel();
            return;
        };
        let Some(dir) = swipe.borrow_mut().end(x, y, threshold) else { return };
        let t = match dir {
            SwipeDirection::Next => carousel.borrow_mut().advance(),
            SwipeDirection::Previous => carousel.borrow_mut().back(),
        };
        skip_tick.set(true);
        if let Err(e) = view.show(t) {
            log::warn!("carousel: {e:?}");
        }
    }) as Box<dyn FnMut(Event)>);

    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_passive(true);
    root.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        on_start.as_ref().unchecked_ref(),
        &opts,
    )?;
    root.add_event_listener_with_callback_and_add_event_listener_options(
        "touchend",
        on_end.as_ref().unchecked_ref(),
        &opts,
    )?;
    on_start.forget();
    on_end.forget();

    log::info!("carousel started with {count} steps");
    Ok(())
}

struct LightboxView {
    root: Element,
    image: HtmlImageElement,
    sources: Vec<String>,
}

impl LightboxView {
    fn render(&self, open: Option<usize>) {
        match open.and_then(|i| self.sources.get(i)) {
            Some(src) => {
                self.image.set_src(src);
                let _ = self.root.class_list().add_1("open");
            }
            None => {
                let _ = self.root.class_list().remove_1("open");
            }
        }
    }
}

/// Image lightbox over every `.lightbox-trigger`.
pub fn start_lightbox(document: &Document) -> SetupResult<()> {
    let (Some(root), Some(image)) = (
        document.get_element_by_id(LIGHTBOX_ID),
        document.get_element_by_id(LIGHTBOX_IMAGE_ID),
    ) else {
        log::debug!("no #{LIGHTBOX_ID}; lightbox disabled");
        return Ok(());
    };
    let Ok(image) = image.dyn_into::<HtmlImageElement>() else {
        log::warn!("#{LIGHTBOX_IMAGE_ID} is not an <img>; lightbox disabled");
        return Ok(());
    };
    let triggers = elements(document.query_selector_all(".lightbox-trigger")?);
    let sources = triggers
        .iter()
        .map(|t| {
            t.get_attribute("data-full")
                .or_else(|| t.get_attribute("src"))
                .unwrap_or_default()
        })
        .collect();
    let view = Rc::new(LightboxView { root: root.clone(), image, sources });
    let state = Rc::new(RefCell::new(Lightbox::new(triggers.len())));

    for (i, trigger) in triggers.iter().enumerate() {
        let (view, state) = (view.clone(), state.clone());
        let on_click = Closure::wrap(Box::new(move || {
            let open = state.borrow_mut().open(i);
            view.render(open);
        }) as Box<dyn FnMut()>);
        trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    let buttons: [(&str, fn(&mut Lightbox)); 3] = [
        (".lightbox__close", |lb| lb.close()),
        (".lightbox__next", |lb| {
            lb.next();
        }),
        (".lightbox__prev", |lb| {
            lb.previous();
        }),
    ];
    for (selector, action) in buttons {
        let Some(button) = root.query_selector(selector)? else { continue };
        let (view, state) = (view.clone(), state.clone());
        let on_click = Closure::wrap(Box::new(move |ev: Event| {
            ev.stop_propagation();
            action(&mut state.borrow_mut());
            view.render(state.borrow().current());
        }) as Box<dyn FnMut(Event)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    // Clicking the backdrop itself, not the image, closes.
    let on_backdrop = {
        let (view, state) = (view.clone(), state.clone());
        let backdrop = root.clone();
        Closure::wrap(Box::new(move |ev: Event| {
            let on_backdrop = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|t| t == backdrop);
            if on_backdrop {
                state.borrow_mut().close();
                view.render(None);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    root.add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref())?;
    on_backdrop.forget();

    let on_key = Closure::wrap(Box::new(move |ev: Event| {
        let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else { return };
        let handled = state.borrow_mut().handle_key(&key);
        if handled {
            view.render(state.borrow().current());
        }
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    Ok(())
}
