use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::accordion::Accordion;
use crate::config::Config;
use crate::error::SetupResult;
use crate::nav;
use crate::platform::{self, DISABLED_CLASS, DISABLED_TITLE};

const CONFIG_ID: &str = "landingConfig";
const REVEAL_THRESHOLD: f64 = 0.05;

/// Collect the `Element`s of a `NodeList`.
pub(super) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

fn passive() -> AddEventListenerOptions {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(true);
    opts
}

/// Read the optional `#landingConfig` JSON block; defaults when absent or invalid.
pub fn load_config(document: &Document) -> Config {
    let Some(text) = document
        .get_element_by_id(CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return Config::default();
    };
    match Config::from_json(&text) {
        Ok(config) => {
            log::debug!("loaded #{CONFIG_ID}");
            config
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            Config::default()
        }
    }
}

fn ua_data_platform(window: &Window) -> String {
    let navigator = window.navigator();
    js_sys::Reflect::get(&navigator, &JsValue::from_str("userAgentData"))
        .ok()
        .filter(|data| data.is_object())
        .and_then(|data| js_sys::Reflect::get(&data, &JsValue::from_str("platform")).ok())
        .and_then(|p| p.as_string())
        .unwrap_or_default()
}

/// Disable the Windows-only download links on every other platform.
pub fn gate_downloads(window: &Window, document: &Document) -> SetupResult<()> {
    let navigator = window.navigator();
    let is_windows = platform::is_windows(
        &ua_data_platform(window),
        &navigator.platform().unwrap_or_default(),
        &navigator.user_agent().unwrap_or_default(),
    );
    if is_windows {
        return Ok(());
    }
    let links = elements(document.query_selector_all("[data-win-download]")?);
    for link in &links {
        link.class_list().add_1(DISABLED_CLASS)?;
        link.set_attribute("title", DISABLED_TITLE)?;
        link.set_attribute("aria-disabled", "true")?;
        let block = Closure::wrap(Box::new(|ev: Event| ev.prevent_default()) as Box<dyn FnMut(Event)>);
        link.add_event_listener_with_callback("click", block.as_ref().unchecked_ref())?;
        block.forget();
    }
    log::debug!("disabled {} download links", links.len());
    Ok(())
}

/// Absolute top of a guide section, measured like its offset parent sees it.
fn section_top(section: &Element) -> Option<f64> {
    let el = section.dyn_ref::<HtmlElement>()?;
    let parent_top = el
        .offset_parent()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        .map_or(0, |p| p.offset_top());
    Some((el.offset_top() + parent_top) as f64)
}

fn update_nav(window: &Window, sections: &[Element], links: &[Element]) {
    let measured: Vec<(String, f64)> = sections
        .iter()
        .filter_map(|s| Some((s.id(), section_top(s)?)))
        .collect();
    let borrowed: Vec<(&str, f64)> = measured.iter().map(|(id, top)| (id.as_str(), *top)).collect();
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let current = nav::active_section(&borrowed, scroll_y).unwrap_or("");
    for link in links {
        let active = link.get_attribute("data-section").as_deref() == Some(current);
        let _ = link.class_list().toggle_with_force("active", active);
    }
}

/// Highlight the guide link of the section being read.
pub fn start_nav(window: &Window, document: &Document) -> SetupResult<()> {
    let sections = elements(document.query_selector_all(".g-section")?);
    let links = elements(document.query_selector_all(".guide__link[data-section]")?);
    if sections.is_empty() || links.is_empty() {
        return Ok(());
    }
    update_nav(window, &sections, &links);

    let on_scroll = {
        let window = window.clone();
        Closure::wrap(Box::new(move || update_nav(&window, &sections, &links)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &passive(),
    )?;
    on_scroll.forget();
    Ok(())
}

/// FAQ accordion over the `.g-faq__q` buttons.
pub fn start_faq(document: &Document) -> SetupResult<()> {
    let buttons = elements(document.query_selector_all(".g-faq__q")?);
    let items: Rc<Vec<Element>> = Rc::new(buttons.iter().filter_map(|b| b.parent_element()).collect());
    if items.len() != buttons.len() {
        log::warn!("faq question without a container; accordion disabled");
        return Ok(());
    }
    let state = Rc::new(RefCell::new(Accordion::new()));

    for (i, button) in buttons.iter().enumerate() {
        let (items, state) = (items.clone(), state.clone());
        let on_click = Closure::wrap(Box::new(move || {
            let open = state.borrow_mut().toggle(i);
            for (j, item) in items.iter().enumerate() {
                let _ = item.class_list().toggle_with_force("open", open == Some(j));
            }
        }) as Box<dyn FnMut()>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Fade `.reveal` blocks in the first time they scroll into view.
pub fn start_reveal(window: &Window, document: &Document) -> SetupResult<()> {
    let targets = elements(document.query_selector_all(".reveal")?);
    if targets.is_empty() {
        return Ok(());
    }
    let supported = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))?;
    if !supported {
        for el in &targets {
            el.class_list().add_1("visible")?;
        }
        return Ok(());
    }

    let on_intersect = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1("visible");
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
    for el in &targets {
        observer.observe(el);
    }
    on_intersect.forget();
    log::debug!("observing {} reveal targets", targets.len());
    Ok(())
}
