// Small wrappers over web-sys lookups and event registration.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList, Window};

use crate::error::Error;

pub fn window() -> Result<Window, Error> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document, Error> {
    window()?.document().ok_or(Error::NoDocument)
}

pub fn body() -> Result<HtmlElement, Error> {
    document()?
        .body()
        .ok_or_else(|| Error::MissingElement("body".to_string()))
}

pub fn element(id: &str) -> Result<Element, Error> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingElement(format!("#{}", id)))
}

/// Optional lookup: absence becomes None, every other failure stays an
/// error. Subsystems use this to skip features the page doesn't have.
pub fn optional_element(id: &str) -> Result<Option<Element>, Error> {
    match element(id) {
        Ok(el) => Ok(Some(el)),
        Err(Error::MissingElement(sel)) => {
            log::debug!("optional element {} not on this page", sel);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub fn optional_html_element(id: &str) -> Result<Option<HtmlElement>, Error> {
    match html_element(id) {
        Ok(el) => Ok(Some(el)),
        Err(Error::MissingElement(sel)) => {
            log::debug!("optional element {} not on this page", sel);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub fn html_element(id: &str) -> Result<HtmlElement, Error> {
    element(id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| Error::WrongElementType {
            selector: format!("#{}", id),
            expected: "HtmlElement",
        })
}

pub fn query(selector: &str) -> Result<Element, Error> {
    document()?
        .query_selector(selector)
        .map_err(Error::from)?
        .ok_or_else(|| Error::MissingElement(selector.to_string()))
}

pub fn optional_query(selector: &str) -> Result<Option<Element>, Error> {
    match query(selector) {
        Ok(el) => Ok(Some(el)),
        Err(Error::MissingElement(sel)) => {
            log::debug!("optional element {} not on this page", sel);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, Error> {
    let list = document()?.query_selector_all(selector).map_err(Error::from)?;
    Ok(collect_elements(list))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, Error> {
    let list = root.query_selector_all(selector).map_err(Error::from)?;
    Ok(collect_elements(list))
}

fn collect_elements(list: NodeList) -> Vec<Element> {
    let mut found = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(node) = list.get(i) {
            if let Ok(el) = node.dyn_into::<Element>() {
                found.push(el);
            }
        }
    }
    found
}

/// Registers a handler for the lifetime of the page. The closure is
/// intentionally leaked; these listeners are never removed.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), Error>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(Error::from)?;
    closure.forget();
    Ok(())
}

/// Like `listen`, but the closure is consumed on first fire. Meant for
/// events that happen once per page, such as DOMContentLoaded.
pub fn listen_once(
    target: &EventTarget,
    event: &str,
    handler: impl FnOnce() + 'static,
) -> Result<(), Error> {
    let closure = Closure::once_into_js(handler);
    target
        .add_event_listener_with_callback(event, closure.unchecked_ref())
        .map_err(Error::from)
}

pub fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, Error> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(Error::from)
}

pub fn viewport_size() -> Result<(f64, f64), Error> {
    let window = window()?;
    let width = window
        .inner_width()
        .map_err(Error::from)?
        .as_f64()
        .ok_or_else(|| Error::Js("innerWidth is not a number".to_string()))?;
    let height = window
        .inner_height()
        .map_err(Error::from)?
        .as_f64()
        .ok_or_else(|| Error::Js("innerHeight is not a number".to_string()))?;
    Ok((width, height))
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Monotonic-ish timestamp in milliseconds. Falls back to the wall
/// clock when `performance` is missing.
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
