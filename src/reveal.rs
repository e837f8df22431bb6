// Scroll reveal: one observer fades elements in and fills skill bars,
// another arms the stat counters when the stats block scrolls into view.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::counter;
use crate::dom;
use crate::error::Error;

pub const REVEAL_THRESHOLD: f64 = 0.15;
/// Shrinks the observation box so elements reveal a little late, once
/// they are properly on screen.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const STATS_THRESHOLD: f64 = 0.3;

pub fn mount() -> Result<(), Error> {
    mount_reveals()?;
    mount_stats()?;
    Ok(())
}

fn mount_reveals() -> Result<(), Error> {
    let targets = dom::query_all("[data-reveal]")?;
    if targets.is_empty() {
        return Ok(());
    }

    let observer = observe_intersections(
        REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
        |entry, observer| {
            let el = entry.target();
            if let Err(err) = reveal_element(&el) {
                log::error!("reveal failed: {}", err);
            }
            // Revealing is one-way; stop watching this element.
            observer.unobserve(&el);
        },
    )?;

    for el in &targets {
        observer.observe(el);
    }
    Ok(())
}

fn reveal_element(el: &Element) -> Result<(), Error> {
    el.class_list().add_1("revealed").map_err(Error::from)?;

    if el.class_list().contains("skill-card") {
        for fill in dom::query_all_in(el, ".skill-fill[data-pct]")? {
            let fill = match fill.dyn_into::<HtmlElement>() {
                Ok(fill) => fill,
                Err(_) => continue,
            };
            if let Some(pct) = fill.get_attribute("data-pct") {
                fill.style()
                    .set_property("width", &format!("{}%", pct))
                    .map_err(Error::from)?;
            }
        }
    }
    Ok(())
}

fn mount_stats() -> Result<(), Error> {
    let stats_block = match dom::optional_query(".about-stats")? {
        Some(el) => el,
        None => return Ok(()),
    };

    let observer = observe_intersections(STATS_THRESHOLD, None, |entry, observer| {
        if let Err(err) = start_counters() {
            log::error!("stat counters failed: {}", err);
        }
        observer.unobserve(&entry.target());
    })?;
    observer.observe(&stats_block);
    Ok(())
}

fn start_counters() -> Result<(), Error> {
    for stat in dom::query_all(".stat-value[data-count]")? {
        let target = stat
            .get_attribute("data-count")
            .and_then(|raw| counter::parse_count(&raw));
        match target {
            Some(target) => counter::animate(stat, target)?,
            None => log::warn!("stat value has an unusable data-count, skipping"),
        }
    }
    Ok(())
}

/// Builds an observer that hands every intersecting entry to
/// `on_intersect`. The callback closure lives as long as the page.
#[allow(deprecated)]
fn observe_intersections<F>(
    threshold: f64,
    root_margin: Option<&str>,
    mut on_intersect: F,
) -> Result<IntersectionObserver, Error>
where
    F: FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
{
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry = match entry.dyn_into::<IntersectionObserverEntry>() {
                    Ok(entry) => entry,
                    Err(_) => continue,
                };
                if !entry.is_intersecting() {
                    continue;
                }
                on_intersect(entry, &observer);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from(threshold));
    if let Some(margin) = root_margin {
        options.root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(Error::from)?;
    callback.forget();
    Ok(observer)
}
