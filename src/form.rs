// Contact form: simulated send, success banner, cleanup.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlButtonElement, HtmlFormElement};

use crate::error::Error;
use crate::{dom, timer};

pub const SEND_DELAY_MS: i32 = 800;
pub const BANNER_MS: i32 = 3000;

pub fn mount() -> Result<(), Error> {
    let form = match dom::optional_element("contactForm")? {
        Some(el) => el,
        None => return Ok(()),
    };
    let form = match form.dyn_into::<HtmlFormElement>() {
        Ok(form) => form,
        Err(_) => {
            log::warn!("#contactForm is not a form, skipping");
            return Ok(());
        }
    };
    let success = match dom::optional_element("formSuccess")? {
        Some(el) => el,
        None => return Ok(()),
    };

    let form_in_handler = form.clone();
    dom::listen::<Event>(&form, "submit", move |event| {
        event.prevent_default();
        if let Err(err) = simulate_send(&form_in_handler, &success) {
            log::error!("form send failed: {}", err);
        }
    })
}

fn simulate_send(form: &HtmlFormElement, success: &Element) -> Result<(), Error> {
    let button = form
        .query_selector(".btn-submit")
        .map_err(Error::from)?
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let button = match button {
        Some(button) => button,
        None => return Ok(()),
    };
    let label = match button.query_selector(".btn-text").map_err(Error::from)? {
        Some(label) => label,
        None => return Ok(()),
    };

    let original = label.text_content().unwrap_or_default();
    label.set_text_content(Some("Sending..."));
    button.set_disabled(true);

    let form = form.clone();
    let success = success.clone();
    timer::once(SEND_DELAY_MS, move || {
        if let Err(err) = deliver(&form, &success, &label, &button, &original) {
            log::error!("form delivery failed: {}", err);
        }
    })
}

fn deliver(
    form: &HtmlFormElement,
    success: &Element,
    label: &Element,
    button: &HtmlButtonElement,
    original: &str,
) -> Result<(), Error> {
    form.reset();
    form.style()
        .set_property("opacity", "0")
        .map_err(Error::from)?;
    form.style()
        .set_property("pointer-events", "none")
        .map_err(Error::from)?;
    success.class_list().add_1("visible").map_err(Error::from)?;
    label.set_text_content(Some(original));
    button.set_disabled(false);

    let form = form.clone();
    let success = success.clone();
    timer::once(BANNER_MS, move || {
        if let Err(err) = clear_banner(&form, &success) {
            log::error!("form banner cleanup failed: {}", err);
        }
    })
}

fn clear_banner(form: &HtmlFormElement, success: &Element) -> Result<(), Error> {
    success.class_list().remove_1("visible").map_err(Error::from)?;
    form.style().remove_property("opacity").map_err(Error::from)?;
    form.style()
        .remove_property("pointer-events")
        .map_err(Error::from)?;
    Ok(())
}
