// Dark/light switch: a class on the root element, remembered in
// localStorage when the browser lets us.

use web_sys::{Element, Event, Storage};

use crate::dom;
use crate::error::Error;

pub const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

pub fn mount() -> Result<(), Error> {
    let root = dom::document()?
        .document_element()
        .ok_or_else(|| Error::MissingElement("documentElement".to_string()))?;

    // Markup defaults to dark; only an explicit light choice undoes it.
    if stored_preference().as_deref() == Some("light") {
        root.class_list().remove_1(DARK_CLASS).map_err(Error::from)?;
    }

    let button = match dom::optional_element("themeToggle")? {
        Some(el) => Some(el),
        None => dom::optional_element("theme-toggle")?,
    };
    let button = match button {
        Some(el) => el,
        None => return Ok(()),
    };

    dom::listen::<Event>(&button, "click", move |_| {
        if let Err(err) = toggle(&root) {
            log::error!("theme toggle failed: {}", err);
        }
    })
}

fn toggle(root: &Element) -> Result<(), Error> {
    let dark_now = root.class_list().toggle(DARK_CLASS).map_err(Error::from)?;
    store_preference(if dark_now { "dark" } else { "light" });
    Ok(())
}

fn stored_preference() -> Option<String> {
    storage()?.get_item(STORAGE_KEY).ok().flatten()
}

fn store_preference(value: &str) {
    if let Some(storage) = storage() {
        if storage.set_item(STORAGE_KEY, value).is_err() {
            log::debug!("theme preference could not be saved");
        }
    }
}

/// None when storage is blocked; the toggle still works, it just
/// doesn't stick across visits.
fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
