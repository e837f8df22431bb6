// Loading screen: types a status line, then fades out and hands the
// page over to the hero typing.

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Element, HtmlElement};

use crate::error::Error;
use crate::typewriter::{self, OneShot};
use crate::{dom, timer};

pub const LOADER_TEXT: &str = "Loading portfolio...";
pub const CHAR_MS: u32 = 50;
pub const REVEAL_DELAY_MS: i32 = 400;
pub const FAILSAFE_MS: i32 = 2800;

pub fn mount() -> Result<(), Error> {
    let loader = match dom::optional_html_element("loader")? {
        Some(el) => el,
        // No loading screen on this page; the hero typing still runs.
        None => return typewriter::mount_hero(),
    };
    let text_slot = match dom::optional_element("loaderText")? {
        Some(el) => el,
        None => {
            // A loader with no text slot would never finish typing;
            // reveal straight away instead of wedging the page.
            reveal(&loader, &Cell::new(false));
            return Ok(());
        }
    };

    // Scrolling stays locked while the loader is up.
    lock_scroll()?;

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        dom::listen_once(&document, "DOMContentLoaded", move || {
            if let Err(err) = begin(loader, text_slot) {
                log::error!("loader failed to start: {}", err);
            }
        })?;
    } else {
        begin(loader, text_slot)?;
    }
    Ok(())
}

fn begin(loader: HtmlElement, text_slot: Element) -> Result<(), Error> {
    let revealed = Rc::new(Cell::new(false));

    {
        let loader = loader.clone();
        let revealed = Rc::clone(&revealed);
        typewriter::run_once(text_slot, OneShot::new(LOADER_TEXT, CHAR_MS), move || {
            // Let the bar animation land before the fade.
            let scheduled = timer::once(REVEAL_DELAY_MS, move || reveal(&loader, &revealed));
            if let Err(err) = scheduled {
                log::error!("loader reveal never scheduled: {}", err);
            }
        })?;
    }

    // Failsafe in case the typing chain never completes.
    timer::once(FAILSAFE_MS, move || reveal(&loader, &revealed))
}

/// Runs at most once no matter how many paths race to it.
fn reveal(loader: &HtmlElement, revealed: &Cell<bool>) {
    if revealed.replace(true) {
        return;
    }
    if let Err(err) = finish(loader) {
        log::error!("loader reveal failed: {}", err);
    }
    if let Err(err) = typewriter::mount_hero() {
        log::error!("hero typing failed to start: {}", err);
    }
}

fn finish(loader: &HtmlElement) -> Result<(), Error> {
    loader.class_list().add_1("hidden").map_err(Error::from)?;
    unlock_scroll()
}

fn lock_scroll() -> Result<(), Error> {
    dom::body()?
        .style()
        .set_property("overflow", "hidden")
        .map_err(Error::from)
}

fn unlock_scroll() -> Result<(), Error> {
    dom::body()?
        .style()
        .remove_property("overflow")
        .map_err(Error::from)?;
    Ok(())
}
