// Interactive layer for a static portfolio page, compiled to wasm.
// Owns the particle background plus the page's loader, typing, scroll,
// reveal, form, and theme behaviors.

mod background;
mod color;
mod counter;
mod dom;
mod error;
mod field;
mod form;
mod frame_loop;
mod loader;
mod particle;
mod pointer;
mod renderer;
mod reveal;
mod scroll;
mod theme;
mod timer;
mod typewriter;
mod utils;

pub use crate::color::Color;
pub use crate::error::Error;
pub use crate::field::ParticleField;
pub use crate::frame_loop::FrameLoop;
pub use crate::particle::Particle;
pub use crate::pointer::PointerState;
pub use crate::renderer::CanvasRenderer;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
    utils::init_logging();
}

/// Control handle handed back to JS once the page is wired up.
#[wasm_bindgen]
pub struct Portfolio {
    background: Option<background::Background>,
}

#[wasm_bindgen]
impl Portfolio {
    /// Whether this page has a particle background at all.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    pub fn background_running(&self) -> bool {
        self.background
            .as_ref()
            .map_or(false, background::Background::is_running)
    }

    /// Freezes the particle background on its current frame.
    pub fn stop_background(&self) {
        if let Some(background) = &self.background {
            background.stop();
        }
    }

    /// Resumes a stopped background. No-op while it is running.
    pub fn start_background(&mut self) -> Result<(), JsValue> {
        if let Some(background) = &mut self.background {
            background.start()?;
        }
        Ok(())
    }
}

/// Wires every page behavior and returns the control handle. Call once,
/// with the DOM ready. Subsystems whose elements are missing from the
/// page skip themselves.
#[wasm_bindgen]
pub fn mount() -> Result<Portfolio, JsValue> {
    theme::mount()?;
    loader::mount()?;
    let background = background::Background::mount()?;
    scroll::mount()?;
    reveal::mount()?;
    form::mount()?;
    set_footer_year()?;

    log::info!("portfolio interactions mounted");
    Ok(Portfolio { background })
}

/// Stamps the current year into the footer, if the slot exists.
fn set_footer_year() -> Result<(), Error> {
    if let Some(slot) = dom::optional_element("currentYear")? {
        let year = js_sys::Date::new_0().get_full_year();
        slot.set_text_content(Some(&year.to_string()));
    }
    Ok(())
}
