// Wires the particle field to its canvas: sizing, pointer and resize
// listeners, and the frame loop that animates it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};

use crate::dom;
use crate::error::Error;
use crate::field::ParticleField;
use crate::frame_loop::FrameLoop;
use crate::pointer::PointerState;
use crate::renderer::CanvasRenderer;

pub struct Background {
    field: Rc<RefCell<ParticleField>>,
    pointer: Rc<RefCell<PointerState>>,
    renderer: Rc<CanvasRenderer>,
    frame_loop: Option<FrameLoop>,
}

impl Background {
    /// Finds the canvas and assembles the whole background. None when
    /// the page has no canvas for it.
    pub fn mount() -> Result<Option<Background>, Error> {
        let canvas = match dom::optional_element("particleCanvas")? {
            Some(el) => el,
            None => return Ok(None),
        };
        let canvas = canvas
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::WrongElementType {
                selector: "#particleCanvas".to_string(),
                expected: "HtmlCanvasElement",
            })?;

        let (width, height) = dom::viewport_size()?;
        let renderer = Rc::new(CanvasRenderer::new(canvas)?);
        renderer.resize_to(width as u32, height as u32);

        let field = Rc::new(RefCell::new(ParticleField::new(width, height)));
        let pointer = Rc::new(RefCell::new(PointerState::new()));

        log::info!(
            "particle background up: {} particles in {}x{}",
            field.borrow().particles().len(),
            width as u32,
            height as u32
        );

        let mut background = Background {
            field,
            pointer,
            renderer,
            frame_loop: None,
        };
        background.attach_listeners()?;
        background.start()?;
        Ok(Some(background))
    }

    fn attach_listeners(&self) -> Result<(), Error> {
        let document = dom::document()?;
        let window = dom::window()?;

        {
            let pointer = Rc::clone(&self.pointer);
            dom::listen::<MouseEvent>(&document, "mousemove", move |event| {
                pointer
                    .borrow_mut()
                    .set(f64::from(event.client_x()), f64::from(event.client_y()));
            })?;
        }
        {
            let pointer = Rc::clone(&self.pointer);
            dom::listen::<MouseEvent>(&document, "mouseleave", move |_| {
                pointer.borrow_mut().clear();
            })?;
        }
        {
            let field = Rc::clone(&self.field);
            let renderer = Rc::clone(&self.renderer);
            dom::listen::<Event>(&window, "resize", move |_| match dom::viewport_size() {
                Ok((width, height)) => {
                    renderer.resize_to(width as u32, height as u32);
                    field.borrow_mut().resize(width, height);
                }
                Err(err) => log::error!("viewport resize failed: {}", err),
            })?;
        }
        Ok(())
    }

    /// Starts the frame loop. A no-op when it is already running.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.is_running() {
            return Ok(());
        }

        let field = Rc::clone(&self.field);
        let pointer = Rc::clone(&self.pointer);
        let renderer = Rc::clone(&self.renderer);
        let frame_loop = FrameLoop::start(move || {
            field.borrow_mut().step(&pointer.borrow());
            if let Err(err) = renderer.render(&field.borrow()) {
                log::error!("particle render failed: {}", err);
            }
            true
        })?;

        self.frame_loop = Some(frame_loop);
        Ok(())
    }

    /// Cancels the pending frame; the field freezes in place.
    pub fn stop(&self) {
        if let Some(frame_loop) = &self.frame_loop {
            frame_loop.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop
            .as_ref()
            .map_or(false, FrameLoop::is_running)
    }
}
