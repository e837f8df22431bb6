// Owns a requestAnimationFrame chain that can be started and stopped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;

use crate::dom;
use crate::error::Error;

type TickClosure = Closure<dyn FnMut()>;

/// Handle to a running frame chain. Dropping the handle detaches the
/// loop (it keeps driving itself until its tick returns false); call
/// `stop` to cancel it deterministically.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<i32>>,
    tick_slot: Rc<RefCell<Option<TickClosure>>>,
}

impl FrameLoop {
    /// Runs `tick` once per animation frame until it returns false or
    /// `stop` is called. The running flag is checked at the top of
    /// every frame, so a stop always lands before the next tick.
    pub fn start<F>(mut tick: F) -> Result<FrameLoop, Error>
    where
        F: FnMut() -> bool + 'static,
    {
        let running = Rc::new(Cell::new(true));
        let frame_id = Rc::new(Cell::new(0));
        let tick_slot: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));

        let closure = {
            let running = Rc::clone(&running);
            let frame_id = Rc::clone(&frame_id);
            let tick_slot = Rc::clone(&tick_slot);
            Closure::wrap(Box::new(move || {
                if !running.get() {
                    // Stopped since the last schedule; release the chain.
                    tick_slot.borrow_mut().take();
                    return;
                }

                if !tick() {
                    running.set(false);
                    tick_slot.borrow_mut().take();
                    return;
                }

                let scheduled = match tick_slot.borrow().as_ref() {
                    Some(tick_closure) => dom::request_animation_frame(tick_closure),
                    None => return,
                };
                match scheduled {
                    Ok(id) => frame_id.set(id),
                    Err(err) => {
                        log::error!("frame scheduling failed: {}", err);
                        running.set(false);
                        tick_slot.borrow_mut().take();
                    }
                }
            }) as Box<dyn FnMut()>)
        };

        let id = dom::request_animation_frame(&closure)?;
        frame_id.set(id);
        *tick_slot.borrow_mut() = Some(closure);

        Ok(FrameLoop {
            running,
            frame_id,
            tick_slot,
        })
    }

    /// Idempotent. Cancels the pending frame so no further tick runs.
    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Ok(window) = dom::window() {
            let _ = window.cancel_animation_frame(self.frame_id.get());
        }
        self.tick_slot.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}
