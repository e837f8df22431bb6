// One-shot setTimeout scheduling.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::dom;
use crate::error::Error;

/// Runs `callback` once after `delay_ms`. The closure hands itself to
/// the JS side and is freed after it fires.
pub fn once<F>(delay_ms: i32, callback: F) -> Result<(), Error>
where
    F: FnOnce() + 'static,
{
    let window = dom::window()?;
    let cb = Closure::once_into_js(callback);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
        .map_err(Error::from)?;
    Ok(())
}
