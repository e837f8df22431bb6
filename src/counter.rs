// Stat counters that ease up from zero to their target number.

use web_sys::Element;

use crate::dom;
use crate::error::Error;
use crate::frame_loop::FrameLoop;

pub const DURATION_MS: f64 = 1500.0;

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Eased integer ramp from zero up to `target`.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    target: i64,
}

impl CountUp {
    pub fn new(target: i64) -> CountUp {
        CountUp { target }
    }

    /// Value to display `elapsed_ms` in, and whether the ramp is done.
    /// The final sample is the exact target, never a floored neighbor.
    pub fn sample(&self, elapsed_ms: f64) -> (i64, bool) {
        let progress = (elapsed_ms / DURATION_MS).min(1.0);
        if progress >= 1.0 {
            return (self.target, true);
        }
        let eased = ease_out_cubic(progress);
        ((self.target as f64 * eased).floor() as i64, false)
    }
}

/// Leading-integer parse in the spirit of parseInt(s, 10); markup like
/// "50+" counts to 50. No digits means no counter.
pub fn parse_count(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| if negative { -n } else { n })
}

/// Kicks off a detached frame loop writing the ramp into the element.
/// The loop retires itself once the target value lands.
pub fn animate(el: Element, target: i64) -> Result<(), Error> {
    let ramp = CountUp::new(target);
    let started = dom::now();
    FrameLoop::start(move || {
        let (value, done) = ramp.sample(dom::now() - started);
        el.set_text_content(Some(&value.to_string()));
        !done
    })?;
    Ok(())
}
