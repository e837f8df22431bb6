// Typing effects: a one-shot reveal and an endless type/delete cycle.

use web_sys::Element;

use crate::error::Error;
use crate::{dom, timer};

pub const HERO_PHRASES: [&str; 3] = [
    "Full Stack Developer",
    "AI/ML Enthusiast",
    "Problem Solver",
];
pub const TYPING_SPEED_MS: u32 = 80;
pub const DELETING_SPEED_MS: u32 = 40;
pub const TYPING_PAUSE_MS: u32 = 2000;

/// What one tick of a typing machine wants shown, and when to tick next.
pub struct Step {
    pub text: String,
    pub delay_ms: u32,
    pub done: bool,
}

/// Reveals a fixed string one character per tick.
pub struct OneShot {
    chars: Vec<char>,
    revealed: usize,
    speed_ms: u32,
}

impl OneShot {
    pub fn new(text: &str, speed_ms: u32) -> OneShot {
        OneShot {
            chars: text.chars().collect(),
            revealed: 0,
            speed_ms,
        }
    }

    pub fn tick(&mut self) -> Step {
        if self.revealed < self.chars.len() {
            self.revealed += 1;
            Step {
                text: self.chars[..self.revealed].iter().collect(),
                delay_ms: self.speed_ms,
                done: false,
            }
        } else {
            Step {
                text: self.chars.iter().collect(),
                delay_ms: 0,
                done: true,
            }
        }
    }
}

/// Types a phrase out, pauses, deletes it, and moves to the next one,
/// forever. The pause applies both at a full phrase and at an empty
/// line before the next phrase starts.
pub struct Cycler {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    chars: usize,
    deleting: bool,
    type_ms: u32,
    delete_ms: u32,
    pause_ms: u32,
}

impl Cycler {
    /// None when no non-empty phrase is given.
    pub fn new(phrases: &[&str], type_ms: u32, delete_ms: u32, pause_ms: u32) -> Option<Cycler> {
        let phrases: Vec<Vec<char>> = phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().collect())
            .collect();
        if phrases.is_empty() {
            return None;
        }

        Some(Cycler {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
            type_ms,
            delete_ms,
            pause_ms,
        })
    }

    pub fn tick(&mut self) -> Step {
        let current = &self.phrases[self.phrase];
        let (text, delay_ms) = if self.deleting {
            self.chars -= 1;
            let text: String = current[..self.chars].iter().collect();
            let delay = if self.chars > 0 { self.delete_ms } else { self.pause_ms };
            (text, delay)
        } else {
            self.chars += 1;
            let text: String = current[..self.chars].iter().collect();
            let delay = if self.chars < current.len() { self.type_ms } else { self.pause_ms };
            (text, delay)
        };

        if !self.deleting && self.chars == current.len() {
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
        }

        Step {
            text,
            delay_ms,
            done: false,
        }
    }
}

/// Drives a OneShot against an element's text, then calls `on_done`.
/// The first character lands synchronously.
pub fn run_once(
    target: Element,
    machine: OneShot,
    on_done: impl FnOnce() + 'static,
) -> Result<(), Error> {
    target.set_text_content(Some(""));
    step_once(target, machine, Box::new(on_done))
}

fn step_once(target: Element, mut machine: OneShot, on_done: Box<dyn FnOnce()>) -> Result<(), Error> {
    let step = machine.tick();
    if step.done {
        on_done();
        return Ok(());
    }
    target.set_text_content(Some(&step.text));
    timer::once(step.delay_ms as i32, move || {
        if let Err(err) = step_once(target, machine, on_done) {
            log::error!("typing effect stalled: {}", err);
        }
    })
}

/// Starts the cyclic hero typing, if the page has a slot for it.
pub fn mount_hero() -> Result<(), Error> {
    let target = match dom::optional_element("heroTyping")? {
        Some(el) => el,
        None => return Ok(()),
    };
    let machine = match Cycler::new(
        &HERO_PHRASES,
        TYPING_SPEED_MS,
        DELETING_SPEED_MS,
        TYPING_PAUSE_MS,
    ) {
        Some(machine) => machine,
        None => return Ok(()),
    };
    run_cycle(target, machine)
}

fn run_cycle(target: Element, mut machine: Cycler) -> Result<(), Error> {
    let step = machine.tick();
    target.set_text_content(Some(&step.text));
    timer::once(step.delay_ms as i32, move || {
        if let Err(err) = run_cycle(target, machine) {
            log::error!("hero typing stalled: {}", err);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{Cycler, OneShot};

    fn drain(machine: &mut Cycler, ticks: usize) -> Vec<(String, u32)> {
        (0..ticks)
            .map(|_| {
                let step = machine.tick();
                (step.text, step.delay_ms)
            })
            .collect()
    }

    #[test]
    fn one_shot_reveals_then_finishes() {
        let mut machine = OneShot::new("ab", 50);
        let first = machine.tick();
        assert_eq!((first.text.as_str(), first.delay_ms, first.done), ("a", 50, false));
        let second = machine.tick();
        assert_eq!((second.text.as_str(), second.delay_ms, second.done), ("ab", 50, false));
        let last = machine.tick();
        assert!(last.done);
        assert_eq!(last.text, "ab");
    }

    #[test]
    fn one_shot_on_empty_text_is_done_immediately() {
        let mut machine = OneShot::new("", 50);
        assert!(machine.tick().done);
    }

    #[test]
    fn cycler_types_pauses_deletes_and_rotates() {
        let mut machine = match Cycler::new(&["ab", "c"], 80, 40, 2000) {
            Some(m) => m,
            None => panic!("phrases are non-empty"),
        };
        let steps = drain(&mut machine, 7);
        assert_eq!(
            steps,
            vec![
                ("a".to_string(), 80),
                ("ab".to_string(), 2000),
                ("a".to_string(), 40),
                ("".to_string(), 2000),
                ("c".to_string(), 2000),
                ("".to_string(), 2000),
                ("a".to_string(), 80),
            ]
        );
    }

    #[test]
    fn cycler_with_a_single_phrase_loops_it() {
        let mut machine = match Cycler::new(&["hi"], 80, 40, 2000) {
            Some(m) => m,
            None => panic!("phrase is non-empty"),
        };
        let steps = drain(&mut machine, 5);
        assert_eq!(steps[0].0, "h");
        assert_eq!(steps[1].0, "hi");
        assert_eq!(steps[2].0, "h");
        assert_eq!(steps[3].0, "");
        assert_eq!(steps[4].0, "h");
    }

    #[test]
    fn cycler_filters_empty_phrases() {
        assert!(Cycler::new(&["", ""], 80, 40, 2000).is_none());
        let mut machine = match Cycler::new(&["", "hi"], 80, 40, 2000) {
            Some(m) => m,
            None => panic!("one phrase survives the filter"),
        };
        assert_eq!(machine.tick().text, "h");
    }
}
