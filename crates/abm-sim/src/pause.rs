//! Observers that slow down or suspend a run for human inspection.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::num::NonZeroU64;
use std::thread;
use std::time::Duration;

use crate::{Control, Observer, ObserverResult};

// ── PauseObserver ─────────────────────────────────────────────────────────────

/// Requests a resumable [`Control::Pause`] every `interval` completed steps.
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(agents, env, time)
///     .observer(PauseObserver::every(NonZeroU64::new(10).unwrap()))
///     .one_stage()?;
/// while sim.run()? == RunOutcome::Paused {
///     inspect(sim.agents());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct PauseObserver {
    interval: NonZeroU64,
    on_start: bool,
    steps:    u64,
}

impl PauseObserver {
    pub fn every(interval: NonZeroU64) -> Self {
        Self { interval, on_start: false, steps: 0 }
    }

    /// Also pause right after initialization, before the first step.
    pub fn on_start(mut self, pause: bool) -> Self {
        self.on_start = pause;
        self
    }
}

impl<T, A, E> Observer<T, A, E> for PauseObserver {
    fn start(&mut self, _time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        Ok(if self.on_start { Control::Pause } else { Control::Continue })
    }

    fn step(&mut self, _time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        self.steps += 1;
        if self.steps.is_multiple_of(self.interval.get()) {
            Ok(Control::Pause)
        } else {
            Ok(Control::Continue)
        }
    }
}

// ── KeyPauseObserver ──────────────────────────────────────────────────────────

/// Blocks after start and after each step until a line arrives on `input`.
///
/// An empty line continues.  `q` (or end of input) stops the run.
pub struct KeyPauseObserver<R, W> {
    input:  R,
    prompt: W,
}

impl<R: BufRead, W: Write> KeyPauseObserver<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }

    fn wait(&mut self, label: &dyn Display) -> ObserverResult<Control> {
        write!(self.prompt, "{label}: press enter to continue, q to quit ")?;
        self.prompt.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Control::Stop);
        }
        if line.trim().eq_ignore_ascii_case("q") {
            Ok(Control::Stop)
        } else {
            Ok(Control::Continue)
        }
    }
}

impl KeyPauseObserver<io::StdinLock<'static>, io::Stderr> {
    /// Read from stdin, prompt on stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<T: Display, A, E, R: BufRead, W: Write> Observer<T, A, E> for KeyPauseObserver<R, W> {
    fn start(&mut self, time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        self.wait(&format_args!("start {time}"))
    }

    fn step(&mut self, time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        self.wait(&format_args!("step {time}"))
    }
}

// ── DelayObserver ─────────────────────────────────────────────────────────────

/// Sleeps for a fixed duration after start and after each step, so a run
/// printed to a terminal can be followed at human speed.
#[derive(Clone, Copy, Debug)]
pub struct DelayObserver {
    delay: Duration,
}

impl DelayObserver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl<T, A, E> Observer<T, A, E> for DelayObserver {
    fn start(&mut self, _time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        thread::sleep(self.delay);
        Ok(Control::Continue)
    }

    fn step(&mut self, _time: T, _agents: &[A], _env: &E) -> ObserverResult<Control> {
        thread::sleep(self.delay);
        Ok(Control::Continue)
    }
}
