//! The `Sim` state machine and its step loop.

use std::marker::PhantomData;

use abm_core::TimeSource;
use abm_schedule::{Scheduler, Terminator};
use tracing::{debug, error, info};

use crate::mode::{OneStage, StepMode, TwoStage};
use crate::{Control, Observer, SimError, SimResult};

/// Lifecycle position of a [`Sim`].
///
/// ```text
/// Created ─initialize─▶ Initialized ─run─▶ Running ─┬─▶ Stopped
///                                            ▲      │
///                                            └run── Paused
/// any hook error ─▶ Failed
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SimState {
    Created,
    Initialized,
    Running,
    /// Suspended between steps; `run` resumes at the next pending time value.
    Paused,
    /// Terminal: `done` has fired.
    Stopped,
    /// Terminal: a hook returned an error.  `done` is not fired.
    Failed,
}

/// Why a run ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StopReason {
    /// The time source ran out of values.
    Exhausted,
    /// The terminator returned `true`.
    Terminated,
    /// An observer returned [`Control::Stop`].
    ObserverStop,
}

/// What [`Sim::run`] / [`Sim::run_steps`] handed control back for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunOutcome {
    /// The run is over; `done` has fired.
    Stopped(StopReason),
    /// An observer asked for a pause.  Call `run` again to resume.
    Paused,
    /// `run_steps` used up its step budget.  Call `run` again to resume.
    Suspended,
}

/// Outcome of one loop iteration.
enum Advance {
    Continue,
    Pause,
    Stop(StopReason),
}

/// The main simulation runner.
///
/// `Sim<M, A, E, TS, S, X, O>` owns the agents (`A`), environment (`E`), time
/// source (`TS`), scheduler (`S`), terminator (`X`), and observer (`O`) for
/// one run.  `M` picks how updates within a step are sequenced: [`OneStage`]
/// or [`TwoStage`].
///
/// Each step:
///
/// 1. pull the next time value; stop if the source is exhausted,
/// 2. ask the terminator; stop without updating if it says so,
/// 3. ask the scheduler which agents update,
/// 4. run the environment and agent updates per `M`,
/// 5. notify the observer, honouring any pause/stop request.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M, A, E, TS: TimeSource, S, X, O> {
    pub(crate) agents:     Vec<A>,
    pub(crate) env:        E,
    pub(crate) time:       TS,
    pub(crate) scheduler:  S,
    pub(crate) terminator: X,
    pub(crate) observer:   O,
    pub(crate) state:      SimState,
    /// Time value of the step most recently pulled from `time`.
    pub(crate) now:        Option<TS::Time>,
    pub(crate) steps:      u64,
    pub(crate) mode:       PhantomData<fn() -> M>,
}

/// A [`Sim`] whose agents update one after another.
pub type OneStageSim<A, E, TS, S, X, O> = Sim<OneStage, A, E, TS, S, X, O>;

/// A [`Sim`] whose agents decide together, then commit together.
pub type TwoStageSim<A, E, TS, S, X, O> = Sim<TwoStage, A, E, TS, S, X, O>;

impl<M, A, E, TS: TimeSource, S, X, O> Sim<M, A, E, TS, S, X, O> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Number of steps whose updates have run.
    pub fn steps_completed(&self) -> u64 {
        self.steps
    }

    /// Time of the most recent step, or the start time before the first one.
    pub fn current_time(&self) -> TS::Time {
        self.now.unwrap_or_else(|| self.time.start_time())
    }

    pub fn agents(&self) -> &[A] {
        &self.agents
    }

    /// Mutable agent access, e.g. to adjust a population while paused.
    pub fn agents_mut(&mut self) -> &mut [A] {
        &mut self.agents
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Tear the simulation down into its agents, environment, and observer.
    pub fn into_parts(self) -> (Vec<A>, E, O) {
        (self.agents, self.env, self.observer)
    }
}

impl<M, A, E, TS, S, X, O> Sim<M, A, E, TS, S, X, O>
where
    TS: TimeSource,
    M: StepMode<TS::Time, A, E>,
    S: Scheduler<TS::Time, A, E>,
    X: Terminator<TS::Time, A, E>,
    O: Observer<TS::Time, A, E>,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the one-time initialization: environment `init`, every agent's
    /// `init`, then the observer's `start`.
    ///
    /// Called implicitly by the first `run`.  Only valid in
    /// [`SimState::Created`].
    pub fn initialize(&mut self) -> SimResult<()> {
        if self.state != SimState::Created {
            return Err(SimError::InvalidState(self.state));
        }

        let start = self.time.start_time();
        if let Err(e) = M::init(start, &mut self.agents, &mut self.env) {
            return self.fail(e.into());
        }
        self.state = SimState::Initialized;
        info!(
            mode = M::NAME,
            agents = self.agents.len(),
            start = %start,
            "simulation initialized"
        );

        match self.observer.start(start, &self.agents, &self.env) {
            Ok(Control::Continue) => Ok(()),
            Ok(Control::Pause) => {
                self.state = SimState::Paused;
                info!("paused by observer before first step");
                Ok(())
            }
            Ok(Control::Stop) => self.finish(StopReason::ObserverStop),
            Err(e) => self.fail(e.into()),
        }
    }

    /// Run until the simulation stops or an observer pauses it.
    ///
    /// Initializes first if needed.  After a pause, calling `run` again
    /// resumes at the next pending time value.
    pub fn run(&mut self) -> SimResult<RunOutcome> {
        self.drive(None)
    }

    /// Like [`run`](Self::run), but hand control back after at most `n`
    /// steps.
    pub fn run_steps(&mut self, n: u64) -> SimResult<RunOutcome> {
        self.drive(Some(n))
    }

    // ── Core loop ─────────────────────────────────────────────────────────

    fn drive(&mut self, budget: Option<u64>) -> SimResult<RunOutcome> {
        match self.state {
            SimState::Created => {
                self.initialize()?;
                match self.state {
                    SimState::Paused => return Ok(RunOutcome::Paused),
                    SimState::Stopped => {
                        return Ok(RunOutcome::Stopped(StopReason::ObserverStop));
                    }
                    _ => {}
                }
            }
            SimState::Initialized | SimState::Running | SimState::Paused => {}
            SimState::Stopped | SimState::Failed => {
                return Err(SimError::InvalidState(self.state));
            }
        }

        self.state = SimState::Running;
        let mut taken = 0u64;
        loop {
            if budget.is_some_and(|n| taken >= n) {
                self.state = SimState::Paused;
                return Ok(RunOutcome::Suspended);
            }

            let advance = match self.advance() {
                Ok(a) => a,
                Err(e) => return self.fail(e),
            };
            taken += 1;

            match advance {
                Advance::Continue => {}
                Advance::Pause => {
                    self.state = SimState::Paused;
                    info!(steps = self.steps, "paused by observer");
                    return Ok(RunOutcome::Paused);
                }
                Advance::Stop(reason) => {
                    self.finish(reason)?;
                    return Ok(RunOutcome::Stopped(reason));
                }
            }
        }
    }

    /// One loop iteration: time → terminator → schedule → update → observe.
    fn advance(&mut self) -> SimResult<Advance> {
        let Some(time) = self.time.next_time() else {
            return Ok(Advance::Stop(StopReason::Exhausted));
        };
        self.now = Some(time);

        if self.terminator.test(time, &self.agents, &self.env) {
            debug!(time = %time, "terminator fired");
            return Ok(Advance::Stop(StopReason::Terminated));
        }

        let schedule = self.scheduler.step(time, &self.agents, &self.env);
        let n = self.agents.len();
        if let Some(&index) = schedule.iter().find(|&&i| i >= n) {
            return Err(SimError::ScheduleOutOfRange { index, agents: n });
        }
        debug!(time = %time, scheduled = schedule.len(), "step");

        M::update(time, &schedule, &mut self.agents, &mut self.env)?;
        self.steps += 1;

        Ok(match self.observer.step(time, &self.agents, &self.env)? {
            Control::Continue => Advance::Continue,
            Control::Pause => Advance::Pause,
            Control::Stop => Advance::Stop(StopReason::ObserverStop),
        })
    }

    /// Enter `Stopped` and fire the observer's `done` exactly once.
    fn finish(&mut self, reason: StopReason) -> SimResult<()> {
        self.state = SimState::Stopped;
        info!(steps = self.steps, ?reason, "simulation stopped");
        if let Err(e) = self.observer.done(&self.agents, &self.env) {
            return self.fail(e.into());
        }
        Ok(())
    }

    fn fail<T>(&mut self, err: SimError) -> SimResult<T> {
        self.state = SimState::Failed;
        error!(steps = self.steps, error = %err, "simulation failed");
        Err(err)
    }
}
