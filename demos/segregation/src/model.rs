//! Households, the grid they live on, and the stdout reporter.

use std::io::Write;

use abm_behavior::{BehaviorError, BehaviorResult, Environment, StagedAgent};
use abm_core::{AgentId, FixedTime, IdGenerator, SimRng};
use abm_schedule::{NeverTerminate, RandomOrderScheduler};
use abm_sim::{Control, Observer, ObserverResult, SimBuilder, TwoStageSim};
use abm_spatial::{Cell, Grid, GridResult};
use tracing::debug;

use crate::params::Params;

pub type SegregationSim<O> =
    TwoStageSim<Household, SegregationEnv, FixedTime, RandomOrderScheduler<SimRng>, NeverTerminate, O>;

// ── Households ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Blue,
    Orange,
}

/// What the grid stores for each occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub id:    AgentId,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct Household {
    pub id:         AgentId,
    pub color:      Color,
    pub cell:       Cell,
    /// Fraction of neighbors that must share `color`.
    pub similarity: f64,
}

impl Household {
    /// Happy when like-colored neighbors make up at least `similarity` of
    /// all neighbors.  A household with no neighbors is always happy.
    pub fn is_happy(&self, grid: &Grid<Occupant>) -> bool {
        let neighbors = grid.neighbors(self.cell);
        let similar = neighbors.iter().filter(|n| n.color == self.color).count();
        similar as f64 >= self.similarity * neighbors.len() as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Stay,
    Relocate,
}

impl StagedAgent<u64, SegregationEnv> for Household {
    type Intent = Move;

    fn id(&self) -> AgentId {
        self.id
    }

    fn decide(&mut self, _time: u64, env: &SegregationEnv) -> BehaviorResult<Move> {
        Ok(if self.is_happy(&env.grid) { Move::Stay } else { Move::Relocate })
    }

    fn commit(&mut self, _time: u64, intent: Move, env: &mut SegregationEnv) -> BehaviorResult<()> {
        if intent == Move::Relocate {
            if let Some(to) = env.relocate(self.cell)? {
                self.cell = to;
            }
        }
        Ok(())
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

pub struct SegregationEnv {
    pub grid: Grid<Occupant>,
    rng:      SimRng,
    moves:    usize,
}

impl SegregationEnv {
    pub fn new(grid: Grid<Occupant>, rng: SimRng) -> Self {
        Self { grid, rng, moves: 0 }
    }

    /// Move the occupant of `from` to a uniformly chosen empty cell.
    ///
    /// Returns `None` (and leaves the grid alone) when no cell is free.
    /// Fails if `from` holds no household.
    pub fn relocate(&mut self, from: Cell) -> BehaviorResult<Option<Cell>> {
        let empty = self.grid.empty_cells();
        let Some(&to) = self.rng.choose(&empty) else {
            return Ok(None);
        };
        self.grid
            .move_item(from, to)
            .map_err(|e| BehaviorError::Environment(format!("relocating from {from}: {e}")))?;
        self.moves += 1;
        Ok(Some(to))
    }

    /// Households that relocated during the most recent step.
    pub fn moves_last_step(&self) -> usize {
        self.moves
    }

    /// Percent of `households` currently happy; 0 for an empty population.
    pub fn happy_percent(&self, households: &[Household]) -> f64 {
        if households.is_empty() {
            return 0.0;
        }
        let happy = households.iter().filter(|h| h.is_happy(&self.grid)).count();
        100.0 * happy as f64 / households.len() as f64
    }
}

impl Environment<u64, Household> for SegregationEnv {
    fn step(&mut self, _time: u64, _agents: &[Household]) -> BehaviorResult<()> {
        self.moves = 0;
        Ok(())
    }

    fn commit(&mut self, time: u64, agents: &[Household]) -> BehaviorResult<()> {
        debug!(time, moves = self.moves, households = agents.len(), "relocations applied");
        Ok(())
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Creates households with sequential ids and coin-flip colors.
pub struct HouseholdFactory {
    ids:        IdGenerator,
    rng:        SimRng,
    similarity: f64,
}

impl HouseholdFactory {
    pub fn new(rng: SimRng, similarity: f64) -> Self {
        Self { ids: IdGenerator::new(), rng, similarity }
    }

    pub fn create(&mut self, cell: Cell) -> Household {
        let color = if self.rng.gen_bool(0.5) { Color::Blue } else { Color::Orange };
        Household { id: self.ids.next_id(), color, cell, similarity: self.similarity }
    }
}

/// Fill a grid at the configured density and return the households placed.
pub fn populate(params: &Params, rng: &mut SimRng) -> GridResult<(Vec<Household>, Grid<Occupant>)> {
    let mut factory = HouseholdFactory::new(rng.child(1), params.similarity_fraction());
    let mut grid = Grid::new(params.width, params.height);
    let mut households = Vec::new();

    for x in 0..params.width {
        for y in 0..params.height {
            if rng.gen_bool(params.density_fraction()) {
                let household = factory.create(Cell::new(x, y));
                grid.set(household.cell, Occupant { id: household.id, color: household.color })?;
                households.push(household);
            }
        }
    }
    Ok((households, grid))
}

/// Build one realization of the model, reporting through `observer`.
pub fn build<O>(params: &Params, observer: O) -> anyhow::Result<SegregationSim<O>>
where
    O: Observer<u64, Household, SegregationEnv>,
{
    let mut rng = params.run.make_rng();
    let (households, grid) = populate(params, &mut rng)?;
    let env = SegregationEnv::new(grid, rng.child(2));
    let time = params.run.fixed_time()?;

    let sim = SimBuilder::new(households, env, time)
        .scheduler(RandomOrderScheduler::new(rng.child(3)))
        .observer(observer)
        .two_stage()?;
    Ok(sim)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

/// Prints the share of happy households at start, after every step, and at
/// the end.
pub struct StdoutObserver<W> {
    out: W,
}

impl<W: Write> StdoutObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer<u64, Household, SegregationEnv> for StdoutObserver<W> {
    fn start(&mut self, _time: u64, agents: &[Household], env: &SegregationEnv) -> ObserverResult<Control> {
        writeln!(self.out, "Starting: {:.1}% agents happy", env.happy_percent(agents))?;
        Ok(Control::Continue)
    }

    fn step(&mut self, time: u64, agents: &[Household], env: &SegregationEnv) -> ObserverResult<Control> {
        writeln!(
            self.out,
            "Step {time}: {:.1}% agents happy ({} moved)",
            env.happy_percent(agents),
            env.moves_last_step()
        )?;
        Ok(Control::Continue)
    }

    fn done(&mut self, agents: &[Household], env: &SegregationEnv) -> ObserverResult<()> {
        writeln!(self.out, "Ending: {:.1}% agents happy", env.happy_percent(agents))?;
        Ok(())
    }
}
