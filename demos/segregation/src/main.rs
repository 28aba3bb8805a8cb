//! segregation: Schelling's model of residential segregation.
//!
//! Households of two colors fill a grid at a given density.  Each step, every
//! household that has fewer like-colored neighbors than it wants picks a
//! random empty cell and moves there.  Decisions are taken against the grid
//! as it stood at the start of the step, then applied in a random order.
//!
//! ```text
//! cargo run -p segregation -- --size 30x30 --similar 50 --steps 20
//! ```

mod model;
mod params;

#[cfg(test)]
mod tests;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use abm_sim::{ChainedObserver, DelayObserver, KeyPauseObserver};

use model::StdoutObserver;
use params::{Command, USAGE};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let params = match params::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Command::Run(params) => params,
    };

    // ── Observers ─────────────────────────────────────────────────────────
    let mut observer = ChainedObserver::new().with(StdoutObserver::new(io::stdout()));
    if params.delay_ms > 0 {
        observer.push(DelayObserver::new(Duration::from_millis(params.delay_ms)));
    }
    if params.interactive {
        observer.push(KeyPauseObserver::stdio());
    }

    // ── Run ───────────────────────────────────────────────────────────────
    let mut sim = model::build(&params, observer)?;
    info!(
        households = sim.agents().len(),
        width = params.width,
        height = params.height,
        seed = params.run.seed,
        "grid populated"
    );

    let t0 = Instant::now();
    let outcome = sim.run()?;
    info!(?outcome, elapsed = ?t0.elapsed(), "run finished");

    Ok(())
}
