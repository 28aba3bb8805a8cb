//! Command-line and JSON parameters for the segregation model.

use std::fs;
use std::path::Path;

use abm_core::SimConfig;
use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;

pub const USAGE: &str = "\
Schelling segregation model

USAGE:
    segregation [OPTIONS]

OPTIONS:
        --density <1-99>     Percent of cells holding a household [default: 95]
        --similar <0-100>    Percent of like neighbors a household wants [default: 30]
        --size <WxH>         Grid size [default: 50x50]
        --seed <N>           RNG seed [default: 42]
        --steps <N>          Number of time steps [default: 10]
        --config <PATH>      Load parameters from a JSON file; later flags override it
        --delay-ms <N>       Sleep this long after every step [default: 0]
        --interactive        Wait for enter after every step (q quits)
    -h, --help               Print help information

Set RUST_LOG (e.g. RUST_LOG=debug) for engine logging.
";

/// Everything needed to set up one realization of the model.
///
/// Deserializes from JSON with any field omitted falling back to its
/// default:
///
/// ```json
/// { "density": 80, "similar": 50, "width": 20, "height": 20,
///   "run": { "start": 0, "step_size": 1, "num_steps": 25, "seed": 7 } }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Percent of cells that start occupied.
    pub density:     u32,
    /// Percent of neighbors that must share a household's color.
    pub similar:     u32,
    pub width:       usize,
    pub height:      usize,
    pub run:         SimConfig,
    /// Pause between steps, for watching a run scroll by.
    pub delay_ms:    u64,
    pub interactive: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            density:     95,
            similar:     30,
            width:       50,
            height:      50,
            run:         SimConfig::default(),
            delay_ms:    0,
            interactive: false,
        }
    }
}

impl Params {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!((1..=99).contains(&self.density), "density must be within 1-99, got {}", self.density);
        ensure!(self.similar <= 100, "similar must be within 0-100, got {}", self.similar);
        ensure!(self.width > 0 && self.height > 0, "grid size must be non-zero");
        ensure!(self.run.num_steps.is_some(), "the number of steps must be set");
        Ok(())
    }

    pub fn density_fraction(&self) -> f64 {
        f64::from(self.density) / 100.0
    }

    pub fn similarity_fraction(&self) -> f64 {
        f64::from(self.similar) / 100.0
    }
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
pub enum Command {
    Run(Params),
    Help,
}

/// Parse arguments (without the program name).  Flags apply left to right.
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        if flag == "--help" || flag == "-h" {
            return Ok(Command::Help);
        }
        if flag == "--interactive" {
            params.interactive = true;
            continue;
        }
        let Some(value) = args.next() else {
            bail!("{flag} requires a value (see --help)");
        };
        match flag.as_str() {
            "--density" => params.density = parse_number(&flag, &value)?,
            "--similar" => params.similar = parse_number(&flag, &value)?,
            "--size" => (params.width, params.height) = parse_size(&value)?,
            "--seed" => params.run.seed = parse_number(&flag, &value)?,
            "--steps" => params.run.num_steps = Some(parse_number(&flag, &value)?),
            "--delay-ms" => params.delay_ms = parse_number(&flag, &value)?,
            "--config" => params = Params::from_json_file(Path::new(&value))?,
            _ => bail!("unknown argument {flag} (see --help)"),
        }
    }

    params.validate()?;
    Ok(Command::Run(params))
}

fn parse_number<N: std::str::FromStr>(flag: &str, value: &str) -> Result<N> {
    value.parse().map_err(|_| anyhow::anyhow!("invalid value for {flag}: {value}"))
}

/// `"WIDTHxHEIGHT"`, e.g. `"50x50"`.
fn parse_size(value: &str) -> Result<(usize, usize)> {
    let Some((w, h)) = value.split_once('x') else {
        bail!("grid size must look like 50x50, got {value}");
    };
    Ok((parse_number("--size", w)?, parse_number("--size", h)?))
}
