//! Tests for the segregation demo.

use abm_core::{AgentId, SimRng};
use abm_spatial::{Cell, Grid};

use crate::model::{Color, Household, Occupant, SegregationEnv};
use crate::params::Params;

fn small_params() -> Params {
    let mut p = Params { width: 6, height: 5, density: 60, similar: 50, ..Params::default() };
    p.run.num_steps = Some(4);
    p.run.seed = 9;
    p
}

fn household(id: u32, color: Color, x: usize, y: usize, similarity: f64) -> Household {
    Household { id: AgentId(id), color, cell: Cell::new(x, y), similarity }
}

fn place(grid: &mut Grid<Occupant>, h: &Household) {
    grid.set(h.cell, Occupant { id: h.id, color: h.color }).unwrap();
}

// ── Argument parsing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod params_tests {
    use super::*;
    use crate::params::{Command, parse_args};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_gives_defaults() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Run(Params::default()));
    }

    #[test]
    fn flags_override_defaults() {
        let Command::Run(p) = parse_args(args(&[
            "--density", "80", "--similar", "45", "--size", "30x20", "--seed", "7", "--steps", "3",
        ]))
        .unwrap() else {
            panic!("expected a run");
        };
        assert_eq!((p.density, p.similar, p.width, p.height), (80, 45, 30, 20));
        assert_eq!(p.run.seed, 7);
        assert_eq!(p.run.num_steps, Some(3));
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(args(&["--seed", "1", "--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn interactive_takes_no_value() {
        let Command::Run(p) = parse_args(args(&["--interactive", "--steps", "2"])).unwrap() else {
            panic!("expected a run");
        };
        assert!(p.interactive);
        assert_eq!(p.run.num_steps, Some(2));
    }

    #[test]
    fn out_of_range_values_rejected() {
        assert!(parse_args(args(&["--density", "0"])).is_err());
        assert!(parse_args(args(&["--density", "100"])).is_err());
        assert!(parse_args(args(&["--similar", "101"])).is_err());
        assert!(parse_args(args(&["--size", "0x10"])).is_err());
    }

    #[test]
    fn malformed_arguments_rejected() {
        assert!(parse_args(args(&["--size", "50by50"])).is_err());
        assert!(parse_args(args(&["--seed", "abc"])).is_err());
        assert!(parse_args(args(&["--steps"])).is_err());
        assert!(parse_args(args(&["--bogus", "1"])).is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let p: Params = serde_json::from_str(r#"{ "density": 70, "width": 8 }"#).unwrap();
        assert_eq!(p.density, 70);
        assert_eq!(p.width, 8);
        assert_eq!(p.height, 50);
        assert_eq!(p.run.seed, 42);
    }

    #[test]
    fn json_run_section_may_be_partial() {
        let p: Params = serde_json::from_str(r#"{ "run": { "num_steps": 25 } }"#).unwrap();
        assert_eq!(p.run.num_steps, Some(25));
        assert_eq!(p.run.step_size, 1);
        assert_eq!(p.run.seed, 42);
    }
}

// ── Model behavior ────────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use abm_behavior::{BehaviorError, StagedAgent};
    use abm_sim::{RunOutcome, StopReason};

    use super::*;
    use crate::model::{Move, StdoutObserver, build, populate};

    #[test]
    fn happiness_threshold_is_inclusive() {
        let mut grid = Grid::new(3, 1);
        let me = household(0, Color::Blue, 1, 0, 0.5);
        place(&mut grid, &me);
        place(&mut grid, &household(1, Color::Blue, 0, 0, 0.5));
        place(&mut grid, &household(2, Color::Orange, 2, 0, 0.5));
        assert!(me.is_happy(&grid), "1 of 2 like neighbors meets 50%");

        let picky = Household { similarity: 0.51, ..me };
        assert!(!picky.is_happy(&grid));
    }

    #[test]
    fn isolated_household_is_happy() {
        let mut grid = Grid::new(3, 3);
        let h = household(0, Color::Orange, 1, 1, 1.0);
        place(&mut grid, &h);
        assert!(h.is_happy(&grid));
    }

    #[test]
    fn unhappy_household_relocates_to_empty_cell() {
        let mut grid = Grid::new(2, 2);
        let mut me = household(0, Color::Blue, 0, 0, 1.0);
        place(&mut grid, &me);
        place(&mut grid, &household(1, Color::Orange, 1, 0, 1.0));
        let mut env = SegregationEnv::new(grid, SimRng::new(3));

        let intent = me.decide(1, &env).unwrap();
        assert_eq!(intent, Move::Relocate);
        me.commit(1, intent, &mut env).unwrap();

        assert_ne!(me.cell, Cell::new(0, 0));
        assert!(!env.grid.occupied(Cell::new(0, 0)));
        assert_eq!(env.grid.get(me.cell).map(|o| o.id), Some(AgentId(0)));
        assert_eq!(env.grid.len(), 2);
        assert_eq!(env.moves_last_step(), 1);
    }

    #[test]
    fn relocate_on_full_grid_stays_put() {
        let mut grid = Grid::new(2, 1);
        place(&mut grid, &household(0, Color::Blue, 0, 0, 1.0));
        place(&mut grid, &household(1, Color::Orange, 1, 0, 1.0));
        let mut env = SegregationEnv::new(grid, SimRng::new(3));
        assert_eq!(env.relocate(Cell::new(0, 0)).unwrap(), None);
        assert_eq!(env.moves_last_step(), 0);
    }

    #[test]
    fn relocating_from_an_empty_cell_is_an_environment_error() {
        let mut grid = Grid::new(2, 2);
        place(&mut grid, &household(0, Color::Blue, 0, 0, 1.0));
        let mut env = SegregationEnv::new(grid, SimRng::new(3));
        let err = env.relocate(Cell::new(1, 1)).unwrap_err();
        assert!(matches!(err, BehaviorError::Environment(_)), "got {err:?}");
        assert_eq!(env.grid.get(Cell::new(0, 0)).map(|o| o.id), Some(AgentId(0)));
        assert_eq!(env.moves_last_step(), 0);
    }

    #[test]
    fn populate_places_every_household_on_the_grid() {
        let params = small_params();
        let (households, grid) = populate(&params, &mut params.run.make_rng()).unwrap();
        assert_eq!(grid.len(), households.len());
        for (i, h) in households.iter().enumerate() {
            assert_eq!(h.id, AgentId(i as u32), "ids are sequential");
            assert_eq!(grid.get(h.cell), Some(&Occupant { id: h.id, color: h.color }));
        }
    }

    #[test]
    fn full_run_reports_every_step() {
        let params = small_params();
        let mut sim = build(&params, StdoutObserver::new(Vec::new())).unwrap();
        assert_eq!(sim.run().unwrap(), RunOutcome::Stopped(StopReason::Exhausted));
        assert_eq!(sim.steps_completed(), 4);

        let (households, env, observer) = sim.into_parts();
        assert_eq!(env.grid.len(), households.len(), "moves never lose a household");
        for h in &households {
            assert_eq!(env.grid.get(h.cell).map(|o| o.id), Some(h.id));
        }

        let text = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Starting: "));
        assert!(lines[1].starts_with("Step 1: "));
        assert!(lines[4].starts_with("Step 4: "));
        assert!(lines[5].starts_with("Ending: "));
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = || {
            let mut sim = build(&small_params(), StdoutObserver::new(Vec::new())).unwrap();
            sim.run().unwrap();
            let (_, _, observer) = sim.into_parts();
            observer.into_inner()
        };
        assert_eq!(run(), run());
    }
}
