//! # grid_multiagent
//!
//! A multi-agent pathfinding simulation on a shared occupancy grid. Each
//! agent plans its own orthogonal-step path with a best-first search biased
//! by squared straight-line distance, then all agents advance in lockstep
//! ticks under a [Coordinator] that detects same-cell and head-on conflicts
//! between intended moves and resolves them by making one agent retreat while
//! the other advances. Blocked agents replan from where they stand instead of
//! failing. Connected components of passable cells are pre-computed to avoid
//! flood-filling behaviour when no path exists.
//!
//! ```
//! use grid_multiagent::{Cell, Coordinator, RunOutcome, Scenario};
//!
//! let scenario = Scenario {
//!     size: 8,
//!     obstacles: (0..7).map(|row| Cell::new(row, 3)).collect(),
//!     agents: vec![(Cell::new(0, 0), Cell::new(7, 7))],
//! };
//! let mut coordinator = Coordinator::new(&scenario)?;
//! match coordinator.run(64) {
//!     RunOutcome::Complete { ticks } => println!("done in {} ticks", ticks),
//!     RunOutcome::TickLimit { ticks } => println!("stalled after {} ticks", ticks),
//! }
//! # Ok::<(), grid_multiagent::ScenarioError>(())
//! ```
mod agent;
mod astar;
mod cell;
mod coordinator;
mod grid;
mod planner;
mod scenario;

pub use crate::agent::{Agent, StepOutcome};
pub use crate::cell::Cell;
pub use crate::coordinator::{Coordinator, RunOutcome, TickReport};
pub use crate::grid::{CellState, OccupancyGrid};
pub use crate::planner::plan_path;
pub use crate::scenario::{Scenario, ScenarioError};
