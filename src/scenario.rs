use crate::cell::Cell;
use thiserror::Error;

/// A configuration problem that must stop a simulation from being built.
/// Everything here is fatal: a scenario that fails validation is a setup bug,
/// not a condition to recover from at runtime.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("cell {0} lies outside the {1}x{1} grid")]
    OutOfBounds(Cell, usize),
    #[error("agent {0} has an endpoint {1} inside an obstacle")]
    EndpointInObstacle(usize, Cell),
    #[error("agents {0} and {1} share the start cell {2}")]
    SharedStart(usize, usize, Cell),
    #[error("agents {0} and {1} share the goal cell {2}")]
    SharedGoal(usize, usize, Cell),
}

/// Static description of a simulation: grid dimension, obstacle cells, and
/// one (start, goal) pair per agent, in agent index order. Plain data; the
/// [Coordinator](crate::Coordinator) validates it and builds the live grid
/// and agents from it.
///
/// One agent's goal may be another agent's start: the first agent is expected
/// to have moved on by the time the other arrives.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    pub size: usize,
    pub obstacles: Vec<Cell>,
    pub agents: Vec<(Cell, Cell)>,
}

impl Scenario {
    /// Checks the configuration against the grid bounds and the per-agent
    /// endpoint rules, reporting the first violation found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for cell in &self.obstacles {
            if !self.in_bounds(cell) {
                return Err(ScenarioError::OutOfBounds(*cell, self.size));
            }
        }
        for (index, (start, goal)) in self.agents.iter().enumerate() {
            for cell in [start, goal] {
                if !self.in_bounds(cell) {
                    return Err(ScenarioError::OutOfBounds(*cell, self.size));
                }
                if self.obstacles.contains(cell) {
                    return Err(ScenarioError::EndpointInObstacle(index, *cell));
                }
            }
        }
        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                if self.agents[i].0 == self.agents[j].0 {
                    return Err(ScenarioError::SharedStart(i, j, self.agents[i].0));
                }
                if self.agents[i].1 == self.agents[j].1 {
                    return Err(ScenarioError::SharedGoal(i, j, self.agents[i].1));
                }
            }
        }
        Ok(())
    }

    fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.size
            && (cell.col as usize) < self.size
    }
}
