use crate::agent::{Agent, StepOutcome};
use crate::grid::OccupancyGrid;
use crate::scenario::{Scenario, ScenarioError};
use log::{info, warn};

/// Record of one executed tick: the 1-based tick number, the conflicting
/// agent-index pairs found during detection, and what each acting agent did,
/// in the order the actions were applied.
#[derive(Clone, Debug)]
pub struct TickReport {
    pub tick: u64,
    pub conflicts: Vec<(usize, usize)>,
    pub steps: Vec<(usize, StepOutcome)>,
}

/// How a bounded run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every agent reached its goal after this many ticks.
    Complete { ticks: u64 },
    /// The tick budget ran out with at least one agent short of its goal.
    TickLimit { ticks: u64 },
}

/// The [Coordinator] owns the shared grid and all agents and advances the
/// simulation in lockstep ticks. Each tick first observes a consistent
/// snapshot of every agent's intended next cell, then commits moves: either
/// the conflict-resolution pass (when any pair of intentions collides) or the
/// default pass in which every agent steps forward once, in index order.
#[derive(Debug)]
pub struct Coordinator {
    grid: OccupancyGrid,
    agents: Vec<Agent>,
    ticks: u64,
}

impl Coordinator {
    /// Validates a scenario and builds the live simulation from it: grid
    /// with obstacles placed and components settled, every start cell marked
    /// occupied, and one planned agent per (start, goal) pair.
    pub fn new(scenario: &Scenario) -> Result<Coordinator, ScenarioError> {
        scenario.validate()?;
        let mut grid = OccupancyGrid::new(scenario.size);
        for cell in &scenario.obstacles {
            grid.set_obstacle(cell);
        }
        grid.update();
        for (start, _) in &scenario.agents {
            grid.occupy(start, start);
        }
        let agents = scenario
            .agents
            .iter()
            .map(|(start, goal)| Agent::new(*start, *goal, &grid))
            .collect::<Vec<Agent>>();
        info!(
            "coordinator ready: {}x{} grid, {} agents",
            scenario.size,
            scenario.size,
            agents.len()
        );
        Ok(Coordinator {
            grid,
            agents,
            ticks: 0,
        })
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn all_at_goal(&self) -> bool {
        self.agents.iter().all(|agent| agent.has_reached_goal())
    }

    /// Pairwise scan of intended next cells over the pre-move snapshot. A
    /// pair conflicts when both agents intend the same cell, or when each
    /// intends the other's current cell (a head-on swap). Agents without a
    /// next cell take part in no pair. Pairs surface in index order, lower
    /// index first.
    fn detect_conflicts(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                if let (Some(next_i), Some(next_j)) =
                    (self.agents[i].next_cell(), self.agents[j].next_cell())
                {
                    if next_i == next_j {
                        pairs.push((i, j));
                    }
                    if next_i == self.agents[j].position()
                        && next_j == self.agents[i].position()
                    {
                        pairs.push((i, j));
                    }
                }
            }
        }
        pairs
    }

    /// Executes one tick and reports what happened. On a conflict-free tick
    /// every agent steps forward once. Otherwise only the conflicting pairs
    /// act, in discovery order: the lower-indexed agent of each pair retreats
    /// and the higher-indexed one advances. The policy is deliberately greedy
    /// and asymmetric; with pairs always yielding on the same side it can
    /// starve an agent, and it never re-plans globally.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let conflicts = self.detect_conflicts();
        let mut steps: Vec<(usize, StepOutcome)> = Vec::with_capacity(self.agents.len());
        if conflicts.is_empty() {
            for (index, agent) in self.agents.iter_mut().enumerate() {
                steps.push((index, agent.move_forward(&mut self.grid)));
            }
        } else {
            info!(
                "tick {}: {} conflicting pair(s) to resolve",
                self.ticks,
                conflicts.len()
            );
            for &(yielder, keeper) in &conflicts {
                steps.push((yielder, self.agents[yielder].move_backward(&mut self.grid)));
                steps.push((keeper, self.agents[keeper].move_forward(&mut self.grid)));
            }
        }
        TickReport {
            tick: self.ticks,
            conflicts,
            steps,
        }
    }

    /// Ticks until every agent stands on its goal or the budget runs out.
    /// The budget turns a livelocked scenario into an observable
    /// [TickLimit](RunOutcome::TickLimit) instead of a loop that never ends.
    pub fn run(&mut self, max_ticks: u64) -> RunOutcome {
        while !self.all_at_goal() {
            if self.ticks >= max_ticks {
                warn!(
                    "tick limit {} reached with agents short of their goals",
                    max_ticks
                );
                return RunOutcome::TickLimit { ticks: self.ticks };
            }
            self.tick();
        }
        info!("all agents at their goals after {} ticks", self.ticks);
        RunOutcome::Complete { ticks: self.ticks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::grid::CellState;

    #[test]
    fn test_construction_marks_starts_and_plans() {
        let scenario = Scenario {
            size: 4,
            obstacles: vec![],
            agents: vec![
                (Cell::new(0, 0), Cell::new(3, 3)),
                (Cell::new(3, 0), Cell::new(0, 3)),
            ],
        };
        let coordinator = Coordinator::new(&scenario).unwrap();
        assert_eq!(
            coordinator.grid().state(&Cell::new(0, 0)),
            Some(CellState::Occupied)
        );
        assert_eq!(
            coordinator.grid().state(&Cell::new(3, 0)),
            Some(CellState::Occupied)
        );
        assert!(coordinator.agents().iter().all(|a| !a.path().is_empty()));
        assert_eq!(coordinator.ticks(), 0);
    }

    #[test]
    fn test_invalid_scenario_is_refused() {
        let scenario = Scenario {
            size: 4,
            obstacles: vec![Cell::new(0, 0)],
            agents: vec![(Cell::new(0, 0), Cell::new(3, 3))],
        };
        assert_eq!(
            Coordinator::new(&scenario).unwrap_err(),
            ScenarioError::EndpointInObstacle(0, Cell::new(0, 0))
        );
    }

    #[test]
    fn test_agent_already_at_goal_completes_in_zero_ticks() {
        let scenario = Scenario {
            size: 4,
            obstacles: vec![],
            agents: vec![(Cell::new(2, 2), Cell::new(2, 2))],
        };
        let mut coordinator = Coordinator::new(&scenario).unwrap();
        assert_eq!(coordinator.run(10), RunOutcome::Complete { ticks: 0 });
    }

    #[test]
    fn test_head_on_swap_is_detected_and_resolved_asymmetrically() {
        let scenario = Scenario {
            size: 4,
            obstacles: vec![],
            agents: vec![
                (Cell::new(1, 0), Cell::new(1, 3)),
                (Cell::new(1, 1), Cell::new(1, 0)),
            ],
        };
        let mut coordinator = Coordinator::new(&scenario).unwrap();
        let report = coordinator.tick();
        assert_eq!(report.conflicts, vec![(0, 1)]);
        // Agent 0 has only one committed step and cannot retreat; agent 1
        // finds agent 0 still in place and replans through it.
        assert_eq!(
            report.steps,
            vec![(0, StepOutcome::Idle), (1, StepOutcome::Replanned)]
        );
        assert_eq!(coordinator.agents()[0].position(), Cell::new(1, 0));
        assert_eq!(coordinator.agents()[1].position(), Cell::new(1, 1));
    }
}
