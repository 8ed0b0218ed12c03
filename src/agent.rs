use crate::cell::Cell;
use crate::grid::OccupancyGrid;
use crate::planner::plan_path;
use log::info;

/// What a single agent did with its turn in a tick. Every degenerate case
/// resolves to an outcome instead of an error; an agent that cannot act this
/// tick simply tries again on the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Advanced one cell along the committed path.
    Moved,
    /// Stepped back one cell along the committed path to yield.
    Retreated,
    /// The next cell was taken and a fresh path was committed; no move yet.
    Replanned,
    /// The target cell was taken and no fresh path exists; stays in place.
    Blocked,
    /// Nothing to do: path exhausted, no path, or the retreat guard unmet.
    Idle,
}

/// An [Agent] walks a committed path cell by cell across the shared
/// [OccupancyGrid]. The path always starts at the cell the agent stood on
/// when the path was computed, so `path[cursor - 1]` is the agent's position
/// whenever `cursor > 0` and `path[cursor]` is the next intended cell.
///
/// Movement validates against the grid at commit time and never fails hard:
/// a blocked forward step triggers a replan from the current position, and a
/// blocked or ineligible retreat leaves the agent where it is.
#[derive(Clone, Debug)]
pub struct Agent {
    position: Cell,
    goal: Cell,
    path: Vec<Cell>,
    cursor: usize,
}

impl Agent {
    /// Creates an agent at `start` with an initial plan towards `goal`. The
    /// caller is responsible for having marked `start` as occupied. With a
    /// non-empty plan the cursor starts at 1 since `path[0]` is `start`
    /// itself; an unreachable goal leaves an empty path and the agent idles.
    pub fn new(start: Cell, goal: Cell, grid: &OccupancyGrid) -> Agent {
        let path = plan_path(grid, &start, &goal);
        let cursor = if path.is_empty() { 0 } else { 1 };
        Agent {
            position: start,
            goal,
            path,
            cursor,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// The committed path, start cell included. Empty if the last (re)plan
    /// found no route.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The cell this agent intends to step onto next, if any.
    pub fn next_cell(&self) -> Option<Cell> {
        self.path.get(self.cursor).copied()
    }

    pub fn has_reached_goal(&self) -> bool {
        self.position == self.goal
    }

    /// Advances one cell along the path if the next cell is free. If it is
    /// taken, replans from the current position: a fresh path is committed
    /// with the cursor at 1 (its first cell is the current position), while
    /// an empty replan keeps the stale path so the same step is retried next
    /// tick. An agent without a next cell idles.
    pub fn move_forward(&mut self, grid: &mut OccupancyGrid) -> StepOutcome {
        let next = match self.next_cell() {
            Some(next) => next,
            None => return StepOutcome::Idle,
        };
        if grid.is_free(&next) {
            grid.occupy(&self.position, &next);
            self.position = next;
            self.cursor += 1;
            StepOutcome::Moved
        } else {
            info!(
                "agent at {} found {} taken, replanning towards {}",
                self.position, next, self.goal
            );
            if self.replan(grid) {
                StepOutcome::Replanned
            } else {
                StepOutcome::Blocked
            }
        }
    }

    /// Steps back to the cell before the previous one on the committed path,
    /// yielding the current cell to another agent. Only eligible mid-path
    /// with at least two committed steps behind (`cursor > 2`); retreating
    /// onto a taken cell is refused.
    pub fn move_backward(&mut self, grid: &mut OccupancyGrid) -> StepOutcome {
        if self.cursor <= 2 || self.cursor >= self.path.len() {
            return StepOutcome::Idle;
        }
        let target = self.path[self.cursor - 2];
        if grid.is_free(&target) {
            grid.occupy(&self.position, &target);
            self.position = target;
            self.cursor -= 1;
            StepOutcome::Retreated
        } else {
            StepOutcome::Blocked
        }
    }

    /// Replaces the path with a fresh plan from the current position and
    /// resets the cursor past the leading current-position cell. Returns
    /// [false] and keeps the stale path if no route exists right now.
    fn replan(&mut self, grid: &OccupancyGrid) -> bool {
        let fresh = plan_path(grid, &self.position, &self.goal);
        if fresh.is_empty() {
            false
        } else {
            self.path = fresh;
            self.cursor = 1;
            true
        }
    }
}
