use crate::astar::astar;
use crate::cell::Cell;
use crate::grid::OccupancyGrid;
use log::info;

/// Computes a path from `start` to `goal` over the given grid: the visited
/// cells in travel order, both endpoints included, every consecutive pair one
/// orthogonal step apart. Returns an empty path if either endpoint is
/// unusable or no route exists; an empty path is the planner's only failure
/// mode.
///
/// Only [Obstacle](crate::CellState::Obstacle) cells block a route. Cells
/// occupied by agents are planned straight through; whether such a cell can
/// actually be entered is decided at movement time, when the occupant may
/// long since have moved on.
pub fn plan_path(grid: &OccupancyGrid, start: &Cell, goal: &Cell) -> Vec<Cell> {
    if !grid.passable(start) || !grid.passable(goal) {
        return Vec::new();
    }
    if grid.unreachable(start, goal) {
        info!("{} is not reachable from {}", goal, start);
        return Vec::new();
    }
    info!("{} is reachable from {}, computing path", goal, start);
    astar(
        start,
        |cell| grid.passable_neighbours(cell),
        |cell| cell.squared_euclidean(goal),
        |cell| cell == goal,
    )
    .map(|(cells, _cost)| cells)
    .unwrap_or_default()
}
