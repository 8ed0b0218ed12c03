use crate::cell::Cell;
use core::fmt;
use log::info;
use petgraph::unionfind::UnionFind;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// No agent and no obstacle.
    Free,
    /// Currently holds an agent; changes as agents move.
    Occupied,
    /// Permanently impassable; placed before a simulation starts.
    Obstacle,
}

/// [OccupancyGrid] is the single shared occupancy map of a simulation: a
/// fixed-size square matrix of [CellState] values. In addition to the raw
/// states it maintains connected components of passable cells in a
/// [UnionFind] structure so that planning between disconnected cells can be
/// rejected without running a search.
///
/// Two predicates matter and they differ on purpose: [is_free](Self::is_free)
/// is the movement-time check (only [CellState::Free] cells can be stepped
/// onto), while [passable](Self::passable) is the planning-time check (only
/// [CellState::Obstacle] blocks a path; cells held by other agents are
/// expected to clear out eventually).
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<CellState>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl OccupancyGrid {
    /// Creates an all-[Free](CellState::Free) grid of `size` x `size` cells
    /// with its components settled.
    pub fn new(size: usize) -> OccupancyGrid {
        let mut grid = OccupancyGrid {
            size,
            cells: vec![CellState::Free; size * size],
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.size
            && (cell.col as usize) < self.size
    }

    /// Flat index of an in-bounds cell. Out-of-range coordinates are a caller
    /// bug: every mutation site validates before it mutates.
    fn ix(&self, cell: &Cell) -> usize {
        assert!(
            self.in_bounds(cell),
            "cell {} lies outside the {}x{} grid",
            cell,
            self.size,
            self.size
        );
        cell.row as usize * self.size + cell.col as usize
    }

    /// The state of a cell, or [None] if out of bounds.
    pub fn state(&self, cell: &Cell) -> Option<CellState> {
        if self.in_bounds(cell) {
            Some(self.cells[cell.row as usize * self.size + cell.col as usize])
        } else {
            None
        }
    }

    /// Movement-time check: in bounds and [Free](CellState::Free).
    pub fn is_free(&self, cell: &Cell) -> bool {
        self.state(cell) == Some(CellState::Free)
    }

    /// Planning-time check: in bounds and not an
    /// [Obstacle](CellState::Obstacle). Occupied cells are passable here.
    pub fn passable(&self, cell: &Cell) -> bool {
        matches!(
            self.state(cell),
            Some(CellState::Free) | Some(CellState::Occupied)
        )
    }

    /// Commits an agent move: `old_cell` becomes [Free](CellState::Free) and
    /// `new_cell` becomes [Occupied](CellState::Occupied). The caller must
    /// have validated `new_cell` with [is_free](Self::is_free) beforehand;
    /// passing `old_cell == new_cell` marks a standing agent.
    pub fn occupy(&mut self, old_cell: &Cell, new_cell: &Cell) {
        let old_ix = self.ix(old_cell);
        let new_ix = self.ix(new_cell);
        self.cells[old_ix] = CellState::Free;
        self.cells[new_ix] = CellState::Occupied;
    }

    /// Marks a cell impassable and flags the components as dirty. Placing
    /// obstacles on cells currently holding an agent is not supported;
    /// obstacles belong to the configuration phase.
    pub fn set_obstacle(&mut self, cell: &Cell) {
        let ix = self.ix(cell);
        if self.cells[ix] != CellState::Obstacle {
            self.cells[ix] = CellState::Obstacle;
            self.components_dirty = true;
        }
    }

    /// Reverts an obstacle cell to free and joins the newly connected
    /// components. Removing an obstacle never breaks a component apart, so no
    /// regeneration is needed if the components were clean.
    pub fn clear_obstacle(&mut self, cell: &Cell) {
        let ix = self.ix(cell);
        if self.cells[ix] != CellState::Obstacle {
            return;
        }
        self.cells[ix] = CellState::Free;
        let neighbours = cell
            .orthogonal_neighbours()
            .into_iter()
            .filter(|c| self.passable(c))
            .map(|c| self.ix(&c))
            .collect::<Vec<usize>>();
        for neighbour_ix in neighbours {
            self.components.union(ix, neighbour_ix);
        }
    }

    /// The passable orthogonal neighbours of a cell with unit step cost, in
    /// the left, right, up, down order of [Cell::orthogonal_neighbours].
    pub fn passable_neighbours(&self, cell: &Cell) -> Vec<(Cell, i32)> {
        cell.orthogonal_neighbours()
            .into_iter()
            .filter(|c| self.passable(c))
            .map(|c| (c, 1))
            .collect::<Vec<_>>()
    }

    /// Checks whether no path can exist between `start` and `goal`. Cells out
    /// of bounds are unreachable by definition. Requires settled components;
    /// call [update](Self::update) after editing obstacles.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            let start_ix = self.ix(start);
            let goal_ix = self.ix(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are in different components", start, goal);
                true
            }
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid
    /// neighbours to the same components. Unioning the right and down
    /// neighbour of every passable cell covers all four-connected adjacencies.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let n = self.size;
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for row in 0..n {
            for col in 0..n {
                let cell = Cell::new(row as i32, col as i32);
                if !self.passable(&cell) {
                    continue;
                }
                let cell_ix = row * n + col;
                let neighbours = vec![
                    Cell::new(cell.row, cell.col + 1),
                    Cell::new(cell.row + 1, cell.col),
                ]
                .into_iter()
                .filter(|c| self.passable(c))
                .map(|c| self.ix(&c))
                .collect::<Vec<usize>>();
                for neighbour_ix in neighbours {
                    self.components.union(cell_ix, neighbour_ix);
                }
            }
        }
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let glyph = match self.cells[row * self.size + col] {
                    CellState::Free => '.',
                    CellState::Occupied => 'A',
                    CellState::Obstacle => '#',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_behaviour() {
        let grid = OccupancyGrid::new(3);
        assert!(grid.is_free(&Cell::new(0, 0)));
        assert!(!grid.is_free(&Cell::new(-1, 0)));
        assert!(!grid.is_free(&Cell::new(0, 3)));
        assert!(!grid.passable(&Cell::new(3, 3)));
        assert_eq!(grid.state(&Cell::new(3, 0)), None);
    }

    #[test]
    fn test_occupy_transitions() {
        let mut grid = OccupancyGrid::new(3);
        let start = Cell::new(1, 1);
        let next = Cell::new(1, 2);
        grid.occupy(&start, &start);
        assert_eq!(grid.state(&start), Some(CellState::Occupied));
        assert!(!grid.is_free(&start));
        assert!(grid.passable(&start));
        grid.occupy(&start, &next);
        assert_eq!(grid.state(&start), Some(CellState::Free));
        assert_eq!(grid.state(&next), Some(CellState::Occupied));
    }

    #[test]
    fn test_wall_splits_components() {
        let mut grid = OccupancyGrid::new(4);
        for row in 0..4 {
            grid.set_obstacle(&Cell::new(row, 2));
        }
        grid.update();
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 3)));
        assert!(!grid.unreachable(&Cell::new(0, 0), &Cell::new(3, 1)));
    }

    #[test]
    fn test_clear_obstacle_rejoins_components() {
        let mut grid = OccupancyGrid::new(4);
        for row in 0..4 {
            grid.set_obstacle(&Cell::new(row, 2));
        }
        grid.update();
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 3)));
        grid.clear_obstacle(&Cell::new(2, 2));
        assert!(!grid.unreachable(&Cell::new(0, 0), &Cell::new(0, 3)));
    }

    #[test]
    fn test_occupied_cells_stay_in_component() {
        let mut grid = OccupancyGrid::new(3);
        let body = Cell::new(1, 1);
        grid.occupy(&body, &body);
        grid.generate_components();
        assert!(!grid.unreachable(&Cell::new(1, 0), &Cell::new(1, 2)));
        assert!(!grid.unreachable(&Cell::new(1, 0), &body));
    }

    #[test]
    fn test_display_glyphs() {
        let mut grid = OccupancyGrid::new(2);
        grid.set_obstacle(&Cell::new(0, 1));
        let agent = Cell::new(1, 0);
        grid.occupy(&agent, &agent);
        assert_eq!(format!("{}", grid), ".#\nA.\n");
    }

    #[test]
    #[should_panic]
    fn test_occupy_out_of_bounds_panics() {
        let mut grid = OccupancyGrid::new(2);
        grid.occupy(&Cell::new(0, 0), &Cell::new(0, 2));
    }
}
