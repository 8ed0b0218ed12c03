use core::fmt;

/// A discrete (row, column) grid coordinate. Rows grow downward and columns
/// grow rightward, matching the row-per-line rendering of
/// [OccupancyGrid](crate::OccupancyGrid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The four orthogonal neighbours in left, right, up, down order. The
    /// order is part of the planner contract: it decides which of several
    /// equal-cost paths gets committed.
    pub fn orthogonal_neighbours(&self) -> [Cell; 4] {
        [
            Cell::new(self.row, self.col - 1),
            Cell::new(self.row, self.col + 1),
            Cell::new(self.row - 1, self.col),
            Cell::new(self.row + 1, self.col),
        ]
    }

    /// Sum of the absolute row and column differences.
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Squared straight-line distance, the planner's cost-to-go estimate.
    /// Overestimates the remaining step count on an orthogonal grid, which
    /// biases expansion towards the goal.
    pub fn squared_euclidean(&self, other: &Cell) -> i32 {
        let d_row = self.row - other.row;
        let d_col = self.col - other.col;
        d_row * d_row + d_col * d_col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(a.squared_euclidean(&b), 25);
        assert_eq!(b.manhattan_distance(&b), 0);
        assert_eq!(b.squared_euclidean(&b), 0);
    }

    #[test]
    fn test_neighbour_order() {
        let c = Cell::new(2, 2);
        assert_eq!(
            c.orthogonal_neighbours(),
            [
                Cell::new(2, 1),
                Cell::new(2, 3),
                Cell::new(1, 2),
                Cell::new(3, 2)
            ]
        );
    }
}
