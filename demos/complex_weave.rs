use grid_multiagent::{Cell, Coordinator, Scenario, ScenarioError};

// Two agents thread a lattice of column walls with a single open corridor
// through row 4:
// .#.#.#..
// .#.#.#..
// .#.#.#..
// .#.#.#..
// ........
// .#.#.#..
// .#.#.#..
// .#.#.#..
// Agent 0 runs (0, 0) -> (7, 7), agent 1 runs (7, 7) -> (7, 0). Both need
// the row-4 corridor in opposite directions, so the greedy retreat/advance
// policy can leave them shuffling there; the run then reports a stall
// instead of hanging.
fn main() -> Result<(), ScenarioError> {
    let mut obstacles: Vec<Cell> = Vec::new();
    for col in [1, 3, 5] {
        for row in 0..4 {
            obstacles.push(Cell::new(row, col));
        }
        for row in 5..8 {
            obstacles.push(Cell::new(row, col));
        }
    }
    let scenario = Scenario {
        size: 8,
        obstacles,
        agents: vec![
            (Cell::new(0, 0), Cell::new(7, 7)),
            (Cell::new(7, 7), Cell::new(7, 0)),
        ],
    };
    let mut coordinator = Coordinator::new(&scenario)?;
    println!("{}", coordinator.grid());
    while !coordinator.all_at_goal() && coordinator.ticks() < 30 {
        let report = coordinator.tick();
        println!("tick {}:", report.tick);
        if !report.conflicts.is_empty() {
            println!("conflicting pairs: {:?}", report.conflicts);
        }
        println!("{}", coordinator.grid());
    }
    if coordinator.all_at_goal() {
        println!("both goals reached after {} ticks", coordinator.ticks());
    } else {
        println!("stalled after {} ticks", coordinator.ticks());
    }
    Ok(())
}
