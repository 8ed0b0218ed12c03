use grid_multiagent::{Cell, Coordinator, Scenario, ScenarioError};

// One agent crosses an 8x8 grid with a wall over rows 0-6 of column 3:
// ...#....
// ...#....
// ...#....
// ...#....
// ...#....
// ...#....
// ...#....
// ........
// start (0, 0), goal (7, 7); the only crossing is past the wall tip at row 7.
fn main() -> Result<(), ScenarioError> {
    let scenario = Scenario {
        size: 8,
        obstacles: (0..7).map(|row| Cell::new(row, 3)).collect(),
        agents: vec![(Cell::new(0, 0), Cell::new(7, 7))],
    };
    let mut coordinator = Coordinator::new(&scenario)?;
    println!("{}", coordinator.grid());
    while !coordinator.all_at_goal() && coordinator.ticks() < 64 {
        let report = coordinator.tick();
        println!("tick {}:", report.tick);
        println!("{}", coordinator.grid());
    }
    if coordinator.all_at_goal() {
        println!("goal reached after {} ticks", coordinator.ticks());
    } else {
        println!("stalled after {} ticks", coordinator.ticks());
    }
    Ok(())
}
