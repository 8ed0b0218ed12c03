use grid_multiagent::{Cell, Coordinator, Scenario, ScenarioError};

// Two agents cross at right angles on an empty 8x8 grid: one walks column 2
// from (0, 2) to (4, 2), the other walks row 2 from (2, 0) to (2, 4). Both
// want (2, 2) on the same tick; the conflict is detected, one agent yields,
// and both still reach their goals.
fn main() -> Result<(), ScenarioError> {
    let scenario = Scenario {
        size: 8,
        obstacles: vec![],
        agents: vec![
            (Cell::new(0, 2), Cell::new(4, 2)),
            (Cell::new(2, 0), Cell::new(2, 4)),
        ],
    };
    let mut coordinator = Coordinator::new(&scenario)?;
    println!("{}", coordinator.grid());
    while !coordinator.all_at_goal() && coordinator.ticks() < 32 {
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
