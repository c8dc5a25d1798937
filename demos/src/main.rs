//! Pathfinding and movement-range demo.
//!
//! Run: cargo run --bin tilenav-demo -- [MAP_FILE] [RANGE]
//!
//! The map uses `#` for walls, `.` for floor, and one `S` and one `T` for the
//! start and target. Set `RUST_LOG=debug` to see the search logs.

use log::{info, warn};
use tilenav_core::Terrain;
use tilenav_demos::{DEFAULT_MAP, DEFAULT_RANGE, DemoError, Scenario, overlay};
use tilenav_paths::{NavConfig, Navigator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let text = match args.next() {
        Some(file) => std::fs::read_to_string(&file).map_err(DemoError::from)?,
        None => DEFAULT_MAP.to_string(),
    };
    let range = match args.next() {
        Some(s) => s.parse::<i32>().map_err(|_| DemoError::BadRange(s))?,
        None => DEFAULT_RANGE,
    };

    let scenario = Scenario::parse(&text)?;
    info!(
        "map {}x{}, {} open cells, start {} target {}",
        scenario.grid.width(),
        scenario.grid.height(),
        scenario.grid.count_traversible(),
        scenario.start,
        scenario.target
    );

    let config = NavConfig::default().with_movement_range(range);
    let mut nav = Navigator::with_config(scenario.grid.bounds(), config);

    let path = match nav.find_path(&scenario.grid, scenario.start, scenario.target) {
        Ok(path) => {
            info!(
                "path: {} steps, cost {}, {} cells expanded",
                path.len(),
                path.cost(),
                path.expanded()
            );
            Some(path)
        }
        Err(e) => {
            warn!("{e}");
            None
        }
    };

    let reach = nav.movement_range(&scenario.grid, scenario.start)?;
    info!("{} cells within {range} steps", reach.len());

    println!("{}", overlay(&scenario, path.as_ref(), &reach));
    Ok(())
}
