//! Dosha phase listing.

use dinacharya_core::{DayPlanner, PlannerConfig};

use crate::render;

pub fn run(wake: &str, sleep: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = DayPlanner::with_config(PlannerConfig::load_or_default());
    let phases = planner.phases(wake, sleep)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&phases)?);
    } else {
        print!("{}", render::phases(&phases));
    }
    Ok(())
}
