use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use dinacharya_core::{DayPlanner, PlanRequest, PlannerConfig, StressLevel, Task, WorkWindow};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use tracing::{debug, info};

use crate::{prompt, render};

#[derive(Args)]
pub struct PlanArgs {
    /// Wake-up time (HH:MM)
    #[arg(long, required_unless_present_any = ["input", "interactive"])]
    wake: Option<String>,
    /// Sleep time (HH:MM)
    #[arg(long, required_unless_present_any = ["input", "interactive"])]
    sleep: Option<String>,
    /// Work window as START-END (repeatable)
    #[arg(long = "work", value_name = "START-END", value_parser = parse_work_range)]
    work: Vec<(String, String)>,
    /// Stress level (Low/Medium/High)
    #[arg(long)]
    stress: Option<String>,
    /// Task as NAME=TYPE (repeatable)
    #[arg(long = "task", value_name = "NAME=TYPE", value_parser = parse_task)]
    tasks: Vec<Task>,
    /// Read the day from a JSON file
    #[arg(long, conflicts_with_all = ["wake", "sleep", "work", "stress", "tasks", "interactive"])]
    input: Option<PathBuf>,
    /// Answer prompts on stdin instead of passing flags
    #[arg(short, long, conflicts_with_all = ["wake", "sleep", "work", "stress", "tasks"])]
    interactive: bool,
    /// Day being planned (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Seed for affirmation choice
    #[arg(long)]
    seed: Option<u64>,
    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_work_range(s: &str) -> Result<(String, String), String> {
    WorkWindow::parse_range(s).map_err(|e| e.to_string())?;
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| format!("expected START-END, got {s:?}"))?;
    Ok((start.trim().to_string(), end.trim().to_string()))
}

fn parse_task(s: &str) -> Result<Task, String> {
    if s.trim().is_empty() {
        return Err("task must not be empty".to_string());
    }
    Ok(Task::parse(s))
}

fn build_request(args: &PlanArgs) -> Result<PlanRequest, Box<dyn std::error::Error>> {
    let mut request = if let Some(path) = &args.input {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        serde_json::from_str::<PlanRequest>(&content)?
    } else if args.interactive {
        let stdin = std::io::stdin();
        let mut output = std::io::stdout();
        prompt::collect_request(&mut stdin.lock(), &mut output)?
    } else {
        PlanRequest {
            wake_time: args.wake.clone().unwrap_or_default(),
            sleep_time: args.sleep.clone().unwrap_or_default(),
            work_hours: args.work.clone(),
            stress_level: args
                .stress
                .as_deref()
                .map(StressLevel::from)
                .unwrap_or_default(),
            tasks: args.tasks.clone(),
            date: None,
        }
    };

    if let Some(date) = args.date {
        request.date = Some(date);
    }
    if request.date.is_none() {
        request.date = Some(chrono::Local::now().date_naive());
    }
    Ok(request)
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => PlannerConfig::load_from(path)?,
        None => PlannerConfig::load()?,
    };
    let request = build_request(&args)?;
    debug!(?request, "plan request");

    let mut rng = match args.seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };

    let plan = DayPlanner::with_config(config).plan(&request, &mut rng)?;
    info!(
        entries = plan.schedule.len(),
        interventions = plan.interventions.len(),
        "day planned"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render::plan(&plan));
    }
    Ok(())
}
