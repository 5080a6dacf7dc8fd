//! # Dinacharya Core Library
//!
//! This library provides the scheduling logic for the Dinacharya day planner.
//! It lays a day's tasks out across Ayurvedic energy phases and then overlays
//! grounding prompts once enough work time has accumulated. Console input and
//! output live in the CLI crate; everything here is pure and returns data.
//!
//! ## Architecture
//!
//! - **Dosha phases**: Kapha, Pitta, Vata windows computed from wake/sleep
//! - **Work slots**: Intersection of phases with declared work windows
//! - **Task distribution**: Ideal-phase bucketing with round-robin fallback,
//!   even time shares and stress-driven micro-breaks
//! - **Interventions**: Grounding prompts every N minutes of real work, with
//!   an injectable random source for affirmation choice
//!
//! ## Key Components
//!
//! - [`DayPlanner`]: Full pipeline for one day
//! - [`TaskDistributor`]: Phase-aware task placement
//! - [`InterventionInjector`]: Cumulative-work prompt injection
//! - [`PlannerConfig`]: TOML configuration

pub mod config;
pub mod distributor;
pub mod dosha;
pub mod error;
pub mod interventions;
pub mod notice;
pub mod planner;
pub mod slots;
pub mod task;
pub mod time;

pub use config::{config_dir, PlannerConfig};
pub use distributor::{Assignment, Distribution, DistributorConfig, ScheduleEntry, TaskDistributor};
pub use dosha::{map_dosha_phases, Dosha, Phase};
pub use error::{ConfigError, CoreError, TimeFormatError};
pub use interventions::{
    pick_affirmation, Affirmation, Injection, InjectorConfig, InterventionEntry,
    InterventionInjector, PlanEntry, AFFIRMATIONS,
};
pub use notice::Notice;
pub use planner::{DayPlan, DayPlanner, PlanRequest};
pub use slots::{all_work_slots, intersect, WorkSlot, WorkWindow};
pub use task::{BreakThresholds, StressLevel, Task, TaskType};
pub use time::{format_clock, parse_clock, ClockTime, Minutes};
