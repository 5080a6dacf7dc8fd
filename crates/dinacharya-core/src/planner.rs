//! End-to-end day planning.
//!
//! Runs the whole pipeline for one day:
//! wake/sleep -> dosha phases -> task distribution -> grounding prompts.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::distributor::{Assignment, ScheduleEntry, TaskDistributor};
use crate::dosha::{map_dosha_phases_str, Phase};
use crate::error::Result;
use crate::interventions::{InterventionEntry, InterventionInjector, PlanEntry};
use crate::notice::Notice;
use crate::slots::parse_work_hours;
use crate::task::{StressLevel, Task};

/// Everything the user supplies for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub wake_time: String,
    pub sleep_time: String,
    /// `(start, end)` pairs in `HH:MM`.
    pub work_hours: Vec<(String, String)>,
    #[serde(default)]
    pub stress_level: StressLevel,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Calendar day being planned, for display only.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A fully planned day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: Option<NaiveDate>,
    pub stress_level: StressLevel,
    pub phases: Vec<Phase>,
    pub assignments: Vec<Assignment>,
    /// Tasks and breaks, sorted by start.
    pub schedule: Vec<ScheduleEntry>,
    /// `schedule` with grounding prompts inlined.
    pub enriched: Vec<PlanEntry>,
    /// Grounding prompts in firing order.
    pub interventions: Vec<InterventionEntry>,
    pub notices: Vec<Notice>,
}

/// Plans a day from a [`PlanRequest`].
///
/// Holds configuration only; every call builds its own state.
pub struct DayPlanner {
    config: PlannerConfig,
}

impl DayPlanner {
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Map the day's dosha phases from wake and sleep times.
    pub fn phases(&self, wake_time: &str, sleep_time: &str) -> Result<Vec<Phase>> {
        Ok(map_dosha_phases_str(
            wake_time,
            sleep_time,
            self.config.phase_length_minutes,
        )?)
    }

    /// Plan the day. `rng` drives affirmation choice only.
    ///
    /// # Errors
    ///
    /// Returns an error if any time string is not `HH:MM`.
    pub fn plan<R: Rng + ?Sized>(&self, request: &PlanRequest, rng: &mut R) -> Result<DayPlan> {
        let phases = self.phases(&request.wake_time, &request.sleep_time)?;
        let windows = parse_work_hours(&request.work_hours)?;
        debug!(
            phases = phases.len(),
            windows = windows.len(),
            tasks = request.tasks.len(),
            "planning day"
        );

        let distributor = TaskDistributor::with_config(self.config.distributor_config());
        let distribution = distributor.distribute(
            &request.tasks,
            &phases,
            &windows,
            &request.stress_level,
        );

        let injection = InterventionInjector::with_config(self.config.injector_config())
            .inject(&distribution.entries, rng);

        Ok(DayPlan {
            date: request.date,
            stress_level: request.stress_level.clone(),
            phases,
            assignments: distribution.assignments,
            schedule: distribution.entries,
            enriched: injection.enriched,
            interventions: injection.log,
            notices: distribution.notices,
        })
    }
}

impl Default for DayPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dosha::Dosha;
    use crate::error::CoreError;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn request(tasks: Vec<Task>) -> PlanRequest {
        PlanRequest {
            wake_time: "07:00".to_string(),
            sleep_time: "23:00".to_string(),
            work_hours: vec![("09:00".to_string(), "17:00".to_string())],
            stress_level: StressLevel::Low,
            tasks,
            date: None,
        }
    }

    #[test]
    fn report_scenario() {
        let plan = DayPlanner::new()
            .plan(
                &request(vec![Task::new("Report", "Deep Work")]),
                &mut Mcg128Xsl64::seed_from_u64(1),
            )
            .unwrap();

        assert_eq!(plan.phases.len(), 4);
        assert_eq!(plan.schedule.len(), 2);
        assert_eq!(plan.interventions.len(), 1);
        assert_eq!(plan.interventions[0].start.to_string(), "14:00");

        let kinds: Vec<_> = plan
            .enriched
            .iter()
            .map(|e| (e.start().to_string(), e.is_intervention(), e.is_break()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("11:00".to_string(), false, false),
                ("14:00".to_string(), true, false),
                ("13:00".to_string(), false, true),
            ]
        );
    }

    #[test]
    fn phases_use_configured_length() {
        let mut config = PlannerConfig::default();
        config.set("phase_length_minutes", "180").unwrap();
        let phases = DayPlanner::with_config(config).phases("06:00", "22:00").unwrap();
        assert_eq!(phases[1], Phase::new(Dosha::Pitta, 540, 720));
        assert_eq!(phases[3], Phase::new(Dosha::Kapha, 900, 1320));
    }

    #[test]
    fn malformed_work_hours_are_an_error() {
        let mut req = request(vec![]);
        req.work_hours = vec![("9am".to_string(), "17:00".to_string())];
        let err = DayPlanner::new()
            .plan(&req, &mut Mcg128Xsl64::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, CoreError::TimeFormat(_)));
    }

    #[test]
    fn far_future_wake_plans_without_overflow() {
        let mut req = request(vec![Task::new("Report", "Deep Work")]);
        req.wake_time = "71582788:00".to_string();
        let plan = DayPlanner::new()
            .plan(&req, &mut Mcg128Xsl64::seed_from_u64(1))
            .unwrap();
        assert_eq!(plan.phases, vec![Phase::new(Dosha::Kapha, 240, 255)]);
        assert_eq!(plan.notices, vec![Notice::NoOverlap]);
    }

    #[test]
    fn largest_accepted_config_plans_without_overflow() {
        let mut config = PlannerConfig::default();
        config.set("phase_length_minutes", "1000").unwrap();
        config.set("micro_break_minutes", "1440").unwrap();
        config.set("intervention_interval_minutes", "1440").unwrap();
        let plan = DayPlanner::with_config(config)
            .plan(
                &request(vec![Task::new("Report", "Deep Work")]),
                &mut Mcg128Xsl64::seed_from_u64(1),
            )
            .unwrap();
        // Only Kapha keeps a positive span once boundaries wrap.
        assert_eq!(plan.assignments[0].phase, Dosha::Kapha);
        assert!(plan.assignments[0].fallback);
        assert!(plan.interventions.is_empty());

        let brk = plan.schedule.iter().find(|e| e.is_break).unwrap();
        assert_eq!(brk.start.to_string(), "13:00");
        assert_eq!(brk.end.to_string(), "16:59");
    }

    #[test]
    fn request_deserializes_from_json() {
        let req: PlanRequest = serde_json::from_str(
            r#"{
                "wake_time": "06:30",
                "sleep_time": "22:30",
                "work_hours": [["09:00", "12:00"], ["13:00", "18:00"]],
                "stress_level": "High",
                "tasks": [{"name": "Draft", "type": "Creative"}],
                "date": "2026-10-16"
            }"#,
        )
        .unwrap();
        assert_eq!(req.work_hours.len(), 2);
        assert_eq!(req.stress_level, StressLevel::High);
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2026, 10, 16));
    }

    #[test]
    fn empty_task_list_plans_empty_day() {
        let plan = DayPlanner::new()
            .plan(&request(vec![]), &mut Mcg128Xsl64::seed_from_u64(1))
            .unwrap();
        assert!(plan.schedule.is_empty());
        assert!(plan.interventions.is_empty());
        assert!(plan.notices.is_empty());
    }
}
