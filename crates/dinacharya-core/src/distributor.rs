//! Phase-aware task distribution.
//!
//! This module places a day's tasks into work slots:
//! - Buckets each task under the phase that suits its type
//! - Moves tasks whose ideal phase has no work time onto phases that do,
//!   round-robin in day order
//! - Splits each phase's work time evenly among its tasks
//! - Inserts a micro-break in the middle of any block long enough to need one

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dosha::{Dosha, Phase};
use crate::notice::Notice;
use crate::slots::{intersect, normalize_windows, WorkWindow};
use crate::task::{BreakThresholds, StressLevel, Task};
use crate::time::{ClockTime, Minutes};

/// Label used for inserted micro-breaks.
pub const MICRO_BREAK_LABEL: &str = "Micro-Break";

/// One block of the laid-out day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task_name: String,
    pub phase: Dosha,
    pub start: ClockTime,
    pub end: ClockTime,
    pub is_break: bool,
}

impl ScheduleEntry {
    /// Length in minutes, or `None` when the block wrapped past midnight or
    /// has no length.
    pub fn duration_minutes(&self) -> Option<Minutes> {
        let minutes = self.start.minutes_until(self.end);
        (minutes > 0).then(|| minutes as Minutes)
    }
}

/// Where a task ended up before time was divided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub task_name: String,
    pub phase: Dosha,
    /// Start of the phase instance the task was bucketed into.
    pub phase_start: Minutes,
    /// True when the task was moved off its ideal phase.
    pub fallback: bool,
}

/// Result of distributing a day's tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Schedule entries sorted by start time.
    pub entries: Vec<ScheduleEntry>,
    /// Bucket assignment per task, in input order.
    pub assignments: Vec<Assignment>,
    pub notices: Vec<Notice>,
}

/// Distributor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributorConfig {
    /// Block length that earns a micro-break, per stress level
    pub break_thresholds: BreakThresholds,
    /// Upper bound on a micro-break's length (minutes)
    pub micro_break_minutes: Minutes,
}

impl Default for DistributorConfig {
    fn default() -> Self {
        Self {
            break_thresholds: BreakThresholds::default(),
            micro_break_minutes: 5,
        }
    }
}

/// Raw entry before wrapping into clock time.
struct Placed {
    task_name: String,
    phase: Dosha,
    start: Minutes,
    end: Minutes,
    is_break: bool,
}

/// Places tasks into dosha phases.
pub struct TaskDistributor {
    config: DistributorConfig,
}

impl TaskDistributor {
    /// Create a distributor with default config
    pub fn new() -> Self {
        Self {
            config: DistributorConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: DistributorConfig) -> Self {
        Self { config }
    }

    /// Lay out `tasks` across the work-hour portion of `phases`.
    ///
    /// # Arguments
    /// * `tasks` - Tasks in the order they were entered
    /// * `phases` - The day's phases in day order
    /// * `windows` - Declared work windows, in any order
    /// * `stress` - Stress level selecting the micro-break threshold
    pub fn distribute(
        &self,
        tasks: &[Task],
        phases: &[Phase],
        windows: &[WorkWindow],
        stress: &StressLevel,
    ) -> Distribution {
        let windows = normalize_windows(windows);
        let phases: Vec<&Phase> = phases.iter().filter(|p| p.is_positive()).collect();

        // Work slots per phase instance, in window order.
        let phase_slots: Vec<Vec<(Minutes, Minutes)>> =
            phases.iter().map(|p| intersect(p, &windows)).collect();

        let mut buckets: Vec<Vec<&Task>> = vec![Vec::new(); phases.len()];
        let mut assignments: Vec<Option<Assignment>> = vec![None; tasks.len()];
        let mut notices = Vec::new();
        let mut orphans: Vec<usize> = Vec::new();

        // 1. Bucket by ideal phase, first instance with work time
        for (task_idx, task) in tasks.iter().enumerate() {
            let ideal = task.task_type.ideal_phase();
            let target = phases
                .iter()
                .enumerate()
                .find(|(i, p)| p.dosha == ideal && !phase_slots[*i].is_empty())
                .map(|(i, _)| i);

            match target {
                Some(phase_idx) => {
                    debug!(task = %task.name, phase = %ideal, "bucketed into ideal phase");
                    buckets[phase_idx].push(task);
                    assignments[task_idx] = Some(Assignment {
                        task_name: task.name.clone(),
                        phase: ideal,
                        phase_start: phases[phase_idx].start,
                        fallback: false,
                    });
                }
                None => orphans.push(task_idx),
            }
        }

        // 2. Redistribute orphans round-robin across phases that have work time
        if !orphans.is_empty() {
            let available: Vec<usize> = (0..phases.len())
                .filter(|&i| !phase_slots[i].is_empty())
                .collect();

            if available.is_empty() {
                warn!(orphans = orphans.len(), "no phase overlaps any work window");
                notices.push(Notice::NoOverlap);
            } else {
                for (i, &task_idx) in orphans.iter().enumerate() {
                    let task = &tasks[task_idx];
                    let phase_idx = available[i % available.len()];
                    let phase = phases[phase_idx];

                    info!(
                        task = %task.name,
                        ideal = %task.task_type.ideal_phase(),
                        assigned = %phase.dosha,
                        "rescheduled task into fallback phase"
                    );
                    buckets[phase_idx].push(task);
                    assignments[task_idx] = Some(Assignment {
                        task_name: task.name.clone(),
                        phase: phase.dosha,
                        phase_start: phase.start,
                        fallback: true,
                    });
                    notices.push(Notice::Reassigned {
                        task_name: task.name.clone(),
                        task_type: task.task_type.clone(),
                        ideal_phase: task.task_type.ideal_phase(),
                        assigned_phase: phase.dosha,
                    });
                }
            }
        }

        // 3. Divide each phase's time among its tasks
        let threshold = self.config.break_thresholds.for_stress(stress);
        let mut placed = Vec::new();

        for (phase_idx, phase) in phases.iter().enumerate() {
            let bucket = &buckets[phase_idx];
            if bucket.is_empty() {
                continue;
            }
            self.place_phase(phase, &phase_slots[phase_idx], bucket, threshold, &mut placed);
        }

        // 4. Sort and format
        placed.sort_by_key(|p| p.start);
        let entries = placed
            .into_iter()
            .map(|p| ScheduleEntry {
                task_name: p.task_name,
                phase: p.phase,
                start: ClockTime::wrapping(p.start),
                end: ClockTime::wrapping(p.end),
                is_break: p.is_break,
            })
            .collect();

        Distribution {
            entries,
            assignments: assignments.into_iter().flatten().collect(),
            notices,
        }
    }

    /// Lay out one phase's bucket across its slots.
    ///
    /// Every task gets the same share of the phase. A share may be split over
    /// several slots, but a single block never crosses a slot boundary.
    fn place_phase(
        &self,
        phase: &Phase,
        slots: &[(Minutes, Minutes)],
        bucket: &[&Task],
        threshold: Minutes,
        placed: &mut Vec<Placed>,
    ) {
        if slots.is_empty() {
            return;
        }

        let total: Minutes = slots.iter().map(|(start, end)| end - start).sum();
        let share = (total / bucket.len() as Minutes).max(1);
        debug!(
            phase = %phase.dosha,
            total_minutes = total,
            tasks = bucket.len(),
            share_minutes = share,
            "dividing phase"
        );

        let mut task_index = 0;
        let mut remaining = share;

        'slots: for &(slot_start, slot_end) in slots {
            let mut current = slot_start;

            while task_index < bucket.len() && current < slot_end {
                let task = bucket[task_index];
                let block_start = current;
                let block_end = current.saturating_add(remaining).min(slot_end);

                if block_end <= block_start {
                    break 'slots;
                }

                placed.push(Placed {
                    task_name: task.name.clone(),
                    phase: phase.dosha,
                    start: block_start,
                    end: block_end,
                    is_break: false,
                });

                let used = block_end - block_start;
                if used >= threshold {
                    let mid = block_start + used / 2;
                    let break_end = mid
                        .saturating_add(self.config.micro_break_minutes)
                        .min(block_end - 1);
                    placed.push(Placed {
                        task_name: MICRO_BREAK_LABEL.to_string(),
                        phase: phase.dosha,
                        start: mid,
                        end: break_end,
                        is_break: true,
                    });
                }

                remaining -= used;
                if remaining == 0 {
                    task_index += 1;
                    remaining = share;
                }
                current = block_end;
            }
        }
    }
}

impl Default for TaskDistributor {
    fn default() -> Self {
        Self::new()
    }
}
