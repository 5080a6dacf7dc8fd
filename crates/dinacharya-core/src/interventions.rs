//! Grounding interventions driven by accumulated work time.
//!
//! Every time another full interval (three hours by default) of real work has
//! been scheduled, a zero-length grounding prompt is injected right after the
//! task that crossed the line. Breaks never advance the work clock.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::distributor::ScheduleEntry;
use crate::dosha::Dosha;
use crate::time::{ClockTime, Minutes};

/// Default minutes of work between prompts.
pub const DEFAULT_INTERVENTION_INTERVAL_MINUTES: Minutes = 180;

/// A grounding message and the theme it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affirmation {
    pub message: &'static str,
    pub theme: &'static str,
}

/// The built-in affirmation set. Themes are unique.
pub static AFFIRMATIONS: [Affirmation; 7] = [
    Affirmation {
        message: "You've been at it for 3 hours. Drink a glass of warm water and roll your shoulders back.",
        theme: "Body Check-in",
    },
    Affirmation {
        message: "Pause for a moment. Take 3 slow, deep breaths before you continue.",
        theme: "Breathe & Reset",
    },
    Affirmation {
        message: "Step away from the screen for 5 minutes -- no phone, just stillness.",
        theme: "Screen Break",
    },
    Affirmation {
        message: "Write down one clear intention for the next hour before you dive back in.",
        theme: "Clarity Anchor",
    },
    Affirmation {
        message: "Close your eyes, breathe out slowly, and soften your jaw. You're doing well.",
        theme: "Tension Release",
    },
    Affirmation {
        message: "Feel your feet on the floor for 30 seconds. Ground yourself before the next block.",
        theme: "Grounding",
    },
    Affirmation {
        message: "Rest is not lost time -- it's how ideas crystallise. Take a short walk if you can.",
        theme: "Rest Prompt",
    },
];

/// Pick an affirmation whose theme is not in `used_themes`, uniformly at
/// random. Once every theme has been used, any affirmation may be picked.
pub fn pick_affirmation<R: Rng + ?Sized>(
    rng: &mut R,
    used_themes: &[&str],
) -> &'static Affirmation {
    let unused: Vec<&'static Affirmation> = AFFIRMATIONS
        .iter()
        .filter(|a| !used_themes.contains(&a.theme))
        .collect();

    let picked = if unused.is_empty() {
        AFFIRMATIONS.choose(rng)
    } else {
        unused.choose(rng).copied()
    };
    picked.unwrap_or(&AFFIRMATIONS[0])
}

/// A grounding prompt placed in the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionEntry {
    pub task_name: String,
    pub phase: Dosha,
    pub start: ClockTime,
    /// Always equal to `start`.
    pub end: ClockTime,
    pub theme: String,
    pub message: String,
    /// Name of the task during which the threshold was crossed.
    pub triggered_by: String,
    /// The work-minute threshold that fired this prompt.
    pub trigger_reason: Minutes,
}

impl InterventionEntry {
    pub fn reason_text(&self) -> String {
        format!("{} min of work completed", self.trigger_reason)
    }
}

/// An item of the enriched schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanEntry {
    Task(ScheduleEntry),
    Intervention(InterventionEntry),
}

impl PlanEntry {
    pub fn is_intervention(&self) -> bool {
        matches!(self, PlanEntry::Intervention(_))
    }

    pub fn is_break(&self) -> bool {
        matches!(self, PlanEntry::Task(e) if e.is_break)
    }

    pub fn start(&self) -> ClockTime {
        match self {
            PlanEntry::Task(e) => e.start,
            PlanEntry::Intervention(i) => i.start,
        }
    }
}

impl From<ScheduleEntry> for PlanEntry {
    fn from(entry: ScheduleEntry) -> Self {
        PlanEntry::Task(entry)
    }
}

/// Output of one injection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injection {
    /// The input schedule with prompts inlined after their triggering task.
    pub enriched: Vec<PlanEntry>,
    /// Every prompt fired, in firing order.
    pub log: Vec<InterventionEntry>,
}

/// Running state of one injection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdCounter {
    pub cumulative_work_minutes: Minutes,
    pub next_trigger_at: Minutes,
    pub used_themes: Vec<&'static str>,
}

impl ThresholdCounter {
    pub fn new(interval: Minutes) -> Self {
        Self {
            cumulative_work_minutes: 0,
            next_trigger_at: interval,
            used_themes: Vec::new(),
        }
    }
}

/// Injector configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectorConfig {
    /// Minutes of real work between prompts (minimum 1)
    pub interval_minutes: Minutes,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_INTERVENTION_INTERVAL_MINUTES,
        }
    }
}

/// Injects grounding prompts into a finished schedule.
pub struct InterventionInjector {
    config: InjectorConfig,
}

impl InterventionInjector {
    pub fn new() -> Self {
        Self {
            config: InjectorConfig::default(),
        }
    }

    pub fn with_config(config: InjectorConfig) -> Self {
        Self { config }
    }

    fn interval(&self) -> Minutes {
        self.config.interval_minutes.max(1)
    }

    /// Walk `schedule` and inject a prompt each time cumulative work time
    /// crosses the next multiple of the interval.
    pub fn inject<R: Rng + ?Sized>(&self, schedule: &[ScheduleEntry], rng: &mut R) -> Injection {
        let entries: Vec<PlanEntry> = schedule.iter().cloned().map(PlanEntry::from).collect();
        self.inject_entries(&entries, rng)
    }

    /// Like [`inject`](Self::inject), but over an already-enriched schedule.
    /// Existing prompts are carried through and do not count as work.
    pub fn inject_entries<R: Rng + ?Sized>(&self, entries: &[PlanEntry], rng: &mut R) -> Injection {
        let interval = self.interval();
        let mut counter = ThresholdCounter::new(interval);
        let mut injection = Injection::default();

        for entry in entries {
            injection.enriched.push(entry.clone());

            let task = match entry {
                PlanEntry::Task(task) if !task.is_break => task,
                _ => continue,
            };
            let Some(duration) = task.duration_minutes() else {
                continue;
            };

            counter.cumulative_work_minutes += duration;

            while counter.cumulative_work_minutes >= counter.next_trigger_at {
                let affirmation = pick_affirmation(rng, &counter.used_themes);
                counter.used_themes.push(affirmation.theme);

                let overshoot = counter.cumulative_work_minutes - counter.next_trigger_at;
                let fire_at = task.start.plus(duration - overshoot);

                let intervention = InterventionEntry {
                    task_name: format!("Grounding Prompt [{}]", affirmation.theme),
                    phase: task.phase,
                    start: fire_at,
                    end: fire_at,
                    theme: affirmation.theme.to_string(),
                    message: affirmation.message.to_string(),
                    triggered_by: task.task_name.clone(),
                    trigger_reason: counter.next_trigger_at,
                };
                info!(
                    at = %fire_at,
                    after = %task.task_name,
                    threshold = counter.next_trigger_at,
                    theme = affirmation.theme,
                    "grounding prompt fired"
                );

                injection.enriched.push(PlanEntry::Intervention(intervention.clone()));
                injection.log.push(intervention);

                counter.next_trigger_at += interval;
            }
        }

        injection
    }
}

impl Default for InterventionInjector {
    fn default() -> Self {
        Self::new()
    }
}
