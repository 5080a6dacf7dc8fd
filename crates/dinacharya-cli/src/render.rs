//! Plain-text rendering of plans.
//!
//! Every function returns a `String` so output can be tested without
//! capturing stdout.

use std::fmt::Write;

use dinacharya_core::{DayPlan, InterventionEntry, Notice, Phase, PlanEntry};

const RULE_WIDTH: usize = 52;

/// Dosha phases with a description line each.
pub fn phases(phases: &[Phase]) -> String {
    let mut out = String::from("Your Dosha Phases for the Day:\n");
    for phase in phases {
        let _ = writeln!(
            out,
            "  {}: {} - {}",
            phase.dosha,
            phase.start_clock(),
            phase.end_clock()
        );
        let _ = writeln!(out, "    {}", phase.dosha.description());
    }
    out
}

/// Scheduling notes and warnings, one per line.
pub fn notices(notices: &[Notice]) -> String {
    notices.iter().map(|n| format!("{n}\n")).collect()
}

/// The enriched schedule with grounding prompts inline.
pub fn schedule(entries: &[PlanEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry {
            PlanEntry::Task(task) => {
                let _ = write!(
                    out,
                    "{} - {}: {} ({})",
                    task.start, task.end, task.task_name, task.phase
                );
                if task.is_break {
                    out.push_str(" [BREAK]");
                }
                out.push('\n');
            }
            PlanEntry::Intervention(prompt) => {
                let _ = writeln!(
                    out,
                    "\n  >> GROUNDING PROMPT at {} — {}",
                    prompt.start, prompt.task_name
                );
                let _ = writeln!(out, "     -> {}\n", prompt.message);
            }
        }
    }
    out
}

/// End-of-day summary of every prompt that fired.
pub fn summary(log: &[InterventionEntry]) -> String {
    if log.is_empty() {
        return "\nNo interventions triggered — great pacing today!\n".to_string();
    }

    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}");
    out.push_str("===  Today's Grounding Prompts (Summary)  ===\n");
    let _ = writeln!(out, "{rule}");
    for (i, item) in log.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n[{}] At {} — after '{}'",
            i + 1,
            item.start,
            item.triggered_by
        );
        let _ = writeln!(out, "    Reason  : {}", item.reason_text());
        let _ = writeln!(out, "    Theme   : {}", item.theme);
        let _ = writeln!(out, "    Message : {}", item.message);
    }
    out.push('\n');
    out
}

/// Full text report for a planned day.
pub fn plan(plan: &DayPlan) -> String {
    let mut out = String::new();
    if let Some(date) = plan.date {
        let _ = writeln!(out, "Plan for {}\n", date.format("%A, %B %-d %Y"));
    }
    out.push_str(&phases(&plan.phases));
    out.push('\n');
    out.push_str(&notices(&plan.notices));
    out.push_str("\n=== Your Dinacharya Daily Schedule ===\n\n");
    out.push_str(&schedule(&plan.enriched));
    out.push_str(&summary(&plan.interventions));
    out
}
