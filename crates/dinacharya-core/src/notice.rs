//! Advisories raised while laying out a day.
//!
//! The scheduler never prints. Anything the user should hear about is
//! returned as a `Notice` and rendered by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dosha::Dosha;
use crate::task::TaskType;

/// A non-fatal condition encountered during distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A task's ideal phase had no work-hour overlap, so it was moved.
    Reassigned {
        task_name: String,
        task_type: TaskType,
        ideal_phase: Dosha,
        assigned_phase: Dosha,
    },
    /// No phase overlaps any work window; nothing was scheduled.
    NoOverlap,
}

impl Notice {
    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::NoOverlap)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Reassigned {
                task_name,
                task_type,
                assigned_phase,
                ..
            } => write!(
                f,
                "Note: '{task_name}' ({task_type}) ideal phase has no work-hour overlap. \
                 Rescheduled into {assigned_phase} phase."
            ),
            Notice::NoOverlap => {
                f.write_str("Warning: No work-hour overlap with any phase. No tasks scheduled.")
            }
        }
    }
}
