//! Work slots: the intersection of dosha phases with declared work windows.

use serde::{Deserialize, Serialize};

use crate::dosha::{Dosha, Phase};
use crate::error::TimeFormatError;
use crate::time::{format_clock, parse_clock, Minutes};

/// A declared work/study window, in minutes since midnight.
///
/// Callers may pass windows unsorted or overlapping; the scheduler runs them
/// through [`normalize_windows`] before laying anything out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub start: Minutes,
    pub end: Minutes,
}

impl WorkWindow {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    /// Parse a pair of `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimeFormatError> {
        Ok(Self::new(parse_clock(start)?, parse_clock(end)?))
    }

    /// Parse a `HH:MM-HH:MM` range.
    pub fn parse_range(range: &str) -> Result<Self, TimeFormatError> {
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| TimeFormatError::InvalidWindow {
                input: range.to_string(),
            })?;
        Self::parse(start.trim(), end.trim())
    }
}

impl std::fmt::Display for WorkWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

/// Convert `(start, end)` string pairs into work windows.
pub fn parse_work_hours<S: AsRef<str>>(
    pairs: &[(S, S)],
) -> Result<Vec<WorkWindow>, TimeFormatError> {
    pairs
        .iter()
        .map(|(start, end)| WorkWindow::parse(start.as_ref(), end.as_ref()))
        .collect()
}

/// A usable interval inside one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSlot {
    pub dosha: Dosha,
    pub start: Minutes,
    pub end: Minutes,
}

impl WorkSlot {
    pub fn duration_minutes(&self) -> Minutes {
        self.end - self.start
    }
}

/// Clip a phase to each work window, keeping only non-empty overlaps.
///
/// Results follow the order of `windows`.
pub fn intersect(phase: &Phase, windows: &[WorkWindow]) -> Vec<(Minutes, Minutes)> {
    windows
        .iter()
        .filter_map(|w| {
            let start = phase.start.max(w.start);
            let end = phase.end.min(w.end);
            (end > start).then_some((start, end))
        })
        .collect()
}

/// Sort windows by start and merge any that overlap or touch.
///
/// Empty or inverted windows are dropped.
pub fn normalize_windows(windows: &[WorkWindow]) -> Vec<WorkWindow> {
    let mut sorted: Vec<WorkWindow> = windows
        .iter()
        .copied()
        .filter(|w| w.end > w.start)
        .collect();
    sorted.sort_by_key(|w| (w.start, w.end));

    let mut merged: Vec<WorkWindow> = Vec::with_capacity(sorted.len());
    for window in sorted {
        match merged.last_mut() {
            Some(last) if window.start <= last.end => last.end = last.end.max(window.end),
            _ => merged.push(window),
        }
    }
    merged
}

/// Every work slot across all phases, sorted by start time.
///
/// Windows are normalized first, so the returned slots never overlap.
pub fn all_work_slots(phases: &[Phase], windows: &[WorkWindow]) -> Vec<WorkSlot> {
    let windows = normalize_windows(windows);
    let windows = windows.as_slice();
    let mut slots: Vec<WorkSlot> = phases
        .iter()
        .flat_map(|phase| {
            intersect(phase, windows)
                .into_iter()
                .map(move |(start, end)| WorkSlot {
                    dosha: phase.dosha,
                    start,
                    end,
                })
        })
        .collect();
    slots.sort_by_key(|s| s.start);
    slots
}
