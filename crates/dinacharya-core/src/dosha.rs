//! Dosha phases of the day.
//!
//! The waking day is split into fixed-length energy phases starting at wake
//! time: Kapha, Pitta, Vata, and (if the day is long enough) an evening Kapha
//! that runs until sleep.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimeFormatError;
use crate::time::{parse_clock, ClockTime, Minutes};

/// Default phase length: four hours.
pub const DEFAULT_PHASE_LENGTH_MINUTES: Minutes = 240;

/// A named daily energy window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dosha {
    Kapha,
    Pitta,
    Vata,
}

impl Dosha {
    pub fn as_str(self) -> &'static str {
        match self {
            Dosha::Kapha => "Kapha",
            Dosha::Pitta => "Pitta",
            Dosha::Vata => "Vata",
        }
    }

    /// What kind of work suits this phase.
    pub fn description(self) -> &'static str {
        match self {
            Dosha::Kapha => {
                "Slow & steady -- ideal for planning, light admin, and easing into the day."
            }
            Dosha::Pitta => {
                "Sharp & focused -- peak time for deep work, analysis, and important decisions."
            }
            Dosha::Vata => {
                "Creative & expansive -- best for brainstorming, creative tasks, and flexible thinking."
            }
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dosha phase, bounded in minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub dosha: Dosha,
    pub start: Minutes,
    pub end: Minutes,
}

impl Phase {
    pub fn new(dosha: Dosha, start: Minutes, end: Minutes) -> Self {
        Self { dosha, start, end }
    }

    pub fn duration_minutes(&self) -> Minutes {
        self.end.saturating_sub(self.start)
    }

    /// A phase only carries work time when it ends after it starts.
    pub fn is_positive(&self) -> bool {
        self.end > self.start
    }

    pub fn start_clock(&self) -> ClockTime {
        ClockTime::wrapping(self.start)
    }

    pub fn end_clock(&self) -> ClockTime {
        ClockTime::wrapping(self.end)
    }
}

/// Compute the dosha phases between `wake` and `sleep` (both in minutes).
///
/// Phases that would have no duration are dropped. Boundaries are wrapped into
/// a single day, so a phase running past midnight comes out with `end < start`
/// and carries no work time downstream.
pub fn map_dosha_phases(wake: Minutes, sleep: Minutes, phase_length: Minutes) -> Vec<Phase> {
    let kapha_end = wake.saturating_add(phase_length);
    let pitta_end = kapha_end.saturating_add(phase_length);
    let vata_end = pitta_end.saturating_add(phase_length);

    let mut raw = vec![
        Phase::new(Dosha::Kapha, wake, kapha_end),
        Phase::new(Dosha::Pitta, kapha_end, pitta_end),
        Phase::new(Dosha::Vata, pitta_end, vata_end),
    ];

    if sleep > vata_end {
        raw.push(Phase::new(Dosha::Kapha, vata_end, sleep));
    }

    raw.into_iter()
        .filter(Phase::is_positive)
        .map(|p| {
            Phase::new(
                p.dosha,
                p.start_clock().minutes(),
                p.end_clock().minutes(),
            )
        })
        .collect()
}

/// Parse wake/sleep clock strings and map the day's phases.
pub fn map_dosha_phases_str(
    wake: &str,
    sleep: &str,
    phase_length: Minutes,
) -> Result<Vec<Phase>, TimeFormatError> {
    Ok(map_dosha_phases(
        parse_clock(wake)?,
        parse_clock(sleep)?,
        phase_length,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_day_has_four_phases() {
        let phases = map_dosha_phases_str("07:00", "23:00", DEFAULT_PHASE_LENGTH_MINUTES).unwrap();
        assert_eq!(
            phases,
            vec![
                Phase::new(Dosha::Kapha, 420, 660),
                Phase::new(Dosha::Pitta, 660, 900),
                Phase::new(Dosha::Vata, 900, 1140),
                Phase::new(Dosha::Kapha, 1140, 1380),
            ]
        );
    }

    #[test]
    fn short_day_skips_evening_kapha() {
        let phases = map_dosha_phases_str("07:00", "19:00", DEFAULT_PHASE_LENGTH_MINUTES).unwrap();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[2].dosha, Dosha::Vata);
        assert_eq!(phases[2].end_clock().to_string(), "19:00");
    }

    #[test]
    fn late_wake_wraps_phase_boundaries() {
        let phases = map_dosha_phases_str("16:00", "23:30", DEFAULT_PHASE_LENGTH_MINUTES).unwrap();
        // Vata runs 00:00 - 04:00 after wrapping; Pitta straddles midnight.
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0], Phase::new(Dosha::Kapha, 960, 1200));
        assert_eq!(phases[1], Phase::new(Dosha::Pitta, 1200, 0));
        assert!(!phases[1].is_positive());
        assert_eq!(phases[2], Phase::new(Dosha::Vata, 0, 240));
    }

    #[test]
    fn huge_phase_length_saturates() {
        let phases = map_dosha_phases(420, 1380, 2_000_000_000);
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].dosha, Dosha::Kapha);
        assert_eq!(phases[0].start, 420);
        assert_eq!(phases[2].dosha, Dosha::Vata);
    }

    #[test]
    fn far_future_wake_keeps_only_first_phase() {
        // 71582788:00 is 15 minutes short of u32::MAX.
        let phases = map_dosha_phases_str("71582788:00", "23:00", DEFAULT_PHASE_LENGTH_MINUTES)
            .unwrap();
        assert_eq!(phases, vec![Phase::new(Dosha::Kapha, 240, 255)]);
    }

    #[test]
    fn custom_phase_length() {
        let phases = map_dosha_phases(360, 1320, 180);
        assert_eq!(phases[0], Phase::new(Dosha::Kapha, 360, 540));
        assert_eq!(phases[3], Phase::new(Dosha::Kapha, 900, 1320));
    }

    #[test]
    fn rejects_malformed_wake_time() {
        assert!(map_dosha_phases_str("seven", "23:00", 240).is_err());
    }

    #[test]
    fn dosha_displays_name() {
        assert_eq!(Dosha::Pitta.to_string(), "Pitta");
        assert!(Dosha::Vata.description().contains("Creative"));
    }
}
