//! Tasks, task types and stress levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dosha::Dosha;
use crate::time::Minutes;

/// Kind of work a task represents.
///
/// Any label outside the known set is kept verbatim as `Unrecognized` and
/// scheduled as light work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    DeepWork,
    HighStakesDecision,
    Creative,
    LightWork,
    Unrecognized(String),
}

impl TaskType {
    /// Labels accepted for the known task types, in prompt order.
    pub const LABELS: [&'static str; 4] = [
        "Deep Work",
        "Light Work",
        "Creative",
        "High-Stakes Decision",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskType::DeepWork => "Deep Work",
            TaskType::HighStakesDecision => "High-Stakes Decision",
            TaskType::Creative => "Creative",
            TaskType::LightWork => "Light Work",
            TaskType::Unrecognized(label) => label,
        }
    }

    /// The phase this kind of work fits best.
    pub fn ideal_phase(&self) -> Dosha {
        match self {
            TaskType::DeepWork | TaskType::HighStakesDecision => Dosha::Pitta,
            TaskType::Creative => Dosha::Vata,
            TaskType::LightWork | TaskType::Unrecognized(_) => Dosha::Kapha,
        }
    }
}

impl From<&str> for TaskType {
    fn from(label: &str) -> Self {
        match label {
            "Deep Work" => TaskType::DeepWork,
            "High-Stakes Decision" => TaskType::HighStakesDecision,
            "Creative" => TaskType::Creative,
            "Light Work" => TaskType::LightWork,
            other => TaskType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for TaskType {
    fn from(label: String) -> Self {
        TaskType::from(label.as_str())
    }
}

impl From<TaskType> for String {
    fn from(value: TaskType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task to place in the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

impl Task {
    pub fn new(name: impl Into<String>, task_type: impl Into<TaskType>) -> Self {
        Self {
            name: name.into(),
            task_type: task_type.into(),
        }
    }

    /// Parse `NAME=TYPE`. Without `=`, the whole input is the name and the
    /// type is left unrecognized.
    pub fn parse(input: &str) -> Self {
        match input.rsplit_once('=') {
            Some((name, task_type)) => Task::new(name.trim(), task_type.trim()),
            None => Task::new(input.trim(), ""),
        }
    }
}

/// Self-reported stress for the day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StressLevel {
    Low,
    #[default]
    Medium,
    High,
    Unrecognized(String),
}

impl StressLevel {
    pub fn as_str(&self) -> &str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
            StressLevel::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for StressLevel {
    fn from(label: &str) -> Self {
        match label {
            "Low" => StressLevel::Low,
            "Medium" => StressLevel::Medium,
            "High" => StressLevel::High,
            other => StressLevel::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for StressLevel {
    fn from(label: String) -> Self {
        StressLevel::from(label.as_str())
    }
}

impl From<StressLevel> for String {
    fn from(value: StressLevel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum block length (minutes) that earns a micro-break, per stress level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakThresholds {
    #[serde(default = "default_low")]
    pub low: Minutes,
    #[serde(default = "default_medium")]
    pub medium: Minutes,
    #[serde(default = "default_high")]
    pub high: Minutes,
    /// Used for unrecognized stress levels.
    #[serde(default = "default_medium")]
    pub default: Minutes,
}

fn default_low() -> Minutes {
    180
}
fn default_medium() -> Minutes {
    120
}
fn default_high() -> Minutes {
    60
}

impl Default for BreakThresholds {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
            default: default_medium(),
        }
    }
}

impl BreakThresholds {
    pub fn for_stress(&self, stress: &StressLevel) -> Minutes {
        match stress {
            StressLevel::Low => self.low,
            StressLevel::Medium => self.medium,
            StressLevel::High => self.high,
            StressLevel::Unrecognized(_) => self.default,
        }
    }
}
