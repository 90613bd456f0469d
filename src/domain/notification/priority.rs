//! Notification priority value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::PriorityParseError;

/// All priorities, lowest first
pub const ALL_PRIORITIES: &[Priority] = &[
    Priority::VeryLow,
    Priority::Moderate,
    Priority::Normal,
    Priority::High,
    Priority::Emergency,
];

/// Priority of a notification, as understood by the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Priority {
    VeryLow,
    Moderate,
    #[default]
    Normal,
    High,
    Emergency,
}

impl Priority {
    /// Integer value carried in the notification record
    pub const fn value(&self) -> i8 {
        match self {
            Self::VeryLow => -2,
            Self::Moderate => -1,
            Self::Normal => 0,
            Self::High => 1,
            Self::Emergency => 2,
        }
    }

    /// Build from the integer value
    pub const fn from_value(value: i64) -> Option<Self> {
        match value {
            -2 => Some(Self::VeryLow),
            -1 => Some(Self::Moderate),
            0 => Some(Self::Normal),
            1 => Some(Self::High),
            2 => Some(Self::Emergency),
            _ => None,
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Moderate => "Moderate",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Emergency => "Emergency",
        }
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if let Ok(value) = input.parse::<i64>() {
            return Self::from_value(value).ok_or_else(|| PriorityParseError {
                input: s.to_string(),
            });
        }

        let normalized: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "verylow" => Ok(Self::VeryLow),
            "moderate" => Ok(Self::Moderate),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "emergency" => Ok(Self::Emergency),
            _ => Err(PriorityParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<Priority> for i8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl TryFrom<i8> for Priority {
    type Error = PriorityParseError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::from_value(i64::from(value)).ok_or_else(|| PriorityParseError {
            input: value.to_string(),
        })
    }
}
