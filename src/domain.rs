use serde::{Deserialize, Serialize};

/// the single stored sensor sample
///
/// there is no per-device identity: every submission is assumed to come
/// from the one wired-up bin, and only the latest sample is kept
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// container fullness estimate, 0-100 % (type-checked only, not clamped)
    pub fill_level: f64,

    /// raw ultrasonic distance in centimeters
    pub distance: f64,

    /// RFC 3339 ingestion timestamp set by the hub, None until the
    /// first POST arrives after process start
    pub timestamp: Option<String>,
}

impl Reading {
    /// has any sample ever been received?
    pub fn is_live(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// three-tier status derived from the fill level
///
/// tier boundaries are inclusive at the lower bound:
/// `< 50` good, `50..=79` moderate, `>= 80` critical
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillStatus {
    Good,
    Moderate,
    Critical,
}

impl FillStatus {
    pub fn from_fill_level(fill_level: f64) -> Self {
        if fill_level >= 80.0 {
            FillStatus::Critical
        } else if fill_level >= 50.0 {
            FillStatus::Moderate
        } else {
            FillStatus::Good
        }
    }

    /// status line shown under the fill bar
    pub fn label(self) -> &'static str {
        match self {
            FillStatus::Good => "Good - Sufficient Space",
            FillStatus::Moderate => "Moderate - Monitor Soon",
            FillStatus::Critical => "Critical - Needs Emptying!",
        }
    }

    /// css color for the fill bar and status text
    pub fn color(self) -> &'static str {
        match self {
            FillStatus::Good => "#22c55e",
            FillStatus::Moderate => "#eab308",
            FillStatus::Critical => "#ef4444",
        }
    }
}
