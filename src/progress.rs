use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub const WARNING_THRESHOLD: u8 = 60;
pub const DANGER_THRESHOLD: u8 = 80;
pub const ARRIVAL_THRESHOLD: u8 = 90;

/// Coarse classification of how close the journey is to its end. The overlay
/// paints these green / yellow / red.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    Normal,
    Warning,
    Danger,
}

impl Band {
    pub fn for_percent(percent_complete: u8) -> Band {
        if percent_complete >= DANGER_THRESHOLD {
            Band::Danger
        } else if percent_complete >= WARNING_THRESHOLD {
            Band::Warning
        } else {
            Band::Normal
        }
    }
}

/// How the remaining/total fraction is turned into a percentage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentPolicy {
    /// `|f * 100 - 100|`. Moving away from the destination beyond the start
    /// makes the percentage rise again.
    Mirrored,
    /// The fraction is clamped to `[0, 1]` first, so the result never rises
    /// while moving away.
    #[default]
    Clamped,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgressState {
    pub percent_complete: u8,
    pub band: Band,
    pub arrived: bool,
}

impl ProgressState {
    pub fn new(percent_complete: u8, arrived: bool) -> Self {
        let percent_complete = percent_complete.min(100);
        ProgressState {
            percent_complete,
            band: Band::for_percent(percent_complete),
            arrived,
        }
    }
}

/// Fraction of the journey still ahead. A zero-length journey counts as done.
pub fn completion_fraction(distance_remaining: f64, total_distance: f64) -> f64 {
    if total_distance == 0.0 {
        0.0
    } else {
        distance_remaining / total_distance
    }
}

pub fn percent_complete(fraction: f64, policy: PercentPolicy) -> u8 {
    let percent = match policy {
        PercentPolicy::Mirrored => (fraction * 100.0 - 100.0).abs(),
        PercentPolicy::Clamped => 100.0 - fraction.clamp(0.0, 1.0) * 100.0,
    };
    if percent.is_nan() {
        return 0;
    }
    percent.round().clamp(0.0, 100.0) as u8
}
