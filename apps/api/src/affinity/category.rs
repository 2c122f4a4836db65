//! Affinity category and score types shared by extraction, ranking and exports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Five-level ordinal affinity, plus `Unclassified` when the analysis carried no signal.
///
/// Variant order defines the ranking order:
/// `VeryHigh > High > Medium > Low > VeryLow > Unclassified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AffinityCategory {
    #[default]
    Unclassified,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AffinityCategory {
    /// All categories from best to worst, in report order.
    pub const RANKED: [AffinityCategory; 6] = [
        AffinityCategory::VeryHigh,
        AffinityCategory::High,
        AffinityCategory::Medium,
        AffinityCategory::Low,
        AffinityCategory::VeryLow,
        AffinityCategory::Unclassified,
    ];

    /// Maps a normalized 0–100 score onto a category.
    pub fn from_score(score: AffinityScore) -> Self {
        match score.value() {
            90..=u8::MAX => AffinityCategory::VeryHigh,
            75..=89 => AffinityCategory::High,
            60..=74 => AffinityCategory::Medium,
            40..=59 => AffinityCategory::Low,
            _ => AffinityCategory::VeryLow,
        }
    }

    /// Short display string, in the language the analysis prompts use.
    pub fn label(self) -> &'static str {
        match self {
            AffinityCategory::VeryHigh => "Muy Alta",
            AffinityCategory::High => "Alta",
            AffinityCategory::Medium => "Media",
            AffinityCategory::Low => "Baja",
            AffinityCategory::VeryLow => "Muy Baja",
            AffinityCategory::Unclassified => "Sin clasificar",
        }
    }

    /// Fill color for reports and charts (0xRRGGBB).
    pub fn color(self) -> u32 {
        match self {
            AffinityCategory::VeryHigh => 0x1B5E20,
            AffinityCategory::High => 0x66BB6A,
            AffinityCategory::Medium => 0xFDD835,
            AffinityCategory::Low => 0xFB8C00,
            AffinityCategory::VeryLow => 0xE53935,
            AffinityCategory::Unclassified => 0x9E9E9E,
        }
    }
}

impl fmt::Display for AffinityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scale the analysis prompt asks the model to answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffinityScale {
    #[default]
    Numeric,
    Categorical,
}

impl std::str::FromStr for AffinityScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(AffinityScale::Numeric),
            "categorical" => Ok(AffinityScale::Categorical),
            other => Err(format!("unknown affinity scale '{other}'")),
        }
    }
}

/// Affinity on a 0–100 scale. Construction always saturates into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AffinityScore(u8);

impl AffinityScore {
    pub const MAX: u8 = 100;

    /// Rounds and clamps into `[0, 100]`. NaN collapses to 0.
    pub fn saturating(raw: f64) -> Self {
        if raw.is_nan() {
            return AffinityScore(0);
        }
        AffinityScore(raw.round().clamp(0.0, f64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for AffinityScore {
    fn from(value: u8) -> Self {
        AffinityScore(value.min(Self::MAX))
    }
}

impl fmt::Display for AffinityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
