//! Affinity extraction: best-effort classification of free-form analysis text.
//!
//! The analysis text comes straight out of a language model, so its shape is only
//! loosely constrained by the prompt. Everything here is a heuristic: it never fails,
//! and "nothing found" is a normal answer (`Unclassified` / `None`). A change to the
//! analysis prompt wording can silently degrade accuracy.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::affinity::category::{AffinityCategory, AffinityScale, AffinityScore};

lazy_static! {
    // Substring match. Longer labels precede the shorter labels they contain.
    static ref CATEGORY_PATTERNS: Vec<(Regex, AffinityCategory)> = vec![
        (Regex::new(r"(?i)muy\s*alta").unwrap(), AffinityCategory::VeryHigh),
        (Regex::new(r"(?i)alta").unwrap(), AffinityCategory::High),
        (Regex::new(r"(?i)media").unwrap(), AffinityCategory::Medium),
        (Regex::new(r"(?i)muy\s*baja").unwrap(), AffinityCategory::VeryLow),
        (Regex::new(r"(?i)baja").unwrap(), AffinityCategory::Low),
    ];

    // "afinidad" covers "Nota de afinidad", "Afinidad al cargo", ...
    static ref MARKER: Regex = Regex::new(r"(?i)afinidad|affinity").unwrap();

    // Hints like "(de 1 a 100)" carry numbers that are not the score.
    static ref PARENTHETICAL: Regex = Regex::new(r"\([^)]*\)").unwrap();

    static ref NUMBER: Regex =
        Regex::new(r"(?P<value>-?\d+(?:[.,]\d+)?)(?:\s*/\s*(?P<scale>\d+))?").unwrap();

    // Score on the line after the marker; a leading dash is a bullet, not a sign.
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[\s*•>\-]*(?P<value>\d+(?:[.,]\d+)?)(?:\s*/\s*(?P<scale>\d+))?").unwrap();
}

/// Combined affinity signal for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affinity {
    pub category: AffinityCategory,
    /// `None` when no score was found; distinct from a real 0.
    pub numeric_score: Option<AffinityScore>,
}

impl Affinity {
    /// Derives both signals from one analysis.
    ///
    /// On the numeric scale the score is authoritative for the category, so stray
    /// adjectives elsewhere in the text ("alta capacidad de ...") do not override it.
    pub fn assess(text: &str, scale: AffinityScale) -> Self {
        let numeric_score = find_numeric_score(text);
        let category = match (scale, numeric_score) {
            (AffinityScale::Numeric, Some(score)) => AffinityCategory::from_score(score),
            _ => extract_category(text),
        };
        Affinity {
            category,
            numeric_score,
        }
    }
}

/// Category from the first label found in specificity order, falling back to the
/// numeric score mapped through the fixed thresholds.
pub fn extract_category(text: &str) -> AffinityCategory {
    for (pattern, category) in CATEGORY_PATTERNS.iter() {
        if pattern.is_match(text) {
            return *category;
        }
    }

    find_numeric_score(text)
        .map(AffinityCategory::from_score)
        .unwrap_or_default()
}

/// Numeric score in `[0, 100]`, or 0 when the text carries none.
pub fn extract_numeric_score(text: &str) -> u8 {
    find_numeric_score(text).map(AffinityScore::value).unwrap_or(0)
}

/// Numeric score near an affinity marker, normalized to 0–100.
///
/// A number written against `/100` wins over any other candidate; otherwise the
/// first number near a marker is taken.
pub fn find_numeric_score(text: &str) -> Option<AffinityScore> {
    let candidates = score_candidates(text);

    candidates
        .iter()
        .find(|c| c.scale == Some(100))
        .or_else(|| candidates.first())
        .map(RawScore::normalized)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RawScore {
    value: f64,
    scale: Option<u32>,
}

impl RawScore {
    /// A number without a denominator only counts as a 1–3 digit integer.
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let raw = caps.name("value")?.as_str();
        let scale = caps
            .name("scale")
            .and_then(|m| m.as_str().parse::<u32>().ok());
        if scale.is_none() && !is_bare_score(raw) {
            return None;
        }
        let value = raw.replace(',', ".").parse::<f64>().ok()?;
        Some(RawScore { value, scale })
    }

    /// `n/10` → `n × 10`, `n/100` or bare → `n`, `n/d` → `n × 100 / d`.
    fn normalized(&self) -> AffinityScore {
        let value = match self.scale {
            None | Some(0) | Some(100) => self.value,
            Some(d) => self.value * 100.0 / f64::from(d),
        };
        AffinityScore::saturating(value)
    }
}

fn score_candidates(text: &str) -> Vec<RawScore> {
    let lines: Vec<&str> = text.lines().collect();
    let mut candidates = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(marker) = MARKER.find(line) else {
            continue;
        };

        let tail = PARENTHETICAL.replace_all(&line[marker.end()..], " ");
        let mut found = numbers_in(after_colon(&tail));
        if found.is_empty() {
            found = numbers_in(&tail);
        }

        if found.is_empty() {
            // "Nota de afinidad:\n85"
            let next = lines[idx + 1..].iter().map(|l| l.trim()).find(|l| !l.is_empty());
            if let Some(caps) = next.and_then(|l| LEADING_NUMBER.captures(l)) {
                found.extend(RawScore::from_captures(&caps));
            }
        }

        candidates.extend(found);
    }

    candidates
}

fn is_bare_score(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    (1..=3).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

fn after_colon(tail: &str) -> &str {
    tail.split_once(':').map(|(_, rest)| rest).unwrap_or("")
}

fn numbers_in(segment: &str) -> Vec<RawScore> {
    NUMBER
        .captures_iter(segment)
        .filter_map(|caps| RawScore::from_captures(&caps))
        .collect()
}
