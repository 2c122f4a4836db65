//! Candidate ranking. Both orderings are stable: ties keep upload order.

use serde::{Deserialize, Serialize};

use crate::affinity::category::{AffinityCategory, AffinityScale};
use crate::models::candidate::CandidateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    Category,
    Score,
}

impl From<AffinityScale> for RankBy {
    fn from(scale: AffinityScale) -> Self {
        match scale {
            AffinityScale::Numeric => RankBy::Score,
            AffinityScale::Categorical => RankBy::Category,
        }
    }
}

/// Sorts best category first.
pub fn rank_by_category(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| b.category.cmp(&a.category));
}

/// Sorts highest score first. Records without a score go after every scored record.
pub fn rank_by_score(records: &mut [CandidateRecord]) {
    // Option orders None < Some(_), so reversing puts unscored records last.
    records.sort_by(|a, b| b.numeric_score.cmp(&a.numeric_score));
}

pub fn rank(records: &mut [CandidateRecord], by: RankBy) {
    match by {
        RankBy::Category => rank_by_category(records),
        RankBy::Score => rank_by_score(records),
    }
}

/// Count per category, best first, including empty buckets. Feeds the ranking chart.
pub fn category_distribution(records: &[CandidateRecord]) -> Vec<(AffinityCategory, usize)> {
    AffinityCategory::RANKED
        .iter()
        .map(|&category| {
            let count = records.iter().filter(|r| r.category == category).count();
            (category, count)
        })
        .collect()
}
