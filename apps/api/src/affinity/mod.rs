//! Affinity signal: category/score types, extraction from analysis text, ranking.

pub mod category;
pub mod extractor;
pub mod handlers;
pub mod ranking;

pub use category::{AffinityCategory, AffinityScale, AffinityScore};
pub use extractor::{extract_category, extract_numeric_score, find_numeric_score, Affinity};
pub use ranking::{category_distribution, rank, RankBy};
