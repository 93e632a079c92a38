pub mod filter;
pub mod hierarchy;
pub mod pipeline;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use filter::{filter_candidates_for_offer, filter_offers_for_candidate};
pub use pipeline::{MatchingEngine, RankedCandidate, RankedOffer};
pub use scoring::{calculate_match_score, MatchScore, MatchingConfig, ScoreDetail, ScoringEngine};
pub use skills::{match_weighted_skills, skill_matches, SkillMatchResult};
pub use weights::{Weights, COMPOSITE_WEIGHTS};
