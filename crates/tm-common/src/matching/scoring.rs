use serde::Serialize;

use super::{
    hierarchy::hierarchy_score,
    skills::match_weighted_skills,
    weights::{Weights, COMPOSITE_WEIGHTS},
};
use crate::embedding::cosine_similarity;
use crate::{Candidate, Offer};

#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub weights: Weights,
    /// Degradación por cada nivel jerárquico de distancia.
    pub hierarchy_decay: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: COMPOSITE_WEIGHTS,
            hierarchy_decay: env_hierarchy_decay(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreDetail {
    pub score: f64,
    pub status: &'static str,
    pub details: String,
}

/// Score compuesto con desglose por señal, para observabilidad y depuración.
#[derive(Debug, Clone, Serialize)]
pub struct MatchScore {
    pub total: f64,
    pub similarity: ScoreDetail,
    pub required_skills: ScoreDetail,
    pub desirable_skills: ScoreDetail,
    pub hierarchy: ScoreDetail,
}

/// Score con la configuración por defecto.
pub fn calculate_match_score(candidate: &Candidate, offer: &Offer) -> MatchScore {
    ScoringEngine::default().score(candidate, offer)
}

/// Motor de scoring: función pura de (candidato, oferta), sin estado mutable
/// compartido; seguro de invocar concurrentemente sobre muchos pares.
pub struct ScoringEngine {
    config: MatchingConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(MatchingConfig::default())
    }
}

impl ScoringEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, candidate: &Candidate, offer: &Offer) -> MatchScore {
        let similarity = self.score_similarity(candidate, offer);
        let required_skills = self.score_required_skills(candidate, offer);
        let desirable_skills = self.score_desirable_skills(candidate, offer);
        let hierarchy = self.score_hierarchy(candidate, offer);

        let weights = self.config.weights;
        let total = (similarity.score * weights.similarity
            + required_skills.score * weights.required_skills
            + desirable_skills.score * weights.desirable_skills
            + hierarchy.score * weights.hierarchy)
            .clamp(0.0, 1.0);

        MatchScore {
            total,
            similarity,
            required_skills,
            desirable_skills,
            hierarchy,
        }
    }

    /// Similitud coseno entre los vectores almacenados. Un vector ausente es
    /// un estado degradado válido: similitud 0, nunca un error.
    fn score_similarity(&self, candidate: &Candidate, offer: &Offer) -> ScoreDetail {
        match (&candidate.embedding_vector, &offer.embedding_vector) {
            (Some(candidate_vec), Some(offer_vec)) => {
                let score = f64::from(cosine_similarity(candidate_vec, offer_vec));
                ScoreDetail {
                    score,
                    status: status_from_score(score),
                    details: format!("similitud coseno escalada {:.2}", score),
                }
            }
            (None, _) => ScoreDetail {
                score: 0.0,
                status: "UNKNOWN",
                details: "candidato sin vector de embedding; similitud en 0".into(),
            },
            (_, None) => ScoreDetail {
                score: 0.0,
                status: "UNKNOWN",
                details: "oferta sin vector de embedding; similitud en 0".into(),
            },
        }
    }

    fn score_required_skills(&self, candidate: &Candidate, offer: &Offer) -> ScoreDetail {
        let result = match_weighted_skills(&offer.required_skills, &candidate.skills);
        ScoreDetail {
            score: result.ratio,
            status: if offer.required_skills.is_empty() {
                "PERFECT_MATCH"
            } else {
                status_from_score(result.ratio)
            },
            details: result.reason,
        }
    }

    fn score_desirable_skills(&self, candidate: &Candidate, offer: &Offer) -> ScoreDetail {
        let result = match_weighted_skills(&offer.desirable_skills, &candidate.skills);
        ScoreDetail {
            score: result.ratio,
            status: if offer.desirable_skills.is_empty() {
                "PERFECT_MATCH"
            } else {
                status_from_score(result.ratio)
            },
            details: result.reason,
        }
    }

    fn score_hierarchy(&self, candidate: &Candidate, offer: &Offer) -> ScoreDetail {
        match (candidate.hierarchy_level, offer.hierarchy_level) {
            (Some(candidate_level), Some(offer_level)) => {
                let score = hierarchy_score(candidate_level, offer_level, self.config.hierarchy_decay);
                ScoreDetail {
                    score,
                    status: status_from_score(score),
                    details: format!(
                        "nivel candidato {} vs oferta {}",
                        candidate_level, offer_level
                    ),
                }
            }
            _ => ScoreDetail {
                score: 0.5,
                status: "UNKNOWN",
                details: "nivel jerárquico sin informar; score neutro".into(),
            },
        }
    }
}

fn env_hierarchy_decay() -> f64 {
    std::env::var("TM_HIERARCHY_DECAY")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0.35)
}

fn status_from_score(score: f64) -> &'static str {
    if score >= 0.9 {
        "PERFECT_MATCH"
    } else if score >= 0.7 {
        "MATCH"
    } else if score >= 0.4 {
        "PARTIAL_MATCH"
    } else {
        "MISS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HierarchyLevel, WeightedSkill};

    fn base_offer() -> Offer {
        Offer {
            id: "offer-1".into(),
            title: Some("Backend Developer".into()),
            required_skills: vec![
                WeightedSkill::new("Rust", None),
                WeightedSkill::new("PostgreSQL", None),
            ],
            desirable_skills: vec![WeightedSkill::new("Docker", None)],
            hierarchy_level: Some(HierarchyLevel::Senior),
            embedding_vector: Some(vec![1.0, 0.0, 0.0]),
            ..Offer::default()
        }
    }

    fn base_candidate() -> Candidate {
        Candidate {
            id: "cand-1".into(),
            skills: vec!["rust".into(), "postgresql".into(), "docker".into()],
            hierarchy_level: Some(HierarchyLevel::Senior),
            embedding_vector: Some(vec![1.0, 0.0, 0.0]),
            ..Candidate::default()
        }
    }

    #[test]
    fn perfect_pair_scores_one() {
        let score = calculate_match_score(&base_candidate(), &base_offer());

        assert!((score.total - 1.0).abs() < 1e-9);
        assert_eq!(score.similarity.status, "PERFECT_MATCH");
        assert_eq!(score.required_skills.status, "PERFECT_MATCH");
        assert_eq!(score.hierarchy.status, "PERFECT_MATCH");
    }

    #[test]
    fn composite_stays_in_unit_interval() {
        let empty_candidate = Candidate::default();
        let score = calculate_match_score(&empty_candidate, &base_offer());

        assert!(score.total >= 0.0);
        assert!(score.total <= 1.0);
    }

    #[test]
    fn missing_vector_degrades_without_error() {
        let mut candidate = base_candidate();
        candidate.embedding_vector = None;

        let score = calculate_match_score(&candidate, &base_offer());
        assert_eq!(score.similarity.score, 0.0);
        assert_eq!(score.similarity.status, "UNKNOWN");
        // Las demás señales siguen sumando.
        assert!(score.total > 0.0);
        assert!((score.total - 0.4).abs() < 1e-9);
    }

    #[test]
    fn empty_required_list_never_penalizes() {
        let mut offer = base_offer();
        offer.required_skills.clear();

        let mut candidate = base_candidate();
        candidate.skills.clear();

        let score = calculate_match_score(&candidate, &offer);
        assert_eq!(score.required_skills.score, 1.0);
        assert_eq!(score.required_skills.status, "PERFECT_MATCH");
    }

    #[test]
    fn hierarchy_mismatch_degrades_monotonically() {
        let engine = ScoringEngine::new(MatchingConfig {
            hierarchy_decay: 0.35,
            ..MatchingConfig::default()
        });

        let mut junior = base_candidate();
        junior.hierarchy_level = Some(HierarchyLevel::Junior);
        let mut semi = base_candidate();
        semi.hierarchy_level = Some(HierarchyLevel::SemiSenior);

        let offer = base_offer();
        let equal = engine.score(&base_candidate(), &offer);
        let near = engine.score(&semi, &offer);
        let far = engine.score(&junior, &offer);

        assert!(equal.hierarchy.score > near.hierarchy.score);
        assert!(near.hierarchy.score > far.hierarchy.score);
    }

    #[test]
    fn unknown_hierarchy_scores_neutrally() {
        let mut candidate = base_candidate();
        candidate.hierarchy_level = None;

        let score = calculate_match_score(&candidate, &base_offer());
        assert_eq!(score.hierarchy.score, 0.5);
        assert_eq!(score.hierarchy.status, "UNKNOWN");
    }

    #[test]
    fn weighted_required_skills_flow_into_composite() {
        let mut offer = base_offer();
        offer.required_skills = vec![
            WeightedSkill::new("Rust", Some(1.0)),
            WeightedSkill::new("Kafka", Some(0.5)),
        ];

        let score = calculate_match_score(&base_candidate(), &offer);
        assert!((score.required_skills.score - 1.0 / 1.5).abs() < 1e-9);
        assert!(score.required_skills.details.contains("faltantes: Kafka"));
    }
}
