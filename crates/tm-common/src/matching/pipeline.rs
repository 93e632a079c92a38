use std::cmp::Ordering;

use super::{
    filter::{filter_candidates_for_offer, filter_offers_for_candidate},
    scoring::{MatchScore, MatchingConfig, ScoringEngine},
};
use crate::{Candidate, Offer};

#[derive(Debug, Clone)]
pub struct RankedOffer {
    pub offer: Offer,
    pub score: MatchScore,
}

#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub score: MatchScore,
}

/// Pipeline de ranking: filtro duro → scoring → orden descendente por score
/// compuesto. El filtro corre siempre antes del scoring para acotar los
/// cálculos de similitud.
pub struct MatchingEngine {
    scoring: ScoringEngine,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(MatchingConfig::default())
    }
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            scoring: ScoringEngine::new(config),
        }
    }

    /// Ofertas rankeadas para un candidato. Empates se resuelven por id de
    /// oferta para que el orden sea determinista.
    pub fn rank_offers(&self, candidate: &Candidate, offers: &[Offer]) -> Vec<RankedOffer> {
        let mut ranked: Vec<RankedOffer> = filter_offers_for_candidate(candidate, offers)
            .into_iter()
            .map(|offer| RankedOffer {
                score: self.scoring.score(candidate, offer),
                offer: offer.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            match b
                .score
                .total
                .partial_cmp(&a.score.total)
                .unwrap_or(Ordering::Equal)
            {
                Ordering::Equal => a.offer.id.cmp(&b.offer.id),
                other => other,
            }
        });

        ranked
    }

    /// Dirección simétrica: candidatos rankeados para una oferta.
    pub fn rank_candidates(&self, offer: &Offer, candidates: &[Candidate]) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = filter_candidates_for_offer(offer, candidates)
            .into_iter()
            .map(|candidate| RankedCandidate {
                score: self.scoring.score(candidate, offer),
                candidate: candidate.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| {
            match b
                .score
                .total
                .partial_cmp(&a.score.total)
                .unwrap_or(Ordering::Equal)
            {
                Ordering::Equal => a.candidate.id.cmp(&b.candidate.id),
                other => other,
            }
        });

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HierarchyLevel, OfferStatus, WeightedSkill};

    fn base_offer(id: &str) -> Offer {
        Offer {
            id: id.into(),
            required_skills: vec![WeightedSkill::new("Rust", None)],
            desirable_skills: vec![WeightedSkill::new("Docker", None)],
            hierarchy_level: Some(HierarchyLevel::Senior),
            status: OfferStatus::Active,
            embedding_vector: Some(vec![1.0, 0.0]),
            ..Offer::default()
        }
    }

    fn base_candidate() -> Candidate {
        Candidate {
            id: "cand-1".into(),
            skills: vec!["rust".into(), "docker".into()],
            hierarchy_level: Some(HierarchyLevel::Senior),
            embedding_vector: Some(vec![1.0, 0.0]),
            ..Candidate::default()
        }
    }

    #[test]
    fn ranks_offers_by_composite_descending() {
        let engine = MatchingEngine::default();

        let strong = base_offer("strong");
        let mut weak = base_offer("weak");
        weak.required_skills = vec![WeightedSkill::new("Go", None)];
        weak.hierarchy_level = Some(HierarchyLevel::Junior);

        let ranked = engine.rank_offers(&base_candidate(), &[weak.clone(), strong.clone()]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].offer.id, "strong");
        assert!(ranked[0].score.total > ranked[1].score.total);
    }

    #[test]
    fn inactive_offers_never_reach_scoring() {
        let engine = MatchingEngine::default();
        let mut paused = base_offer("paused");
        paused.status = OfferStatus::Paused;

        let ranked = engine.rank_offers(&base_candidate(), &[paused, base_offer("active")]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].offer.id, "active");
    }

    #[test]
    fn ties_break_by_offer_id() {
        let engine = MatchingEngine::default();
        let ranked = engine.rank_offers(&base_candidate(), &[base_offer("b"), base_offer("a")]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].offer.id, "a");
        assert_eq!(ranked[1].offer.id, "b");
    }

    #[test]
    fn ranks_candidates_for_offer_symmetrically() {
        let engine = MatchingEngine::default();

        let strong = base_candidate();
        let mut weak = base_candidate();
        weak.id = "cand-2".into();
        weak.skills = vec!["cobol".into()];
        weak.embedding_vector = Some(vec![0.0, 1.0]);

        let ranked = engine.rank_candidates(&base_offer("o"), &[weak, strong]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.id, "cand-1");
    }

    #[test]
    fn degraded_candidates_still_rank() {
        let engine = MatchingEngine::default();
        let mut without_vector = base_candidate();
        without_vector.embedding_vector = None;

        let ranked = engine.rank_offers(&without_vector, &[base_offer("o")]);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].score.total > 0.0);
        assert_eq!(ranked[0].score.similarity.score, 0.0);
    }
}
