use crate::normalize::collapse_whitespace;
use crate::{Candidate, Offer, WeightedSkill};

/// Texto centinela para una oferta sin ningún campo informado.
/// El proveedor de embeddings nunca debe recibir una cadena vacía.
pub const EMPTY_OFFER_TEXT: &str = "Sin información especificada";

/// Texto centinela para un candidato sin ningún campo informado.
pub const EMPTY_CANDIDATE_TEXT: &str = "Profesional en búsqueda de empleo";

fn push_field(parts: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(raw) = value {
        let cleaned = collapse_whitespace(raw);
        if !cleaned.is_empty() {
            parts.push(format!("{label}: {cleaned}"));
        }
    }
}

fn push_skill_names(parts: &mut Vec<String>, label: &str, skills: &[WeightedSkill]) {
    let names: Vec<&str> = skills
        .iter()
        .map(|s| s.name.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if !names.is_empty() {
        parts.push(format!("{label}: {}", names.join(", ")));
    }
}

/// Renderiza una oferta al texto canónico usado como entrada del embedding.
/// Orden fijo de campos; los ausentes se omiten por completo.
pub fn render_offer(offer: &Offer) -> String {
    let mut parts = Vec::new();
    push_field(&mut parts, "Título", offer.title.as_deref());
    push_field(&mut parts, "Descripción", offer.description.as_deref());
    push_skill_names(&mut parts, "Habilidades requeridas", &offer.required_skills);
    push_skill_names(&mut parts, "Habilidades deseables", &offer.desirable_skills);
    push_field(&mut parts, "Competencias", offer.competencies.as_deref());

    if parts.is_empty() {
        EMPTY_OFFER_TEXT.to_string()
    } else {
        parts.join(". ")
    }
}

/// Renderiza un candidato al texto canónico usado como entrada del embedding.
pub fn render_candidate(candidate: &Candidate) -> String {
    let mut parts = Vec::new();
    push_field(&mut parts, "Perfil", candidate.headline.as_deref());
    push_field(&mut parts, "Resumen", candidate.summary.as_deref());

    let skills: Vec<&str> = candidate
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !skills.is_empty() {
        parts.push(format!("Habilidades: {}", skills.join(", ")));
    }

    push_field(&mut parts, "Habilidades blandas", candidate.soft_skills.as_deref());
    push_field(&mut parts, "Competencias", candidate.competencies.as_deref());

    if parts.is_empty() {
        EMPTY_CANDIDATE_TEXT.to_string()
    } else {
        parts.join(". ")
    }
}
