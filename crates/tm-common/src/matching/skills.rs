use crate::normalize::normalize_term;
use crate::WeightedSkill;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatchResult {
    /// Σ(peso·cubierta) / Σ(peso), en [0, 1]. Lista vacía ⇒ 1.0.
    pub ratio: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub reason: String,
}

/// ¿`a` y `b` nombran la misma habilidad?
///
/// Contención bidireccional sobre términos normalizados (minúsculas, sin
/// tildes): "react" cubre "React.js" y viceversa. Deliberadamente permisivo
/// frente a variantes de escritura; puede sobre-emparejar ("Java" con
/// "JavaScript").
pub fn skill_matches(a: &str, b: &str) -> bool {
    let a = normalize_term(a);
    let b = normalize_term(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Cobertura ponderada de una lista de habilidades de la oferta contra las
/// habilidades del candidato. Sin requisitos no hay penalización: 1.0.
pub fn match_weighted_skills(
    requirements: &[WeightedSkill],
    held: &[String],
) -> SkillMatchResult {
    if requirements.is_empty() {
        return SkillMatchResult {
            ratio: 1.0,
            matched: vec![],
            missing: vec![],
            reason: "sin requisitos de habilidades".into(),
        };
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total_weight = 0.0;
    let mut matched_weight = 0.0;

    for requirement in requirements {
        total_weight += requirement.weight;
        if held.iter().any(|skill| skill_matches(skill, &requirement.name)) {
            matched_weight += requirement.weight;
            matched.push(requirement.name.clone());
        } else {
            missing.push(requirement.name.clone());
        }
    }

    let ratio = if total_weight > 0.0 {
        matched_weight / total_weight
    } else {
        1.0
    };

    let mut reason = format!(
        "{} de {} habilidades cubiertas ({:.0}%)",
        matched.len(),
        requirements.len(),
        ratio * 100.0
    );
    if !missing.is_empty() {
        reason.push_str(&format!(" (faltantes: {})", missing.join(", ")));
    }

    SkillMatchResult {
        ratio,
        matched,
        missing,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(names: &[(&str, f64)]) -> Vec<WeightedSkill> {
        names
            .iter()
            .map(|(name, weight)| WeightedSkill::new(*name, Some(*weight)))
            .collect()
    }

    fn held(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_requirements_score_perfect() {
        let result = match_weighted_skills(&[], &held(&["rust"]));
        assert_eq!(result.ratio, 1.0);
        assert!(result.matched.is_empty());
        assert!(result.reason.contains("sin requisitos"));

        let result = match_weighted_skills(&[], &[]);
        assert_eq!(result.ratio, 1.0);
    }

    #[test]
    fn matching_is_bidirectional_and_case_insensitive() {
        assert!(skill_matches("react", "React.js"));
        assert!(skill_matches("React.js", "react"));
        assert!(skill_matches("POSTGRESQL", "postgresql"));
        assert!(!skill_matches("rust", "python"));
        assert!(!skill_matches("", "rust"));
    }

    #[test]
    fn matching_ignores_accents() {
        assert!(skill_matches("Gestión de proyectos", "gestion de proyectos"));
    }

    #[test]
    fn ratio_weights_each_requirement() {
        let requirements = weighted(&[("Rust", 1.0), ("COBOL", 0.5)]);
        let result = match_weighted_skills(&requirements, &held(&["rust"]));

        assert!((result.ratio - 1.0 / 1.5).abs() < 1e-9);
        assert_eq!(result.matched, vec!["Rust".to_string()]);
        assert_eq!(result.missing, vec!["COBOL".to_string()]);
        assert!(result.reason.contains("faltantes: COBOL"));
    }

    #[test]
    fn full_coverage_scores_one() {
        let requirements = weighted(&[("React", 0.8), ("TypeScript", 0.8)]);
        let result = match_weighted_skills(&requirements, &held(&["react.js", "typescript"]));

        assert!((result.ratio - 1.0).abs() < 1e-9);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn no_coverage_scores_zero() {
        let requirements = weighted(&[("Go", 0.8)]);
        let result = match_weighted_skills(&requirements, &held(&["rust"]));
        assert_eq!(result.ratio, 0.0);
    }
}
