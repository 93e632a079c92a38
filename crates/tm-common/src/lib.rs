pub mod canonical;
pub mod db;
pub mod embedding;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod store;
pub mod sync;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// Modelos de datos compartidos por el motor de matching y la sincronización.

/// Nivel jerárquico ordinal: Junior < SemiSenior < Senior < Managerial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum HierarchyLevel {
    #[strum(serialize = "junior")]
    Junior,
    #[strum(serialize = "semi-senior", to_string = "semi_senior")]
    SemiSenior,
    #[strum(serialize = "senior")]
    Senior,
    #[strum(serialize = "gerencial", to_string = "managerial")]
    Managerial,
}

impl HierarchyLevel {
    fn ordinal(self) -> i8 {
        match self {
            HierarchyLevel::Junior => 0,
            HierarchyLevel::SemiSenior => 1,
            HierarchyLevel::Senior => 2,
            HierarchyLevel::Managerial => 3,
        }
    }

    /// Distancia ordinal entre niveles (0 = mismo nivel).
    pub fn distance(self, other: Self) -> u8 {
        (self.ordinal() - other.ordinal()).unsigned_abs()
    }
}

/// Estado de publicación de una oferta. Sólo `Active` es puntuable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OfferStatus {
    #[default]
    Active,
    Paused,
    Closed,
}

/// Colección lógica a la que pertenece un perfil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Candidate,
    Offer,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Candidate => "candidate",
            ProfileKind::Offer => "offer",
        }
    }
}

/// Peso aplicado a una habilidad requerida/deseable sin peso explícito.
pub const DEFAULT_SKILL_WEIGHT: f64 = 0.8;

fn default_skill_weight() -> f64 {
    DEFAULT_SKILL_WEIGHT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSkill {
    pub name: String,
    #[serde(default = "default_skill_weight")]
    pub weight: f64,
}

impl WeightedSkill {
    /// Peso ausente o no positivo cae al peso por defecto (invariante: > 0).
    pub fn new(name: impl Into<String>, weight: Option<f64>) -> Self {
        Self {
            name: name.into(),
            weight: weight.filter(|w| *w > 0.0).unwrap_or(DEFAULT_SKILL_WEIGHT),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Offer {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Vec<WeightedSkill>,
    pub desirable_skills: Vec<WeightedSkill>,
    pub competencies: Option<String>,
    pub sector_id: Option<String>,
    pub hierarchy_level: Option<HierarchyLevel>,
    pub status: OfferStatus,
    pub embedding_vector: Option<Vec<f32>>,
    pub embedding_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub soft_skills: Option<String>,
    pub competencies: Option<String>,
    pub sector_id: Option<String>,
    pub hierarchy_level: Option<HierarchyLevel>,
    pub embedding_vector: Option<Vec<f32>>,
    pub embedding_updated_at: Option<DateTime<Utc>>,
}
