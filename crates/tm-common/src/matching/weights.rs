/// Pesos del score compuesto (suman 1.0).
/// La señal semántica domina; las reglas corrigen en el margen.
pub const COMPOSITE_WEIGHTS: Weights = Weights {
    similarity: 0.60,
    required_skills: 0.20,
    desirable_skills: 0.10,
    hierarchy: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub similarity: f64,
    pub required_skills: f64,
    pub desirable_skills: f64,
    pub hierarchy: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.similarity + self.required_skills + self.desirable_skills + self.hierarchy
    }
}
