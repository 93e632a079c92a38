use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::Utc;
use siphasher::sip::SipHasher13;

use super::{Embedding, EmbeddingConfig, EmbeddingError, ProfileEmbedder};
use crate::{canonical, Candidate, Offer, ProfileKind};

/// Seeds fijos (hash determinístico).
/// ⚠️ Cambiar estos valores cambia todos los vectores de respaldo → subir version().
const HASH_SEED_K0: u64 = 0x7a3d_91c4_5e0f_b826;
const HASH_SEED_K1: u64 = 0x1b64_f8a9_c2d7_304e;

/// Generador de vectores de respaldo, determinístico y sin red.
///
/// El hash del texto canónico siembra la secuencia
/// `sin(hash + i) * 0.5 + 0.5` para `i` en `[0, D)`. Reproducible pero sin
/// significado semántico: mantiene operables los pipelines cuando el modelo
/// real no está disponible (desarrollo, pruebas, entornos desconectados).
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            dimension: config.dimension.max(1),
        }
    }

    fn hash_text(text: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        text.hash(&mut hasher);
        hasher.finish()
    }

    /// Vector determinístico para un texto dado.
    pub fn deterministic_vector(text: &str, dimension: usize) -> Vec<f32> {
        let seed = Self::hash_text(text) as f64;
        (0..dimension)
            .map(|i| ((seed + i as f64).sin() * 0.5 + 0.5) as f32)
            .collect()
    }

    fn embed(&self, text: &str, source: ProfileKind) -> Embedding {
        Embedding {
            vector: Self::deterministic_vector(text, self.dimension),
            source,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ProfileEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_offer(&self, offer: &Offer) -> Result<Embedding, EmbeddingError> {
        Ok(self.embed(&canonical::render_offer(offer), ProfileKind::Offer))
    }

    async fn embed_candidate(&self, candidate: &Candidate) -> Result<Embedding, EmbeddingError> {
        Ok(self.embed(&canonical::render_candidate(candidate), ProfileKind::Candidate))
    }
}
