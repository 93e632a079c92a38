pub mod config;
pub mod hash_fallback;
pub mod remote;
pub mod similarity;

use async_trait::async_trait;
use tracing::warn;

use crate::{Candidate, Offer, ProfileKind};
pub use config::EmbeddingConfig;
pub use hash_fallback::HashEmbedder;
pub use remote::RemoteEmbedder;
pub use similarity::cosine_similarity;

/// Vector de embedding de un perfil, con su origen y momento de cálculo.
#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub source: ProfileKind,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint {endpoint} returned status {status}")]
    Endpoint { endpoint: String, status: u16 },
    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),
    #[error("unexpected embedding dimension: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },
    #[error("no embedding endpoints configured")]
    NotConfigured,
}

/// Proveedor de embeddings de perfiles.
///
/// Implementaciones:
/// - RemoteEmbedder: preprocesamiento remoto + modelo de embeddings (producción)
/// - HashEmbedder: vector determinístico sin red (desarrollo/pruebas)
///
/// Una falla del preprocesamiento nunca escapa del proveedor: se resuelve
/// con el texto canónico local. Una falla del modelo sí se propaga.
#[async_trait]
pub trait ProfileEmbedder: Send + Sync {
    /// Nombre de la implementación ("remote", "hash").
    fn name(&self) -> &'static str;

    /// Versión, para trazar qué generación produjo cada vector.
    fn version(&self) -> &str;

    /// Dimensión fija de los vectores producidos.
    fn dimension(&self) -> usize;

    async fn embed_offer(&self, offer: &Offer) -> Result<Embedding, EmbeddingError>;

    async fn embed_candidate(&self, candidate: &Candidate) -> Result<Embedding, EmbeddingError>;
}

/// Fábrica de proveedores. Un remoto mal configurado cae al hash con aviso;
/// el vector hash no aporta señal semántica y no debe puntuar en producción.
pub fn create_embedder(name: &str, config: EmbeddingConfig) -> Box<dyn ProfileEmbedder> {
    match name {
        "remote" => match RemoteEmbedder::new(config.clone()) {
            Ok(embedder) => Box::new(embedder),
            Err(err) => {
                warn!(error = %err, "remote embedder unavailable; falling back to hash embedder");
                Box::new(HashEmbedder::new(config))
            }
        },
        "hash" => Box::new(HashEmbedder::new(config)),
        other => {
            warn!(embedder = other, "unknown embedder name; falling back to hash embedder");
            Box::new(HashEmbedder::new(config))
        }
    }
}

/// Proveedor según `TM_EMBEDDER` (por defecto "remote") y la config de entorno.
pub fn embedder_from_env() -> Box<dyn ProfileEmbedder> {
    let name = std::env::var("TM_EMBEDDER").unwrap_or_else(|_| "remote".into());
    create_embedder(&name, EmbeddingConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_falls_back_to_hash_for_unknown_names() {
        let embedder = create_embedder("onnx", EmbeddingConfig::default());
        assert_eq!(embedder.name(), "hash");
    }

    #[test]
    fn factory_falls_back_when_remote_is_unconfigured() {
        let embedder = create_embedder("remote", EmbeddingConfig::default());
        assert_eq!(embedder.name(), "hash");
    }

    #[test]
    fn factory_builds_remote_when_configured() {
        let config = EmbeddingConfig {
            preprocess_endpoint: Some("http://localhost:8080/preprocess".into()),
            embedding_endpoint: Some("http://localhost:8080/embed".into()),
            ..EmbeddingConfig::default()
        };
        let embedder = create_embedder("remote", config);
        assert_eq!(embedder.name(), "remote");
        assert_eq!(embedder.dimension(), 768);
    }
}
