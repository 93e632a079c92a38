use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Embedding, EmbeddingConfig, EmbeddingError, ProfileEmbedder};
use crate::{canonical, Candidate, Offer, ProfileKind};
use async_trait::async_trait;

/// Proveedor de producción: preprocesamiento remoto + modelo de embeddings.
///
/// El preprocesador normaliza el texto con reglas del dominio. Si falla o
/// responde mal, se usa el texto canónico local y se continúa; el modelo de
/// embeddings, en cambio, es obligatorio y su falla se propaga al llamador.
pub struct RemoteEmbedder {
    client: reqwest::Client,
    preprocess_endpoint: String,
    embedding_endpoint: String,
    dimension: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OfferPreprocessRequest<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    required_skills: Vec<&'a str>,
    desirable_skills: Vec<&'a str>,
    competencies: Option<&'a str>,
}

impl<'a> OfferPreprocessRequest<'a> {
    fn from_offer(offer: &'a Offer) -> Self {
        Self {
            title: offer.title.as_deref(),
            description: offer.description.as_deref(),
            required_skills: offer.required_skills.iter().map(|s| s.name.as_str()).collect(),
            desirable_skills: offer.desirable_skills.iter().map(|s| s.name.as_str()).collect(),
            competencies: offer.competencies.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePreprocessRequest<'a> {
    headline: Option<&'a str>,
    summary: Option<&'a str>,
    skills: Vec<&'a str>,
    soft_skills: Option<&'a str>,
    competencies: Option<&'a str>,
}

impl<'a> CandidatePreprocessRequest<'a> {
    fn from_candidate(candidate: &'a Candidate) -> Self {
        Self {
            headline: candidate.headline.as_deref(),
            summary: candidate.summary.as_deref(),
            skills: candidate.skills.iter().map(String::as_str).collect(),
            soft_skills: candidate.soft_skills.as_deref(),
            competencies: candidate.competencies.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PreprocessResponse {
    data: PreprocessData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreprocessData {
    processed_text: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    instances: Vec<EmbedInstance<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedInstance<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    embeddings: PredictionEmbeddings,
}

#[derive(Debug, Deserialize)]
struct PredictionEmbeddings {
    values: Vec<f32>,
}

impl RemoteEmbedder {
    pub fn new(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let preprocess_endpoint = config
            .preprocess_endpoint
            .clone()
            .ok_or(EmbeddingError::NotConfigured)?;
        let embedding_endpoint = config
            .embedding_endpoint
            .clone()
            .ok_or(EmbeddingError::NotConfigured)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            preprocess_endpoint: preprocess_endpoint.trim_end_matches('/').to_string(),
            embedding_endpoint,
            dimension: config.dimension,
        })
    }

    async fn preprocess<T: Serialize>(
        &self,
        kind: ProfileKind,
        body: &T,
    ) -> Result<String, EmbeddingError> {
        let endpoint = format!("{}/{}", self.preprocess_endpoint, kind.as_str());
        let response = self.client.post(&endpoint).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::Endpoint {
                endpoint,
                status: status.as_u16(),
            });
        }

        let parsed: PreprocessResponse = response
            .json()
            .await
            .map_err(|err| EmbeddingError::MalformedResponse(err.to_string()))?;
        Ok(parsed.data.processed_text)
    }

    /// Texto de embedding: el preprocesado remoto, o el canónico local si
    /// el preprocesador falla o devuelve vacío. Nunca una cadena vacía.
    async fn resolve_text<T: Serialize>(
        &self,
        kind: ProfileKind,
        id: &str,
        body: &T,
        local: impl FnOnce() -> String,
    ) -> String {
        match self.preprocess(kind, body).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(
                    profile_id = %id,
                    kind = kind.as_str(),
                    "preprocess returned empty text; using local canonical text"
                );
                local()
            }
            Err(err) => {
                warn!(
                    profile_id = %id,
                    kind = kind.as_str(),
                    error = %err,
                    "preprocess failed; using local canonical text"
                );
                local()
            }
        }
    }

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbedRequest {
            instances: vec![EmbedInstance { content: text }],
        };

        let response = self
            .client
            .post(&self.embedding_endpoint)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::Endpoint {
                endpoint: self.embedding_endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|err| EmbeddingError::MalformedResponse(err.to_string()))?;
        let vector = parsed
            .predictions
            .into_iter()
            .next()
            .map(|p| p.embeddings.values)
            .ok_or_else(|| EmbeddingError::MalformedResponse("empty predictions".into()))?;

        if vector.len() != self.dimension {
            return Err(EmbeddingError::Dimension {
                expected: self.dimension,
                got: vector.len(),
            });
        }

        Ok(vector)
    }
}

#[async_trait]
impl ProfileEmbedder for RemoteEmbedder {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_offer(&self, offer: &Offer) -> Result<Embedding, EmbeddingError> {
        let request = OfferPreprocessRequest::from_offer(offer);
        let text = self
            .resolve_text(ProfileKind::Offer, &offer.id, &request, || {
                canonical::render_offer(offer)
            })
            .await;

        Ok(Embedding {
            vector: self.embed_text(&text).await?,
            source: ProfileKind::Offer,
            created_at: Utc::now(),
        })
    }

    async fn embed_candidate(&self, candidate: &Candidate) -> Result<Embedding, EmbeddingError> {
        let request = CandidatePreprocessRequest::from_candidate(candidate);
        let text = self
            .resolve_text(ProfileKind::Candidate, &candidate.id, &request, || {
                canonical::render_candidate(candidate)
            })
            .await;

        Ok(Embedding {
            vector: self.embed_text(&text).await?,
            source: ProfileKind::Candidate,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeightedSkill;

    fn configured() -> EmbeddingConfig {
        EmbeddingConfig {
            preprocess_endpoint: Some("http://localhost:9999/preprocess/".into()),
            embedding_endpoint: Some("http://localhost:9999/embed".into()),
            dimension: 768,
            timeout_secs: 1,
        }
    }

    #[test]
    fn new_requires_both_endpoints() {
        let mut config = configured();
        config.embedding_endpoint = None;
        assert!(matches!(
            RemoteEmbedder::new(config),
            Err(EmbeddingError::NotConfigured)
        ));

        let mut config = configured();
        config.preprocess_endpoint = None;
        assert!(matches!(
            RemoteEmbedder::new(config),
            Err(EmbeddingError::NotConfigured)
        ));
    }

    #[test]
    fn preprocess_endpoint_is_normalized() {
        let embedder = RemoteEmbedder::new(configured()).unwrap();
        assert_eq!(
            embedder.preprocess_endpoint,
            "http://localhost:9999/preprocess"
        );
    }

    #[test]
    fn offer_request_flattens_skill_names() {
        let offer = Offer {
            title: Some("Data Engineer".into()),
            required_skills: vec![
                WeightedSkill::new("Python", None),
                WeightedSkill::new("Airflow", Some(0.6)),
            ],
            ..Offer::default()
        };

        let request = OfferPreprocessRequest::from_offer(&offer);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["title"], "Data Engineer");
        assert_eq!(body["requiredSkills"][1], "Airflow");
        assert!(body["description"].is_null());
    }

    #[test]
    fn embed_response_shape_parses() {
        let raw = r#"{"predictions":[{"embeddings":{"values":[0.1, 0.2]}}]}"#;
        let parsed: EmbedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.predictions[0].embeddings.values.len(), 2);
    }

    #[test]
    fn preprocess_response_shape_parses() {
        let raw = r#"{"data":{"processedText":"perfil normalizado"}}"#;
        let parsed: PreprocessResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.processed_text, "perfil normalizado");
    }
}
