use std::sync::Arc;

use tracing::{info, warn};

use crate::embedding::ProfileEmbedder;
use crate::store::{EmbeddingWrite, ProfileStore, StoreError, MAX_BATCH_WRITES};
use crate::{Candidate, Offer, ProfileKind};

/// Resultado agregado de una corrida de sincronización.
/// Invariante: `processed + errors == total` al finalizar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub processed: usize,
    pub errors: usize,
    pub total: usize,
}

/// Recalcula los vectores de embedding de una colección de perfiles y los
/// escribe en lotes acotados.
///
/// Bucle secuencial en el orden de entrada. Una falla por perfil se cuenta y
/// registra sin abortar la corrida; una falla de commit sí corta (los lotes
/// ya confirmados persisten). Re-ejecutar es idempotente: sobrescribe vector
/// y timestamp.
pub struct SyncJob {
    embedder: Arc<dyn ProfileEmbedder>,
    store: Arc<dyn ProfileStore>,
    batch_limit: usize,
}

impl SyncJob {
    pub fn new(embedder: Arc<dyn ProfileEmbedder>, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            embedder,
            store,
            batch_limit: MAX_BATCH_WRITES,
        }
    }

    /// Reduce el tamaño de lote (pruebas). Nunca supera el tope del almacén.
    pub fn with_batch_limit(mut self, batch_limit: usize) -> Self {
        self.batch_limit = batch_limit.clamp(1, MAX_BATCH_WRITES);
        self
    }

    pub async fn sync_offers(&self, offers: &[Offer]) -> Result<SyncReport, StoreError> {
        let mut report = SyncReport {
            processed: 0,
            errors: 0,
            total: offers.len(),
        };
        let mut batch: Vec<EmbeddingWrite> = Vec::new();

        for offer in offers {
            match self.embedder.embed_offer(offer).await {
                Ok(embedding) => {
                    batch.push(EmbeddingWrite::new(
                        ProfileKind::Offer,
                        offer.id.clone(),
                        embedding.vector,
                        embedding.created_at,
                    ));
                    report.processed += 1;
                    self.flush_if_full(&mut batch).await?;
                }
                Err(err) => {
                    report.errors += 1;
                    warn!(offer_id = %offer.id, error = %err, "offer embedding failed; continuing");
                }
            }
        }

        self.flush(&mut batch).await?;
        info!(
            processed = report.processed,
            errors = report.errors,
            total = report.total,
            "offer embedding sync finished"
        );
        Ok(report)
    }

    pub async fn sync_candidates(&self, candidates: &[Candidate]) -> Result<SyncReport, StoreError> {
        let mut report = SyncReport {
            processed: 0,
            errors: 0,
            total: candidates.len(),
        };
        let mut batch: Vec<EmbeddingWrite> = Vec::new();

        for candidate in candidates {
            match self.embedder.embed_candidate(candidate).await {
                Ok(embedding) => {
                    batch.push(EmbeddingWrite::new(
                        ProfileKind::Candidate,
                        candidate.id.clone(),
                        embedding.vector,
                        embedding.created_at,
                    ));
                    report.processed += 1;
                    self.flush_if_full(&mut batch).await?;
                }
                Err(err) => {
                    report.errors += 1;
                    warn!(
                        candidate_id = %candidate.id,
                        error = %err,
                        "candidate embedding failed; continuing"
                    );
                }
            }
        }

        self.flush(&mut batch).await?;
        info!(
            processed = report.processed,
            errors = report.errors,
            total = report.total,
            "candidate embedding sync finished"
        );
        Ok(report)
    }

    /// Corta exactamente en el límite configurado, nunca por tarea.
    async fn flush_if_full(&self, batch: &mut Vec<EmbeddingWrite>) -> Result<(), StoreError> {
        if batch.len() >= self.batch_limit {
            self.flush(batch).await?;
        }
        Ok(())
    }

    async fn flush(&self, batch: &mut Vec<EmbeddingWrite>) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let writes = std::mem::take(batch);
        let count = writes.len();
        self.store.commit(writes).await?;
        info!(writes = count, "committed embedding batch");
        Ok(())
    }
}
