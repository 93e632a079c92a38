pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::ProfileKind;
pub use memory::MemoryStore;

/// Tope de escrituras por lote confirmado. El almacén de documentos admite
/// hasta 500 operaciones por commit; 400 deja margen de seguridad.
pub const MAX_BATCH_WRITES: usize = 400;

/// Escritura merge de `{embedding_vector, embedding_updated_at}` sobre el
/// registro existente de un perfil.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingWrite {
    pub kind: ProfileKind,
    pub id: String,
    pub vector: Vec<f32>,
    pub updated_at: DateTime<Utc>,
}

impl EmbeddingWrite {
    pub fn new(
        kind: ProfileKind,
        id: impl Into<String>,
        vector: Vec<f32>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            vector,
            updated_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
    #[error("commit rejected: {0}")]
    Rejected(String),
}

/// Destino de escritura de los vectores de embedding.
///
/// Se inyecta explícitamente en el SyncJob (sin singletons de aplicación).
/// La sincronización es la única escritora de estos campos; el scoring sólo
/// los lee, por lo que no se requiere locking.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Confirma un lote completo de escrituras. Una falla aquí es fatal para
    /// la corrida en curso; los lotes ya confirmados persisten.
    async fn commit(&self, writes: Vec<EmbeddingWrite>) -> Result<(), StoreError>;
}
