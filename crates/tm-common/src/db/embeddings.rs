use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::db::PgPool;
use crate::store::{EmbeddingWrite, ProfileStore, StoreError};
use crate::ProfileKind;

const UPDATE_CANDIDATE: &str = "UPDATE tm.candidates \
    SET embedding_vector = $2, embedding_updated_at = $3 \
    WHERE id = $1";

const UPDATE_OFFER: &str = "UPDATE tm.offers \
    SET embedding_vector = $2, embedding_updated_at = $3 \
    WHERE id = $1";

/// Escritor Postgres de vectores de embedding.
///
/// Cada lote se confirma en una única transacción: o entra completo o no
/// entra. El merge sólo toca `embedding_vector` / `embedding_updated_at`;
/// el resto del registro queda intacto.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[instrument(skip(self, writes), fields(writes = writes.len()))]
    async fn commit(&self, writes: Vec<EmbeddingWrite>) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;
        let candidate_stmt = tx.prepare(UPDATE_CANDIDATE).await?;
        let offer_stmt = tx.prepare(UPDATE_OFFER).await?;

        for write in &writes {
            let stmt = match write.kind {
                ProfileKind::Candidate => &candidate_stmt,
                ProfileKind::Offer => &offer_stmt,
            };
            let rows = tx
                .execute(stmt, &[&write.id, &write.vector, &write.updated_at])
                .await?;
            if rows == 0 {
                // El perfil fue borrado entre el fetch y el commit; el merge no crea registros.
                warn!(
                    profile_id = %write.id,
                    kind = write.kind.as_str(),
                    "embedding write matched no row"
                );
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
