use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{EmbeddingWrite, ProfileStore, StoreError};

/// Almacén en memoria para pruebas y corridas `--dry-run`.
///
/// Registra cada commit tal como llega, lo que permite verificar los cortes
/// de lote (tamaños y orden) además del contenido escrito.
#[derive(Default)]
pub struct MemoryStore {
    commits: Mutex<Vec<Vec<EmbeddingWrite>>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace fallar todos los commits siguientes (simula el almacén caído).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Tamaño de cada commit confirmado, en orden de llegada.
    pub fn commit_sizes(&self) -> Vec<usize> {
        self.commits
            .lock()
            .expect("memory store poisoned")
            .iter()
            .map(Vec::len)
            .collect()
    }

    /// Última escritura confirmada para un perfil, si existe.
    pub fn last_write_for(&self, id: &str) -> Option<EmbeddingWrite> {
        self.commits
            .lock()
            .expect("memory store poisoned")
            .iter()
            .flatten()
            .filter(|write| write.id == id)
            .last()
            .cloned()
    }

    pub fn total_writes(&self) -> usize {
        self.commit_sizes().iter().sum()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn commit(&self, writes: Vec<EmbeddingWrite>) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("memory store set to fail".into()));
        }

        self.commits
            .lock()
            .expect("memory store poisoned")
            .push(writes);
        Ok(())
    }
}
