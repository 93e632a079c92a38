pub mod candidates;
pub mod embeddings;
pub mod migrations;
pub mod offers;
pub mod pool;

// Re-exports únicos para que los binarios vean un símbolo por helper.
pub use candidates::{fetch_candidates_for_sync, CandidateFetchError};
pub use embeddings::PgProfileStore;
pub use migrations::{run_migrations, MigrationError};
pub use offers::{fetch_active_offers, fetch_offers_for_sync, OfferFetchError};
pub use pool::{create_pool_from_url, DbPoolError, PgPool};
