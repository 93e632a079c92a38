use std::sync::Arc;

use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use tm_common::db::{
    create_pool_from_url, fetch_candidates_for_sync, fetch_offers_for_sync, run_migrations, PgPool,
    PgProfileStore,
};
use tm_common::embedding::{embedder_from_env, ProfileEmbedder};
use tm_common::logging::init_telemetry;
use tm_common::store::{MemoryStore, ProfileStore};
use tm_common::sync::{SyncJob, SyncReport};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Collection {
    Candidates,
    Offers,
    All,
}

#[derive(Debug, Parser)]
#[command(
    name = "tm-sync-worker",
    about = "Recompute profile embedding vectors in batch"
)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    db_url: String,

    /// Which collection to synchronize
    #[arg(long, value_enum, default_value_t = Collection::All)]
    collection: Collection,

    /// Optional cap on how many profiles to load per collection
    #[arg(long)]
    limit: Option<i64>,

    /// Only profiles that never received a vector
    #[arg(long, default_value_t = false)]
    only_missing: bool,

    /// Compute embeddings but do not write to the store
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Apply pending schema migrations before syncing
    #[arg(long, default_value_t = false)]
    migrate: bool,
}

fn log_report(collection: &str, report: SyncReport) {
    info!(
        collection,
        processed = report.processed,
        errors = report.errors,
        total = report.total,
        "embedding sync finished"
    );
}

async fn sync_collection(
    args: &Cli,
    pool: &PgPool,
    job: &SyncJob,
) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(args.collection, Collection::Candidates | Collection::All) {
        let candidates = fetch_candidates_for_sync(pool, args.limit, args.only_missing).await?;
        info!(count = candidates.len(), "loaded candidates for sync");
        log_report("candidates", job.sync_candidates(&candidates).await?);
    }

    if matches!(args.collection, Collection::Offers | Collection::All) {
        let offers = fetch_offers_for_sync(pool, args.limit, args.only_missing).await?;
        info!(count = offers.len(), "loaded offers for sync");
        log_report("offers", job.sync_offers(&offers).await?);
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_telemetry("tm-sync-worker");

    let args = Cli::parse();
    let pool = create_pool_from_url(&args.db_url)?;

    if args.migrate {
        run_migrations(&pool).await?;
    }

    let embedder: Arc<dyn ProfileEmbedder> = Arc::from(embedder_from_env());
    info!(
        embedder = embedder.name(),
        version = embedder.version(),
        dimension = embedder.dimension(),
        dry_run = args.dry_run,
        collection = ?args.collection,
        "starting embedding sync"
    );

    let store: Arc<dyn ProfileStore> = if args.dry_run {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(PgProfileStore::new(pool.clone()))
    };

    let job = SyncJob::new(embedder, store);
    sync_collection(&args, &pool, &job).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("tm-sync-worker failed: {err}");
        std::process::exit(1);
    }
}
