use std::str::FromStr;

use chrono::{DateTime, Utc};
use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::db::PgPool;
use crate::{HierarchyLevel, Offer, OfferStatus, WeightedSkill};

#[derive(Debug, thiserror::Error)]
pub enum OfferFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

const SELECT_OFFERS: &str = "SELECT id, title, description, required_skills, desirable_skills, \
    competencies, sector_id, hierarchy_level, status, embedding_vector, embedding_updated_at \
    FROM tm.offers";

/// Habilidades desde jsonb: objetos `{name, weight}` o strings sueltos.
/// Entradas irreconocibles se descartan en lugar de fallar el mapeo.
pub(crate) fn parse_weighted_skills(value: Option<Value>) -> Vec<WeightedSkill> {
    let Some(Value::Array(items)) = value else {
        return vec![];
    };
    items.into_iter().filter_map(parse_weighted_skill).collect()
}

fn parse_weighted_skill(item: Value) -> Option<WeightedSkill> {
    match item {
        Value::String(name) => Some(WeightedSkill::new(name, None)),
        Value::Object(fields) => {
            let name = fields.get("name")?.as_str()?.to_string();
            let weight = fields.get("weight").and_then(Value::as_f64);
            Some(WeightedSkill::new(name, weight))
        }
        _ => None,
    }
}

pub(crate) fn parse_hierarchy(value: Option<String>) -> Option<HierarchyLevel> {
    value.and_then(|raw| HierarchyLevel::from_str(raw.trim()).ok())
}

/// Un estado irreconocible se trata como pausado: nunca puntuable.
fn parse_status(value: Option<String>) -> OfferStatus {
    value
        .and_then(|raw| OfferStatus::from_str(raw.trim()).ok())
        .unwrap_or(OfferStatus::Paused)
}

fn map_offer_row(row: &Row) -> Offer {
    Offer {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        required_skills: parse_weighted_skills(row.get("required_skills")),
        desirable_skills: parse_weighted_skills(row.get("desirable_skills")),
        competencies: row.get("competencies"),
        sector_id: row.get("sector_id"),
        hierarchy_level: parse_hierarchy(row.get("hierarchy_level")),
        status: parse_status(row.get("status")),
        embedding_vector: row.get::<_, Option<Vec<f32>>>("embedding_vector"),
        embedding_updated_at: row.get::<_, Option<DateTime<Utc>>>("embedding_updated_at"),
    }
}

/// Ofertas activas para el pipeline de matching, con pushdown opcional del
/// sector (el FilterStage en memoria aplica las mismas reglas igualmente).
#[instrument(skip(pool))]
pub async fn fetch_active_offers(
    pool: &PgPool,
    sector: Option<&str>,
) -> Result<Vec<Offer>, OfferFetchError> {
    let client = pool.get().await?;

    let rows = match sector {
        Some(sector) => {
            let query =
                format!("{SELECT_OFFERS} WHERE status = 'active' AND sector_id = $1 ORDER BY id");
            client.query(&query, &[&sector]).await?
        }
        None => {
            let query = format!("{SELECT_OFFERS} WHERE status = 'active' ORDER BY id");
            client.query(&query, &[]).await?
        }
    };

    Ok(rows.iter().map(map_offer_row).collect())
}

/// Ofertas a sincronizar, en el orden estable de la consulta.
/// `only_missing` restringe a perfiles que nunca recibieron vector.
#[instrument(skip(pool))]
pub async fn fetch_offers_for_sync(
    pool: &PgPool,
    limit: Option<i64>,
    only_missing: bool,
) -> Result<Vec<Offer>, OfferFetchError> {
    let client = pool.get().await?;

    let mut query = String::from(SELECT_OFFERS);
    if only_missing {
        query.push_str(" WHERE embedding_vector IS NULL");
    }
    query.push_str(" ORDER BY id");
    if let Some(limit) = limit {
        query.push_str(&format!(" LIMIT {limit}"));
    }

    let rows = client.query(&query, &[]).await?;
    Ok(rows.iter().map(map_offer_row).collect())
}
