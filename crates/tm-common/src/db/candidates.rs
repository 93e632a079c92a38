use chrono::{DateTime, Utc};
use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use super::offers::parse_hierarchy;
use crate::db::PgPool;
use crate::Candidate;

#[derive(Debug, thiserror::Error)]
pub enum CandidateFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

const SELECT_CANDIDATES: &str = "SELECT id, headline, summary, skills, soft_skills, \
    competencies, sector_id, hierarchy_level, embedding_vector, embedding_updated_at \
    FROM tm.candidates";

/// Habilidades del candidato desde jsonb: array de strings; lo demás se descarta.
fn parse_skill_names(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect(),
        _ => vec![],
    }
}

fn map_candidate_row(row: &Row) -> Candidate {
    Candidate {
        id: row.get("id"),
        headline: row.get("headline"),
        summary: row.get("summary"),
        skills: parse_skill_names(row.get("skills")),
        soft_skills: row.get("soft_skills"),
        competencies: row.get("competencies"),
        sector_id: row.get("sector_id"),
        hierarchy_level: parse_hierarchy(row.get("hierarchy_level")),
        embedding_vector: row.get::<_, Option<Vec<f32>>>("embedding_vector"),
        embedding_updated_at: row.get::<_, Option<DateTime<Utc>>>("embedding_updated_at"),
    }
}

/// Candidatos a sincronizar, en el orden estable de la consulta.
#[instrument(skip(pool))]
pub async fn fetch_candidates_for_sync(
    pool: &PgPool,
    limit: Option<i64>,
    only_missing: bool,
) -> Result<Vec<Candidate>, CandidateFetchError> {
    let client = pool.get().await?;

    let mut query = String::from(SELECT_CANDIDATES);
    if only_missing {
        query.push_str(" WHERE embedding_vector IS NULL");
    }
    query.push_str(" ORDER BY id");
    if let Some(limit) = limit {
        query.push_str(&format!(" LIMIT {limit}"));
    }

    let rows = client.query(&query, &[]).await?;
    Ok(rows.iter().map(map_candidate_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_arrays_only() {
        assert_eq!(
            parse_skill_names(Some(json!(["Rust", "SQL"]))),
            vec!["Rust".to_string(), "SQL".to_string()]
        );
        assert_eq!(
            parse_skill_names(Some(json!(["Rust", 3, {"name": "SQL"}]))),
            vec!["Rust".to_string()]
        );
        assert!(parse_skill_names(None).is_empty());
        assert!(parse_skill_names(Some(json!("Rust"))).is_empty());
    }
}
