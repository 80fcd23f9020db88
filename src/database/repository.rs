use async_trait::async_trait;
use serde_json::Value;
use sqlx::{self, postgres::PgArguments, types::Json, PgPool, Row};
use std::time::{Duration, Instant};

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::ScoredToken;
use crate::database::store::{TokenPage, TokenStore};
use crate::filter::Filter;
use crate::listing::ListQuery;

/// Postgres-backed token listing
pub struct TokenRepository {
    table_name: String,
    pool: PgPool,
    enable_query_logging: bool,
    slow_query_threshold: Option<Duration>,
}

impl TokenRepository {
    pub fn new(pool: PgPool, table_name: impl Into<String>, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let table_name = table_name.into();
        // Reuse Filter table name validation
        Filter::new(&table_name)?;
        Ok(Self {
            table_name,
            pool,
            enable_query_logging: config.enable_query_logging,
            slow_query_threshold: config
                .enable_slow_query_warning
                .then(|| Duration::from_millis(config.slow_query_threshold_ms)),
        })
    }
}

#[async_trait]
impl TokenStore for TokenRepository {
    async fn list(&self, query: &ListQuery) -> Result<TokenPage, DatabaseError> {
        let sql_result = query.to_filter(&self.table_name)?.to_page_sql()?;

        if self.enable_query_logging {
            tracing::debug!(sql = %sql_result.query, params = ?sql_result.params, "listing query");
        }

        let started = Instant::now();
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p)?;
        }
        let row = q.fetch_one(&self.pool).await?;
        let elapsed = started.elapsed();

        if let Some(threshold) = self.slow_query_threshold {
            if elapsed > threshold {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    threshold_ms = threshold.as_millis() as u64,
                    page = query.page,
                    limit = query.limit,
                    "slow listing query"
                );
            }
        }

        let total: i64 = row.try_get("total")?;
        let Json(rows): Json<Vec<ScoredToken>> = row.try_get("data")?;
        Ok(TokenPage { rows, total })
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> Result<sqlx::query::Query<'q, sqlx::Postgres, PgArguments>, DatabaseError> {
    match v {
        Value::Bool(b) => Ok(q.bind(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(q.bind(i))
            } else if let Some(f) = n.as_f64() {
                Ok(q.bind(f))
            } else {
                Ok(q.bind(n.to_string()))
            }
        }
        Value::String(s) => Ok(q.bind(s.as_str())),
        // Skipping would shift every later placeholder
        other => Err(DatabaseError::QueryError(format!("cannot bind parameter {}", other))),
    }
}
