use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::{DatabaseError, ScoredToken, TokenColumn, TokenPage, TokenStore};
use crate::filter::{NullsOrder, SortDirection};
use crate::listing::{ListQuery, PredicateSink, SortPlan};
use crate::{app, AppState};

/// Token store over a fixed set of rows, evaluating the same predicates and
/// ordering the SQL repository pushes down to Postgres
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    rows: Arc<Vec<ScoredToken>>,
}

impl MemoryTokenStore {
    pub fn new(rows: Vec<ScoredToken>) -> Self {
        Self { rows: Arc::new(rows) }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn list(&self, query: &ListQuery) -> Result<TokenPage, DatabaseError> {
        let predicates = query.predicates();
        let mut matching: Vec<&ScoredToken> = self
            .rows
            .iter()
            .filter(|row| {
                let mut matcher = RowMatcher { row, matched: true };
                for predicate in &predicates {
                    predicate.apply(&mut matcher);
                }
                matcher.matched
            })
            .collect();

        let plan = query.sort_plan();
        matching.sort_by(|a, b| compare(&plan, a, b));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let rows = matching
            .iter()
            .skip(offset)
            .take(query.limit as usize)
            .map(|row| (*row).clone())
            .collect();

        Ok(TokenPage { rows, total: matching.len() as i64 })
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Store whose every call fails, carrying internal detail that must never reach clients
#[derive(Clone, Copy, Default)]
pub struct FailingTokenStore;

#[async_trait]
impl TokenStore for FailingTokenStore {
    async fn list(&self, _query: &ListQuery) -> Result<TokenPage, DatabaseError> {
        Err(DatabaseError::QueryError(
            "relation \"crypto_projects_rated\" does not exist".to_string(),
        ))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::QueryError("connection refused (os error 111)".to_string()))
    }
}

/// Evaluates predicates against a single row. Null never satisfies a bound.
struct RowMatcher<'a> {
    row: &'a ScoredToken,
    matched: bool,
}

impl PredicateSink for RowMatcher<'_> {
    fn equals(&mut self, column: TokenColumn, value: &str) {
        self.matched &= text(self.row, column).as_deref() == Some(value);
    }

    fn at_least(&mut self, column: TokenColumn, bound: f64) {
        self.matched &= number(self.row, column).is_some_and(|v| v >= bound);
    }

    fn at_most(&mut self, column: TokenColumn, bound: f64) {
        self.matched &= number(self.row, column).is_some_and(|v| v <= bound);
    }

    fn one_of_or_null(&mut self, column: TokenColumn, values: &[&str]) {
        self.matched &= match text(self.row, column) {
            Some(v) => values.contains(&v.as_str()),
            None => true,
        };
    }

    fn contains_any(&mut self, columns: &[TokenColumn], needle: &str) {
        let needle = needle.to_lowercase();
        self.matched &= columns.iter().any(|column| {
            text(self.row, *column).is_some_and(|v| v.to_lowercase().contains(&needle))
        });
    }
}

#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey {
    Number(f64),
    Text(String),
}

/// Ids are opaque; strings compare by content, anything else by its JSON text
fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text(row: &ScoredToken, column: TokenColumn) -> Option<String> {
    match column {
        TokenColumn::Id => Some(id_text(&row.id)),
        TokenColumn::Symbol => row.symbol.clone(),
        TokenColumn::Name => row.name.clone(),
        TokenColumn::Network => row.network.clone(),
        TokenColumn::WebsiteStage1Tier => row.website_stage1_tier.clone(),
        TokenColumn::WebsiteStatus => row.website_status.clone(),
        TokenColumn::TokenType => row.token_type.clone(),
        _ => None,
    }
}

fn number(row: &ScoredToken, column: TokenColumn) -> Option<f64> {
    match column {
        TokenColumn::WebsiteStage1Score => row.website_stage1_score,
        TokenColumn::CurrentLiquidityUsd => row.current_liquidity_usd,
        TokenColumn::CurrentMarketCap => row.current_market_cap,
        TokenColumn::RoiPercent => row.roi_percent,
        _ => None,
    }
}

fn sort_key(row: &ScoredToken, column: TokenColumn) -> Option<SortKey> {
    match column {
        // Fixture timestamps share one ISO format, so text order is time order
        TokenColumn::WebsiteStage1AnalyzedAt => row.website_stage1_analyzed_at.clone().map(SortKey::Text),
        _ => number(row, column)
            .map(SortKey::Number)
            .or_else(|| text(row, column).map(SortKey::Text)),
    }
}

fn compare(plan: &SortPlan, a: &ScoredToken, b: &ScoredToken) -> Ordering {
    let null_first = match plan.nulls {
        NullsOrder::First => Ordering::Less,
        NullsOrder::Last => Ordering::Greater,
    };

    let primary = match (sort_key(a, plan.column), sort_key(b, plan.column)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => null_first,
        (Some(_), None) => null_first.reverse(),
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match plan.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    };

    primary.then_with(|| id_text(&a.id).cmp(&id_text(&b.id)))
}

/// Builder for test rows. Ids derive from the symbol so separately built
/// fixtures compare equal.
pub struct TokenFixture {
    token: ScoredToken,
}

pub fn fixture(symbol: &str) -> TokenFixture {
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, symbol.as_bytes());

    TokenFixture {
        token: ScoredToken {
            id: Value::String(id.to_string()),
            symbol: Some(symbol.to_string()),
            name: None,
            network: None,
            website_stage1_score: None,
            website_stage1_tier: None,
            website_stage1_analyzed_at: None,
            current_liquidity_usd: None,
            current_market_cap: None,
            roi_percent: None,
            website_status: None,
            token_type: None,
            extra: Map::new(),
        },
    }
}

impl TokenFixture {
    pub fn name(mut self, name: &str) -> Self {
        self.token.name = Some(name.to_string());
        self
    }

    pub fn network(mut self, network: &str) -> Self {
        self.token.network = Some(network.to_string());
        self
    }

    pub fn tier(mut self, tier: &str) -> Self {
        self.token.website_stage1_tier = Some(tier.to_string());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.token.website_stage1_score = Some(score);
        self
    }

    pub fn liquidity(mut self, usd: f64) -> Self {
        self.token.current_liquidity_usd = Some(usd);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.token.website_status = Some(status.to_string());
        self
    }

    pub fn token_type(mut self, token_type: &str) -> Self {
        self.token.token_type = Some(token_type.to_string());
        self
    }

    pub fn analyzed_at(mut self, timestamp: &str) -> Self {
        self.token.website_stage1_analyzed_at = Some(timestamp.to_string());
        self
    }

    pub fn build(self) -> ScoredToken {
        self.token
    }
}

pub fn test_app<S: TokenStore + 'static>(store: S) -> Router {
    test_app_with_config(store, AppConfig::development())
}

pub fn test_app_with_config<S: TokenStore + 'static>(store: S, config: AppConfig) -> Router {
    let state = AppState::new(Arc::new(store), &config);
    app(state, &config)
}

/// Issue a GET through the router and decode the JSON body
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::listing::ListParams;

    fn query(raw: &str) -> ListQuery {
        ListQuery::resolve(&ListParams::from_query(raw), &AppConfig::development().listing)
    }

    #[tokio::test]
    async fn tier_and_token_type_filter_in_memory() {
        let store = MemoryTokenStore::new(vec![
            fixture("A").tier("ALPHA").token_type("meme").build(),
            fixture("B").tier("ALPHA").token_type("utility").build(),
            fixture("C").tier("BETA").token_type("meme").build(),
        ]);
        let page = store.list(&query("tier=ALPHA&tokenType=meme")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].symbol.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn search_is_literal() {
        let store = MemoryTokenStore::new(vec![
            fixture("50%OFF").build(),
            fixture("50XOFF").build(),
        ]);
        let page = store.list(&query("search=50%25")).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn ties_break_on_id() {
        let rows = vec![fixture("X").score(50.0).build(), fixture("Y").score(50.0).build()];
        let mut expected: Vec<String> = rows.iter().map(|r| id_text(&r.id)).collect();
        expected.sort();
        let page = MemoryTokenStore::new(rows).list(&ListQuery::default()).await.unwrap();
        assert_eq!(page.rows.iter().map(|r| id_text(&r.id)).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn fixture_ids_are_stable_per_symbol() {
        assert_eq!(fixture("PEPE").build().id, fixture("PEPE").build().id);
        assert_ne!(fixture("PEPE").build().id, fixture("WIF").build().id);
    }

    #[tokio::test]
    async fn sorts_by_analysis_time() {
        let store = MemoryTokenStore::new(vec![
            fixture("OLD").analyzed_at("2025-01-05T08:00:00").build(),
            fixture("NEW").analyzed_at("2025-03-01T12:00:00").build(),
            fixture("NONE").build(),
        ]);
        let page = store.list(&query("sortBy=website_stage1_analyzed_at&sortOrder=asc")).await.unwrap();
        let symbols: Vec<_> = page.rows.iter().filter_map(|r| r.symbol.clone()).collect();
        assert_eq!(symbols, vec!["OLD", "NEW", "NONE"]);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_total() {
        let rows = (0..3).map(|i| fixture(&format!("P{}", i)).build()).collect();
        let page = MemoryTokenStore::new(rows).list(&query("page=5")).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total, 3);
    }
}
