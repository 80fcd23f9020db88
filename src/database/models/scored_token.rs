use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A token row scored by the analysis pipeline. Read-only from this service.
///
/// Only the columns the listing filters or sorts on are typed. The id and
/// timestamps are passed through as stored, and unmodelled columns land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredToken {
    /// Opaque row identifier (uuid, bigint, ... whatever the table uses)
    pub id: Value,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<String>,

    /// Website-quality score, 0-100; null until analyzed
    #[serde(default)]
    pub website_stage1_score: Option<f64>,
    #[serde(default)]
    pub website_stage1_tier: Option<String>,
    /// Postgres' JSON rendering of the timestamp, with or without an offset
    #[serde(default)]
    pub website_stage1_analyzed_at: Option<String>,

    #[serde(default)]
    pub current_liquidity_usd: Option<f64>,
    #[serde(default)]
    pub current_market_cap: Option<f64>,
    #[serde(default)]
    pub roi_percent: Option<f64>,

    /// Website liveness: active, pending, dead, ...
    #[serde(default)]
    pub website_status: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Columns of the scored token table that the listing filters or sorts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenColumn {
    Id,
    Symbol,
    Name,
    Network,
    WebsiteStage1Score,
    WebsiteStage1Tier,
    WebsiteStage1AnalyzedAt,
    CurrentLiquidityUsd,
    CurrentMarketCap,
    RoiPercent,
    WebsiteStatus,
    TokenType,
}

impl TokenColumn {
    /// Columns a client may sort by
    pub const SORTABLE: [TokenColumn; 6] = [
        TokenColumn::WebsiteStage1Score,
        TokenColumn::CurrentLiquidityUsd,
        TokenColumn::CurrentMarketCap,
        TokenColumn::RoiPercent,
        TokenColumn::WebsiteStage1AnalyzedAt,
        TokenColumn::Symbol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenColumn::Id => "id",
            TokenColumn::Symbol => "symbol",
            TokenColumn::Name => "name",
            TokenColumn::Network => "network",
            TokenColumn::WebsiteStage1Score => "website_stage1_score",
            TokenColumn::WebsiteStage1Tier => "website_stage1_tier",
            TokenColumn::WebsiteStage1AnalyzedAt => "website_stage1_analyzed_at",
            TokenColumn::CurrentLiquidityUsd => "current_liquidity_usd",
            TokenColumn::CurrentMarketCap => "current_market_cap",
            TokenColumn::RoiPercent => "roi_percent",
            TokenColumn::WebsiteStatus => "website_status",
            TokenColumn::TokenType => "token_type",
        }
    }

    /// Look up a sortable column by its exact column name
    pub fn sortable(name: &str) -> Option<TokenColumn> {
        Self::SORTABLE.iter().copied().find(|c| c.as_str() == name)
    }
}
