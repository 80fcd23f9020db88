use crate::config::ListingConfig;
use crate::database::models::TokenColumn;
use crate::filter::{Filter, FilterError, FilterOrderInfo, NullsOrder, SortDirection};

use super::params::ListParams;
use super::predicate::Predicate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_SORT_COLUMN: TokenColumn = TokenColumn::WebsiteStage1Score;

// Sentinel bounds: a bound equal to (or beyond) these means "no filter"
pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 100.0;
pub const LIQUIDITY_FLOOR: f64 = 0.0;
pub const LIQUIDITY_CEILING: f64 = 1e9;

/// Selector value that disables a categorical filter
pub const MATCH_ALL: &str = "all";

/// Listing parameters after validation and defaulting
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: TokenColumn,
    pub sort_order: SortDirection,
    pub min_score: f64,
    pub max_score: f64,
    pub network: Option<String>,
    pub tier: Option<String>,
    pub search: String,
    pub min_liquidity: f64,
    pub max_liquidity: f64,
    pub token_type: Option<String>,
}

/// Resolved ordering: primary column plus the `id` tiebreak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortPlan {
    pub column: TokenColumn,
    pub direction: SortDirection,
    pub nulls: NullsOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: DEFAULT_SORT_COLUMN,
            sort_order: SortDirection::Desc,
            min_score: SCORE_FLOOR,
            max_score: SCORE_CEILING,
            network: None,
            tier: None,
            search: String::new(),
            min_liquidity: LIQUIDITY_FLOOR,
            max_liquidity: LIQUIDITY_CEILING,
            token_type: None,
        }
    }
}

impl ListQuery {
    /// Resolve raw parameters. Never fails: anything malformed takes its default.
    pub fn resolve(params: &ListParams, config: &ListingConfig) -> Self {
        let requested_limit = parse_positive(params.limit.as_deref()).unwrap_or(config.default_limit);
        let limit = requested_limit.min(config.max_limit).max(1);
        if limit != requested_limit {
            tracing::debug!(requested = requested_limit, applied = limit, "clamped listing limit");
        }

        let sort_by = params
            .sort_by
            .as_deref()
            .and_then(TokenColumn::sortable)
            .unwrap_or(DEFAULT_SORT_COLUMN);

        let sort_order = match params.sort_order.as_deref() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };

        Self {
            page: parse_positive(params.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit,
            sort_by,
            sort_order,
            min_score: lower_bound(params.min_score.as_deref(), SCORE_FLOOR),
            max_score: upper_bound(params.max_score.as_deref(), SCORE_CEILING),
            network: selector(params.network.as_deref()),
            tier: selector(params.tier.as_deref()),
            search: params.search.as_deref().map(str::trim).unwrap_or_default().to_string(),
            min_liquidity: lower_bound(params.min_liquidity.as_deref(), LIQUIDITY_FLOOR),
            max_liquidity: upper_bound(params.max_liquidity.as_deref(), LIQUIDITY_CEILING),
            token_type: selector(params.token_type.as_deref()),
        }
    }

    /// Zero-based index of the first row on this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)).saturating_mul(i64::from(self.limit))
    }

    /// Predicates in application order. Sentinel bounds produce nothing, so
    /// rows with null scores or liquidity stay eligible.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::Listable];

        if self.min_score > SCORE_FLOOR {
            predicates.push(Predicate::MinScore(self.min_score));
        }
        if self.max_score < SCORE_CEILING {
            predicates.push(Predicate::MaxScore(self.max_score));
        }
        if let Some(network) = &self.network {
            predicates.push(Predicate::Network(network.clone()));
        }
        if let Some(tier) = &self.tier {
            predicates.push(Predicate::Tier(tier.clone()));
        }
        if !self.search.is_empty() {
            predicates.push(Predicate::Search(self.search.clone()));
        }
        if self.min_liquidity > LIQUIDITY_FLOOR {
            predicates.push(Predicate::MinLiquidity(self.min_liquidity));
        }
        if self.max_liquidity < LIQUIDITY_CEILING {
            predicates.push(Predicate::MaxLiquidity(self.max_liquidity));
        }
        if let Some(token_type) = &self.token_type {
            predicates.push(Predicate::TokenType(token_type.clone()));
        }

        predicates
    }

    /// Unscored tokens always sink to the bottom of a score sort. Every other
    /// column keeps the database default: nulls first descending, last ascending.
    pub fn sort_plan(&self) -> SortPlan {
        let nulls = if self.sort_by == TokenColumn::WebsiteStage1Score {
            NullsOrder::Last
        } else {
            match self.sort_order {
                SortDirection::Desc => NullsOrder::First,
                SortDirection::Asc => NullsOrder::Last,
            }
        };
        SortPlan { column: self.sort_by, direction: self.sort_order, nulls }
    }

    /// Translate into a SQL filter over `table`
    pub fn to_filter(&self, table: &str) -> Result<Filter, FilterError> {
        let mut filter = Filter::new(table)?;
        for predicate in self.predicates() {
            predicate.apply(&mut filter);
        }
        for info in self.sort_plan().order_terms() {
            filter.order(info)?;
        }
        filter.limit(i64::from(self.limit), Some(self.offset()))?;
        Ok(filter)
    }
}

impl SortPlan {
    pub fn order_terms(&self) -> Vec<FilterOrderInfo> {
        vec![
            FilterOrderInfo {
                column: self.column.as_str().to_string(),
                sort: self.direction,
                nulls: Some(self.nulls),
            },
            FilterOrderInfo {
                column: TokenColumn::Id.as_str().to_string(),
                sort: SortDirection::Asc,
                nulls: None,
            },
        ]
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).filter(|v| *v > 0)
}

fn parse_finite(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).filter(|v| v.is_finite())
}

// Bounds at or past their sentinel apply no filter and resolve to the sentinel
fn lower_bound(raw: Option<&str>, floor: f64) -> f64 {
    parse_finite(raw).filter(|v| *v > floor).unwrap_or(floor)
}

fn upper_bound(raw: Option<&str>, ceiling: f64) -> f64 {
    parse_finite(raw).filter(|v| *v < ceiling).unwrap_or(ceiling)
}

fn selector(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != MATCH_ALL)
        .map(str::to_string)
}
