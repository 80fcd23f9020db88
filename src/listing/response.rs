use serde::Serialize;

use crate::database::models::{ScoredToken, TokenColumn};
use crate::database::store::TokenPage;
use crate::filter::SortDirection;

use super::query::ListQuery;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let total = total.max(0);
        let limit_i = i64::from(limit.max(1));
        let total_pages = (total + limit_i - 1) / limit_i;
        Self {
            page,
            limit,
            total,
            total_pages,
            has_more: i64::from(page) < total_pages,
        }
    }
}

/// The filters actually applied after defaulting. `None` means that filter was off.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
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

impl From<&ListQuery> for AppliedFilters {
    fn from(q: &ListQuery) -> Self {
        Self {
            sort_by: q.sort_by,
            sort_order: q.sort_order,
            min_score: q.min_score,
            max_score: q.max_score,
            network: q.network.clone(),
            tier: q.tier.clone(),
            search: q.search.clone(),
            min_liquidity: q.min_liquidity,
            max_liquidity: q.max_liquidity,
            token_type: q.token_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub data: Vec<ScoredToken>,
    pub pagination: Pagination,
    pub filters: AppliedFilters,
}

impl ListingResponse {
    pub fn new(page: TokenPage, query: &ListQuery) -> Self {
        Self {
            data: page.rows,
            pagination: Pagination::new(query.page, query.limit, page.total),
            filters: AppliedFilters::from(query),
        }
    }
}
