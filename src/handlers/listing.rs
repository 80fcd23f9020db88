use axum::{
    extract::{RawQuery, State},
    Json,
};

use crate::error::ApiError;
use crate::listing::{ListParams, ListQuery, ListingResponse};
use crate::AppState;

/// GET /listing - one page of scored tokens
///
/// Every query parameter is optional and malformed values fall back to their
/// defaults, so the only failure is the datastore itself (500).
pub async fn list_tokens(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListingResponse>, ApiError> {
    let params = ListParams::from_query(raw.as_deref().unwrap_or_default());
    let query = ListQuery::resolve(&params, &state.listing);

    tracing::debug!(
        page = query.page,
        limit = query.limit,
        sort_by = query.sort_by.as_str(),
        sort_order = query.sort_order.to_sql(),
        predicates = query.predicates().len(),
        "resolved listing query"
    );

    let page = state.store.list(&query).await?;
    Ok(Json(ListingResponse::new(page, &query)))
}
