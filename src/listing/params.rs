/// Raw listing parameters exactly as they arrived on the query string.
///
/// Nothing is validated here; [`crate::listing::ListQuery::resolve`] applies
/// defaults. Parsing never fails: unknown keys are ignored and when a key
/// repeats the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub min_score: Option<String>,
    pub max_score: Option<String>,
    pub network: Option<String>,
    pub tier: Option<String>,
    pub search: Option<String>,
    pub min_liquidity: Option<String>,
    pub max_liquidity: Option<String>,
    pub token_type: Option<String>,
}

impl ListParams {
    /// Decode an `application/x-www-form-urlencoded` query string (without the leading `?`)
    pub fn from_query(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                "minScore" => &mut params.min_score,
                "maxScore" => &mut params.max_score,
                "network" => &mut params.network,
                "tier" => &mut params.tier,
                "search" => &mut params.search,
                "minLiquidity" => &mut params.min_liquidity,
                "maxLiquidity" => &mut params.max_liquidity,
                "tokenType" => &mut params.token_type,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}
