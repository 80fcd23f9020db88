use async_trait::async_trait;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::ScoredToken;
use crate::listing::ListQuery;

/// One page of matching tokens plus the exact count of all matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenPage {
    pub rows: Vec<ScoredToken>,
    pub total: i64,
}

/// Read access to the scored token table
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Run the listing query as a single all-or-nothing read
    async fn list(&self, query: &ListQuery) -> Result<TokenPage, DatabaseError>;

    /// Connectivity check for `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub type SharedTokenStore = Arc<dyn TokenStore>;
