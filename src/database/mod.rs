pub mod manager;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{ScoredToken, TokenColumn};
pub use repository::TokenRepository;
pub use store::{SharedTokenStore, TokenPage, TokenStore};
