pub mod scored_token;

pub use scored_token::{ScoredToken, TokenColumn};
