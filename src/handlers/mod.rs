// handlers/mod.rs - HTTP handlers
//
// Public, read-only surface:
//   GET /                           service info
//   GET /health                     datastore connectivity
//   GET /listing                    token listing (filters, sort, pagination)
//   GET /api/crypto-projects-rated  alias of /listing used by the dashboard

pub mod health;
pub mod listing;

pub use health::{health, not_found, root};
pub use listing::list_tokens;
