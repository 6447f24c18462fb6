//! langfinder-api crate
//!
//! Web server exposing the language lookup as HTTP API.
//!
//! ## Endpoints
//! - `POST /search` - Tiered language search (merged)
//! - `POST /search/tiers` - Tiered language search (one batch per tier)
//! - `POST /highlight` - Split a display string around a query
//! - `GET /tags/{tag}` - Shortest equivalent tag
//! - `GET /languages/{code}` - Record lookup
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:5530/search \
//!   -H "Content-Type: application/json" \
//!   -d '{"query": "uzbek", "limit": 10}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{
  HighlightRequest, HighlightResponse, SearchRequest, SearchResponse, TagResponse, TierBatchDto,
  TieredSearchResponse,
};
pub use service::{LangFinderApiService, LangFinderApiServiceFull};
