//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{
  get_language, get_tag, health_check, post_highlight, post_search, post_search_tiers,
};
pub use routes::{create_router, run_server};
pub use state::AppState;
