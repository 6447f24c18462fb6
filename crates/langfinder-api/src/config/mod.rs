//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_BIND_ADDR, DEFAULT_CORPUS_PATH, MAX_QUERY_LENGTH, MAX_TEXT_LENGTH, MIN_QUERY_CHARS,
};
pub use env::{Config, ENV_BASE_URL, ENV_CONFIG, ENV_CORPUS_PATH, ENV_TAG_GROUPS_PATH};
