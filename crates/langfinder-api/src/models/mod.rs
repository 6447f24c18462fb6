//! モデルモジュール

mod request;
mod response;

pub use request::{HighlightRequest, SearchRequest};
pub use response::{
  HighlightResponse, SearchResponse, TagResponse, TierBatchDto, TieredSearchResponse,
};
