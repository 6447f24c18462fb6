//! Service module

mod langfinder_api_service;

pub use langfinder_api_service::{LangFinderApiService, LangFinderApiServiceFull, check_query};
