//! Newsgrid engine: news API client, debounce timer and effect execution.
mod debounce;
mod decode;
mod engine;
mod fetch;
mod types;

pub use debounce::Debouncer;
pub use decode::decode_search_body;
pub use engine::EngineHandle;
pub use fetch::{build_search_url, FetchSettings, NewsClient, ReqwestNewsClient, DEFAULT_ENDPOINT};
pub use types::{ApiArticle, EngineEvent, FailureKind, FetchError, Generation, SearchResponse};
