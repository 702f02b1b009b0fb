use std::time::Duration;

use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any pending debounce timer with one for `generation`.
    ScheduleFetch {
        generation: Generation,
        delay: Duration,
    },
    /// Drop the pending debounce timer, if any.
    CancelPendingFetch,
    /// Issue one search request. The response must carry `generation` back.
    FetchArticles { generation: Generation, query: String },
    /// Open `url` outside the application, detached from it.
    OpenLink { url: String },
}
