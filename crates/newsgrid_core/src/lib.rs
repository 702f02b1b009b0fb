//! Newsgrid core: pure search state machine and view-model helpers.
mod article;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use article::{filter_valid, is_valid, Article, RawArticle, REMOVED_SENTINEL};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, FetchStatus, Generation, DEBOUNCE_DELAY};
pub use update::update;
pub use view_model::{
    AppViewModel, CardKey, CardView, ErrorBanner, GridView, LinkView, LoadingPanel,
    EMPTY_RESULTS_MESSAGE, FETCH_FAILED_MESSAGE, LOADING_LABEL, READ_MORE_LABEL,
    SEARCH_PLACEHOLDER,
};
