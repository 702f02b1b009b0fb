use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::article::filter_valid;
use crate::view_model::FETCH_FAILED_MESSAGE;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(text) => {
            if text == state.query() {
                return (state, Vec::new());
            }
            let generation = state.set_query(text);
            engine_debug!(
                "Query changed generation={} query_len={}",
                generation,
                state.query().len()
            );
            // Clearing the box never searches and keeps whatever is on screen.
            if state.query().is_empty() {
                vec![Effect::CancelPendingFetch]
            } else {
                vec![Effect::ScheduleFetch {
                    generation,
                    delay: state.debounce(),
                }]
            }
        }
        Msg::DebounceElapsed { generation } => {
            if generation != state.generation() || state.query().is_empty() {
                engine_debug!(
                    "Ignoring superseded debounce generation={} current={}",
                    generation,
                    state.generation()
                );
                return (state, Vec::new());
            }
            state.begin_fetch(generation);
            engine_info!("Fetching articles generation={}", generation);
            vec![Effect::FetchArticles {
                generation,
                query: state.query().to_string(),
            }]
        }
        Msg::FetchSucceeded {
            generation,
            articles,
        } => {
            if state.is_stale(generation) {
                engine_info!("Discarding stale response generation={}", generation);
                return (state, Vec::new());
            }
            let received = articles.len();
            let valid = filter_valid(articles);
            engine_info!(
                "Fetched articles generation={} received={} dropped={}",
                generation,
                received,
                received - valid.len()
            );
            state.apply_results(valid);
            Vec::new()
        }
        Msg::FetchFailed { generation, reason } => {
            if state.is_stale(generation) {
                engine_info!("Discarding stale failure generation={}", generation);
                return (state, Vec::new());
            }
            engine_warn!("Fetch failed generation={}: {}", generation, reason);
            state.apply_failure(FETCH_FAILED_MESSAGE);
            Vec::new()
        }
        Msg::SelectionMoved { delta } => {
            state.move_selection(delta);
            Vec::new()
        }
        Msg::OpenSelected => state
            .selected_article()
            .and_then(|article| article.url.clone())
            .filter(|url| !url.is_empty())
            .map(|url| Effect::OpenLink { url })
            .into_iter()
            .collect(),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
