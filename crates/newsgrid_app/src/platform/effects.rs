use engine_logging::{engine_debug, engine_info, engine_warn};
use newsgrid_core::{Effect, Msg, RawArticle};
use newsgrid_engine::{ApiArticle, EngineEvent, EngineHandle};

use super::opener;

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleFetch { generation, delay } => {
                    engine_debug!(
                        "ScheduleFetch generation={} delay_ms={}",
                        generation,
                        delay.as_millis()
                    );
                    self.engine.schedule_fetch(generation, delay);
                }
                Effect::CancelPendingFetch => {
                    engine_debug!("CancelPendingFetch");
                    self.engine.cancel_pending();
                }
                Effect::FetchArticles { generation, query } => {
                    engine_info!(
                        "FetchArticles generation={} query_len={}",
                        generation,
                        query.len()
                    );
                    self.engine.search(generation, query);
                }
                Effect::OpenLink { url } => {
                    if let Err(err) = opener::open_detached(&url) {
                        engine_warn!("Could not open link: {}", err);
                    }
                }
            }
        }
    }

    /// Drains every engine event that is ready without blocking.
    pub fn pump_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation } => Msg::DebounceElapsed { generation },
        EngineEvent::SearchCompleted {
            generation,
            result: Ok(response),
        } => Msg::FetchSucceeded {
            generation,
            articles: response.articles.into_iter().map(map_article).collect(),
        },
        EngineEvent::SearchCompleted {
            generation,
            result: Err(err),
        } => Msg::FetchFailed {
            generation,
            reason: err.to_string(),
        },
    }
}

fn map_article(article: ApiArticle) -> RawArticle {
    RawArticle {
        title: article.title,
        description: article.description,
        url: article.url,
        url_to_image: article.url_to_image,
    }
}
