use std::time::Duration;

use crate::article::Article;
use crate::view_model::{
    AppViewModel, CardKey, CardView, ErrorBanner, GridView, LinkView, LoadingPanel,
    EMPTY_RESULTS_MESSAGE, LOADING_LABEL, READ_MORE_LABEL, SEARCH_PLACEHOLDER,
};

/// Quiet period a query must survive before it is searched.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Monotonic counter bumped on every query change.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    query: String,
    articles: Vec<Article>,
    status: FetchStatus,
    generation: Generation,
    latest_request: Option<Generation>,
    selected: Option<usize>,
    debounce: Duration,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_debounce(DEBOUNCE_DELAY)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            articles: Vec::new(),
            status: FetchStatus::Idle,
            generation: 0,
            latest_request: None,
            selected: None,
            debounce,
            dirty: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.selected.and_then(|index| self.articles.get(index))
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            query: self.query.clone(),
            placeholder: SEARCH_PLACEHOLDER,
            loading: matches!(self.status, FetchStatus::Loading).then_some(LoadingPanel {
                label: LOADING_LABEL,
            }),
            error: match &self.status {
                FetchStatus::Error(message) => Some(ErrorBanner {
                    message: message.clone(),
                }),
                FetchStatus::Idle | FetchStatus::Loading => None,
            },
            grid: self.grid_view(),
            selected: self.selected,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Stores the new query and returns the generation it was assigned.
    pub(crate) fn set_query(&mut self, query: String) -> Generation {
        self.query = query;
        self.generation += 1;
        self.mark_dirty();
        self.generation
    }

    pub(crate) fn begin_fetch(&mut self, generation: Generation) {
        self.latest_request = Some(generation);
        self.status = FetchStatus::Loading;
        self.mark_dirty();
    }

    /// A response is stale once a newer request has been started after it.
    pub(crate) fn is_stale(&self, generation: Generation) -> bool {
        match self.latest_request {
            Some(latest) => generation < latest,
            None => true,
        }
    }

    pub(crate) fn apply_results(&mut self, articles: Vec<Article>) {
        self.selected = if articles.is_empty() { None } else { Some(0) };
        self.articles = articles;
        self.status = FetchStatus::Idle;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, message: &str) {
        self.status = FetchStatus::Error(message.to_string());
        self.mark_dirty();
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selected else {
            return;
        };
        let last = self.articles.len().saturating_sub(1);
        let next = current.saturating_add_signed(delta).min(last);
        if next != current {
            self.selected = Some(next);
            self.mark_dirty();
        }
    }

    fn grid_view(&self) -> GridView {
        if self.articles.is_empty() {
            return GridView::Empty {
                message: EMPTY_RESULTS_MESSAGE,
            };
        }
        GridView::Cards(
            self.articles
                .iter()
                .enumerate()
                .map(|(index, article)| card_view(index, article))
                .collect(),
        )
    }
}

fn card_view(index: usize, article: &Article) -> CardView {
    // Positional keys are only a fallback; they may be reused across fetches.
    let url = article.url.clone().filter(|url| !url.is_empty());
    CardView {
        key: url.clone().map_or(CardKey::Index(index), CardKey::Url),
        title: article.title.clone(),
        description: article.description.clone(),
        image_url: article.image_url.clone().filter(|src| !src.is_empty()),
        image_alt: article.title.clone(),
        link: url.map(|url| LinkView {
            label: READ_MORE_LABEL,
            url,
        }),
    }
}
