pub const SEARCH_PLACEHOLDER: &str = "Discover the latest news...";
pub const LOADING_LABEL: &str = "Loading news...";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch news. Check your connection.";
pub const EMPTY_RESULTS_MESSAGE: &str = "No articles found. Try different keywords.";
pub const READ_MORE_LABEL: &str = "Read More";

/// Render projection of [`crate::AppState`].
///
/// `loading`, `error` and `grid` are independent panels: a failed refresh
/// shows the error banner above the cards of the last successful search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub placeholder: &'static str,
    pub loading: Option<LoadingPanel>,
    pub error: Option<ErrorBanner>,
    pub grid: GridView,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingPanel {
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Cards(Vec<CardView>),
    /// Single placeholder spanning the whole grid.
    Empty { message: &'static str },
}

impl Default for GridView {
    fn default() -> Self {
        GridView::Empty {
            message: EMPTY_RESULTS_MESSAGE,
        }
    }
}

/// Stable identity of a rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardKey {
    Url(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: CardKey,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub link: Option<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: &'static str,
    pub url: String,
}
