use crate::{Generation, RawArticle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box (every keystroke).
    QueryChanged(String),
    /// The debounce timer for `generation` ran out without being superseded.
    DebounceElapsed { generation: Generation },
    /// The search request tagged with `generation` returned a parsed body.
    FetchSucceeded {
        generation: Generation,
        articles: Vec<RawArticle>,
    },
    /// The search request tagged with `generation` failed for any reason.
    FetchFailed {
        generation: Generation,
        reason: String,
    },
    /// User moved the card cursor by `delta` positions.
    SelectionMoved { delta: isize },
    /// User asked to open the selected card's link.
    OpenSelected,
    /// UI/render tick; drives the spinner only.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
