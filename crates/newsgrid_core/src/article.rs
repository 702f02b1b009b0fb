/// Marker the news API substitutes for retracted content.
pub const REMOVED_SENTINEL: &str = "[Removed]";

/// An article exactly as the API delivered it. Any field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
}

/// An article that passed the validity filter and may be rendered as a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

/// Title and description must be present, non-empty and not retracted.
/// `url` and `url_to_image` are never inspected.
pub fn is_valid(article: &RawArticle) -> bool {
    has_content(article.title.as_deref()) && has_content(article.description.as_deref())
}

/// Keeps the valid subsequence of `articles` in its original order.
pub fn filter_valid(articles: Vec<RawArticle>) -> Vec<Article> {
    articles.into_iter().filter_map(into_valid).collect()
}

fn into_valid(article: RawArticle) -> Option<Article> {
    if !is_valid(&article) {
        return None;
    }
    let RawArticle {
        title,
        description,
        url,
        url_to_image,
    } = article;
    Some(Article {
        title: title?,
        description: description?,
        url,
        image_url: url_to_image,
    })
}

// An empty string counts as missing.
fn has_content(field: Option<&str>) -> bool {
    matches!(field, Some(text) if !text.is_empty() && text != REMOVED_SENTINEL)
}
