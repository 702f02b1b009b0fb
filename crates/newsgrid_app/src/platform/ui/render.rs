use newsgrid_core::{AppViewModel, CardView, ErrorBanner, GridView, LoadingPanel};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::*;
use super::layout::{card_rects, column_count, screen_layout};

/// Draws one frame and returns the grid column count used, for keyboard navigation.
pub fn render(frame: &mut Frame, view: &AppViewModel, throbber: &mut ThrobberState) -> usize {
    let layout = screen_layout(frame.area(), view.loading.is_some(), view.error.is_some());

    render_search(frame, layout.search, view);
    // Loading, error and grid are independent panels and may all show at once.
    if let (Some(area), Some(panel)) = (layout.loading, &view.loading) {
        render_loading(frame, area, panel, throbber);
    }
    if let (Some(area), Some(banner)) = (layout.error, &view.error) {
        render_error(frame, area, banner);
    }
    let columns = column_count(layout.grid.width);
    render_grid(frame, layout.grid, view, columns);
    frame.render_widget(
        Paragraph::new(HELP_TEXT)
            .alignment(Alignment::Center)
            .style(muted()),
        layout.help,
    );
    columns
}

fn render_search(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(APP_TITLE)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let prefix = format!("{SEARCH_GLYPH} ");
    let text = if view.query.is_empty() {
        Span::styled(view.placeholder, muted())
    } else {
        Span::raw(view.query.as_str())
    };
    let line = Line::from(vec![Span::styled(prefix.clone(), muted()), text]);
    frame.render_widget(Paragraph::new(line), inner);

    // Queries can be far wider than a u16; compare before narrowing.
    let offset = prefix.width() + view.query.width();
    if inner.height > 0 && offset < usize::from(inner.width) {
        frame.set_cursor_position((inner.x + offset as u16, inner.y));
    }
}

fn render_loading(frame: &mut Frame, area: Rect, panel: &LoadingPanel, state: &mut ThrobberState) {
    let throbber = Throbber::default()
        .label(panel.label)
        .style(muted())
        .throbber_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX);
    let width = (panel.label.width() as u16 + 2).min(area.width);
    let centered = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
    frame.render_stateful_widget(throbber, centered, state);
}

fn render_error(frame: &mut Frame, area: Rect, banner: &ErrorBanner) {
    let line = Line::from(vec![
        Span::raw(format!("{WARNING_GLYPH} ")),
        Span::raw(banner.message.as_str()),
    ])
    .red();
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_grid(frame: &mut Frame, area: Rect, view: &AppViewModel, columns: usize) {
    match &view.grid {
        GridView::Empty { message } => {
            // Spans every column, like the card it replaces.
            let placeholder = Paragraph::new(*message)
                .alignment(Alignment::Center)
                .style(muted());
            let row = Rect::new(area.x, area.y + area.height.min(2) / 2, area.width, area.height.min(1));
            frame.render_widget(placeholder, row);
        }
        GridView::Cards(cards) => {
            for (index, rect) in card_rects(area, columns, cards.len(), view.selected) {
                render_card(frame, rect, &cards[index], view.selected == Some(index));
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    let mut lines = Vec::with_capacity(usize::from(CARD_HEIGHT));

    lines.push(match &card.image_url {
        Some(src) => Line::from(Span::styled(
            truncate_to_width(&format!("{IMAGE_GLYPH} {} ({src})", card.image_alt), width),
            muted(),
        )),
        None => Line::default(),
    });
    lines.extend(padded(
        clamp_lines(&card.title, width, TITLE_MAX_LINES),
        TITLE_MAX_LINES,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.extend(padded(
        clamp_lines(&card.description, width, DESCRIPTION_MAX_LINES),
        DESCRIPTION_MAX_LINES,
        Style::default(),
    ));
    lines.push(Line::default());
    if let Some(link) = &card.link {
        let label = format!("{} {LINK_GLYPH} ", link.label);
        let url_width = width.saturating_sub(label.width());
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::styled(truncate_to_width(&link.url, url_width), muted()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn padded(lines: Vec<String>, height: usize, style: Style) -> Vec<Line<'static>> {
    let mut out: Vec<Line<'static>> = lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, style)))
        .collect();
    out.resize(height, Line::default());
    out
}

fn muted() -> Style {
    Style::default().fg(Color::Gray)
}

/// Word-wraps `text` to `width` columns and keeps at most `max_lines` lines.
/// The last kept line ends with an ellipsis when text was cut.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let wrapped = wrap(text, width);
    if wrapped.len() <= max_lines {
        return wrapped;
    }
    let mut kept: Vec<String> = wrapped.into_iter().take(max_lines).collect();
    if let Some(last) = kept.last_mut() {
        let mut trimmed = truncate_to_width(last, width - 1);
        trimmed.push(ELLIPSIS);
        *last = trimmed;
    }
    kept
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() { word_width } else { current_width + 1 + word_width };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        // Words wider than a line are hard-broken.
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    if width > 0 {
        out.push(ELLIPSIS);
    }
    out
}

#[cfg(test)]
mod tests {
    use newsgrid_core::{update, AppState, Msg, RawArticle};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use super::*;

    fn buffer_text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(view: &AppViewModel, width: u16, height: u16) -> (String, usize) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut throbber = ThrobberState::default();
        let mut columns = 0;
        terminal
            .draw(|frame| columns = render(frame, view, &mut throbber))
            .unwrap();
        (buffer_text(terminal.backend().buffer()), columns)
    }

    fn state_with_results(articles: Vec<RawArticle>) -> AppState {
        let (state, _) = update(AppState::new(), Msg::QueryChanged("bitcoin".to_string()));
        let generation = state.generation();
        let (state, _) = update(state, Msg::DebounceElapsed { generation });
        let (state, _) = update(state, Msg::FetchSucceeded { generation, articles });
        state
    }

    #[test]
    fn clamp_keeps_short_text() {
        assert_eq!(clamp_lines("hello world", 20, 2), vec!["hello world"]);
    }

    #[test]
    fn clamp_wraps_on_words_and_adds_ellipsis() {
        let lines = clamp_lines("one two three four five six", 9, 2);
        assert_eq!(lines, vec!["one two".to_string(), "three…".to_string()]);
    }

    #[test]
    fn clamp_breaks_long_words() {
        assert_eq!(clamp_lines("abcdefghij", 4, 3), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn clamp_handles_degenerate_sizes() {
        assert!(clamp_lines("text", 0, 2).is_empty());
        assert!(clamp_lines("text", 10, 0).is_empty());
        assert!(clamp_lines("   ", 10, 2).is_empty());
    }

    #[test]
    fn empty_results_show_placeholder_and_search_hint() {
        let (text, columns) = draw(&AppState::new().view(), 100, 30);

        assert!(text.contains("Discover the latest news..."));
        assert!(text.contains("No articles found. Try different keywords."));
        assert_eq!(columns, 2);
    }

    #[test]
    fn query_wider_than_u16_renders_without_cursor_overflow() {
        let query = "x".repeat(usize::from(u16::MAX) + 10);
        let (state, _) = update(AppState::new(), Msg::QueryChanged(query));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut throbber = ThrobberState::default();

        terminal
            .draw(|frame| {
                render(frame, &state.view(), &mut throbber);
            })
            .unwrap();

        assert!(buffer_text(terminal.backend().buffer()).contains("xxxxxxxxxx"));
    }

    #[test]
    fn short_query_places_cursor_after_text() {
        let (state, _) = update(AppState::new(), Msg::QueryChanged("rust".to_string()));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut throbber = ThrobberState::default();

        terminal
            .draw(|frame| {
                render(frame, &state.view(), &mut throbber);
            })
            .unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x > 0);
        assert_eq!(cursor.y, 1);
    }

    #[test]
    fn cards_show_title_description_and_link() {
        let state = state_with_results(vec![RawArticle {
            title: Some("Bitcoin rallies".to_string()),
            description: Some("Prices rose sharply".to_string()),
            url: Some("https://news.example.com/btc".to_string()),
            url_to_image: None,
        }]);
        let (text, columns) = draw(&state.view(), 60, 30);

        assert_eq!(columns, 1);
        assert!(text.contains("Bitcoin rallies"));
        assert!(text.contains("Prices rose sharply"));
        assert!(text.contains("Read More"));
        assert!(text.contains("https://news.example.com/btc"));
        assert!(!text.contains("No articles found"));
    }

    #[test]
    fn error_banner_and_cards_render_together() {
        let state = state_with_results(vec![RawArticle {
            title: Some("Kept".to_string()),
            description: Some("Still here".to_string()),
            url: None,
            url_to_image: None,
        }]);
        let (state, _) = update(state, Msg::QueryChanged("bitcoin etf".to_string()));
        let generation = state.generation();
        let (state, _) = update(state, Msg::DebounceElapsed { generation });
        let loading = draw(&state.view(), 100, 30).0;
        assert!(loading.contains("Loading news..."));
        assert!(loading.contains("Kept"));

        let (state, _) = update(
            state,
            Msg::FetchFailed {
                generation,
                reason: "network error".to_string(),
            },
        );
        let (text, _) = draw(&state.view(), 100, 30);

        assert!(text.contains("Failed to fetch news. Check your connection."));
        assert!(text.contains("Kept"));
        assert!(!text.contains("Loading news..."));
    }
}
