use ratatui::layout::{Constraint, Flex, Layout, Rect};

use super::constants::*;

/// Screen regions for one frame. Loading and error rows exist only when shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub search: Rect,
    pub loading: Option<Rect>,
    pub error: Option<Rect>,
    pub grid: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect, show_loading: bool, show_error: bool) -> ScreenLayout {
    let [content] = Layout::horizontal([Constraint::Max(CONTENT_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(area);

    let loading_height = if show_loading { STATUS_ROW_HEIGHT } else { 0 };
    let error_height = if show_error { STATUS_ROW_HEIGHT } else { 0 };
    let [search_row, _, loading, error, grid, help] = Layout::vertical([
        Constraint::Length(SEARCH_BOX_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(loading_height),
        Constraint::Length(error_height),
        Constraint::Min(0),
        Constraint::Length(HELP_ROW_HEIGHT),
    ])
    .areas(content);

    let [search] = Layout::horizontal([Constraint::Max(SEARCH_BOX_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(search_row);

    ScreenLayout {
        search,
        loading: show_loading.then_some(loading),
        error: show_error.then_some(error),
        grid,
        help,
    }
}

pub fn column_count(width: u16) -> usize {
    if width >= LARGE_BREAKPOINT {
        3
    } else if width >= MEDIUM_BREAKPOINT {
        2
    } else {
        1
    }
}

/// Number of full card rows that fit in `height`.
pub fn visible_rows(height: u16) -> usize {
    usize::from((height + GRID_GAP) / (CARD_HEIGHT + GRID_GAP)).max(1)
}

/// First card row to draw so that the selected card stays on screen.
pub fn first_visible_row(selected: Option<usize>, columns: usize, rows: usize) -> usize {
    let selected_row = selected.unwrap_or(0) / columns.max(1);
    selected_row.saturating_sub(rows.saturating_sub(1))
}

/// Rects of the cards drawn this frame, paired with their index in the result list.
pub fn card_rects(grid: Rect, columns: usize, count: usize, selected: Option<usize>) -> Vec<(usize, Rect)> {
    if grid.width == 0 || grid.height == 0 || count == 0 {
        return Vec::new();
    }
    let columns = columns.max(1);
    let rows = visible_rows(grid.height);
    let first_row = first_visible_row(selected, columns, rows);

    let column_areas = Layout::horizontal(vec![Constraint::Fill(1); columns])
        .spacing(GRID_GAP)
        .split(grid);

    let mut rects = Vec::new();
    for row in 0..rows {
        let y = grid.y + (row as u16) * (CARD_HEIGHT + GRID_GAP);
        if y + CARD_HEIGHT > grid.bottom() {
            break;
        }
        for (column, column_area) in column_areas.iter().enumerate() {
            let index = (first_row + row) * columns + column;
            if index >= count {
                return rects;
            }
            rects.push((
                index,
                Rect::new(column_area.x, y, column_area.width, CARD_HEIGHT),
            ));
        }
    }
    rects
}
