use std::time::Duration;

pub const APP_TITLE: &str = " newsgrid ";
pub const SEARCH_GLYPH: &str = "⌕";
pub const WARNING_GLYPH: &str = "⚠";
pub const IMAGE_GLYPH: &str = "▣";
pub const LINK_GLYPH: &str = "↗";
pub const ELLIPSIS: char = '…';

pub const SEARCH_BOX_MAX_WIDTH: u16 = 72;
pub const CONTENT_MAX_WIDTH: u16 = 180;
pub const SEARCH_BOX_HEIGHT: u16 = 3;
pub const STATUS_ROW_HEIGHT: u16 = 1;
pub const HELP_ROW_HEIGHT: u16 = 1;

/// Grid breakpoints: one column below medium, two below large, three above.
pub const MEDIUM_BREAKPOINT: u16 = 80;
pub const LARGE_BREAKPOINT: u16 = 130;
pub const GRID_GAP: u16 = 1;

pub const TITLE_MAX_LINES: usize = 2;
pub const DESCRIPTION_MAX_LINES: usize = 3;
/// Border, image row, title, description, spacer and link row.
pub const CARD_HEIGHT: u16 = 2 + 1 + TITLE_MAX_LINES as u16 + DESCRIPTION_MAX_LINES as u16 + 1 + 1;

pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

pub const HELP_TEXT: &str =
    "type to search · ←↑↓→ select · enter open · ctrl-u clear · esc quit";
