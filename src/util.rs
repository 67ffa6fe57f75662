use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a rectangle of the given size centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Return the region of `buffer_area` inside which the game screen for an
/// arena of `grid` cells (walls included) should be drawn
pub(crate) fn get_display_area(buffer_area: Rect, grid: Size) -> Rect {
    let size = Size {
        width: consts::DISPLAY_WIDTH.max(grid.width),
        height: grid.height.saturating_add(consts::DISPLAY_EXTRA_ROWS),
    };
    center_rect(buffer_area, size)
}
