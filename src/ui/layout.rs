//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Columns reserved on each side of a track for the ◀ / ▶ arrows.
pub const ARROW_GUTTER: u16 = 3;

/// Primary screen layout: category tabs, course carousel, testimonial
/// slider and a bottom status bar.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub tabs_area: Rect,
    pub course_area: Rect,
    pub quote_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // category tabs
                Constraint::Min(8),    // course carousel
                Constraint::Length(9), // testimonials
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            tabs_area: chunks[0],
            course_area: chunks[1],
            quote_area: chunks[2],
            status_area: chunks[3],
        }
    }

    /// Where course cards slide.
    pub fn course_track(&self) -> Rect {
        track_rect(self.course_area, 0)
    }

    /// Where the quote slides; the last inner row holds the dots.
    pub fn quote_track(&self) -> Rect {
        track_rect(self.quote_area, 1)
    }
}

/// Inside of a bordered pane minus the arrow gutters and `footer` rows.
pub fn track_rect(pane: Rect, footer: u16) -> Rect {
    let inner = Rect::new(
        pane.x.saturating_add(1),
        pane.y.saturating_add(1),
        pane.width.saturating_sub(2),
        pane.height.saturating_sub(2),
    );
    Rect::new(
        inner.x.saturating_add(ARROW_GUTTER),
        inner.y,
        inner.width.saturating_sub(ARROW_GUTTER * 2),
        inner.height.saturating_sub(footer),
    )
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
