//! Course carousel widget: a row of cards translated horizontally by the
//! slider offset, clipped to the track, with ◀ / ▶ affordances.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use slide_reel::core::controller::Affordances;
use slide_reel::core::geometry::Slot;

use super::layout::{track_rect, ARROW_GUTTER};
use super::theme::Theme;
use crate::app::deck::Course;

pub struct SlideTrack<'a> {
    pub courses: &'a [Course],
    /// Track layout including any loop clones.
    pub slots: &'a [Slot],
    pub item_width: f32,
    /// Current column offset of slot 0 relative to the track's left edge.
    pub offset: f32,
    pub affordances: Affordances,
    pub title: String,
    pub focused: bool,
}

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackHitZones {
    /// Whole pane; a drag leaving it is cancelled.
    pub pane: Rect,
    pub track: Rect,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
}

impl SlideTrack<'_> {
    pub fn render_and_hit(self, pane: Rect, buf: &mut Buffer) -> TrackHitZones {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_style(self.focused))
            .title(Span::styled(self.title.clone(), Theme::title_style()));
        block.render(pane, buf);

        let track = track_rect(pane, 0);
        let mut zones = TrackHitZones {
            pane,
            track,
            ..TrackHitZones::default()
        };
        if track.width == 0 || track.height == 0 {
            return zones;
        }

        let track_left = track.x as f32;
        let track_right = track_left + track.width as f32;
        for (i, slot) in self.slots.iter().enumerate() {
            let left = track_left + i as f32 * self.item_width + self.offset;
            let right = left + self.item_width;
            if right <= track_left || left >= track_right {
                continue;
            }
            let Some(course) = self.courses.get(slot.slide()) else {
                continue;
            };
            let (l, r) = (left.round() as i32, right.round() as i32);
            // One blank column between neighbouring cards.
            let width = (r - l - 1).max(1) as u16;
            render_card(course, l, width, track, buf);
        }

        let arrow_y = track.y + track.height / 2;
        let prev_rect = Rect::new(track.x.saturating_sub(ARROW_GUTTER), arrow_y, ARROW_GUTTER, 1);
        let next_rect = Rect::new(track.x + track.width, arrow_y, ARROW_GUTTER, 1);
        if self.affordances.prev {
            Paragraph::new(Line::styled(" ◀", Theme::arrow_style())).render(prev_rect, buf);
            zones.prev = Some(prev_rect);
        }
        if self.affordances.next {
            Paragraph::new(Line::styled("▶ ", Theme::arrow_style())).render(next_rect, buf);
            zones.next = Some(next_rect);
        }
        zones
    }
}

fn render_card(course: &Course, left: i32, width: u16, clip: Rect, buf: &mut Buffer) {
    let mut scratch = Buffer::empty(Rect::new(0, 0, width, clip.height));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_style());
    let inner = block.inner(scratch.area);
    block.render(scratch.area, &mut scratch);

    let lines = vec![
        Line::styled(course.title, Theme::card_title_style()),
        Line::raw(""),
        Line::styled(course.instructor, Theme::card_meta_style()),
        Line::styled(format!("{} lessons", course.lessons), Theme::card_meta_style()),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, &mut scratch);

    blit(&scratch, left, clip, buf);
}

/// Copy `src` into `dst` with its left edge at column `left`, keeping only
/// the cells that fall inside `clip`.
pub(super) fn blit(src: &Buffer, left: i32, clip: Rect, dst: &mut Buffer) {
    let clip_left = clip.x as i32;
    let clip_right = clip_left + clip.width as i32;
    for y in 0..src.area.height.min(clip.height) {
        for x in 0..src.area.width {
            let dx = left + x as i32;
            if dx < clip_left || dx >= clip_right {
                continue;
            }
            if let (Some(cell), Some(out)) = (src.cell((x, y)), dst.cell_mut((dx as u16, clip.y + y))) {
                *out = cell.clone();
            }
        }
    }
}
