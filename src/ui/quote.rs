//! Testimonial panel: one quote at a time, faded between swaps, shifted
//! live while dragged, with pagination dots underneath.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use slide_reel::core::controller::Affordances;

use super::layout::{track_rect, ARROW_GUTTER};
use super::theme::Theme;
use super::track::blit;
use crate::app::deck::Testimonial;

pub struct QuotePanel<'a> {
    pub testimonial: &'a Testimonial,
    /// From the content swap; `0.0` hides the text.
    pub opacity: f32,
    /// Horizontal displacement from rest, in columns.
    pub shift: f32,
    pub count: usize,
    /// Highlighted dot.
    pub active: usize,
    pub affordances: Affordances,
    pub focused: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteHitZones {
    pub pane: Rect,
    pub track: Rect,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    /// One rect per dot, in slide order.
    pub dots: Vec<Rect>,
}

impl QuotePanel<'_> {
    pub fn render_and_hit(self, pane: Rect, buf: &mut Buffer) -> QuoteHitZones {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_style(self.focused))
            .title(Span::styled(" What learners say ", Theme::title_style()))
            .render(pane, buf);

        let track = track_rect(pane, 1);
        let mut zones = QuoteHitZones {
            pane,
            track,
            ..QuoteHitZones::default()
        };
        if track.width == 0 || track.height == 0 {
            return zones;
        }

        if let Some(style) = Theme::quote_style(self.opacity) {
            let mut scratch = Buffer::empty(Rect::new(0, 0, track.width, track.height));
            let lines = vec![
                Line::styled(self.testimonial.quote, style),
                Line::raw(""),
                Line::styled(
                    format!("{}, {}", self.testimonial.name, self.testimonial.title),
                    style.patch(Theme::card_title_style()),
                ),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(scratch.area, &mut scratch);
            blit(&scratch, track.x as i32 + self.shift.round() as i32, track, buf);
        }

        let arrow_y = track.y + track.height / 2;
        if self.affordances.prev {
            let rect = Rect::new(track.x.saturating_sub(ARROW_GUTTER), arrow_y, ARROW_GUTTER, 1);
            Paragraph::new(Line::styled(" ◀", Theme::arrow_style())).render(rect, buf);
            zones.prev = Some(rect);
        }
        if self.affordances.next {
            let rect = Rect::new(track.x + track.width, arrow_y, ARROW_GUTTER, 1);
            Paragraph::new(Line::styled("▶ ", Theme::arrow_style())).render(rect, buf);
            zones.next = Some(rect);
        }

        // Dots are two columns apart, centred under the track.
        let dots_y = track.y + track.height;
        let span = (self.count as u16).saturating_mul(2).saturating_sub(1);
        let start = track.x + track.width.saturating_sub(span) / 2;
        for i in 0..self.count {
            let x = start + (i as u16) * 2;
            if x >= track.x + track.width {
                break;
            }
            let rect = Rect::new(x, dots_y, 1, 1);
            let active = i == self.active;
            Paragraph::new(Line::styled(if active { "●" } else { "○" }, Theme::dot_style(active)))
                .render(rect, buf);
            zones.dots.push(rect);
        }
        zones
    }
}
