//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn card_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_meta_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── navigation ─────────────────────────────────────────────
    pub fn arrow_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn tab_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    /// Quote text at `opacity` (0 = gone, 1 = fully shown).  Terminals have
    /// no alpha, so the fade steps through greys.
    pub fn quote_style(opacity: f32) -> Option<Style> {
        let fg = match opacity {
            o if o >= 0.75 => Color::White,
            o if o >= 0.45 => Color::Gray,
            o if o >= 0.15 => Color::DarkGray,
            _ => return None,
        };
        Some(Style::default().fg(fg).add_modifier(Modifier::ITALIC))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
