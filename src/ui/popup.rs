//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
    pub selected: usize,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        let inner = frame(" Settings ", popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.selected;
            let prefix = if selected { " ▸ " } else { "   " };
            let label = Span::styled(format!("{prefix}{:<18}", item.label()), row_style(selected));

            let value = match item {
                SettingsItem::Submenu { .. } => Span::styled("›", dim()),
                SettingsItem::Toggle { get, .. } if get(self.state) => {
                    Span::styled("[ON]", Style::default().fg(Color::Green))
                }
                SettingsItem::Toggle { .. } => Span::styled("[OFF]", dim()),
                SettingsItem::Cycle { value, .. } => {
                    Span::styled(value(self.state), Style::default().fg(Color::Yellow))
                }
            };
            lines.push(Line::from(vec![label, Span::raw(" "), value]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            dim(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + reset row + two blanks + hint + borders
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(52, height, area);
        let inner = frame(" Controls ", popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, &action) in Action::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let rebinding = selected && self.awaiting_rebind;
            let prefix = if selected { " ▸ " } else { "   " };

            let keys = if rebinding {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };
            let mut key_style = Style::default().fg(Color::Yellow);
            if selected {
                key_style = key_style.bg(Color::DarkGray);
            }
            if rebinding {
                key_style = key_style.add_modifier(Modifier::BOLD);
            }

            // Label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);
            lines.push(Line::from(vec![
                Span::styled(label_col, row_style(selected)),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }

        let reset_selected = self.selected == Action::ALL.len();
        let prefix = if reset_selected { " ▸ " } else { "   " };
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{prefix}⟳ Reset to defaults"),
            row_style(reset_selected),
        )));

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            dim(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Clear `popup`, draw the rounded frame and return its inner area.
fn frame(title: &str, popup: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(popup, buf);
    let block = Block::default()
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(dim());
    let inner = block.inner(popup);
    block.render(popup, buf);
    inner
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
