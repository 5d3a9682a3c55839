//! Input handling: maps key/mouse events to slider operations and state
//! mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Instant;

use slide_reel::core::gesture::PointerId;
use slide_reel::NavSource;

use crate::config::{Action, KeyBind};
use crate::ui::layout::point_in_rect;

use super::deck;
use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState, Focus};

/// A terminal has a single mouse.
const MOUSE: PointerId = PointerId(0);

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Slider => handle_slider_key(state, key, now),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Slider view (configurable bindings) ─────────────────────────

fn handle_slider_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let focus = state.focus;
    let slider = state.slider_mut(focus);
    match action {
        Action::Prev => {
            slider.prev(now, NavSource::Key);
        }
        Action::Next => {
            slider.next(now, NavSource::Key);
        }
        Action::First => {
            slider.jump_to(0, now, NavSource::Key);
        }
        Action::Last => {
            let last = slider.len().saturating_sub(1);
            slider.jump_to(last, now, NavSource::Key);
        }
        Action::NextCategory => {
            let next = deck::next_category(state.category.key);
            state.set_category(next.key);
        }
        Action::SwitchFocus => {
            state.focus = match state.focus {
                Focus::Courses => Focus::Testimonials,
                Focus::Testimonials => Focus::Courses,
            };
        }
        Action::OpenSettings => {
            cancel_drag(state);
            state.active_view = ActiveView::SettingsMenu;
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Slider;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Slider;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                // Start rebinding the selected action.
                state.awaiting_rebind = true;
            } else {
                // "Reset to defaults" item.
                state.config.reset_defaults();
                save_bindings(state);
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            // Clear all bindings for the selected action.
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                save_bindings(state);
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Don't allow rebinding Ctrl+C (reserved for emergency quit).
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return;
    }

    if let Some(&action) = Action::ALL.get(state.controls_selected) {
        state.config.add_binding(action, KeyBind::from_key_event(key));
        save_bindings(state);
    }
    state.awaiting_rebind = false;
}

fn save_bindings(state: &mut AppState) {
    if let Err(err) = state.config.save() {
        tracing::warn!("failed to save key bindings: {err:#}");
        state.status_message = Some(format!("Could not save bindings: {err}"));
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  Arrow and dot clicks navigate; a press on a
/// track starts a drag that the slider interprets as a swipe on release.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Slider {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);
    let (x, y) = (col as f32, row as f32);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if state.drag_owner.is_some() {
                // A press without a release in between: drop the stale drag.
                cancel_drag(state);
            }
            if let Some(which) = click_target(state, col, row) {
                state.focus = which.focus();
                match which {
                    Click::Prev(f) => {
                        state.slider_mut(f).prev(now, NavSource::Click);
                    }
                    Click::Next(f) => {
                        state.slider_mut(f).next(now, NavSource::Click);
                    }
                    Click::Dot(i) => {
                        state.quotes.jump_to(i, now, NavSource::Click);
                    }
                    Click::Track(f) => {
                        if state.slider_mut(f).drag_start(MOUSE, x, y, now) {
                            state.drag_owner = Some(f);
                        }
                    }
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(owner) = state.drag_owner else {
                return;
            };
            let pane = match owner {
                Focus::Courses => state.course_zones.pane,
                Focus::Testimonials => state.quote_zones.pane,
            };
            if point_in_rect(pane, col, row) {
                state.slider_mut(owner).drag_move(MOUSE, x, y);
            } else {
                tracing::debug!(?owner, "pointer left the pane; drag cancelled");
                cancel_drag(state);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(owner) = state.drag_owner.take() {
                state.slider_mut(owner).drag_end(MOUSE, now);
            }
        }
        MouseEventKind::ScrollUp => {
            if let Some(f) = pane_under(state, col, row) {
                state.slider_mut(f).prev(now, NavSource::Wheel);
            }
        }
        MouseEventKind::ScrollDown => {
            if let Some(f) = pane_under(state, col, row) {
                state.slider_mut(f).next(now, NavSource::Wheel);
            }
        }
        _ => {}
    }
}

fn cancel_drag(state: &mut AppState) {
    if let Some(owner) = state.drag_owner.take() {
        state.slider_mut(owner).drag_cancel();
    }
}

/// What a left press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Click {
    Prev(Focus),
    Next(Focus),
    Dot(usize),
    Track(Focus),
}

impl Click {
    fn focus(self) -> Focus {
        match self {
            Click::Prev(f) | Click::Next(f) | Click::Track(f) => f,
            Click::Dot(_) => Focus::Testimonials,
        }
    }
}

fn click_target(state: &AppState, col: u16, row: u16) -> Option<Click> {
    let hit = |r: Option<ratatui::layout::Rect>| r.is_some_and(|r| point_in_rect(r, col, row));

    let c = &state.course_zones;
    if hit(c.prev) {
        return Some(Click::Prev(Focus::Courses));
    }
    if hit(c.next) {
        return Some(Click::Next(Focus::Courses));
    }
    if point_in_rect(c.track, col, row) {
        return Some(Click::Track(Focus::Courses));
    }

    let q = &state.quote_zones;
    if hit(q.prev) {
        return Some(Click::Prev(Focus::Testimonials));
    }
    if hit(q.next) {
        return Some(Click::Next(Focus::Testimonials));
    }
    if let Some(i) = q.dots.iter().position(|&d| point_in_rect(d, col, row)) {
        return Some(Click::Dot(i));
    }
    if point_in_rect(q.track, col, row) {
        return Some(Click::Track(Focus::Testimonials));
    }
    None
}

fn pane_under(state: &AppState, col: u16, row: u16) -> Option<Focus> {
    if point_in_rect(state.course_zones.pane, col, row) {
        Some(Focus::Courses)
    } else if point_in_rect(state.quote_zones.pane, col, row) {
        Some(Focus::Testimonials)
    } else {
        None
    }
}
