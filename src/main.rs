//! A terminal course catalogue with drag-to-swipe carousels.
//!
//! Run the binary to browse course categories in a paging carousel and
//! testimonials in a looping one.  Both respond to arrow keys, arrow and dot
//! clicks, the mouse wheel, and left-button drags.

mod app;
mod config;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Tabs, Widget},
    Frame, Terminal,
};

use crate::app::{
    deck::{self, CATEGORIES, TESTIMONIALS},
    event::{spawn_event_reader, AppEvent, FRAME_INTERVAL},
    handler,
    state::{ActiveView, AppState, Focus},
};
use crate::config::{AppConfig, StepMode};
use crate::ui::{
    layout::AppLayout, popup, quote::QuotePanel, theme::Theme, track::SlideTrack,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Course catalogue with swipeable carousels")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/slide-reel/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Course category to open.
    #[arg(long, default_value = deck::DEFAULT_CATEGORY)]
    category: String,

    /// Wrap the course carousel around instead of stopping at the ends.
    #[arg(long = "loop")]
    looping: bool,

    /// How far one course navigation moves.
    #[arg(long, value_enum)]
    step: Option<StepMode>,

    /// Columns a drag must travel to count as a swipe.
    #[arg(long)]
    swipe_distance: Option<f32>,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if self.looping {
            config.carousel.looping = true;
        }
        if let Some(step) = self.step {
            config.carousel.step = step;
        }
        if let Some(distance) = self.swipe_distance {
            config.carousel.swipe_distance = distance;
        }
    }
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState, now: Instant) {
    let layout = AppLayout::from_area(frame.area());

    let active_tab = CATEGORIES
        .iter()
        .position(|c| c.key == state.category.key)
        .unwrap_or(0);
    let tabs = Tabs::new(CATEGORIES.iter().map(|c| Line::from(c.label)))
        .select(active_tab)
        .style(Theme::tab_style(false))
        .highlight_style(Theme::tab_style(true));
    frame.render_widget(tabs, layout.tabs_area);

    let courses = &state.courses;
    let first = courses.active_slide() + 1;
    let last = (courses.active_slide() + courses.viewport().items_per_view).min(courses.len());
    let slots = courses.track_slots();
    let track = SlideTrack {
        courses: state.category.courses,
        slots: &slots,
        item_width: courses.viewport().item_width,
        offset: state.course_motion.offset(),
        affordances: courses.affordances(),
        title: format!(" {} · {first}-{last} of {} ", state.category.label, courses.len()),
        focused: state.focus == Focus::Courses,
    };
    let course_zones = track.render_and_hit(layout.course_area, frame.buffer_mut());

    let panel = QuotePanel {
        testimonial: &TESTIMONIALS[*state.quote_swap.shown() % TESTIMONIALS.len()],
        opacity: state.quote_swap.opacity(now),
        shift: state.quote_shift(),
        count: TESTIMONIALS.len(),
        active: state.quotes.active_slide(),
        affordances: state.quotes.affordances(),
        focused: state.focus == Focus::Testimonials,
    };
    let quote_zones = panel.render_and_hit(layout.quote_area, frame.buffer_mut());
    state.course_zones = course_zones;
    state.quote_zones = quote_zones;

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Slider => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    Paragraph::new(status_text)
        .style(Theme::status_bar_style())
        .render(layout.status_area, frame.buffer_mut());

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(
                popup::SettingsPopup {
                    state: &*state,
                    selected: state.settings_selected,
                },
                frame.area(),
            );
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                frame.area(),
            );
        }
        ActiveView::Slider => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut user_config = match &cli.config {
        Some(path) => AppConfig::load_or_default(path.clone()),
        None => AppConfig::load(),
    };
    cli.apply_overrides(&mut user_config);
    user_config.validate()?;

    let (width, height) = crossterm::terminal::size()?;
    let area = Rect::new(0, 0, width, height);
    let mut state = AppState::new(user_config, &cli.category, area, Instant::now())?;
    tracing::info!(category = state.category.key, "slider ready");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(FRAME_INTERVAL);

    // ── event loop ────────────────────────────────────────────
    let mut dirty = true;
    loop {
        // Idle ticks skip the redraw; input and motion always get one.
        if dirty {
            let now = Instant::now();
            terminal.draw(|frame| draw(frame, &mut state, now))?;
        }

        tokio::select! {
            Some(event) = events.recv() => {
                let now = Instant::now();
                dirty = match event {
                    AppEvent::Key(k) => {
                        handler::handle_key(&mut state, k, now);
                        true
                    }
                    AppEvent::Mouse(m) => {
                        handler::handle_mouse(&mut state, m, now);
                        true
                    }
                    AppEvent::Resize(w, h) => {
                        state.on_resize(w, h, now);
                        true
                    }
                    AppEvent::Tick => state.on_frame(now),
                };
            }
            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_config_file() {
        let cli = Cli::parse_from([
            "slide-reel",
            "--loop",
            "--step",
            "single",
            "--swipe-distance",
            "12",
        ]);
        let mut config = AppConfig::with_defaults(PathBuf::from("unused.toml"));
        cli.apply_overrides(&mut config);
        assert!(config.carousel.looping);
        assert_eq!(config.carousel.step, StepMode::Single);
        assert_eq!(config.carousel.swipe_distance, 12.0);
        assert_eq!(cli.category, deck::DEFAULT_CATEGORY);
    }

    #[test]
    fn draw_records_hit_zones() {
        let backend = ratatui::backend::TestBackend::new(100, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        let area = Rect::new(0, 0, 100, 36);
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_defaults(dir.path().join("config.toml"));
        let now = Instant::now();
        let mut state = AppState::new(config, "trending", area, now).unwrap();
        state.on_frame(now);

        terminal.draw(|frame| draw(frame, &mut state, now)).unwrap();
        assert_eq!(state.course_zones.pane, AppLayout::from_area(area).course_area);
        assert_eq!(state.quote_zones.dots.len(), TESTIMONIALS.len());
        // Bounded carousel at the start: only "next" is clickable.
        assert!(state.course_zones.prev.is_none());
        assert!(state.course_zones.next.is_some());
    }
}
