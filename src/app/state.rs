//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;
use slide_reel::core::debounce::Debouncer;
use slide_reel::core::geometry;
use slide_reel::core::transition::ContentSwap;
use slide_reel::{RenderTarget, SliderController};

use super::deck::{self, Category, TESTIMONIALS};
use crate::config::AppConfig;
use crate::ui::layout::AppLayout;
use crate::ui::motion::TrackMotion;
use crate::ui::quote::QuoteHitZones;
use crate::ui::track::TrackHitZones;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Slider,
    SettingsMenu,
    ControlsSubmenu,
}

/// Which slider receives key navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Courses,
    Testimonials,
}

/// Track widths (courses, quotes) waiting out the resize debounce.
type TrackWidths = (f32, f32);

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub category: &'static Category,
    pub courses: SliderController,
    pub course_motion: TrackMotion,
    pub quotes: SliderController,
    pub quote_motion: TrackMotion,
    /// Fades the quote text between slides.
    pub quote_swap: ContentSwap<usize>,
    /// Slide last handed to `quote_swap`.
    requested_quote: usize,
    resize: Debouncer<TrackWidths>,
    pub focus: Focus,
    /// Slider that received the current mouse press, if it's being dragged.
    pub drag_owner: Option<Focus>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    pub terminal_area: Rect,
    /// Filled in by the last draw.
    pub course_zones: TrackHitZones,
    pub quote_zones: QuoteHitZones,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        category_key: &str,
        terminal_area: Rect,
        now: Instant,
    ) -> anyhow::Result<Self> {
        let layout = AppLayout::from_area(terminal_area);
        let category = deck::category(category_key);

        let course_motion = TrackMotion::new(layout.course_track().width as f32, now);
        let courses = SliderController::for_target(
            category.courses.len(),
            &course_motion,
            config.carousel.slider_config()?,
        )?;
        let quote_motion = TrackMotion::new(layout.quote_track().width as f32, now);
        let quotes = SliderController::for_target(
            TESTIMONIALS.len(),
            &quote_motion,
            config.testimonials.slider_config()?,
        )?;

        Ok(Self {
            quote_swap: ContentSwap::new(0, config.testimonials.transition()),
            requested_quote: 0,
            resize: Debouncer::new(config.carousel.resize_debounce()),
            config,
            category,
            courses,
            course_motion,
            quotes,
            quote_motion,
            focus: Focus::default(),
            drag_owner: None,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            terminal_area,
            course_zones: TrackHitZones::default(),
            quote_zones: QuoteHitZones::default(),
        })
    }

    pub fn slider_mut(&mut self, which: Focus) -> &mut SliderController {
        match which {
            Focus::Courses => &mut self.courses,
            Focus::Testimonials => &mut self.quotes,
        }
    }

    /// Show another course category.  Unknown keys fall back to the default.
    pub fn set_category(&mut self, key: &str) {
        let category = deck::category(key);
        if let Err(err) = self.courses.set_slide_count(category.courses.len()) {
            self.status_message = Some(format!("Cannot show {}: {err}", category.label));
            return;
        }
        self.category = category;
        self.status_message = Some(format!("Category: {}", category.label));
    }

    /// Terminal resized: the layout follows at once, the sliders once the
    /// resize burst settles.
    pub fn on_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.terminal_area = Rect::new(0, 0, width, height);
        let layout = AppLayout::from_area(self.terminal_area);
        let widths = (
            layout.course_track().width as f32,
            layout.quote_track().width as f32,
        );
        self.resize.push(widths, now);
    }

    /// Advance one display frame: settle debounced resizes, step the
    /// sliders and flush their translations to the motion tweens.
    /// Returns whether anything on screen may have moved.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        let was_moving = self.course_motion.is_animating()
            || self.quote_motion.is_animating()
            || self.quote_swap.is_animating();

        if let Some((course_w, quote_w)) = self.resize.poll(now) {
            self.course_motion.set_container_width(course_w);
            self.quote_motion.set_container_width(quote_w);
            let courses = self.courses.handle_resize(self.course_motion.container_width());
            let quotes = self.quotes.handle_resize(self.quote_motion.container_width());
            if let Err(err) = courses.and(quotes) {
                tracing::warn!("resize rejected: {err}");
            }
        }

        self.course_motion.advance(now);
        self.quote_motion.advance(now);
        let course_moved = self.courses.apply(&mut self.course_motion, now).is_some();
        let quote_moved = self.quotes.apply(&mut self.quote_motion, now).is_some();

        let active = self.quotes.active_slide();
        if active != self.requested_quote {
            self.requested_quote = active;
            self.quote_swap.request(active, now);
        }
        self.quote_swap.tick(now);

        was_moving || course_moved || quote_moved || self.quote_swap.is_animating()
    }

    /// Horizontal displacement of the quote being shown, relative to its
    /// resting spot on the track.  Nonzero while dragging and while the
    /// track animates away from (or snaps back to) that quote.
    pub fn quote_shift(&self) -> f32 {
        let width = self.quotes.viewport().item_width;
        let period = width * self.quotes.len() as f32;
        let rest = geometry::compute_offset(*self.quote_swap.shown(), width);
        let raw = self.quote_motion.offset() - rest;
        if period <= 0.0 {
            return raw;
        }
        // Loop clones repeat the track every `period`; use the nearest copy.
        (raw + period / 2.0).rem_euclid(period) - period / 2.0
    }

    // ── settings ────────────────────────────────────────────────

    /// Push edited carousel settings into the controller and persist them.
    pub fn apply_carousel_settings(&mut self) {
        let result = self
            .config
            .carousel
            .slider_config()
            .and_then(|c| self.courses.reconfigure(c));
        self.resize = Debouncer::new(self.config.carousel.resize_debounce());
        self.finish_settings_change(result);
    }

    pub fn apply_testimonial_settings(&mut self) {
        let result = self
            .config
            .testimonials
            .slider_config()
            .and_then(|c| self.quotes.reconfigure(c));
        self.quote_swap = ContentSwap::new(
            self.quotes.active_slide(),
            self.config.testimonials.transition(),
        );
        self.requested_quote = self.quotes.active_slide();
        self.finish_settings_change(result);
    }

    fn finish_settings_change(&mut self, result: Result<(), slide_reel::ConfigurationError>) {
        if let Err(err) = result {
            self.status_message = Some(format!("Setting rejected: {err}"));
            return;
        }
        if let Err(err) = self.config.save() {
            tracing::warn!("failed to save config: {err:#}");
            self.status_message = Some(format!("Could not save settings: {err}"));
        }
    }
}
