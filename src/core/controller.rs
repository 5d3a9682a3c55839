//! The slider controller: single owner of position state for one carousel.
//!
//! Input arrives as navigation commands, pointer events and resizes; output
//! is a [`Translation`] that the caller applies to the slide row on the next
//! [`SliderController::frame`].  Multiple controllers never share state.

use std::time::{Duration, Instant};

use super::geometry::{self, BreakpointTable, Slot, Viewport, WrapMode};
use super::gesture::{
    Direction, DragInterpreter, GestureConfig, GestureOutcome, MoveDisposition, PointerId,
};
use crate::error::ConfigurationError;

/// How far one prev/next moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepSize {
    /// One slide.
    Single,
    /// A full viewport of slides.
    #[default]
    Page,
}

/// Where a navigation command came from.  The re-entrancy cooldown is
/// tracked per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavSource {
    Click,
    Swipe,
    Key,
    /// Scroll wheel or trackpad scroll.
    Wheel,
}

impl NavSource {
    const COUNT: usize = 4;

    fn slot(self) -> usize {
        match self {
            NavSource::Click => 0,
            NavSource::Swipe => 1,
            NavSource::Key => 2,
            NavSource::Wheel => 3,
        }
    }
}

/// Everything that differs between carousel variants.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub wrap: WrapMode,
    pub step: StepSize,
    pub gesture: GestureConfig,
    pub breakpoints: BreakpointTable,
    /// Duration of an animated translation.
    pub transition: Duration,
    /// Ignore repeat navigation from the same source within this window.
    pub reentrancy_cooldown: Option<Duration>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::carousel()
    }
}

impl SliderConfig {
    /// Grouped, bounded row of cards that pages a full viewport at a time.
    pub fn carousel() -> Self {
        Self {
            wrap: WrapMode::Bounded,
            step: StepSize::Page,
            gesture: GestureConfig::default(),
            breakpoints: BreakpointTable::default(),
            transition: Duration::from_millis(300),
            reentrancy_cooldown: None,
        }
    }

    /// One slide at a time, wrapping, with a cooldown against double input.
    pub fn testimonial() -> Self {
        Self {
            wrap: WrapMode::Looping,
            step: StepSize::Single,
            gesture: GestureConfig {
                damping: 0.5,
                ..GestureConfig::default()
            },
            breakpoints: BreakpointTable::fixed(1).unwrap_or_default(),
            transition: Duration::from_millis(300),
            reentrancy_cooldown: Some(Duration::from_millis(300)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.gesture.validate()
    }
}

/// A translation to apply to the slide row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub offset: f32,
    /// `None` means "jump without animating".
    pub transition: Option<Duration>,
}

/// Anything that can move the slide row and report its container width.
pub trait RenderTarget {
    fn set_translation(&mut self, offset: f32, transition: Option<Duration>);
    fn container_width(&self) -> f32;
}

/// Visibility of the prev/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub prev: bool,
    pub next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    /// Track index of the left-most visible slot.  In the looping variant
    /// this may briefly sit on the clone run (at or past the slide count)
    /// until the post-transition snap.
    pub current_index: usize,
    /// Offset currently shown, including any live drag displacement.
    pub current_offset: f32,
    /// Offset of `current_index` at rest.
    pub committed_offset: f32,
}

/// Loop bookkeeping for the clone-masked wrap.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WrapPhase {
    Idle,
    /// Sitting on the clone run; snap to the matching real index once the
    /// transition is over.
    SnapPending { due: Instant },
    /// The snap frame went out without a transition; re-enable on this frame.
    Reenable,
    /// A non-animated jump went out; animate to `target` on this frame.
    StepPending { target: usize },
}

#[derive(Debug, Clone)]
pub struct SliderController {
    config: SliderConfig,
    len: usize,
    viewport: Viewport,
    position: PositionState,
    interpreter: DragInterpreter,
    wrap_phase: WrapPhase,
    transitions_enabled: bool,
    last_nav: [Option<Instant>; NavSource::COUNT],
    /// Latest unrendered translation.  Drag moves overwrite each other here
    /// so only one write reaches the render target per frame.
    pending: Option<Translation>,
    rendered: Translation,
}

impl SliderController {
    pub fn new(
        len: usize,
        container_width: f32,
        config: SliderConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        if len == 0 {
            return Err(ConfigurationError::NoSlides);
        }
        let viewport =
            geometry::recompute_viewport(container_width, &config.breakpoints)?.capped(len);
        let initial = Translation {
            offset: 0.0,
            transition: None,
        };
        Ok(Self {
            interpreter: DragInterpreter::new(config.gesture),
            config,
            len,
            viewport,
            position: PositionState {
                current_index: 0,
                current_offset: 0.0,
                committed_offset: 0.0,
            },
            wrap_phase: WrapPhase::Idle,
            transitions_enabled: true,
            last_nav: [None; NavSource::COUNT],
            pending: Some(initial),
            rendered: initial,
        })
    }

    /// Build a controller sized to `target`'s current container width.
    pub fn for_target<R: RenderTarget>(
        len: usize,
        target: &R,
        config: SliderConfig,
    ) -> Result<Self, ConfigurationError> {
        Self::new(len, target.container_width(), config)
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    pub fn current_index(&self) -> usize {
        self.position.current_index
    }

    /// The real slide at the left edge (what pagination dots highlight).
    /// A step queued behind a masked jump already counts.
    pub fn active_slide(&self) -> usize {
        self.logical_index() % self.len.max(1)
    }

    /// The last translation handed out by [`frame`](Self::frame).
    pub fn translation(&self) -> Translation {
        self.rendered
    }

    /// `false` only on the single frame of a masked loop jump.
    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.interpreter.is_active()
    }

    pub fn drag_interpreter(&self) -> &DragInterpreter {
        &self.interpreter
    }

    pub fn affordances(&self) -> Affordances {
        match self.config.wrap {
            WrapMode::Looping => Affordances {
                prev: true,
                next: true,
            },
            WrapMode::Bounded => {
                let max = geometry::max_index(self.len, self.viewport.items_per_view);
                Affordances {
                    prev: self.position.current_index > 0,
                    next: self.position.current_index < max,
                }
            }
        }
    }

    pub fn track_slots(&self) -> Vec<Slot> {
        geometry::track_slots(self.len, self.viewport.items_per_view, self.config.wrap)
    }

    pub fn visible_slots(&self) -> Vec<Slot> {
        let slots = self.track_slots();
        let range = geometry::visible_range(
            self.position.current_index,
            self.viewport.items_per_view,
            slots.len(),
        );
        slots[range].to_vec()
    }

    // ── navigation ──────────────────────────────────────────────

    pub fn next(&mut self, now: Instant, source: NavSource) -> bool {
        self.navigate(Direction::Next, now, source)
    }

    pub fn prev(&mut self, now: Instant, source: NavSource) -> bool {
        self.navigate(Direction::Prev, now, source)
    }

    /// Step once in `direction`.  Returns whether the index changed.
    ///
    /// Commands issued mid-transition are accepted immediately; the newest
    /// one decides the target.
    pub fn navigate(&mut self, direction: Direction, now: Instant, source: NavSource) -> bool {
        if self.guard_blocks(source, now) {
            return false;
        }
        let changed = match self.config.wrap {
            WrapMode::Bounded => self.step_bounded(direction),
            WrapMode::Looping => self.step_looping(direction, now),
        };
        if changed {
            self.last_nav[source.slot()] = Some(now);
            tracing::debug!(
                "slider {:?} via {:?} → index {}",
                direction,
                source,
                self.position.current_index
            );
        }
        changed
    }

    /// Go straight to `index` (pagination dots).  Same clamp/wrap rules as
    /// stepping; jumping to the current slide changes nothing.
    pub fn jump_to(&mut self, index: usize, now: Instant, source: NavSource) -> bool {
        if self.guard_blocks(source, now) {
            return false;
        }
        let target = geometry::clamp_index(
            index as isize,
            self.len,
            self.viewport.items_per_view,
            self.config.wrap,
        );
        if target == self.active_slide() {
            return false;
        }
        match self.wrap_phase {
            WrapPhase::StepPending { .. } => {
                self.wrap_phase = WrapPhase::StepPending { target };
            }
            _ if self.position.current_index >= self.len => {
                // Leave the clone run first so the animation starts from real slides.
                self.stage(self.position.current_index % self.len, target);
            }
            _ => self.animate_to(target, now),
        }
        self.last_nav[source.slot()] = Some(now);
        tracing::debug!("slider jump via {:?} → index {}", source, target);
        true
    }

    fn step_len(&self) -> usize {
        match self.config.step {
            StepSize::Single => 1,
            StepSize::Page => self.viewport.items_per_view.max(1),
        }
    }

    fn step_bounded(&mut self, direction: Direction) -> bool {
        let step = self.step_len() as isize;
        let current = self.position.current_index as isize;
        let requested = match direction {
            Direction::Prev => current - step,
            Direction::Next => current + step,
        };
        let target = geometry::clamp_index(
            requested,
            self.len,
            self.viewport.items_per_view,
            WrapMode::Bounded,
        );
        if target == self.position.current_index {
            return false;
        }
        self.commit(target);
        true
    }

    /// Index the slider is heading to, including a step queued behind a
    /// masked jump.
    fn logical_index(&self) -> usize {
        match self.wrap_phase {
            WrapPhase::StepPending { target } => target,
            _ => self.position.current_index,
        }
    }

    /// Step around the loop.  The result is `(slide ± step) mod len`; the
    /// track index it animates to is the copy of that slide (real or clone)
    /// lying in the direction of travel from the index currently laid out.
    fn step_looping(&mut self, direction: Direction, now: Instant) -> bool {
        let n = self.len;
        let step = self.step_len().min(n);
        let slide = self.logical_index() % n;
        let from = self.position.current_index;
        let max = geometry::max_loop_index(n, self.viewport.items_per_view);

        let wanted = match direction {
            Direction::Next => (slide + step) % n,
            Direction::Prev => (slide + n - step) % n,
        };
        let staged = matches!(self.wrap_phase, WrapPhase::StepPending { .. });
        let reachable = match direction {
            Direction::Next => [wanted, wanted + n]
                .into_iter()
                .find(|&i| i > from && i <= max),
            Direction::Prev => [wanted + n, wanted]
                .into_iter()
                .find(|&i| i < from && i <= max),
        }
        // Commands that cancel out while staged stay on the staged copy.
        .or_else(|| (staged && from % n == wanted).then_some(from));

        match reachable {
            Some(target) if staged => {
                // The masked jump hasn't been followed up yet; retarget it.
                self.wrap_phase = WrapPhase::StepPending { target };
            }
            Some(target) => self.animate_to(target, now),
            None => match direction {
                // Re-lay out on a copy of the slide that leaves room to move.
                Direction::Next => self.stage(slide, slide + step),
                Direction::Prev if slide >= step => self.stage(slide, slide - step),
                Direction::Prev => self.stage(slide + n, slide + n - step),
            },
        }
        true
    }

    /// Animate to `index`; a clone-run landing schedules the snap home.
    fn animate_to(&mut self, index: usize, now: Instant) {
        self.commit(index);
        self.transitions_enabled = true;
        self.wrap_phase = if index >= self.len {
            WrapPhase::SnapPending {
                due: now + self.config.transition,
            }
        } else {
            WrapPhase::Idle
        };
    }

    /// Jump to `start` without animating, then animate to `target` on the
    /// following frame.
    fn stage(&mut self, start: usize, target: usize) {
        self.set_index_immediate(start);
        self.transitions_enabled = false;
        self.wrap_phase = WrapPhase::StepPending { target };
    }

    fn guard_blocks(&self, source: NavSource, now: Instant) -> bool {
        let Some(cooldown) = self.config.reentrancy_cooldown else {
            return false;
        };
        match self.last_nav[source.slot()] {
            Some(last) if now.saturating_duration_since(last) < cooldown => {
                tracing::debug!("slider navigation via {:?} ignored during cooldown", source);
                true
            }
            _ => false,
        }
    }

    /// Move to `index` and queue an animated translation.
    fn commit(&mut self, index: usize) {
        let offset = geometry::compute_offset(index, self.viewport.item_width);
        self.position = PositionState {
            current_index: index,
            current_offset: offset,
            committed_offset: offset,
        };
        self.pending = Some(Translation {
            offset,
            transition: Some(self.config.transition),
        });
    }

    /// Move to `index` and queue a jump without animation.
    fn set_index_immediate(&mut self, index: usize) {
        let offset = geometry::compute_offset(index, self.viewport.item_width);
        self.position = PositionState {
            current_index: index,
            current_offset: offset,
            committed_offset: offset,
        };
        self.pending = Some(Translation {
            offset,
            transition: None,
        });
    }

    fn snap_back(&mut self) {
        self.position.current_offset = self.position.committed_offset;
        self.pending = Some(Translation {
            offset: self.position.committed_offset,
            transition: Some(self.config.transition),
        });
    }

    /// Drop any in-progress loop masking and land on a real slide.
    fn settle_wrap(&mut self) {
        if self.wrap_phase == WrapPhase::Idle {
            return;
        }
        let slide = self.active_slide();
        if self.position.current_index != slide {
            self.set_index_immediate(slide);
            self.transitions_enabled = false;
            self.wrap_phase = WrapPhase::Reenable;
        } else {
            self.transitions_enabled = true;
            self.wrap_phase = WrapPhase::Idle;
        }
    }

    // ── drag input ──────────────────────────────────────────────

    /// Start a drag.  Returns `false` if another pointer is already
    /// dragging.
    pub fn drag_start(&mut self, pointer: PointerId, x: f32, y: f32, now: Instant) -> bool {
        if !self.interpreter.is_active() {
            self.settle_wrap();
        }
        self.interpreter
            .start(pointer, x, y, self.position.committed_offset, now)
    }

    /// Feed a raw move.  The live offset updates immediately; the render
    /// write waits for the next frame.
    pub fn drag_move(&mut self, pointer: PointerId, x: f32, y: f32) -> MoveDisposition {
        let disposition = self.interpreter.update(pointer, x, y);
        if let MoveDisposition::Capture { offset } = disposition {
            self.position.current_offset = offset;
            self.pending = Some(Translation {
                offset,
                transition: None,
            });
        }
        disposition
    }

    /// Release.  A qualifying swipe navigates one step (subject to bounds,
    /// wrap and cooldown); anything else returns to the committed offset.
    pub fn drag_end(&mut self, pointer: PointerId, now: Instant) -> Option<GestureOutcome> {
        let outcome = self.interpreter.end(pointer, now)?;
        match outcome {
            GestureOutcome::Navigate(direction) => {
                if !self.navigate(direction, now, NavSource::Swipe) {
                    self.snap_back();
                }
            }
            GestureOutcome::SnapBack => self.snap_back(),
            GestureOutcome::Released => {}
        }
        Some(outcome)
    }

    /// Abort the drag (pointer left the tracking area).
    pub fn drag_cancel(&mut self) -> Option<GestureOutcome> {
        let outcome = self.interpreter.cancel()?;
        if outcome == GestureOutcome::SnapBack {
            self.snap_back();
        }
        Some(outcome)
    }

    // ── layout ──────────────────────────────────────────────────

    /// Recompute the viewport for a new container width and re-clamp the
    /// index.  Never blocked by the navigation cooldown.  On error the
    /// previous layout is kept.
    pub fn handle_resize(&mut self, container_width: f32) -> Result<(), ConfigurationError> {
        let viewport = geometry::recompute_viewport(container_width, &self.config.breakpoints)?
            .capped(self.len);
        self.viewport = viewport;
        self.relayout(self.active_slide_or_index());
        tracing::debug!(
            "slider resized: width={} items_per_view={} index={}",
            container_width,
            viewport.items_per_view,
            self.position.current_index
        );
        Ok(())
    }

    /// Swap in a different slide collection (e.g. a category change).
    /// The position resets to the first slide.
    pub fn set_slide_count(&mut self, len: usize) -> Result<(), ConfigurationError> {
        if len == 0 {
            return Err(ConfigurationError::NoSlides);
        }
        let viewport =
            geometry::recompute_viewport(self.viewport.container_width, &self.config.breakpoints)?
                .capped(len);
        self.len = len;
        self.viewport = viewport;
        self.relayout(0);
        Ok(())
    }

    /// Apply new tuning at runtime, keeping the current slide where the new
    /// bounds allow it.
    pub fn reconfigure(&mut self, config: SliderConfig) -> Result<(), ConfigurationError> {
        config.validate()?;
        let viewport =
            geometry::recompute_viewport(self.viewport.container_width, &config.breakpoints)?
                .capped(self.len);
        let keep = self.active_slide_or_index();
        self.interpreter.set_config(config.gesture);
        self.config = config;
        self.viewport = viewport;
        self.last_nav = [None; NavSource::COUNT];
        self.relayout(keep);
        Ok(())
    }

    fn active_slide_or_index(&self) -> usize {
        match self.config.wrap {
            WrapMode::Looping => self.active_slide(),
            WrapMode::Bounded => self.position.current_index,
        }
    }

    fn relayout(&mut self, index: usize) {
        if self.interpreter.cancel().is_some() {
            tracing::debug!("drag cancelled by layout change");
        }
        let index = geometry::clamp_index(
            index as isize,
            self.len,
            self.viewport.items_per_view,
            self.config.wrap,
        );
        self.wrap_phase = WrapPhase::Idle;
        self.transitions_enabled = true;
        self.set_index_immediate(index);
    }

    // ── frame ───────────────────────────────────────────────────

    /// Advance one display frame.  Returns the translation to apply, if any.
    pub fn frame(&mut self, now: Instant) -> Option<Translation> {
        if let Some(t) = self.pending.take() {
            if t.transition.is_some() {
                if let WrapPhase::SnapPending { .. } = self.wrap_phase {
                    // Count the snap delay from when the animation went out.
                    self.wrap_phase = WrapPhase::SnapPending {
                        due: now + self.config.transition,
                    };
                }
            }
            self.rendered = t;
            return Some(t);
        }
        match self.wrap_phase {
            WrapPhase::Idle => None,
            WrapPhase::SnapPending { due } if now >= due => {
                let home = self.position.current_index % self.len;
                self.set_index_immediate(home);
                self.transitions_enabled = false;
                self.wrap_phase = WrapPhase::Reenable;
                tracing::debug!("loop wrap: snapped back to index {}", home);
                self.pending.take().map(|t| {
                    self.rendered = t;
                    t
                })
            }
            WrapPhase::SnapPending { .. } => None,
            WrapPhase::Reenable => {
                self.transitions_enabled = true;
                self.wrap_phase = WrapPhase::Idle;
                None
            }
            WrapPhase::StepPending { target } => {
                self.animate_to(target, now);
                self.pending.take().map(|t| {
                    self.rendered = t;
                    t
                })
            }
        }
    }

    /// [`frame`](Self::frame), writing the result to `target`.
    pub fn apply<R: RenderTarget>(&mut self, target: &mut R, now: Instant) -> Option<Translation> {
        let t = self.frame(now)?;
        target.set_translation(t.offset, t.transition);
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MS: Duration = Duration::from_millis(1);
    const P: PointerId = PointerId(0);

    fn bounded(len: usize, width: f32) -> SliderController {
        SliderController::new(len, width, SliderConfig::carousel()).unwrap()
    }

    fn looping(len: usize, per_view: usize, step: StepSize) -> SliderController {
        let config = SliderConfig {
            step,
            breakpoints: BreakpointTable::fixed(per_view).unwrap(),
            reentrancy_cooldown: None,
            ..SliderConfig::testimonial()
        };
        SliderController::new(len, 100.0 * per_view as f32, config).unwrap()
    }

    #[test]
    fn page_steps_clamp_at_both_ends() {
        let t = Instant::now();
        let mut s = bounded(12, 1024.0);
        assert_eq!(s.viewport().items_per_view, 5);

        assert!(s.next(t, NavSource::Click));
        assert_eq!(s.current_index(), 5);
        assert!(s.next(t, NavSource::Click));
        assert_eq!(s.current_index(), 7);
        assert!(!s.next(t, NavSource::Click));
        assert_eq!(s.current_index(), 7);
        assert!(s.prev(t, NavSource::Click));
        assert_eq!(s.current_index(), 2);
        assert!(s.prev(t, NavSource::Click));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn navigation_queues_an_animated_translation() {
        let t = Instant::now();
        let mut s = bounded(12, 1000.0);
        assert_eq!(s.frame(t).map(|tr| tr.transition), Some(None));
        s.next(t, NavSource::Key);
        let tr = s.frame(t).unwrap();
        assert_eq!(tr.offset, -3.0 * (1000.0 / 3.0));
        assert_eq!(tr.transition, Some(Duration::from_millis(300)));
        assert_eq!(s.frame(t), None);
    }

    #[test]
    fn affordances_hide_at_exhausted_ends() {
        let t = Instant::now();
        let mut s = bounded(12, 1024.0);
        assert_eq!(s.affordances(), Affordances { prev: false, next: true });
        s.next(t, NavSource::Click);
        s.next(t, NavSource::Click);
        assert_eq!(s.affordances(), Affordances { prev: true, next: false });

        let l = looping(4, 1, StepSize::Single);
        assert_eq!(l.affordances(), Affordances { prev: true, next: true });
    }

    #[test]
    fn single_step_moves_one_slide() {
        let t = Instant::now();
        let config = SliderConfig {
            step: StepSize::Single,
            ..SliderConfig::carousel()
        };
        let mut s = SliderController::new(12, 1024.0, config).unwrap();
        s.next(t, NavSource::Click);
        s.next(t, NavSource::Click);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn jump_to_current_is_a_no_op() {
        let t = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.next(t, NavSource::Click);
        s.frame(t);
        let before = s.position();
        assert!(!s.jump_to(s.current_index(), t, NavSource::Click));
        assert_eq!(s.position().current_offset, before.current_offset);
        assert_eq!(s.frame(t), None);
    }

    #[test]
    fn jump_to_clamps_past_the_end() {
        let t = Instant::now();
        let mut s = bounded(12, 1024.0);
        assert!(s.jump_to(40, t, NavSource::Click));
        assert_eq!(s.current_index(), 7);
    }

    #[test]
    fn looping_next_wraps_without_a_visible_jump() {
        let t0 = Instant::now();
        let mut s = looping(5, 1, StepSize::Single);
        s.jump_to(4, t0, NavSource::Click);
        s.frame(t0);

        assert!(s.next(t0, NavSource::Click));
        assert_eq!(s.current_index(), 5);
        let into_clones = s.frame(t0).unwrap();
        assert_eq!(into_clones.offset, -500.0);
        assert!(into_clones.transition.is_some());
        let shown_before: Vec<usize> = s.visible_slots().iter().map(|slot| slot.slide()).collect();
        assert!(s.visible_slots().iter().all(|slot| slot.is_clone()));

        // Transition still in flight.
        assert_eq!(s.frame(t0 + 100 * MS), None);
        assert_eq!(s.current_index(), 5);

        let snap = s.frame(t0 + 300 * MS).unwrap();
        assert_eq!(s.current_index(), 0);
        assert_eq!(snap, Translation { offset: 0.0, transition: None });
        assert!(!s.transitions_enabled());
        let shown_after: Vec<usize> = s.visible_slots().iter().map(|slot| slot.slide()).collect();
        assert_eq!(shown_before, shown_after);
        // Same picture modulo one full loop of the track.
        let period = 5.0 * s.viewport().item_width;
        assert_eq!(into_clones.offset.rem_euclid(period), snap.offset.rem_euclid(period));

        assert_eq!(s.frame(t0 + 316 * MS), None);
        assert!(s.transitions_enabled());
    }

    #[test]
    fn looping_page_step_lands_on_the_clone_run() {
        let t0 = Instant::now();
        let mut s = looping(9, 3, StepSize::Page);
        s.jump_to(6, t0, NavSource::Click);
        s.frame(t0);
        s.next(t0, NavSource::Click);
        assert_eq!(s.current_index(), 9);
        s.frame(t0);
        s.frame(t0 + 300 * MS);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.active_slide(), 0);
    }

    #[test]
    fn looping_prev_from_start_jumps_then_animates() {
        let t0 = Instant::now();
        let mut s = looping(4, 1, StepSize::Single);
        s.frame(t0);

        assert!(s.prev(t0, NavSource::Click));
        let jump = s.frame(t0).unwrap();
        assert_eq!(jump, Translation { offset: -400.0, transition: None });
        assert!(!s.transitions_enabled());

        let step = s.frame(t0 + 16 * MS).unwrap();
        assert_eq!(step.offset, -300.0);
        assert!(step.transition.is_some());
        assert_eq!(s.current_index(), 3);
        assert!(s.transitions_enabled());
    }

    #[test]
    fn next_while_snap_is_pending_continues_from_start() {
        let t0 = Instant::now();
        let mut s = looping(3, 1, StepSize::Single);
        s.jump_to(2, t0, NavSource::Click);
        s.next(t0, NavSource::Click);
        s.frame(t0);
        // Second click lands before the snap frame.
        s.next(t0 + 50 * MS, NavSource::Click);
        assert_eq!(s.frame(t0 + 50 * MS).map(|t| t.offset), Some(0.0));
        assert_eq!(s.frame(t0 + 66 * MS).map(|t| t.offset), Some(-100.0));
        assert_eq!(s.active_slide(), 1);
    }

    #[test]
    fn looping_page_step_wraps_forward_modulo_len() {
        let t0 = Instant::now();
        let mut s = looping(12, 5, StepSize::Page);
        s.jump_to(9, t0, NavSource::Click);
        s.frame(t0);

        assert!(s.next(t0, NavSource::Click));
        assert_eq!(s.active_slide(), 2);
        // Animates onto the clone of slide 2, then lands on the real one.
        assert_eq!(s.current_index(), 14);
        assert_eq!(s.frame(t0).map(|t| t.offset), Some(-1400.0));
        let snap = s.frame(t0 + 300 * MS).unwrap();
        assert_eq!(snap, Translation { offset: -200.0, transition: None });
        assert_eq!(s.current_index(), 2);
        let window: Vec<usize> = s.visible_slots().iter().map(|slot| slot.slide()).collect();
        assert_eq!(window, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn looping_page_step_wraps_backward_modulo_len() {
        let t0 = Instant::now();
        let mut s = looping(12, 5, StepSize::Page);
        s.jump_to(2, t0, NavSource::Click);
        s.frame(t0);

        assert!(s.prev(t0, NavSource::Click));
        assert_eq!(s.active_slide(), 9);
        // Masked jump to the clone of slide 2, then animate back to 9.
        let jump = s.frame(t0 + 16 * MS).unwrap();
        assert_eq!(jump, Translation { offset: -1400.0, transition: None });
        let step = s.frame(t0 + 32 * MS).unwrap();
        assert_eq!(step.offset, -900.0);
        assert!(step.transition.is_some());
        assert_eq!(s.current_index(), 9);
    }

    #[test]
    fn clone_run_window_shows_the_wrapped_slides() {
        let t0 = Instant::now();
        let mut s = looping(12, 5, StepSize::Page);
        s.jump_to(9, t0, NavSource::Click);
        s.next(t0, NavSource::Click);
        let window: Vec<usize> = s.visible_slots().iter().map(|slot| slot.slide()).collect();
        assert_eq!(window, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn two_prevs_before_a_frame_both_count() {
        let t0 = Instant::now();
        let config = SliderConfig {
            breakpoints: BreakpointTable::fixed(1).unwrap(),
            ..SliderConfig::testimonial()
        };
        let mut s = SliderController::new(5, 100.0, config).unwrap();
        s.frame(t0);

        assert!(s.prev(t0, NavSource::Click));
        assert!(s.prev(t0, NavSource::Key));
        assert_eq!(s.active_slide(), 3);

        // Still one masked jump followed by one animation.
        assert_eq!(
            s.frame(t0 + 16 * MS),
            Some(Translation { offset: -500.0, transition: None })
        );
        let step = s.frame(t0 + 32 * MS).unwrap();
        assert_eq!(step.offset, -300.0);
        assert!(step.transition.is_some());
        assert_eq!(s.current_index(), 3);
    }

    #[test]
    fn nexts_queued_behind_a_clone_exit_accumulate() {
        let t0 = Instant::now();
        let mut s = looping(5, 1, StepSize::Single);
        s.jump_to(4, t0, NavSource::Click);
        s.frame(t0);

        s.next(t0, NavSource::Click);
        s.frame(t0);
        assert_eq!(s.current_index(), 5);
        s.next(t0 + 50 * MS, NavSource::Click);
        s.next(t0 + 50 * MS, NavSource::Click);
        assert_eq!(s.active_slide(), 2);

        assert_eq!(s.frame(t0 + 50 * MS).map(|t| t.offset), Some(0.0));
        assert_eq!(s.frame(t0 + 66 * MS).map(|t| t.offset), Some(-200.0));
        assert_eq!(s.active_slide(), 2);
    }

    #[test]
    fn cooldown_is_per_source() {
        let t0 = Instant::now();
        let config = SliderConfig {
            reentrancy_cooldown: Some(Duration::from_millis(300)),
            step: StepSize::Single,
            ..SliderConfig::carousel()
        };
        let mut s = SliderController::new(12, 1024.0, config).unwrap();
        assert!(s.next(t0, NavSource::Click));
        assert!(!s.next(t0 + 100 * MS, NavSource::Click));
        assert!(s.next(t0 + 100 * MS, NavSource::Swipe));
        assert!(s.next(t0 + 350 * MS, NavSource::Click));
        assert_eq!(s.current_index(), 3);
        // Resize ignores the cooldown.
        s.handle_resize(640.0).unwrap();
        assert_eq!(s.viewport().items_per_view, 3);
    }

    #[test]
    fn resize_clamps_index_into_new_bounds() {
        let t = Instant::now();
        let mut s = bounded(12, 700.0);
        assert_eq!(s.viewport().items_per_view, 3);
        s.jump_to(9, t, NavSource::Click);
        assert_eq!(s.current_index(), 9);

        s.handle_resize(1024.0).unwrap();
        assert_eq!(s.viewport().items_per_view, 5);
        assert_eq!(s.current_index(), 7);
        assert_eq!(
            s.frame(t),
            Some(Translation { offset: -7.0 * 204.8, transition: None })
        );
    }

    #[test]
    fn bad_resize_keeps_previous_layout() {
        let mut s = bounded(12, 1024.0);
        let before = s.viewport();
        assert_eq!(
            s.handle_resize(0.0),
            Err(ConfigurationError::InvalidContainerWidth(0.0))
        );
        assert_eq!(s.viewport(), before);
    }

    #[test]
    fn construction_fails_fast() {
        assert_eq!(
            SliderController::new(0, 800.0, SliderConfig::carousel()).unwrap_err(),
            ConfigurationError::NoSlides
        );
        assert!(SliderController::new(4, -1.0, SliderConfig::carousel()).is_err());
    }

    #[test]
    fn fewer_slides_than_slots_caps_items_per_view() {
        let t = Instant::now();
        let mut s = bounded(2, 1024.0);
        assert_eq!(s.viewport().items_per_view, 2);
        assert!(!s.next(t, NavSource::Click));
        assert_eq!(s.affordances(), Affordances { prev: false, next: false });
    }

    #[test]
    fn quick_drag_swipes_to_next_page() {
        let t0 = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.frame(t0);
        assert!(s.drag_start(P, 500.0, 100.0, t0));
        assert_eq!(
            s.drag_move(P, 420.0, 105.0),
            MoveDisposition::Capture { offset: -80.0 }
        );
        assert_eq!(
            s.frame(t0 + 16 * MS),
            Some(Translation { offset: -80.0, transition: None })
        );
        assert_eq!(
            s.drag_end(P, t0 + 120 * MS),
            Some(GestureOutcome::Navigate(Direction::Next))
        );
        assert_eq!(s.current_index(), 5);
        assert!(s.frame(t0 + 130 * MS).unwrap().transition.is_some());
    }

    #[test]
    fn slow_drag_snaps_back() {
        let t0 = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.drag_start(P, 500.0, 100.0, t0);
        s.drag_move(P, 420.0, 105.0);
        assert_eq!(s.drag_end(P, t0 + 400 * MS), Some(GestureOutcome::SnapBack));
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.position().current_offset, 0.0);
        let tr = s.frame(t0 + 400 * MS).unwrap();
        assert_eq!(tr.offset, 0.0);
        assert!(tr.transition.is_some());
    }

    #[test]
    fn vertical_drag_never_moves_the_track() {
        let t0 = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.frame(t0);
        s.drag_start(P, 0.0, 0.0, t0);
        assert_eq!(s.drag_move(P, 5.0, 40.0), MoveDisposition::Passthrough);
        assert_eq!(s.drag_move(P, 60.0, 2.0), MoveDisposition::Passthrough);
        assert_eq!(s.drag_end(P, t0 + 100 * MS), Some(GestureOutcome::Released));
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.frame(t0 + 100 * MS), None);
    }

    #[test]
    fn swipe_past_the_end_snaps_back() {
        let t0 = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.jump_to(7, t0, NavSource::Click);
        s.frame(t0);
        s.drag_start(P, 500.0, 0.0, t0);
        s.drag_move(P, 400.0, 0.0);
        s.drag_end(P, t0 + 100 * MS);
        assert_eq!(s.current_index(), 7);
        assert_eq!(s.frame(t0 + 100 * MS).map(|t| t.offset), Some(-7.0 * 204.8));
    }

    #[test]
    fn drag_moves_coalesce_per_frame() {
        let t0 = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.frame(t0);
        s.drag_start(P, 500.0, 0.0, t0);
        s.drag_move(P, 480.0, 0.0);
        s.drag_move(P, 470.0, 0.0);
        s.drag_move(P, 455.0, 0.0);
        assert_eq!(s.frame(t0 + 16 * MS).map(|t| t.offset), Some(-45.0));
        assert_eq!(s.frame(t0 + 32 * MS), None);
    }

    #[test]
    fn rubber_band_damping() {
        let t0 = Instant::now();
        let mut s = looping(5, 1, StepSize::Single);
        s.drag_start(P, 50.0, 0.0, t0);
        assert_eq!(
            s.drag_move(P, 10.0, 0.0),
            MoveDisposition::Capture { offset: -20.0 }
        );
    }

    #[test]
    fn resize_cancels_an_active_drag() {
        let t0 = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.drag_start(P, 500.0, 0.0, t0);
        s.drag_move(P, 400.0, 0.0);
        s.handle_resize(800.0).unwrap();
        assert!(!s.is_dragging());
        assert_eq!(s.position().current_offset, s.position().committed_offset);
    }

    #[test]
    fn slide_count_change_resets_position() {
        let t = Instant::now();
        let mut s = bounded(12, 1024.0);
        s.next(t, NavSource::Click);
        s.set_slide_count(3).unwrap();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.viewport().items_per_view, 3);
        assert_eq!(s.set_slide_count(0), Err(ConfigurationError::NoSlides));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn reconfigure_switches_to_looping() {
        let t = Instant::now();
        let mut s = bounded(6, 640.0);
        s.jump_to(3, t, NavSource::Click);
        let config = SliderConfig {
            wrap: WrapMode::Looping,
            step: StepSize::Single,
            ..s.config().clone()
        };
        s.reconfigure(config).unwrap();
        assert_eq!(s.current_index(), 3);
        assert_eq!(s.track_slots().len(), 11);

        let bad = SliderConfig {
            gesture: GestureConfig {
                damping: f32::NAN,
                ..GestureConfig::default()
            },
            ..SliderConfig::carousel()
        };
        assert!(s.reconfigure(bad).is_err());
        assert_eq!(s.config().wrap, WrapMode::Looping);
    }

    #[derive(Debug, Clone)]
    enum Cmd {
        Next,
        Prev,
        Jump(usize),
        Resize(f32),
    }

    fn cmd() -> impl Strategy<Value = Cmd> {
        prop_oneof![
            Just(Cmd::Next),
            Just(Cmd::Prev),
            (0usize..64).prop_map(Cmd::Jump),
            (1.0f32..2000.0).prop_map(Cmd::Resize),
        ]
    }

    proptest! {
        #[test]
        fn bounded_index_stays_in_range(
            len in 1usize..40,
            width in 1.0f32..2000.0,
            page in any::<bool>(),
            cmds in proptest::collection::vec(cmd(), 0..40),
        ) {
            let config = SliderConfig {
                step: if page { StepSize::Page } else { StepSize::Single },
                ..SliderConfig::carousel()
            };
            let mut s = SliderController::new(len, width, config).unwrap();
            let t = Instant::now();
            for c in cmds {
                match c {
                    Cmd::Next => { s.next(t, NavSource::Click); }
                    Cmd::Prev => { s.prev(t, NavSource::Click); }
                    Cmd::Jump(i) => { s.jump_to(i, t, NavSource::Click); }
                    Cmd::Resize(w) => { s.handle_resize(w).unwrap(); }
                }
                let k = s.viewport().items_per_view;
                prop_assert!(k >= 1 && k <= len);
                prop_assert!(s.current_index() <= len - k);
                prop_assert!(s.position().committed_offset.is_finite());
            }
        }

        #[test]
        fn looping_steps_follow_modular_arithmetic(
            len in 1usize..20,
            per_view in 1usize..6,
            page in any::<bool>(),
            moves in proptest::collection::vec(any::<bool>(), 0..30),
            frame_between in any::<bool>(),
        ) {
            let step = if page { StepSize::Page } else { StepSize::Single };
            let mut s = looping(len, per_view, step);
            let k = s.viewport().items_per_view;
            let stride = match step {
                StepSize::Single => 1,
                StepSize::Page => k,
            };
            let t0 = Instant::now();
            let mut expected = 0usize;
            for (i, forward) in moves.into_iter().enumerate() {
                let t = t0 + (i as u32) * 400 * MS;
                if forward {
                    s.next(t, NavSource::Click);
                    expected = (expected + stride) % len;
                } else {
                    s.prev(t, NavSource::Click);
                    expected = (expected + len - stride) % len;
                }
                prop_assert_eq!(s.active_slide(), expected);
                prop_assert!(s.current_index() <= geometry::max_loop_index(len, k));
                if frame_between {
                    s.frame(t);
                    s.frame(t + 16 * MS);
                }
            }
            // Let every transition settle.
            let end = t0 + Duration::from_secs(60);
            for f in 0..4u64 {
                s.frame(end + Duration::from_secs(f));
            }
            prop_assert_eq!(s.current_index(), expected);
        }
    }
}
