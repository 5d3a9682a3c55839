//! Drag gesture interpretation.
//!
//! Turns a raw pointer sequence into either a horizontal slide-drag or a
//! vertical pass-through, and classifies the release as a swipe or a
//! snap-back:
//!
//! ```text
//! Idle ─start─▶ AxisUndetermined ─move past dead-zone─▶ HorizontalDrag
//!                                                    └─▶ VerticalPassthrough
//!        ◀──────────────────── end / cancel ──────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use crate::error::ConfigurationError;

/// Identifies the pointer (mouse, finger) that owns a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Navigation direction requested by a swipe or a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Axis decision for the current session.  Locked once, never revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Undetermined,
    Horizontal,
    Vertical,
}

/// Tuning knobs for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Movement on either axis that must be exceeded before locking.
    pub dead_zone: f32,
    /// Minimum horizontal travel for a swipe.
    pub distance_threshold: f32,
    /// Maximum duration of a swipe.
    pub time_threshold: Duration,
    /// Scale applied to live drag offsets.  `1.0` tracks the pointer 1:1;
    /// values below one give a rubber-band feel.
    pub damping: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            dead_zone: 10.0,
            distance_threshold: 50.0,
            time_threshold: Duration::from_millis(300),
            damping: 1.0,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(ConfigurationError::InvalidDamping(self.damping));
        }
        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 {
            return Err(ConfigurationError::InvalidThreshold {
                name: "dead zone",
                value: self.dead_zone,
            });
        }
        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(ConfigurationError::InvalidThreshold {
                name: "swipe distance",
                value: self.distance_threshold,
            });
        }
        Ok(())
    }
}

/// State of one press-drag-release interaction.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub pointer: PointerId,
    pub start_x: f32,
    pub start_y: f32,
    /// Track offset when the drag began.
    pub start_offset: f32,
    pub last_x: f32,
    pub last_y: f32,
    pub started_at: Instant,
    pub axis: Axis,
}

/// What the adapter should do with a move event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveDisposition {
    /// No session, or the event belongs to another pointer.
    Ignored,
    /// Still inside the dead-zone; let the platform do nothing special yet.
    Pending,
    /// Horizontal drag: suppress the platform default and show `offset`.
    Capture { offset: f32 },
    /// Vertical gesture: let the platform scroll natively.
    Passthrough,
}

/// Classified end of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Qualifying swipe: take one navigation step.
    Navigate(Direction),
    /// Horizontal drag that didn't qualify: return to the committed offset.
    SnapBack,
    /// The slider never captured the gesture (tap or vertical scroll).
    Released,
}

/// Classify a finished gesture.
///
/// `distance` is `last_x - start_x`; a leftward swipe (negative distance)
/// advances.
pub fn classify(
    axis: Axis,
    distance: f32,
    elapsed: Duration,
    config: &GestureConfig,
) -> GestureOutcome {
    match axis {
        Axis::Horizontal => {
            let quick = elapsed <= config.time_threshold;
            let far = distance.abs() >= config.distance_threshold;
            if quick && far {
                if distance < 0.0 {
                    GestureOutcome::Navigate(Direction::Next)
                } else {
                    GestureOutcome::Navigate(Direction::Prev)
                }
            } else {
                GestureOutcome::SnapBack
            }
        }
        Axis::Vertical | Axis::Undetermined => GestureOutcome::Released,
    }
}

/// Per-controller gesture state machine.
#[derive(Debug, Clone, Default)]
pub struct DragInterpreter {
    config: GestureConfig,
    session: Option<DragSession>,
}

impl DragInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current axis lock, or `None` when idle.
    pub fn axis(&self) -> Option<Axis> {
        self.session.as_ref().map(|s| s.axis)
    }

    /// Begin a session.  Returns `false` when another pointer already owns
    /// one; the first pointer keeps control until it ends.
    pub fn start(
        &mut self,
        pointer: PointerId,
        x: f32,
        y: f32,
        offset: f32,
        now: Instant,
    ) -> bool {
        if let Some(active) = &self.session {
            tracing::debug!(
                "gesture conflict: pointer {:?} ignored while {:?} is dragging",
                pointer,
                active.pointer
            );
            return false;
        }
        self.session = Some(DragSession {
            pointer,
            start_x: x,
            start_y: y,
            start_offset: offset,
            last_x: x,
            last_y: y,
            started_at: now,
            axis: Axis::Undetermined,
        });
        true
    }

    /// Feed a pointer move.  Every raw event should pass through here (not a
    /// coalesced one) so the axis lock sees the first move past the
    /// dead-zone.
    pub fn update(&mut self, pointer: PointerId, x: f32, y: f32) -> MoveDisposition {
        let config = self.config;
        let Some(session) = self.session.as_mut() else {
            return MoveDisposition::Ignored;
        };
        if session.pointer != pointer {
            return MoveDisposition::Ignored;
        }
        session.last_x = x;
        session.last_y = y;

        let dx = x - session.start_x;
        let dy = y - session.start_y;
        if session.axis == Axis::Undetermined
            && (dx.abs() > config.dead_zone || dy.abs() > config.dead_zone)
        {
            session.axis = if dx.abs() > dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            tracing::trace!("drag axis locked: {:?}", session.axis);
        }

        match session.axis {
            Axis::Undetermined => MoveDisposition::Pending,
            Axis::Vertical => MoveDisposition::Passthrough,
            Axis::Horizontal => MoveDisposition::Capture {
                offset: session.start_offset + dx * config.damping,
            },
        }
    }

    /// Release.  Returns `None` when `pointer` doesn't own the session.
    pub fn end(&mut self, pointer: PointerId, now: Instant) -> Option<GestureOutcome> {
        if self.session.as_ref()?.pointer != pointer {
            return None;
        }
        let session = self.session.take()?;
        let distance = session.last_x - session.start_x;
        let elapsed = now.saturating_duration_since(session.started_at);
        Some(classify(session.axis, distance, elapsed, &self.config))
    }

    /// Abort the session (pointer left the tracking area, layout changed).
    /// Treated like a release that didn't qualify as a swipe.
    pub fn cancel(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(match session.axis {
            Axis::Horizontal => GestureOutcome::SnapBack,
            Axis::Vertical | Axis::Undetermined => GestureOutcome::Released,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PointerId = PointerId(1);

    fn drag(interp: &mut DragInterpreter, moves: &[(f32, f32)], held: Duration) -> GestureOutcome {
        let t0 = Instant::now();
        assert!(interp.start(P, 100.0, 100.0, 0.0, t0));
        for &(dx, dy) in moves {
            interp.update(P, 100.0 + dx, 100.0 + dy);
        }
        interp.end(P, t0 + held).unwrap()
    }

    #[test]
    fn quick_left_swipe_goes_next() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        let outcome = drag(&mut interp, &[(-80.0, 5.0)], Duration::from_millis(120));
        assert_eq!(outcome, GestureOutcome::Navigate(Direction::Next));
        assert!(!interp.is_active());
    }

    #[test]
    fn quick_right_swipe_goes_prev() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        let outcome = drag(&mut interp, &[(30.0, 0.0), (75.0, -3.0)], Duration::from_millis(200));
        assert_eq!(outcome, GestureOutcome::Navigate(Direction::Prev));
    }

    #[test]
    fn slow_swipe_snaps_back() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        let outcome = drag(&mut interp, &[(-80.0, 5.0)], Duration::from_millis(400));
        assert_eq!(outcome, GestureOutcome::SnapBack);
    }

    #[test]
    fn short_swipe_snaps_back() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        let outcome = drag(&mut interp, &[(-30.0, 0.0)], Duration::from_millis(100));
        assert_eq!(outcome, GestureOutcome::SnapBack);
    }

    #[test]
    fn hundred_pixel_threshold_mode() {
        let config = GestureConfig {
            distance_threshold: 100.0,
            ..GestureConfig::default()
        };
        let mut interp = DragInterpreter::new(config);
        assert_eq!(
            drag(&mut interp, &[(-80.0, 0.0)], Duration::from_millis(100)),
            GestureOutcome::SnapBack
        );
        assert_eq!(
            drag(&mut interp, &[(-100.0, 0.0)], Duration::from_millis(100)),
            GestureOutcome::Navigate(Direction::Next)
        );
    }

    #[test]
    fn vertical_lock_is_permanent() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        let t0 = Instant::now();
        interp.start(P, 0.0, 0.0, 0.0, t0);
        assert_eq!(interp.update(P, 5.0, 40.0), MoveDisposition::Passthrough);
        assert_eq!(interp.axis(), Some(Axis::Vertical));
        assert_eq!(interp.update(P, 60.0, 2.0), MoveDisposition::Passthrough);
        assert_eq!(interp.axis(), Some(Axis::Vertical));
        assert_eq!(
            interp.end(P, t0 + Duration::from_millis(100)),
            Some(GestureOutcome::Released)
        );
    }

    #[test]
    fn dead_zone_defers_the_decision() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        interp.start(P, 0.0, 0.0, 0.0, Instant::now());
        assert_eq!(interp.update(P, 10.0, 10.0), MoveDisposition::Pending);
        assert_eq!(interp.axis(), Some(Axis::Undetermined));
        assert_eq!(
            interp.update(P, 11.0, 3.0),
            MoveDisposition::Capture { offset: 11.0 }
        );
    }

    #[test]
    fn damping_scales_live_offset() {
        let config = GestureConfig {
            damping: 0.5,
            ..GestureConfig::default()
        };
        let mut interp = DragInterpreter::new(config);
        interp.start(P, 0.0, 0.0, -300.0, Instant::now());
        assert_eq!(
            interp.update(P, -40.0, 0.0),
            MoveDisposition::Capture { offset: -320.0 }
        );
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        let t0 = Instant::now();
        assert!(interp.start(P, 0.0, 0.0, 0.0, t0));
        assert!(!interp.start(PointerId(2), 50.0, 0.0, 0.0, t0));
        assert_eq!(interp.update(PointerId(2), -90.0, 0.0), MoveDisposition::Ignored);
        assert_eq!(interp.end(PointerId(2), t0), None);
        assert!(interp.is_active());
        assert_eq!(interp.session().map(|s| s.pointer), Some(P));
    }

    #[test]
    fn cancel_behaves_like_a_failed_swipe() {
        let mut interp = DragInterpreter::new(GestureConfig::default());
        interp.start(P, 0.0, 0.0, 0.0, Instant::now());
        interp.update(P, -90.0, 0.0);
        assert_eq!(interp.cancel(), Some(GestureOutcome::SnapBack));
        assert_eq!(interp.cancel(), None);
    }

    #[test]
    fn invalid_damping_is_rejected() {
        let config = GestureConfig {
            damping: 0.0,
            ..GestureConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::InvalidDamping(0.0)));
    }
}
