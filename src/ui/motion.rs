//! Column-offset motion for a slide row with quadratic ease-out.
//!
//! The slider controller hands out a target offset plus an optional
//! duration.  `TrackMotion` turns that into a per-frame column offset:
//! a duration starts a tween from wherever the row is drawn right now, no
//! duration jumps straight there.

use std::time::{Duration, Instant};

use slide_reel::RenderTarget;

#[derive(Debug, Clone)]
pub struct TrackMotion {
    /// Offset drawn this frame, in columns.
    shown: f32,
    from: f32,
    target: f32,
    started_at: Instant,
    duration: Duration,
    active: bool,
    /// Width of the visible track, in columns.
    width: f32,
    /// Time of the last [`advance`](Self::advance); tweens started by
    /// `set_translation` begin here.
    clock: Instant,
}

impl TrackMotion {
    pub fn new(width: f32, now: Instant) -> Self {
        Self {
            shown: 0.0,
            from: 0.0,
            target: 0.0,
            started_at: now,
            duration: Duration::ZERO,
            active: false,
            width: width.max(1.0),
            clock: now,
        }
    }

    pub fn set_container_width(&mut self, width: f32) {
        self.width = width.max(1.0);
    }

    /// Move the tween forward to `now`.  Call once per frame before
    /// applying new translations.
    pub fn advance(&mut self, now: Instant) {
        self.clock = now;
        if !self.active {
            return;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            self.shown = self.target;
            self.active = false;
            return;
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.shown = self.from + (self.target - self.from) * ease_out(t);
    }

    pub fn offset(&self) -> f32 {
        self.shown
    }

    pub fn is_animating(&self) -> bool {
        self.active
    }
}

impl RenderTarget for TrackMotion {
    fn set_translation(&mut self, offset: f32, transition: Option<Duration>) {
        match transition {
            Some(duration) if !duration.is_zero() => {
                self.from = self.shown;
                self.target = offset;
                self.started_at = self.clock;
                self.duration = duration;
                self.active = true;
            }
            _ => {
                self.shown = offset;
                self.target = offset;
                self.active = false;
            }
        }
    }

    fn container_width(&self) -> f32 {
        self.width
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
