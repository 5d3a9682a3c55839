//! Two-phase content swap: fade out, replace content, fade in.
//!
//! A new request never queues behind an old one.  While fading out it simply
//! replaces the pending content; once the swap has happened it starts a
//! fresh fade-out.  The latest request always wins.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    Idle,
    FadingOut { since: Instant },
    FadingIn { since: Instant },
}

/// Fire-and-forget swap of displayed content `T`.
#[derive(Debug, Clone)]
pub struct ContentSwap<T> {
    fade: Duration,
    phase: SwapPhase,
    shown: T,
    pending: Option<T>,
    /// Bumped on every request; lets callers tell which request a swap
    /// belongs to.
    generation: u64,
}

impl<T: Clone + PartialEq> ContentSwap<T> {
    pub fn new(initial: T, fade: Duration) -> Self {
        Self {
            fade,
            phase: SwapPhase::Idle,
            shown: initial,
            pending: None,
            generation: 0,
        }
    }

    pub fn shown(&self) -> &T {
        &self.shown
    }

    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_animating(&self) -> bool {
        self.phase != SwapPhase::Idle
    }

    /// Ask for `target` to be shown.  Returns the request's generation.
    pub fn request(&mut self, target: T, now: Instant) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        match self.phase {
            SwapPhase::FadingOut { .. } => {
                self.pending = Some(target);
            }
            SwapPhase::Idle | SwapPhase::FadingIn { .. } => {
                if self.phase == SwapPhase::Idle && target == self.shown {
                    return self.generation;
                }
                self.pending = Some(target);
                self.phase = SwapPhase::FadingOut { since: now };
            }
        }
        self.generation
    }

    /// Advance the phases.  Returns `true` on the tick where content swapped.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            SwapPhase::Idle => false,
            SwapPhase::FadingOut { since } => {
                if now.saturating_duration_since(since) < self.fade {
                    return false;
                }
                if let Some(next) = self.pending.take() {
                    self.shown = next;
                }
                self.phase = SwapPhase::FadingIn { since: now };
                true
            }
            SwapPhase::FadingIn { since } => {
                if now.saturating_duration_since(since) >= self.fade {
                    self.phase = SwapPhase::Idle;
                }
                false
            }
        }
    }

    /// Opacity of the shown content in `0.0..=1.0`.
    pub fn opacity(&self, now: Instant) -> f32 {
        let progress = |since: Instant| {
            if self.fade.is_zero() {
                return 1.0;
            }
            (now.saturating_duration_since(since).as_secs_f32() / self.fade.as_secs_f32())
                .clamp(0.0, 1.0)
        };
        match self.phase {
            SwapPhase::Idle => 1.0,
            SwapPhase::FadingOut { since } => 1.0 - progress(since),
            SwapPhase::FadingIn { since } => progress(since),
        }
    }
}
