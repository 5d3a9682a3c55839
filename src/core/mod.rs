//! Core algorithms – index geometry, drag interpretation, and the slider
//! controller that composes them.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in as an [`std::time::Instant`] so every transition can be
//! driven deterministically from tests.

pub mod controller;
pub mod debounce;
pub mod geometry;
pub mod gesture;
pub mod transition;
