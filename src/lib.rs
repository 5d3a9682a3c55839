//! Carousel / slider state machine.
//!
//! The [`core`] module owns slide-index arithmetic, drag-gesture
//! interpretation and the [`core::controller::SliderController`] that ties
//! them together.  Nothing here depends on a rendering surface: callers feed
//! input events in and apply the resulting [`core::controller::Translation`]
//! to whatever draws the slide row.

pub mod core;
pub mod error;

pub use crate::core::controller::{
    NavSource, RenderTarget, SliderConfig, SliderController, StepSize, Translation,
};
pub use crate::core::geometry::WrapMode;
pub use crate::error::ConfigurationError;
