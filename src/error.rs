//! Error types for slider construction and reconfiguration.

/// Invalid slider geometry or tuning.
///
/// Returned eagerly so a bad setup never turns into `NaN` offsets or a
/// divide-by-zero further down.  When a call fails the controller keeps its
/// previous state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("slide collection is empty")]
    NoSlides,

    #[error("breakpoint at {min_width}px shows zero items per view")]
    ZeroItemsPerView { min_width: f32 },

    #[error("container width must be a positive number, got {0}")]
    InvalidContainerWidth(f32),

    #[error("drag damping must be a positive finite factor, got {0}")]
    InvalidDamping(f32),

    #[error("{name} must be a positive finite value, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
}
