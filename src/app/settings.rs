//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and the popup renderer consume the same source of truth.

use super::state::{ActiveView, AppState};
use crate::config::StepMode;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle: reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// Next entry of `options` after `current` (first entry if absent).
fn next_of<T: Copy + PartialEq>(options: &[T], current: T) -> T {
    let idx = options.iter().position(|&o| o == current);
    options[idx.map_or(0, |i| (i + 1) % options.len())]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Loop Courses",
        get: |s| s.config.carousel.looping,
        set: |s, v| {
            s.config.carousel.looping = v;
            s.apply_carousel_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Course Step",
        value: |s| match s.config.carousel.step {
            StepMode::Single => "single".into(),
            StepMode::Page => "page".into(),
        },
        cycle: |s| {
            s.config.carousel.step = match s.config.carousel.step {
                StepMode::Single => StepMode::Page,
                StepMode::Page => StepMode::Single,
            };
            s.apply_carousel_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Drag Damping",
        value: |s| format!("{:.2}", s.config.carousel.drag_damping),
        cycle: |s| {
            const FACTORS: &[f32] = &[1.0, 0.75, 0.5];
            s.config.carousel.drag_damping = next_of(FACTORS, s.config.carousel.drag_damping);
            s.apply_carousel_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Swipe Distance",
        value: |s| format!("{} cols", s.config.carousel.swipe_distance),
        cycle: |s| {
            const DISTANCES: &[f32] = &[4.0, 8.0, 12.0, 16.0];
            s.config.carousel.swipe_distance =
                next_of(DISTANCES, s.config.carousel.swipe_distance);
            s.apply_carousel_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Swipe Window",
        value: |s| format!("{}ms", s.config.carousel.swipe_time_ms),
        cycle: |s| {
            const WINDOWS: &[u64] = &[200, 300, 400, 500];
            s.config.carousel.swipe_time_ms = next_of(WINDOWS, s.config.carousel.swipe_time_ms);
            s.apply_carousel_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Quote Cooldown",
        value: |s| match s.config.testimonials.cooldown_ms {
            0 => "off".into(),
            ms => format!("{ms}ms"),
        },
        cycle: |s| {
            const COOLDOWNS: &[u64] = &[0, 150, 300, 500];
            s.config.testimonials.cooldown_ms =
                next_of(COOLDOWNS, s.config.testimonials.cooldown_ms);
            s.apply_testimonial_settings();
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_and_recovers_from_unknown_values() {
        assert_eq!(next_of(&[1, 2, 3], 3), 1);
        assert_eq!(next_of(&[1, 2, 3], 1), 2);
        assert_eq!(next_of(&[1, 2, 3], 9), 1);
    }
}
