//! Index ↔ pixel geometry for a single-row slide track.
//!
//! Pure functions only.  The controller owns the state; this module answers
//! "where does index `i` sit" and "which indices are legal".

use std::ops::Range;

use crate::error::ConfigurationError;

/// Boundary behaviour of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Stops at the first/last valid index.
    #[default]
    Bounded,
    /// Wraps past the end back to the start, masking the jump with clones.
    Looping,
}

/// Horizontal translation of the track when `index` is the left-most slide.
#[inline]
pub fn compute_offset(index: usize, item_width: f32) -> f32 {
    -(index as f32) * item_width
}

/// Largest start index that still fills the viewport.
#[inline]
pub fn max_index(len: usize, items_per_view: usize) -> usize {
    len.saturating_sub(items_per_view)
}

/// Bring a requested index into range.
///
/// Bounded sliders clamp to `0..=len - items_per_view`; looping sliders wrap
/// modulo `len`, so negative requests come back in from the end.  An empty
/// collection always yields 0.
pub fn clamp_index(index: isize, len: usize, items_per_view: usize, wrap: WrapMode) -> usize {
    if len == 0 {
        return 0;
    }
    match wrap {
        WrapMode::Bounded => {
            let max = max_index(len, items_per_view) as isize;
            index.clamp(0, max) as usize
        }
        WrapMode::Looping => index.rem_euclid(len as isize) as usize,
    }
}

// ───────────────────────────────────────── breakpoints ───────

/// One responsive step: containers at least `min_width` wide show
/// `items_per_view` slides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub min_width: f32,
    pub items_per_view: usize,
}

/// Ordered breakpoint table with a fallback for narrow containers.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    /// Sorted widest-first so the first match wins.
    breakpoints: Vec<Breakpoint>,
    fallback: usize,
}

impl BreakpointTable {
    pub fn new(
        fallback: usize,
        mut breakpoints: Vec<Breakpoint>,
    ) -> Result<Self, ConfigurationError> {
        if fallback == 0 {
            return Err(ConfigurationError::ZeroItemsPerView { min_width: 0.0 });
        }
        if let Some(bad) = breakpoints.iter().find(|b| b.items_per_view == 0) {
            return Err(ConfigurationError::ZeroItemsPerView {
                min_width: bad.min_width,
            });
        }
        if let Some(bad) = breakpoints.iter().find(|b| !b.min_width.is_finite()) {
            return Err(ConfigurationError::InvalidThreshold {
                name: "breakpoint width",
                value: bad.min_width,
            });
        }
        breakpoints.sort_by(|a, b| b.min_width.total_cmp(&a.min_width));
        Ok(Self {
            breakpoints,
            fallback,
        })
    }

    /// A table that always shows `items` slides regardless of width.
    pub fn fixed(items: usize) -> Result<Self, ConfigurationError> {
        Self::new(items, Vec::new())
    }

    pub fn items_for(&self, container_width: f32) -> usize {
        self.breakpoints
            .iter()
            .find(|b| container_width >= b.min_width)
            .map_or(self.fallback, |b| b.items_per_view)
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn fallback(&self) -> usize {
        self.fallback
    }
}

impl Default for BreakpointTable {
    /// `≥1024 → 5`, `≥640 → 3`, otherwise 1.
    fn default() -> Self {
        Self {
            breakpoints: vec![
                Breakpoint {
                    min_width: 1024.0,
                    items_per_view: 5,
                },
                Breakpoint {
                    min_width: 640.0,
                    items_per_view: 3,
                },
            ],
            fallback: 1,
        }
    }
}

// ───────────────────────────────────────── viewport ──────────

/// Derived layout of the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub container_width: f32,
    pub items_per_view: usize,
    pub item_width: f32,
}

impl Viewport {
    /// Never show more slots than there are slides; widen each slot instead.
    pub fn capped(self, len: usize) -> Self {
        if len == 0 || self.items_per_view <= len {
            return self;
        }
        Self {
            items_per_view: len,
            item_width: self.container_width / len as f32,
            ..self
        }
    }
}

/// Pick `items_per_view` for `container_width` and derive the slot width.
pub fn recompute_viewport(
    container_width: f32,
    table: &BreakpointTable,
) -> Result<Viewport, ConfigurationError> {
    if !container_width.is_finite() || container_width <= 0.0 {
        return Err(ConfigurationError::InvalidContainerWidth(container_width));
    }
    let items_per_view = table.items_for(container_width);
    Ok(Viewport {
        container_width,
        items_per_view,
        item_width: container_width / items_per_view as f32,
    })
}

// ───────────────────────────────────────── track layout ──────

/// One position in the rendered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Real(usize),
    /// Visual copy of a real slide appended for wraparound.  Carries no state
    /// and must not receive interaction.
    Clone(usize),
}

impl Slot {
    /// The slide this slot displays.
    pub fn slide(self) -> usize {
        match self {
            Slot::Real(i) | Slot::Clone(i) => i,
        }
    }

    pub fn is_clone(self) -> bool {
        matches!(self, Slot::Clone(_))
    }
}

/// Track contents: every real slide, plus (looping only) a suffix of
/// `2 * items_per_view - 1` clones repeating the slides from the start.  A
/// page step that wraps can park anywhere in the first `items_per_view`
/// clone positions and still show a full window.
pub fn track_slots(len: usize, items_per_view: usize, wrap: WrapMode) -> Vec<Slot> {
    let mut slots: Vec<Slot> = (0..len).map(Slot::Real).collect();
    if wrap == WrapMode::Looping && len > 0 {
        let clones = (2 * items_per_view.min(len)).saturating_sub(1);
        slots.extend((0..clones).map(|i| Slot::Clone(i % len)));
    }
    slots
}

/// Highest index a looping track can rest on: the last clone position that
/// still shows a full window.
pub fn max_loop_index(len: usize, items_per_view: usize) -> usize {
    (len + items_per_view.min(len)).saturating_sub(1)
}

/// Slot indices in view when the track starts at `index`.
pub fn visible_range(index: usize, items_per_view: usize, track_len: usize) -> Range<usize> {
    let start = index.min(track_len);
    let end = index.saturating_add(items_per_view).min(track_len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_left_by_whole_slots() {
        assert_eq!(compute_offset(0, 200.0), 0.0);
        assert_eq!(compute_offset(3, 200.0), -600.0);
    }

    #[test]
    fn bounded_clamp_stays_inside_window() {
        assert_eq!(clamp_index(-4, 12, 5, WrapMode::Bounded), 0);
        assert_eq!(clamp_index(10, 12, 5, WrapMode::Bounded), 7);
        assert_eq!(clamp_index(4, 12, 5, WrapMode::Bounded), 4);
        // More slots than slides: only index 0 is legal.
        assert_eq!(clamp_index(2, 3, 5, WrapMode::Bounded), 0);
    }

    #[test]
    fn looping_clamp_wraps_both_ways() {
        assert_eq!(clamp_index(-1, 3, 1, WrapMode::Looping), 2);
        assert_eq!(clamp_index(3, 3, 1, WrapMode::Looping), 0);
        assert_eq!(clamp_index(-7, 3, 1, WrapMode::Looping), 2);
    }

    #[test]
    fn empty_collection_clamps_to_zero() {
        assert_eq!(clamp_index(5, 0, 1, WrapMode::Bounded), 0);
        assert_eq!(clamp_index(-5, 0, 1, WrapMode::Looping), 0);
    }

    #[test]
    fn default_breakpoints_select_by_width() {
        let table = BreakpointTable::default();
        assert_eq!(table.items_for(1440.0), 5);
        assert_eq!(table.items_for(1024.0), 5);
        assert_eq!(table.items_for(800.0), 3);
        assert_eq!(table.items_for(320.0), 1);
    }

    #[test]
    fn breakpoints_are_sorted_on_construction() {
        let table = BreakpointTable::new(
            2,
            vec![
                Breakpoint {
                    min_width: 60.0,
                    items_per_view: 3,
                },
                Breakpoint {
                    min_width: 120.0,
                    items_per_view: 6,
                },
            ],
        )
        .unwrap();
        assert_eq!(table.items_for(130.0), 6);
        assert_eq!(table.items_for(70.0), 3);
        assert_eq!(table.items_for(10.0), 2);
    }

    #[test]
    fn zero_item_breakpoint_is_rejected() {
        let err = BreakpointTable::new(
            1,
            vec![Breakpoint {
                min_width: 500.0,
                items_per_view: 0,
            }],
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroItemsPerView { min_width: 500.0 });
        assert!(BreakpointTable::fixed(0).is_err());
    }

    #[test]
    fn viewport_recompute_is_deterministic() {
        let table = BreakpointTable::default();
        let a = recompute_viewport(1024.0, &table).unwrap();
        let b = recompute_viewport(1024.0, &table).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.items_per_view, 5);
        assert!((a.item_width - 204.8).abs() < 1e-4);
    }

    #[test]
    fn non_positive_width_fails_fast() {
        let table = BreakpointTable::default();
        assert!(matches!(
            recompute_viewport(0.0, &table),
            Err(ConfigurationError::InvalidContainerWidth(_))
        ));
        assert!(recompute_viewport(-20.0, &table).is_err());
        assert!(recompute_viewport(f32::NAN, &table).is_err());
    }

    #[test]
    fn capped_viewport_widens_slots() {
        let table = BreakpointTable::default();
        let vp = recompute_viewport(1200.0, &table).unwrap().capped(2);
        assert_eq!(vp.items_per_view, 2);
        assert_eq!(vp.item_width, 600.0);
    }

    #[test]
    fn looping_track_appends_clone_prefix() {
        let slots = track_slots(4, 2, WrapMode::Looping);
        assert_eq!(
            slots,
            vec![
                Slot::Real(0),
                Slot::Real(1),
                Slot::Real(2),
                Slot::Real(3),
                Slot::Clone(0),
                Slot::Clone(1),
                Slot::Clone(2),
            ]
        );
        assert_eq!(track_slots(4, 2, WrapMode::Bounded).len(), 4);
        assert_eq!(max_loop_index(4, 2), 5);
    }

    #[test]
    fn wide_window_clones_repeat_the_deck() {
        let slots = track_slots(3, 3, WrapMode::Looping);
        let clones: Vec<usize> = slots[3..].iter().map(|s| s.slide()).collect();
        assert_eq!(clones, vec![0, 1, 2, 0, 1]);
        // Resting on the last legal index still fills the window.
        let last = max_loop_index(3, 3);
        assert_eq!(visible_range(last, 3, slots.len()).len(), 3);
    }

    #[test]
    fn clone_window_mirrors_the_first_window() {
        let slots = track_slots(5, 2, WrapMode::Looping);
        let head: Vec<usize> = slots[visible_range(0, 2, slots.len())]
            .iter()
            .map(|s| s.slide())
            .collect();
        let tail: Vec<usize> = slots[visible_range(5, 2, slots.len())]
            .iter()
            .map(|s| s.slide())
            .collect();
        assert_eq!(head, tail);
    }
}
