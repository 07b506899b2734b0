//! Layout primitives shared by the model and the engine
//!
//! All sizes are in host units (logical pixels for most hosts). Split sizes are
//! rounded to whole units so that a chain of splits tiles its container exactly.

use serde::{Deserialize, Serialize};

// ============================================================================
// Points and Rectangles
// ============================================================================

/// A point in host coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink by `inset` on every side, never below zero size
    pub fn inset(&self, inset: f32) -> Rect {
        if inset <= 0.0 {
            return *self;
        }
        let dx = inset.min(self.width / 2.0);
        let dy = inset.min(self.height / 2.0);
        Rect::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }

    /// Whether the two rectangles share any interior area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Extent of the rectangle along an axis
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Axis along which a split divides space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Width is divided
    Horizontal,
    /// Height is divided
    Vertical,
}

// ============================================================================
// Alignment
// ============================================================================

/// Side of the previous pane that a nested pane is carved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Right,
        Alignment::Top,
        Alignment::Bottom,
    ];

    /// Axis divided when splitting along this alignment
    pub fn axis(&self) -> Axis {
        match self {
            Alignment::Left | Alignment::Right => Axis::Horizontal,
            Alignment::Top | Alignment::Bottom => Axis::Vertical,
        }
    }

    pub fn opposite(&self) -> Alignment {
        match self {
            Alignment::Left => Alignment::Right,
            Alignment::Right => Alignment::Left,
            Alignment::Top => Alignment::Bottom,
            Alignment::Bottom => Alignment::Top,
        }
    }
}

// ============================================================================
// Proportions
// ============================================================================

/// Resolve a dual-meaning proportion against an extent.
///
/// Values below 1 are fractions of `extent`; values of 1 or more are absolute
/// sizes in the same units.
pub fn resolve_portion(proportion: f32, extent: f32) -> f32 {
    if proportion < 1.0 {
        extent * proportion.max(0.0)
    } else {
        proportion
    }
}

/// Clamp a requested size so both sides of the split keep `min_size`.
///
/// When the extent cannot hold two minimum-sized sides it is halved.
pub fn clamp_split(requested: f32, extent: f32, min_size: f32) -> f32 {
    if extent < 2.0 * min_size {
        return (extent / 2.0).floor();
    }
    requested.round().clamp(min_size, extent - min_size)
}

/// Proportion that describes the other side of a split.
///
/// Used when a pane is docked against a container edge and the old root has to
/// be re-linked to the new root.
pub fn complement_proportion(proportion: f32, extent: f32) -> f32 {
    if proportion < 1.0 {
        1.0 - proportion.max(0.0)
    } else if extent > proportion {
        (extent - proportion) / extent
    } else {
        0.5
    }
}

/// Split `rect` along `alignment`.
///
/// Returns `(carved, remainder)`: `carved` is taken from the `alignment` side
/// and sized by `proportion`, `remainder` is what the previous pane keeps.
pub fn split_rect(rect: Rect, alignment: Alignment, proportion: f32, min_size: f32) -> (Rect, Rect) {
    let extent = rect.extent(alignment.axis());
    let size = clamp_split(resolve_portion(proportion, extent), extent, min_size);
    let rest = extent - size;

    match alignment {
        Alignment::Left => (
            Rect::new(rect.x, rect.y, size, rect.height),
            Rect::new(rect.x + size, rect.y, rest, rect.height),
        ),
        Alignment::Right => (
            Rect::new(rect.x + rest, rect.y, size, rect.height),
            Rect::new(rect.x, rect.y, rest, rect.height),
        ),
        Alignment::Top => (
            Rect::new(rect.x, rect.y, rect.width, size),
            Rect::new(rect.x, rect.y + size, rect.width, rest),
        ),
        Alignment::Bottom => (
            Rect::new(rect.x, rect.y + rest, rect.width, size),
            Rect::new(rect.x, rect.y, rect.width, rest),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_portion_fraction_and_absolute() {
        assert_eq!(resolve_portion(0.25, 800.0), 200.0);
        assert_eq!(resolve_portion(150.0, 800.0), 150.0);
        assert_eq!(resolve_portion(1.0, 800.0), 1.0);
    }

    #[test]
    fn test_split_right() {
        let (carved, rest) = split_rect(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Alignment::Right,
            0.3,
            24.0,
        );
        assert_eq!(carved, Rect::new(560.0, 0.0, 240.0, 600.0));
        assert_eq!(rest, Rect::new(0.0, 0.0, 560.0, 600.0));
    }

    #[test]
    fn test_split_top_absolute() {
        let (carved, rest) = split_rect(
            Rect::new(10.0, 20.0, 300.0, 400.0),
            Alignment::Top,
            100.0,
            24.0,
        );
        assert_eq!(carved, Rect::new(10.0, 20.0, 300.0, 100.0));
        assert_eq!(rest, Rect::new(10.0, 120.0, 300.0, 300.0));
    }

    #[test]
    fn test_split_clamps_to_min_size() {
        let rect = Rect::new(0.0, 0.0, 400.0, 400.0);

        let (carved, rest) = split_rect(rect, Alignment::Left, 0.01, 50.0);
        assert_eq!(carved.width, 50.0);
        assert_eq!(rest.width, 350.0);

        let (carved, rest) = split_rect(rect, Alignment::Bottom, 5000.0, 50.0);
        assert_eq!(carved.height, 350.0);
        assert_eq!(rest.height, 50.0);
    }

    #[test]
    fn test_split_too_small_halves() {
        let (carved, rest) = split_rect(
            Rect::new(0.0, 0.0, 30.0, 30.0),
            Alignment::Left,
            0.9,
            24.0,
        );
        assert_eq!(carved.width, 15.0);
        assert_eq!(rest.width, 15.0);
    }

    #[test]
    fn test_complement_proportion() {
        assert_eq!(complement_proportion(0.25, 800.0), 0.75);
        assert_eq!(complement_proportion(200.0, 800.0), 0.75);
        assert_eq!(complement_proportion(900.0, 800.0), 0.5);
    }

    #[test]
    fn test_inset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0).inset(2.0);
        assert_eq!(rect, Rect::new(2.0, 2.0, 96.0, 46.0));
    }
}
