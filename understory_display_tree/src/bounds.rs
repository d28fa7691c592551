// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Origin/size bounding rectangles used for autosizing and default hit tests.

use core::fmt;

use kurbo::Rect;

/// An axis-aligned rectangle stored as origin plus size.
///
/// Unlike [`Rect`], the size is not normalized: a negative `width` or `height`
/// is a valid, degenerate rectangle and is carried through every operation
/// unchanged. All boundary comparisons are inclusive, so rectangles that only
/// share an edge intersect, and a point on the edge is contained.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent; may be zero or negative.
    pub width: f64,
    /// Vertical extent; may be zero or negative.
    pub height: f64,
}

impl Bounds {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a rectangle from its origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The `x` coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The `y` coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if the two closed rectangles overlap.
    ///
    /// ```
    /// use understory_display_tree::Bounds;
    ///
    /// let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    /// // Touching edges count.
    /// assert!(a.intersects(&Bounds::new(10.0, 0.0, 5.0, 5.0)));
    /// assert!(!a.intersects(&Bounds::new(10.5, 0.0, 5.0, 5.0)));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// The overlapping region of the two rectangles, or `None` if they do not
    /// overlap.
    ///
    /// Uses the same inclusive test as [`Bounds::intersects`], so rectangles
    /// that only share an edge yield a zero-width (or zero-height) result.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x0 = self.x.max(other.x);
        let x1 = self.right().min(other.right());
        if x0 > x1 {
            return None;
        }
        let y0 = self.y.max(other.y);
        let y1 = self.bottom().min(other.bottom());
        if y0 > y1 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// The smallest rectangle containing both `self` and `other`.
    ///
    /// Both inputs are left untouched; see [`Bounds::form_union_with`] for the
    /// in-place form.
    #[must_use]
    pub fn unioned(&self, other: &Self) -> Self {
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(x, y, right - x, bottom - y)
    }

    /// Grow `self` in place to the smallest rectangle containing both
    /// rectangles.
    pub fn form_union_with(&mut self, other: &Self) {
        *self = self.unioned(other);
    }

    /// Returns `true` if the point lies inside or on the edge of the rectangle.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.x <= x && x <= self.right() && self.y <= y && y <= self.bottom()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x={}, y={}, width={}, height={})",
            self.x, self.y, self.width, self.height
        )
    }
}

impl From<Rect> for Bounds {
    fn from(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.x1 - r.x0, r.y1 - r.y0)
    }
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        Self::new(b.x, b.y, b.right(), b.bottom())
    }
}
