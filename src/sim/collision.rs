//! Axis-aligned boxes and overlap tests
//!
//! Every entity in both games collides as a rectangle. Touching edges do not
//! count as a hit: all four half-plane comparisons are strict.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rectangle from a centre point (racer entities are centre-anchored)
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal centre
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Check whether two rectangles overlap (shared edges are a miss)
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Index of the first rectangle in `targets` that `probe` overlaps
pub fn first_overlap<'a, I>(probe: &Rect, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    targets.into_iter().position(|r| overlaps(probe, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge exactly
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        // Shares the bottom edge exactly
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 4.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.left(), 40.0);
        assert_eq!(r.top(), 45.0);
        assert_eq!(r.center_x(), 50.0);
    }

    #[test]
    fn test_first_overlap() {
        let probe = Rect::new(0.0, 0.0, 5.0, 5.0);
        let targets = [
            Rect::new(100.0, 100.0, 5.0, 5.0),
            Rect::new(2.0, 2.0, 5.0, 5.0),
            Rect::new(1.0, 1.0, 5.0, 5.0),
        ];
        assert_eq!(first_overlap(&probe, targets.iter()), Some(1));
        assert_eq!(first_overlap(&probe, targets[..1].iter()), None);
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_translated_far_away_never_overlaps(a in arb_rect(), b in arb_rect()) {
            let moved = Rect { pos: b.pos + Vec2::new(2000.0, 0.0), ..b };
            prop_assert!(!overlaps(&a, &moved));
        }
    }
}
