//! Axis-aligned rectangle overlap
//!
//! Projectiles register a hit when their edges merely touch a sprite, while
//! two sprites only collide once they actually interpenetrate.

use glam::Vec2;

/// Axis-aligned rectangle (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
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

    /// Inclusive overlap: shared edges count as contact.
    /// Used for projectile hits.
    pub fn touches(&self, other: &Rect) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }

    /// Strict overlap: the interiors must intersect.
    /// Used for sprite-on-sprite contact.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_identical_rects_overlap() {
        let a = rect(10.0, 20.0, 80.0, 80.0);
        assert!(a.touches(&a));
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_shared_edge_touches_but_does_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert!(a.touches(&b));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_gap_on_either_axis_misses() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let right = rect(10.5, 0.0, 10.0, 10.0);
        let below = rect(0.0, 10.5, 10.0, 10.0);
        assert!(!a.touches(&right));
        assert!(!a.touches(&below));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_projectile_inside_sprite() {
        let sprite = rect(700.0, 500.0, 80.0, 80.0);
        let shot = rect(720.0, 535.0, 10.0, 5.0);
        assert!(shot.touches(&sprite));
        assert!(sprite.touches(&shot));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_rect() -> impl Strategy<Value = Rect> {
            (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0)
                .prop_map(|(x, y, w, h)| rect(x, y, w, h))
        }

        proptest! {
            #[test]
            fn overlap_is_symmetric(a in any_rect(), b in any_rect()) {
                prop_assert_eq!(a.touches(&b), b.touches(&a));
                prop_assert_eq!(a.intersects(&b), b.intersects(&a));
            }

            #[test]
            fn identical_rects_always_overlap(a in any_rect()) {
                prop_assert!(a.touches(&a));
                prop_assert!(a.intersects(&a));
            }

            #[test]
            fn positive_gap_never_overlaps(
                a in any_rect(),
                gap in 0.01f32..100.0,
                vertical in any::<bool>(),
                h in 1.0f32..200.0,
            ) {
                let b = if vertical {
                    rect(a.left(), a.bottom() + gap, a.size.x, h)
                } else {
                    rect(a.right() + gap, a.top(), h, a.size.y)
                };
                prop_assert!(!a.touches(&b));
                prop_assert!(!a.intersects(&b));
            }

            #[test]
            fn intersecting_implies_touching(a in any_rect(), b in any_rect()) {
                if a.intersects(&b) {
                    prop_assert!(a.touches(&b));
                }
            }
        }
    }
}
