//! Minimal 2-D vector geometry for per-point physical quantities.
//!
//! Force and velocity fields are 2-component floating-point vectors. `Vec2` is
//! `repr(C)` and `Pod` so a field slab can be viewed as a flat scalar buffer
//! (two independent lanes per point) by the atomic shared store.

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2-component double-precision vector.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, serde::Serialize, serde::Deserialize,
)]
pub struct Vec2 {
    /// x component.
    pub x: f64,
    /// y component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Construct a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Inner product with `other`.
    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Remove the component of `v` parallel to `d`.
///
/// Returns `v - d * (v·d)/(d·d)`. The result is orthogonal to `d`, and the
/// projection is idempotent: re-projecting an already-projected vector is a
/// no-op. `d` must be nonzero; boundary construction rejects degenerate
/// directions before this is ever evaluated.
#[inline]
pub fn project(v: Vec2, d: Vec2) -> Vec2 {
    let scale = v.dot(d) / d.dot(d);
    v - d * scale
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_removes_parallel_component() {
        let d = Vec2::new(1.0, 0.0);
        let v = Vec2::new(2.0, 3.0);
        assert_eq!(project(v, d), Vec2::new(0.0, 3.0));
    }

    #[test]
    fn projection_is_idempotent() {
        let d = Vec2::new(3.0, -1.5);
        let v = Vec2::new(-0.25, 7.0);
        let once = project(v, d);
        let twice = project(once, d);
        assert!((once.x - twice.x).abs() < 1e-12);
        assert!((once.y - twice.y).abs() < 1e-12);
    }

    #[test]
    fn projection_result_is_orthogonal() {
        let d = Vec2::new(0.6, 0.8);
        let v = Vec2::new(5.0, -2.0);
        assert!(project(v, d).dot(d).abs() < 1e-12);
    }

    #[test]
    fn projection_along_unnormalized_direction() {
        // Same subspace as (1,0), different magnitude; result must agree.
        let v = Vec2::new(2.0, 3.0);
        let a = project(v, Vec2::new(1.0, 0.0));
        let b = project(v, Vec2::new(-4.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let v = Vec2::new(1.25, -9.5);
        let s = serde_json::to_string(&v).unwrap();
        let back: Vec2 = serde_json::from_str(&s).unwrap();
        assert_eq!(v, back);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn finite() -> impl Strategy<Value = f64> {
            -1.0e6..1.0e6
        }

        proptest! {
            #[test]
            fn idempotent_and_orthogonal(
                vx in finite(), vy in finite(),
                dx in finite(), dy in finite(),
            ) {
                let d = Vec2::new(dx, dy);
                prop_assume!(d.length_squared() > 1e-12);
                let v = Vec2::new(vx, vy);
                let once = project(v, d);
                let twice = project(once, d);
                let scale = v.length_squared().max(1.0);
                prop_assert!((once - twice).length_squared() <= 1e-18 * scale);
                prop_assert!(once.dot(d).powi(2) <= 1e-18 * scale * d.length_squared());
            }
        }
    }
}
