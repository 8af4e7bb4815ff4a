use crate::rational::{rat, Rat};
use num_traits::Signed;
use std::ops::{Add, Sub};

/// An exact 3-vector (or point), used for `co_exact` and for every
/// geometric predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vec3Exact {
    pub x: Rat,
    pub y: Rat,
    pub z: Rat,
}

impl Vec3Exact {
    #[inline]
    pub fn new(x: Rat, y: Rat, z: Rat) -> Self {
        Vec3Exact { x, y, z }
    }

    #[inline]
    pub fn from_i64(x: i64, y: i64, z: i64) -> Self {
        Vec3Exact::new(rat(x), rat(y), rat(z))
    }

    pub fn zero() -> Self {
        Vec3Exact::new(Rat::from_integer(0.into()), Rat::from_integer(0.into()), Rat::from_integer(0.into()))
    }

    #[inline]
    pub fn dot(&self, other: &Vec3Exact) -> Rat {
        &self.x * &other.x + &self.y * &other.y + &self.z * &other.z
    }

    #[inline]
    pub fn cross(&self, other: &Vec3Exact) -> Vec3Exact {
        Vec3Exact::new(
            &self.y * &other.z - &self.z * &other.y,
            &self.z * &other.x - &self.x * &other.z,
            &self.x * &other.y - &self.y * &other.x,
        )
    }

    /// Component with the largest absolute value, and which axis it is on.
    ///
    /// Used by the ambient-cell finder (to project onto xy) and by the
    /// polygon triangulator (to pick the projection plane for a face).
    pub fn dominant_axis(&self) -> Axis {
        let ax = self.x.clone().abs();
        let ay = self.y.clone().abs();
        let az = self.z.clone().abs();
        if ax >= ay && ax >= az {
            Axis::X
        } else if ay >= az {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// A lossy `f64` copy, for the approximate `co` coordinate used by
    /// length-based heuristics (squared-edge-length sort in the
    /// detriangulator, convex-hull edge selection tie-breaks).
    pub fn to_f64(&self) -> Vec3F {
        Vec3F {
            x: rat_to_f64(&self.x),
            y: rat_to_f64(&self.y),
            z: rat_to_f64(&self.z),
        }
    }
}

fn rat_to_f64(r: &Rat) -> f64 {
    // `Ratio` doesn't implement `ToPrimitive` precision-losslessly for
    // `BigInt`, but a plain numer/denom division is exactly what an
    // approximate float coordinate needs.
    use num_traits::ToPrimitive;
    r.numer().to_f64().unwrap_or(f64::NAN) / r.denom().to_f64().unwrap_or(1.0)
}

impl Add for &Vec3Exact {
    type Output = Vec3Exact;
    fn add(self, rhs: &Vec3Exact) -> Vec3Exact {
        Vec3Exact::new(&self.x + &rhs.x, &self.y + &rhs.y, &self.z + &rhs.z)
    }
}

impl Sub for &Vec3Exact {
    type Output = Vec3Exact;
    fn sub(self, rhs: &Vec3Exact) -> Vec3Exact {
        Vec3Exact::new(&self.x - &rhs.x, &self.y - &rhs.y, &self.z - &rhs.z)
    }
}

/// An approximate, floating-point 3-vector. Used only for length-based
/// metrics (`co` in the spec) — never for a geometric predicate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec3F {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3F {
    pub fn zero() -> Self {
        Vec3F { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn sub(&self, other: &Vec3F) -> Vec3F {
        Vec3F { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}

/// An exact 2D vector (or point), used by the polygon triangulator once a
/// face has been projected onto its dominant-axis plane.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vec2Exact {
    pub x: Rat,
    pub y: Rat,
}

impl Vec2Exact {
    #[inline]
    pub fn new(x: Rat, y: Rat) -> Self {
        Vec2Exact { x, y }
    }
}

impl Sub for &Vec2Exact {
    type Output = Vec2Exact;
    fn sub(self, rhs: &Vec2Exact) -> Vec2Exact {
        Vec2Exact::new(&self.x - &rhs.x, &self.y - &rhs.y)
    }
}

/// Which coordinate axis a projection or sweep is dominated by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::rat;

    #[test]
    fn cross_product_is_perpendicular() {
        let a = Vec3Exact::from_i64(1, 0, 0);
        let b = Vec3Exact::from_i64(0, 1, 0);
        let c = a.cross(&b);
        assert_eq!(c, Vec3Exact::from_i64(0, 0, 1));
        assert_eq!(c.dot(&a), rat(0));
        assert_eq!(c.dot(&b), rat(0));
    }

    #[test]
    fn dominant_axis_picks_largest_magnitude() {
        assert_eq!(Vec3Exact::from_i64(5, -1, 2).dominant_axis(), Axis::X);
        assert_eq!(Vec3Exact::from_i64(1, -5, 2).dominant_axis(), Axis::Y);
        assert_eq!(Vec3Exact::from_i64(1, 2, -5).dominant_axis(), Axis::Z);
    }
}
