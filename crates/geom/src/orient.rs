use crate::rational::Rat;
use crate::vector::{Vec2Exact, Vec3Exact};
use num_traits::{Signed, Zero};

/// The sign of an exact geometric predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Negative,
    Zero,
    Positive,
}

impl Orientation {
    pub fn from_sign(value: &Rat) -> Orientation {
        if value.is_zero() {
            Orientation::Zero
        } else if value.is_negative() {
            Orientation::Negative
        } else {
            Orientation::Positive
        }
    }

    pub fn is_zero(self) -> bool {
        self == Orientation::Zero
    }
}

/// The sign of the signed volume of the tetrahedron `(a, b, c, d)`.
///
/// `Positive` means `d` lies on the side of the plane through `a, b, c`
/// that a right-handed normal (`(b-a) x (c-a)`) points towards;
/// `Negative` the opposite side; `Zero` means the four points are
/// coplanar. This is the one predicate the radial sorter, the ambient
/// cell finder and the detriangulator's collinearity check all reduce
/// to.
pub fn orient3d(a: &Vec3Exact, b: &Vec3Exact, c: &Vec3Exact, d: &Vec3Exact) -> Orientation {
    let ab = b - a;
    let ac = c - a;
    let ad = d - a;
    let det = ab.cross(&ac).dot(&ad);
    Orientation::from_sign(&det)
}

/// The sign of the signed area of the triangle `(a, b, c)` in the plane.
///
/// `Positive` means `a, b, c` turn counter-clockwise, `Negative` clockwise,
/// `Zero` means the three points are collinear.
pub fn orient2d(a: &Vec2Exact, b: &Vec2Exact, c: &Vec2Exact) -> Orientation {
    let ab = b - a;
    let ac = c - a;
    let det = &ab.x * &ac.y - &ab.y * &ac.x;
    Orientation::from_sign(&det)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient3d_detects_coplanar_points() {
        let a = Vec3Exact::from_i64(0, 0, 0);
        let b = Vec3Exact::from_i64(1, 0, 0);
        let c = Vec3Exact::from_i64(0, 1, 0);
        let d = Vec3Exact::from_i64(1, 1, 0);
        assert_eq!(orient3d(&a, &b, &c, &d), Orientation::Zero);
    }

    #[test]
    fn orient3d_detects_above_and_below() {
        let a = Vec3Exact::from_i64(0, 0, 0);
        let b = Vec3Exact::from_i64(1, 0, 0);
        let c = Vec3Exact::from_i64(0, 1, 0);
        let above = Vec3Exact::from_i64(0, 0, 1);
        let below = Vec3Exact::from_i64(0, 0, -1);
        assert_eq!(orient3d(&a, &b, &c, &above), Orientation::Positive);
        assert_eq!(orient3d(&a, &b, &c, &below), Orientation::Negative);
    }

    #[test]
    fn orient2d_detects_turns() {
        let a = Vec2Exact::new(crate::rational::rat(0), crate::rational::rat(0));
        let b = Vec2Exact::new(crate::rational::rat(1), crate::rational::rat(0));
        let ccw = Vec2Exact::new(crate::rational::rat(0), crate::rational::rat(1));
        let cw = Vec2Exact::new(crate::rational::rat(0), crate::rational::rat(-1));
        assert_eq!(orient2d(&a, &b, &ccw), Orientation::Positive);
        assert_eq!(orient2d(&a, &b, &cw), Orientation::Negative);
    }
}
