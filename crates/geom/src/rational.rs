use num_bigint::BigInt;

/// An exact, arbitrary-precision rational scalar.
///
/// All coordinates that feed geometric predicates in meshbool are
/// [`Rat`] values, not floats: every `orient2d`/`orient3d` call is then
/// the sign of an exactly-computed determinant, with no epsilon and no
/// platform-dependent rounding.
pub type Rat = num_rational::BigRational;

/// Shorthand for an integer-valued [`Rat`].
#[inline]
pub fn rat(n: i64) -> Rat {
    Rat::from_integer(BigInt::from(n))
}

/// Shorthand for the rational `n / d`.
///
/// # Panics
///
/// Panics if `d` is zero, same as [`Rat::new`].
#[inline]
pub fn ratio(n: i64, d: i64) -> Rat {
    Rat::new(BigInt::from(n), BigInt::from(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_round_trip() {
        assert_eq!(rat(3) + rat(4), rat(7));
        assert_eq!(rat(-2) * rat(5), rat(-10));
    }

    #[test]
    fn ratios_reduce() {
        use num_traits::Zero;
        assert_eq!(ratio(2, 4), ratio(1, 2));
        assert!(!ratio(1, 2).is_zero());
        assert!((ratio(1, 2) - ratio(1, 2)).is_zero());
    }
}
