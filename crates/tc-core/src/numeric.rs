use crate::TcError;

/// Floating point type used throughout system
pub type Real = f64;

/// Smallest magnitude treated as a usable divisor.
pub const TINY: Real = 1e-12;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TcError::NonFinite { what, value: v })
    }
}

/// Check `min <= v <= max`, rejecting NaN as well.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, TcError> {
    if v >= min && v <= max {
        Ok(v)
    } else {
        Err(TcError::OutOfRange {
            what,
            value: v,
            min,
            max,
        })
    }
}

/// `base^exp` with the base floored at zero, so fractional exponents never see
/// a negative base.
#[inline]
pub fn safe_powf(base: Real, exp: Real) -> Real {
    base.max(0.0).powf(exp)
}

/// Square root with the radicand floored at zero.
#[inline]
pub fn safe_sqrt(v: Real) -> Real {
    v.max(0.0).sqrt()
}

/// `num / den`, or `fallback` when `den` is too small to divide by.
#[inline]
pub fn safe_div(num: Real, den: Real, fallback: Real) -> Real {
    if den.abs() > TINY { num / den } else { fallback }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn safe_powf_is_finite(base in -1.0e6_f64..1.0e6, exp in 0.0_f64..6.0) {
            prop_assert!(safe_powf(base, exp).is_finite());
        }
    }
}
