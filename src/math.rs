/*!
Exact integer arithmetic over the "safe integer" domain.

Every quantity in this crate (epoch seconds, epoch days, nanosecond totals,
duration seconds and so on) is computed with the routines in this module.
They share one contract: the result is either mathematically exact and
inside `SAFE_MIN..=SAFE_MAX`, or an error for which
[`Error::is_overflow`](crate::Error::is_overflow) returns `true`. Inputs that
are themselves outside of the domain are rejected in the same way.

The domain is `-(2^53 - 1)..=(2^53 - 1)`. It is much smaller than the range
of an `i64`, but large enough for every value this crate represents, and it
keeps results identical to implementations that compute with double
precision floating point numbers.

# Example

```
use hora::math;

assert_eq!(math::floor_div(-7, 2)?, -4);
assert_eq!(math::floor_mod(-7, 2)?, 1);
assert_eq!(math::int_div(-7, 2)?, -3);

assert!(math::add_exact(math::SAFE_MAX, 1).unwrap_err().is_overflow());

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::error::{math::Error as E, Error};

/// The largest integer in the safe domain, `2^53 - 1`.
pub const SAFE_MAX: i64 = 9_007_199_254_740_991;

/// The smallest integer in the safe domain, `-(2^53 - 1)`.
pub const SAFE_MIN: i64 = -SAFE_MAX;

/// Returns `a + b`, or an overflow error if the sum or either input is
/// outside of the safe domain.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::add_exact(5, -7)?, -2);
/// assert!(math::add_exact(math::SAFE_MAX, 1).is_err());
/// assert!(math::add_exact(math::SAFE_MIN, -1).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn add_exact(a: i64, b: i64) -> Result<i64, Error> {
    exact("addition", a, b, i128::from(a) + i128::from(b))
}

/// Returns `a - b`, or an overflow error if the difference or either input
/// is outside of the safe domain.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::subtract_exact(5, 7)?, -2);
/// assert!(math::subtract_exact(math::SAFE_MIN, 1).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn subtract_exact(a: i64, b: i64) -> Result<i64, Error> {
    exact("subtraction", a, b, i128::from(a) - i128::from(b))
}

/// Returns `a * b`, or an overflow error if the product or either input is
/// outside of the safe domain.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::multiply_exact(-3, 7)?, -21);
/// assert!(math::multiply_exact(math::SAFE_MAX, 2).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn multiply_exact(a: i64, b: i64) -> Result<i64, Error> {
    exact("multiplication", a, b, i128::from(a) * i128::from(b))
}

/// Returns `-n`, or an overflow error if `n` is outside of the safe domain.
///
/// Since the domain is symmetric, negating a safe integer always succeeds.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn negate_exact(n: i64) -> Result<i64, Error> {
    safe_int(n).map(|n| -n)
}

/// Returns `a / b` truncated toward zero.
///
/// # Errors
///
/// This returns an error when `b` is zero, or when either input is outside
/// of the safe domain.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::int_div(7, 2)?, 3);
/// assert_eq!(math::int_div(-7, 2)?, -3);
/// assert!(math::int_div(1, 0).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn int_div(a: i64, b: i64) -> Result<i64, Error> {
    let (a, b) = divisible("truncating division", a, b)?;
    Ok(a / b)
}

/// Returns the largest integer less than or equal to `a / b`.
///
/// # Errors
///
/// This returns an error when `b` is zero, or when either input is outside
/// of the safe domain.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::floor_div(7, 2)?, 3);
/// assert_eq!(math::floor_div(-7, 2)?, -4);
/// assert_eq!(math::floor_div(7, -2)?, -4);
/// assert_eq!(math::floor_div(-7, -2)?, 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn floor_div(a: i64, b: i64) -> Result<i64, Error> {
    let (a, b) = divisible("floor division", a, b)?;
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Returns `a - floor_div(a, b) * b`.
///
/// The result always has the sign of `b` (or is zero), so it is
/// non-negative whenever `b` is positive.
///
/// # Errors
///
/// This returns an error when `b` is zero, or when either input is outside
/// of the safe domain.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::floor_mod(7, 2)?, 1);
/// assert_eq!(math::floor_mod(-7, 2)?, 1);
/// assert_eq!(math::floor_mod(7, -2)?, -1);
/// assert_eq!(math::floor_mod(-7, -2)?, -1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn floor_mod(a: i64, b: i64) -> Result<i64, Error> {
    let (a, b) = divisible("floor modulus", a, b)?;
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

/// Returns `n` unchanged if it is inside of the safe domain, and an overflow
/// error otherwise.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::safe_int(math::SAFE_MAX)?, math::SAFE_MAX);
/// assert!(math::safe_int(math::SAFE_MAX + 1).unwrap_err().is_overflow());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn safe_int(n: i64) -> Result<i64, Error> {
    if !is_safe(n) {
        return Err(Error::from(E::Overflow {
            op: "safe integer check",
            value: i128::from(n),
        }));
    }
    Ok(n)
}

/// Narrows `n` to an `i32`, returning an overflow error if it does not fit.
///
/// # Example
///
/// ```
/// use hora::math;
///
/// assert_eq!(math::to_i32_exact(-5)?, -5);
/// assert!(math::to_i32_exact(1 << 31).unwrap_err().is_overflow());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg_attr(feature = "perf-inline", inline(always))]
pub fn to_i32_exact(n: i64) -> Result<i32, Error> {
    i32::try_from(n).map_err(|_| Error::from(E::OverflowI32 { value: n }))
}

/// Returns true if and only if `n` is inside of the safe domain.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn is_safe(n: i64) -> bool {
    SAFE_MIN <= n && n <= SAFE_MAX
}

/// Converts the exact result of a binary operation into an `i64`, checking
/// that both operands and the result are in the safe domain.
#[cfg_attr(feature = "perf-inline", inline(always))]
fn exact(op: &'static str, a: i64, b: i64, result: i128) -> Result<i64, Error> {
    let safe = i128::from(SAFE_MIN)..=i128::from(SAFE_MAX);
    if !is_safe(a) || !is_safe(b) || !safe.contains(&result) {
        return Err(Error::from(E::Overflow { op, value: result }));
    }
    // OK because `result` is within the safe domain, which fits in an `i64`.
    Ok(result as i64)
}

/// Checks the operands of a division, returning them unchanged if they are
/// both safe and the divisor is non-zero.
#[cfg_attr(feature = "perf-inline", inline(always))]
fn divisible(op: &'static str, a: i64, b: i64) -> Result<(i64, i64), Error> {
    if b == 0 {
        return Err(Error::from(E::DivideByZero { op, dividend: a }));
    }
    let a = safe_int(a)?;
    let b = safe_int(b)?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_boundaries() {
        assert_eq!(add_exact(SAFE_MAX - 1, 1).unwrap(), SAFE_MAX);
        assert_eq!(subtract_exact(SAFE_MIN + 1, 1).unwrap(), SAFE_MIN);
        assert!(add_exact(SAFE_MAX, 1).unwrap_err().is_overflow());
        assert!(subtract_exact(SAFE_MIN, 1).unwrap_err().is_overflow());
        assert!(multiply_exact(1 << 27, 1 << 27).unwrap_err().is_overflow());
        assert_eq!(multiply_exact(1 << 26, 1 << 26).unwrap(), 1 << 52);
        // Inputs outside of the domain overflow even when the result would
        // be representable.
        assert!(add_exact(i64::MAX, i64::MIN + 1).unwrap_err().is_overflow());
        assert!(negate_exact(i64::MIN).unwrap_err().is_overflow());
        assert_eq!(negate_exact(SAFE_MIN).unwrap(), SAFE_MAX);
    }

    #[test]
    fn division() {
        assert_eq!(int_div(SAFE_MIN, -1).unwrap(), SAFE_MAX);
        assert_eq!(floor_div(-1, 86_400).unwrap(), -1);
        assert_eq!(floor_mod(-1, 86_400).unwrap(), 86_399);
        assert_eq!(floor_div(0, -5).unwrap(), 0);
        assert_eq!(floor_mod(0, -5).unwrap(), 0);

        let err = floor_div(5, 0).unwrap_err();
        assert!(!err.is_overflow());
        insta::assert_snapshot!(
            err,
            @"attempted floor division of 5 by zero",
        );
        insta::assert_snapshot!(
            int_div(i64::MAX, 2).unwrap_err(),
            @"safe integer check produced 9223372036854775807, which is outside the safe integer range of -9007199254740991..=9007199254740991",
        );
    }

    #[test]
    fn overflow_message() {
        insta::assert_snapshot!(
            add_exact(SAFE_MAX, 2).unwrap_err(),
            @"addition produced 9007199254740993, which is outside the safe integer range of -9007199254740991..=9007199254740991",
        );
        insta::assert_snapshot!(
            to_i32_exact(-(1 << 40)).unwrap_err(),
            @"value -1099511627776 does not fit in a 32-bit signed integer",
        );
    }

    fn safe(n: i64) -> i64 {
        n % SAFE_MAX
    }

    quickcheck::quickcheck! {
        fn prop_floor_div_mod_identity(a: i64, b: i64) -> quickcheck::TestResult {
            let (a, b) = (safe(a), safe(b));
            if b == 0 {
                return quickcheck::TestResult::discard();
            }
            let q = floor_div(a, b).unwrap();
            let r = floor_mod(a, b).unwrap();
            let ok = i128::from(q) * i128::from(b) + i128::from(r)
                == i128::from(a)
                && (r == 0 || (r < 0) == (b < 0))
                && r.unsigned_abs() < b.unsigned_abs();
            quickcheck::TestResult::from_bool(ok)
        }

        fn prop_int_div_truncates(a: i64, b: i64) -> quickcheck::TestResult {
            let (a, b) = (safe(a), safe(b));
            if b == 0 {
                return quickcheck::TestResult::discard();
            }
            let q = int_div(a, b).unwrap();
            quickcheck::TestResult::from_bool(q == a / b)
        }

        fn prop_add_matches_wide(a: i64, b: i64) -> bool {
            let (a, b) = (safe(a), safe(b));
            let wide = i128::from(a) + i128::from(b);
            match add_exact(a, b) {
                Ok(sum) => i128::from(sum) == wide,
                Err(err) => err.is_overflow() && wide.unsigned_abs() > SAFE_MAX as u128,
            }
        }
    }
}
