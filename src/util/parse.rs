use crate::{
    error::{fmt::Error as E, Error},
    util::escape,
};

/// Parses an `i64` number from the beginning to the end of the given slice of
/// ASCII digit characters.
///
/// If any byte in the given slice is not `[0-9]`, then this returns an error.
/// Similarly, if the number parsed does not fit into an `i64`, then this
/// returns an error. Notably, this routine does not permit parsing a negative
/// integer. (We use `i64` because everything in this crate uses signed
/// integers, and because a higher level parser usually needs to apply a sign
/// to the result.)
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn i64(bytes: &[u8]) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(Error::from(E::ExpectedDigits));
    }
    let mut n: i64 = 0;
    for &byte in bytes {
        let digit = match byte.checked_sub(b'0') {
            Some(digit) if digit <= 9 => digit,
            _ => {
                return Err(Error::from(E::InvalidDigit {
                    byte,
                    digits: escape::Bytes(bytes).to_boxed_str(),
                }))
            }
        };
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(digit)))
            .ok_or_else(|| E::NumberTooBig {
                digits: escape::Bytes(bytes).to_boxed_str(),
            })?;
    }
    Ok(n)
}

/// Parses up to nine ASCII digits as the fractional part of a second and
/// returns it scaled to nanoseconds.
///
/// For example, `5` is `500_000_000` and `000000789` is `789`.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn fraction(bytes: &[u8]) -> Result<i32, Error> {
    if bytes.is_empty() {
        return Err(Error::from(E::ExpectedFractionDigits));
    }
    if bytes.len() > 9 {
        return Err(Error::from(E::FractionTooLong));
    }
    let mut nanos = i32::try_from(i64(bytes)?)
        .map_err(|_| Error::from(E::FractionTooLong))?;
    for _ in bytes.len()..9 {
        nanos *= 10;
    }
    Ok(nanos)
}

/// Splits the given input into two slices at the given position.
///
/// If the position is greater than the length of the slice given, then this
/// returns `None`.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn split(input: &[u8], at: usize) -> Option<(&[u8], &[u8])> {
    if at > input.len() {
        None
    } else {
        Some(input.split_at(at))
    }
}

/// Splits off the longest prefix of ASCII digits from the given input.
///
/// The prefix returned may be empty.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) fn digits(input: &[u8]) -> (&[u8], &[u8]) {
    let len = input.iter().take_while(|b| b.is_ascii_digit()).count();
    input.split_at(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_i64() {
        assert_eq!(i64(b"0").unwrap(), 0);
        assert_eq!(i64(b"0009").unwrap(), 9);
        assert_eq!(i64(b"9223372036854775807").unwrap(), i64::MAX);
        assert!(i64(b"9223372036854775808").is_err());
        assert!(i64(b"").is_err());
        assert!(i64(b"-1").is_err());
        insta::assert_snapshot!(
            i64(b"12a").unwrap_err(),
            @r#"invalid digit, expected 0-9 but got "a" in "12a""#,
        );
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(fraction(b"5").unwrap(), 500_000_000);
        assert_eq!(fraction(b"123456").unwrap(), 123_456_000);
        assert_eq!(fraction(b"000000789").unwrap(), 789);
        assert!(fraction(b"").is_err());
        assert!(fraction(b"1234567890").is_err());
    }

    #[test]
    fn slices() {
        let input = b"2024-06-01";
        let (digits, rest) = digits(input);
        assert_eq!(digits, b"2024");
        assert_eq!(rest, b"-06-01");
        assert_eq!(split(input, 11), None);
    }
}
