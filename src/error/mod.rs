use alloc::{boxed::Box, sync::Arc};

pub(crate) mod civil;
pub(crate) mod clock;
pub(crate) mod duration;
pub(crate) mod fmt;
pub(crate) mod math;
pub(crate) mod period;
pub(crate) mod tz;

/// An error that can occur in this crate.
///
/// Errors fall into a few broad categories, each of which can be queried
/// with a predicate:
///
/// * [`Error::is_overflow`] reports that an arithmetic step left the
/// "safe integer" domain described in [`crate::math`].
/// * [`Error::is_validation`] reports that a structural invariant failed
/// while constructing a value. For example, a month outside of `1..=12`, an
/// epoch second outside of the supported range or an unknown time zone
/// identifier.
/// * [`Error::is_parse`] reports that some text did not match the ISO 8601
/// grammar required by the type being parsed, or that it matched but did not
/// denote a value. Parse errors include the offending text in their message.
/// * [`Error::is_date_range`] reports that civil arithmetic produced a date
/// outside of the supported range of years.
///
/// These predicates are not exhaustive. There are errors (for example,
/// division by zero) that return `false` for all of them.
///
/// Errors are never recovered from or retried internally. A factory either
/// returns a fully valid value or an error.
///
/// # Design
///
/// Like the rest of the crate, only one error type exists for every
/// operation. Internally, an error is a chain of structured error kinds where
/// the last element is the root cause. The predicates above inspect the root
/// cause, except for `is_parse`, which is true whenever any error in the
/// chain came from a parser. This means that, e.g., parsing `2023-02-29` is
/// both a parse error and a validation error.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cloneable and cheap to clone.
    /// It also makes the size of an error equal to one word, which matters
    /// since nearly every routine in this crate returns a
    /// `Result<T, Error>`.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated from an arithmetic operation
    /// leaving the safe integer domain.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{math, Duration};
    ///
    /// assert!(math::add_exact(math::SAFE_MAX, 1).unwrap_err().is_overflow());
    /// assert!(Duration::of_days(i64::MAX).unwrap_err().is_overflow());
    /// ```
    pub fn is_overflow(&self) -> bool {
        use self::ErrorKind::*;

        matches!(
            *self.root().kind(),
            Math(self::math::Error::Overflow { .. })
                | Math(self::math::Error::OverflowI32 { .. })
        )
    }

    /// Returns true when this error originated from a structural invariant
    /// failing during the construction of a value.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::{civil::LocalDate, tz::TimeZone};
    ///
    /// assert!(LocalDate::of(2025, 2, 29).unwrap_err().is_validation());
    /// assert!("2025-02-29".parse::<LocalDate>().unwrap_err().is_validation());
    /// assert!(TimeZone::get("Mars/Olympus_Mons").unwrap_err().is_validation());
    /// ```
    pub fn is_validation(&self) -> bool {
        use self::ErrorKind::*;

        matches!(
            *self.root().kind(),
            Range(_)
                | Tz(self::tz::Error::UnknownZone { .. })
                | Tz(self::tz::Error::InvalidFixedOffset { .. })
                | Clock(self::clock::Error::NonPositiveTick)
                | Clock(self::clock::Error::InvalidTick { .. })
        )
    }

    /// Returns true when this error was produced while parsing text.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::Duration;
    ///
    /// let err = "P".parse::<Duration>().unwrap_err();
    /// assert!(err.is_parse());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed to parse \"P\" as an ISO 8601 duration: \
    ///      expected at least one unit in ISO 8601 duration, \
    ///      but found none",
    /// );
    /// ```
    pub fn is_parse(&self) -> bool {
        use self::ErrorKind::*;

        self.chain().any(|err| matches!(*err.kind(), Parse(_) | Fmt(_)))
    }

    /// Returns true when this error originated from civil arithmetic
    /// producing a date outside of the supported range of years.
    ///
    /// This is distinct from [`Error::is_overflow`]. A date range error
    /// means the arithmetic itself was exact, but its result cannot be
    /// represented as a date.
    ///
    /// # Example
    ///
    /// ```
    /// use hora::civil::LocalDate;
    ///
    /// let err = LocalDate::MAX.plus_days(1).unwrap_err();
    /// assert!(err.is_date_range());
    /// assert!(!err.is_overflow());
    /// ```
    pub fn is_date_range(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::DateRange(_))
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "month")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    /// Creates a new error indicating that civil arithmetic produced a date
    /// whose epoch day is outside of the supported range.
    #[inline(never)]
    #[cold]
    pub(crate) fn date_range(epoch_day: i64) -> Error {
        Error::from(ErrorKind::DateRange(DateRangeError::EpochDay(epoch_day)))
    }

    /// Creates a new error indicating that civil arithmetic produced a year
    /// outside of the supported range.
    #[inline(never)]
    #[cold]
    pub(crate) fn year_range(year: i64) -> Error {
        Error::from(ErrorKind::DateRange(DateRangeError::Year(year)))
    }

    /// Creates a new error indicating that parsing the given input failed.
    ///
    /// The `what` label describes what was being parsed. This is meant to be
    /// used as the consequent of an error with `Error::context`.
    #[inline(never)]
    #[cold]
    pub(crate) fn parse(what: &'static str, input: &[u8]) -> Error {
        Error::from(ErrorKind::Parse(ParseError::new(what, input)))
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        // Consequents are always freshly created, so the `Arc` has one
        // reference and no cause. If that ever fails to hold, keep the root
        // cause since that is what the predicates on `Error` look at.
        match Arc::get_mut(&mut err.inner) {
            Some(inner) if inner.cause.is_none() => {
                inner.cause = Some(self);
                err
            }
            _ => self,
        }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Civil(self::civil::Error),
    Clock(self::clock::Error),
    DateRange(DateRangeError),
    Duration(self::duration::Error),
    Fmt(self::fmt::Error),
    Math(self::math::Error),
    Parse(ParseError),
    Period(self::period::Error),
    Range(RangeError),
    Tz(self::tz::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Civil(ref err) => err.fmt(f),
            Clock(ref err) => err.fmt(f),
            DateRange(ref err) => err.fmt(f),
            Duration(ref err) => err.fmt(f),
            Fmt(ref err) => err.fmt(f),
            Math(ref err) => err.fmt(f),
            Parse(ref err) => err.fmt(f),
            Period(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Tz(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits users of
/// this crate to manifest their own `Error` values from an arbitrary message.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError { what, given: given.into(), min: min.into(), max: max.into() }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// An error that occurs when civil arithmetic leaves the supported range of
/// dates.
#[derive(Debug)]
enum DateRangeError {
    EpochDay(i64),
    Year(i64),
}

impl core::fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            DateRangeError::EpochDay(epoch_day) => write!(
                f,
                "date with epoch day {epoch_day} is outside the supported \
                 range of dates",
            ),
            DateRangeError::Year(year) => write!(
                f,
                "year {year} is outside the supported range of years \
                 {min}..={max}",
                min = crate::civil::MIN_YEAR,
                max = crate::civil::MAX_YEAR,
            ),
        }
    }
}

/// The outermost error in a chain produced by a parser.
///
/// This carries the literal input that failed to parse, so that the final
/// error message always shows the offending text.
struct ParseError {
    what: &'static str,
    input: Box<str>,
}

impl ParseError {
    fn new(what: &'static str, input: &[u8]) -> ParseError {
        let input = crate::util::escape::Bytes(input).to_boxed_str();
        ParseError { what, input }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to parse \"{input}\" as {what}",
            input = self.input,
            what = self.what,
        )
    }
}

impl core::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ParseError")
            .field("what", &self.what)
            .field("input", &self.input)
            .finish()
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls for the internal structured error types.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful when the consequent error allocates, since the closure
    /// avoids paying that cost in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    #[cfg_attr(feature = "perf-inline", inline(always))]
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // We test that our 'Error' type is the size we expect. This isn't an API
    // guarantee, but if the size increases, we really want to make sure we
    // decide to do that intentionally.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let root = Error::range("month", 13, 1, 12);
        let err = root.context(Error::parse("a date", b"2024-13-01"));
        insta::assert_snapshot!(
            err,
            @r#"failed to parse "2024-13-01" as a date: parameter 'month' with value 13 is not in the required range of 1..=12"#,
        );
        assert!(err.is_parse());
        assert!(err.is_validation());
        assert!(!err.is_overflow());
        assert!(!err.is_date_range());
    }

    #[test]
    fn date_range_predicate() {
        let err = Error::date_range(1_000_000_000);
        assert!(err.is_date_range());
        assert!(!err.is_validation());
        assert!(!err.is_parse());
    }
}
