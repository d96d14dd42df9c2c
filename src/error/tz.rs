use alloc::boxed::Box;

use crate::{civil::LocalDateTime, error, tz::offset::Offset};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    InvalidFixedOffset { seconds: i32 },
    OffsetLookup { id: Box<str> },
    Resolve { datetime: LocalDateTime, id: Box<str> },
    ResolveStepLimit { steps: usize },
    UnknownZone { id: Box<str> },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Tz(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            InvalidFixedOffset { seconds } => write!(
                f,
                "fixed offset of {seconds} seconds is not in the required \
                 range of {min}..={max}",
                min = -Offset::MAX_SECONDS,
                max = Offset::MAX_SECONDS,
            ),
            OffsetLookup { ref id } => {
                write!(f, "failed to find offset in time zone `{id}`")
            }
            Resolve { datetime, ref id } => write!(
                f,
                "failed to resolve civil datetime {datetime} \
                 in time zone `{id}`",
            ),
            ResolveStepLimit { steps } => write!(
                f,
                "gave up searching for a matching offset after {steps} steps",
            ),
            UnknownZone { ref id } => {
                write!(f, "failed to find time zone `{id}`")
            }
        }
    }
}
