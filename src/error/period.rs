use crate::{civil::LocalDateTime, error, Period};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Add { period: Period },
    Between { start: LocalDateTime, end: LocalDateTime },
    Multiply { scalar: i32 },
    Normalize,
    Subtract { period: Period },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Period(err).into()
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
            Add { period } => write!(f, "failed to add period {period}"),
            Between { start, end } => write!(
                f,
                "failed to compute period and duration \
                 between {start} and {end}",
            ),
            Multiply { scalar } => {
                write!(f, "failed to multiply period by {scalar}")
            }
            Normalize => f.write_str("failed to normalize period"),
            Subtract { period } => {
                write!(f, "failed to subtract period {period}")
            }
        }
    }
}
