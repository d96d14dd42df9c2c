use crate::{error, Duration, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    NegativeToUnsigned { duration: Duration },
    OfUnit { amount: i64, unit: Unit },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Duration(err).into()
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
            NegativeToUnsigned { duration } => write!(
                f,
                "cannot convert negative duration {duration} \
                 to an unsigned duration",
            ),
            OfUnit { amount, unit } => write!(
                f,
                "failed to create duration of {amount} {unit}",
                unit = unit.plural(),
            ),
        }
    }
}
