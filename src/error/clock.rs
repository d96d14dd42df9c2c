use crate::{error, Duration};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    InvalidTick { tick: Duration },
    NonPositiveTick,
    SystemTime,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Clock(err).into()
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
            InvalidTick { tick } => write!(
                f,
                "tick duration {tick} must be a whole number of seconds \
                 or divide one second exactly",
            ),
            NonPositiveTick => {
                f.write_str("tick duration must be strictly positive")
            }
            SystemTime => {
                f.write_str("failed to read the current time from the system")
            }
        }
    }
}
