use crate::{error, math};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    DivideByZero { op: &'static str, dividend: i64 },
    Overflow { op: &'static str, value: i128 },
    OverflowI32 { value: i64 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Math(err).into()
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
            DivideByZero { op, dividend } => {
                write!(f, "attempted {op} of {dividend} by zero")
            }
            Overflow { op, value } => write!(
                f,
                "{op} produced {value}, which is outside the safe \
                 integer range of {min}..={max}",
                min = math::SAFE_MIN,
                max = math::SAFE_MAX,
            ),
            OverflowI32 { value } => write!(
                f,
                "value {value} does not fit in a 32-bit signed integer",
            ),
        }
    }
}
