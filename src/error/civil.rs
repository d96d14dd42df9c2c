use crate::{error, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    AddDays { days: i64 },
    AddMonths { months: i64 },
    AddTime { amount: i64, unit: Unit },
    AddWeeks { weeks: i64 },
    AddYears { years: i64 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Civil(err).into()
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
            AddDays { days } => write!(f, "failed to add {days} days to date"),
            AddMonths { months } => {
                write!(f, "failed to add {months} months to date")
            }
            AddTime { amount, unit } => write!(
                f,
                "failed to add {amount} {unit} to datetime",
                unit = unit.plural(),
            ),
            AddWeeks { weeks } => {
                write!(f, "failed to add {weeks} weeks to date")
            }
            AddYears { years } => {
                write!(f, "failed to add {years} years to date")
            }
        }
    }
}
