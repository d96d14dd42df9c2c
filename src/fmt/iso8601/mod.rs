/*!
The ISO 8601 grammar shared by every value type in this crate.

The parser and printer are configuration free, so callers keep them in
statics:

```text
static P: DateTimeParser = DateTimeParser::new();
```
*/

pub(crate) use self::{parser::DateTimeParser, printer::DateTimePrinter};

mod parser;
mod printer;

/// The label used for parse errors of each kind of value.
mod what {
    pub(super) const DATE: &str = "a date";
    pub(super) const TIME: &str = "a time";
    pub(super) const DATETIME: &str = "a datetime";
    pub(super) const INSTANT: &str = "an instant";
    pub(super) const OFFSET: &str = "a UTC offset";
    pub(super) const DURATION: &str = "an ISO 8601 duration";
    pub(super) const PERIOD: &str = "an ISO 8601 period";
    pub(super) const PERIOD_DURATION: &str =
        "an ISO 8601 period and duration";
}
