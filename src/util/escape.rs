/*!
Convenience routines for showing raw input in error messages.

Parsers in this crate work on bytes, so the piece of input that an error
refers to may not be valid UTF-8 on its own (for example, when a multi-byte
codepoint is split). These wrappers print such input faithfully, escaping
anything that would otherwise be confusing in a one line message.
*/

/// Displays a single byte of input.
///
/// Printable ASCII is shown as-is. Everything else is shown as an escape
/// sequence, using an upper case hex escape for bytes that are not ASCII.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.0 {
            b' ' => f.write_str(" "),
            b'\n' => f.write_str(r"\n"),
            b'\r' => f.write_str(r"\r"),
            b'\t' => f.write_str(r"\t"),
            b'\\' => f.write_str(r"\\"),
            b'"' => f.write_str("\\\""),
            b if b.is_ascii_graphic() => write!(f, "{}", char::from(b)),
            b => write!(f, r"\x{b:02X}"),
        }
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Displays a slice of input.
///
/// Valid UTF-8 is shown as text, with control characters escaped. Bytes that
/// are not part of a valid UTF-8 encoding are shown as hex escapes.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> Bytes<'a> {
    /// Renders these bytes into an owned string, for storing in an error.
    pub(crate) fn to_boxed_str(&self) -> alloc::boxed::Box<str> {
        use alloc::string::ToString;

        self.to_string().into_boxed_str()
    }
}

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        while !bytes.is_empty() {
            let (valid, rest) = match core::str::from_utf8(bytes) {
                Ok(s) => (s, &[][..]),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // OK because `valid_up_to` marks the end of the
                    // longest valid prefix.
                    let valid = core::str::from_utf8(valid)
                        .map_err(|_| core::fmt::Error)?;
                    (valid, rest)
                }
            };
            for ch in valid.chars() {
                if ch.is_control() {
                    write!(f, "{}", ch.escape_debug())?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            if let Some((&byte, rest)) = rest.split_first() {
                write!(f, r"\x{byte:02X}")?;
                bytes = rest;
            } else {
                bytes = rest;
            }
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
