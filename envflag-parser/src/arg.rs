use core::{fmt, mem, str};

/**
A single, raw token taken from the command line.

[`Arg`] is used both for flag names and for the values given to them. For
instance, given `-target foo -path=bar input.txt`, `target`, `foo`, `path`,
`bar`, and `input.txt` would all be handed to the [`Visitor`][crate::Visitor]
as [`Arg`] values. Leading dashes are never part of a flag name.

Internally an [`Arg`] is just a byte slice, since that's what the OS gives us.
Use [`as_str`][Arg::as_str] to get at it as text.
*/
#[derive(Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Arg([u8]);

impl Arg {
    pub const fn new(bytes: &[u8]) -> &Self {
        // SAFETY: Arg is repr transparent to a byte slice, so it's safe to
        // transmute into it.
        unsafe { mem::transmute(bytes) }
    }

    pub const fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// The argument as a `str`, if it's valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.0).ok()
    }
}

impl PartialEq<[u8]> for Arg {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for Arg {
    fn eq(&self, other: &str) -> bool {
        self.0 == *other.as_bytes()
    }
}

impl PartialEq<&str> for Arg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other.as_bytes()
    }
}

/**
Debug-print an arg. Valid UTF-8 is printed as a quoted string; anything else
is printed as the list of bytes.
 */
impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "{s:?}"),
            None => write!(f, "{:?}", &self.0),
        }
    }
}
