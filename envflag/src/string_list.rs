use core::fmt::{self, Display};

use joinery::JoinableIterator;

/**
A comma-separated list of strings.

A [`StringList`] flag receives its text in one piece, from an argument like
`-tags a,b,c` or from an environment variable. The raw text is kept as-is,
and split into trimmed items when the flag set materializes it at the end of
every resolution pass. Until then, [`value`][StringList::value] is empty.

```
use envflag::StringList;

let mut list = StringList::from("a, b ,c");
assert!(list.value().is_empty());

list.materialize();
assert_eq!(list.value(), ["a", "b", "c"]);
```
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList {
    raw: String,
    value: Vec<String>,
}

impl StringList {
    #[inline]
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            value: Vec::new(),
        }
    }

    /// The raw, unsplit text
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The materialized list of items
    #[inline]
    #[must_use]
    pub fn value(&self) -> &[String] {
        &self.value
    }

    /// Replace the materialized list with the comma-split decomposition of
    /// the raw text. Empty raw text materializes to an empty list.
    pub fn materialize(&mut self) {
        self.value = match self.raw.is_empty() {
            true => Vec::new(),
            false => split_with_comma(&self.raw),
        };
    }
}

impl From<&str> for StringList {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for StringList {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Lists display as their items joined with `, `, or as the raw text if they
/// haven't been materialized yet.
impl Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.is_empty() {
            true => f.write_str(&self.raw),
            false => write!(f, "{}", self.value.iter().join_with(", ")),
        }
    }
}

/// Split `s` on commas, trimming leading and trailing whitespace from each
/// part.
#[must_use]
pub fn split_with_comma(s: &str) -> Vec<String> {
    split_with(s, ",")
}

/// Split `s` on `separator`, trimming leading and trailing whitespace from
/// each part. Empty parts are kept, so `""` splits into a single empty item.
#[must_use]
pub fn split_with(s: &str, separator: &str) -> Vec<String> {
    s.split(separator)
        .map(|part| part.trim().to_owned())
        .collect()
}
