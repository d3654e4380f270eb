/*!
Environment variable naming: turning flag identifiers into `SCREAMING_SNAKE`
names, and attaching a namespace prefix to them.
*/

/// The separator placed between a prefix and the rest of a variable name
pub const SEPARATOR: char = '_';

/**
Derive the canonical environment variable name for a flag identifier.

An underscore is inserted before every upper-case letter that follows a
character which is neither upper-case nor already an underscore, and every
character is upper-cased. This is run detection rather than a full camel-case
tokenizer: a run of capitals stays together, so `myHTTPPort` becomes
`MY_HTTPPORT`.

```
use envflag::naming::derive_env_name;

assert_eq!(derive_env_name("myInt"), "MY_INT");
assert_eq!(derive_env_name("MixedCaps"), "MIXED_CAPS");
assert_eq!(derive_env_name("ALREADY_SCREAMING"), "ALREADY_SCREAMING");
```
*/
#[must_use]
pub fn derive_env_name(identifier: &str) -> String {
    let mut name = String::with_capacity(identifier.len() + 4);
    let mut previous: Option<char> = None;

    for c in identifier.chars() {
        if c.is_uppercase()
            && let Some(previous) = previous
            && !previous.is_uppercase()
            && previous != SEPARATOR
        {
            name.push(SEPARATOR);
        }

        name.extend(c.to_uppercase());
        previous = Some(c);
    }

    name
}

/**
Normalize a namespace prefix: upper-case it, and make sure it ends with
exactly one trailing separator. An empty prefix stays empty.
*/
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        return String::new();
    }

    let mut prefix = prefix.to_uppercase();

    if !prefix.ends_with(SEPARATOR) {
        prefix.push(SEPARATOR);
    }

    prefix
}

/**
Attach `prefix` to `name`, unless `name` already starts with it.

The prefix is normalized first. Applying the same prefix twice is a no-op,
so a name that has already been resolved is never double-prefixed.

```
use envflag::naming::apply_prefix;

assert_eq!(apply_prefix("MYBOOL", "prefix"), "PREFIX_MYBOOL");
assert_eq!(apply_prefix("PREFIX_MYBOOL", "PREFIX_"), "PREFIX_MYBOOL");
assert_eq!(apply_prefix("MYBOOL", ""), "MYBOOL");
```
*/
#[must_use]
pub fn apply_prefix(name: &str, prefix: &str) -> String {
    let prefix = normalize_prefix(prefix);

    match name.starts_with(&prefix) {
        true => name.to_owned(),
        false => prefix + name,
    }
}
