use core::fmt;
use core::marker::PhantomData;

use crate::naming::{apply_prefix, derive_env_name};
use crate::value::{Kind, Value};

/// The text that suppresses environment lookup for a flag
pub const SUPPRESS: &str = "-";

/**
How a flag is associated with an environment variable.

Converting from text follows the registration convention: `""` is
[`Auto`][EnvDirective::Auto], `"-"` is [`Suppressed`][EnvDirective::Suppressed],
and anything else is an [`Explicit`][EnvDirective::Explicit] name, upper-cased.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EnvDirective {
    /// Derive the variable name from the flag's identifier
    #[default]
    Auto,

    /// Use this variable name. The namespace prefix is still applied unless
    /// the name already starts with it.
    Explicit(String),

    /// Never read this flag from the environment
    Suppressed,
}

impl EnvDirective {
    #[must_use]
    pub fn explicit(name: &str) -> Self {
        Self::from(name)
    }
}

impl From<&str> for EnvDirective {
    fn from(directive: &str) -> Self {
        match directive {
            "" => Self::Auto,
            SUPPRESS => Self::Suppressed,
            name => Self::Explicit(name.to_uppercase()),
        }
    }
}

impl From<String> for EnvDirective {
    fn from(directive: String) -> Self {
        Self::from(directive.as_str())
    }
}

/// Where a flag's current value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Default,
    Environment,
    CommandLine,
}

/**
A single declared flag, along with everything the resolution passes have
learned about it.

Bindings are created by [`FlagSet::var`][crate::FlagSet::var] and are owned by
their flag set; look them up with [`FlagSet::lookup`][crate::FlagSet::lookup].
*/
#[derive(Debug, Clone)]
pub struct Binding {
    identifier: String,
    usage: String,
    default: Value,
    pub(crate) value: Value,
    directive: EnvDirective,
    pub(crate) resolved_env_name: Option<String>,
    pub(crate) explicitly_set: bool,
    pub(crate) source: Source,
}

impl Binding {
    pub(crate) fn new(
        identifier: String,
        default: Value,
        usage: String,
        directive: EnvDirective,
    ) -> Self {
        let mut value = default.clone();
        value.materialize();

        Self {
            identifier,
            usage,
            value,
            default,
            directive,
            resolved_env_name: None,
            explicitly_set: false,
            source: Source::Default,
        }
    }

    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.default.kind()
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn directive(&self) -> &EnvDirective {
        &self.directive
    }

    /// The environment variable consulted by the most recent resolution
    /// pass. `None` if the flag is suppressed, was set on the command line,
    /// or hasn't been resolved yet.
    #[inline]
    #[must_use]
    pub fn env_name(&self) -> Option<&str> {
        self.resolved_env_name.as_deref()
    }

    /// True if the most recent parse found this flag on the command line
    #[inline]
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.explicitly_set
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    /// True if the value came from the command line or the environment
    /// rather than from the default
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.source != Source::Default
    }

    /// The variable this flag would be read from under `prefix`, or `None`
    /// if it's suppressed.
    #[must_use]
    pub fn env_name_for(&self, prefix: &str) -> Option<String> {
        let name = match &self.directive {
            EnvDirective::Suppressed => return None,
            EnvDirective::Auto => derive_env_name(&self.identifier),
            EnvDirective::Explicit(name) => name.to_uppercase(),
        };

        Some(apply_prefix(&name, prefix))
    }

    /// Put the binding back into its pre-parse state
    pub(crate) fn reset(&mut self) {
        self.value = self.default.clone();
        self.value.materialize();
        self.explicitly_set = false;
        self.resolved_env_name = None;
        self.source = Source::Default;
    }
}

/**
A typed handle to a registered flag.

Handles are returned by [`FlagSet::var`][crate::FlagSet::var] and are used to
read the resolved value back with [`FlagSet::get`][crate::FlagSet::get]. They
are cheap to copy and only valid for the flag set that produced them.
*/
pub struct Flag<T> {
    pub(crate) set: usize,
    pub(crate) index: usize,
    kind: PhantomData<fn() -> T>,
}

impl<T> Flag<T> {
    pub(crate) const fn new(set: usize, index: usize) -> Self {
        Self {
            set,
            index,
            kind: PhantomData,
        }
    }
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Flag<T> {}

impl<T> PartialEq for Flag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set && self.index == other.index
    }
}

impl<T> Eq for Flag<T> {}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("set", &self.set)
            .field("index", &self.index)
            .finish()
    }
}
