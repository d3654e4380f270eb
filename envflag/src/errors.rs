/*!
Errors for registering flags and for resolving their values.
 */

use crate::value::ParseValueError;

/// A flag couldn't be registered with a [`FlagSet`][crate::FlagSet].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegisterError {
    /// A flag with this identifier was already registered
    #[error("flag redefined: {0}")]
    Duplicate(String),

    /// Identifiers must be non-empty, can't start with `-` and can't contain
    /// `=`
    #[error("invalid flag identifier {0:?}")]
    InvalidIdentifier(String),

    /// Flags can only be registered before the first parse
    #[error("flag {0} registered after the flag set was parsed")]
    AlreadyParsed(String),
}

/**
Parsing or resolving a [`FlagSet`][crate::FlagSet] failed.

The argument errors are reported according to the set's
[`ErrorHandling`][crate::ErrorHandling]. [`InvalidEnvironment`][Error::InvalidEnvironment]
is never recovered from inside the set: an environment override that is
present but malformed fails the whole resolution pass.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// `-name` was given, but no flag called `name` exists
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),

    /// A non-boolean flag was the last argument, with no value after it
    #[error("flag needs an argument: -{0}")]
    MissingArgument(String),

    /// A command-line value couldn't be coerced into the flag's type
    #[error("invalid value {text:?} for flag -{flag}: {source}")]
    InvalidArgument {
        flag: String,
        text: String,
        #[source]
        source: ParseValueError,
    },

    /// A token like `---name` or `-=value`
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    /// An argument wasn't valid UTF-8. The lossy form of the argument is
    /// included.
    #[error("argument {0:?} is not valid UTF-8")]
    InvalidUtf8(String),

    /// `-h` or `-help` was given and no flag with that name exists
    #[error("flag: help requested")]
    HelpRequested,

    /// An environment variable was set for a flag, but its value couldn't
    /// be coerced into the flag's type
    #[error("invalid value {text:?} for environment variable {variable} (flag -{flag}): {source}")]
    InvalidEnvironment {
        flag: String,
        variable: String,
        text: String,
        #[source]
        source: ParseValueError,
    },
}

impl Error {
    /// Errors caused by the shape of the command line, as opposed to its
    /// content or the environment. Usage is printed alongside these.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self,
            Error::InvalidEnvironment { .. } | Error::HelpRequested
        )
    }

    /// The exit status used for this error by
    /// [`ErrorHandling::ExitOnError`][crate::ErrorHandling::ExitOnError]
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::HelpRequested => 0,
            _ => 2,
        }
    }
}
