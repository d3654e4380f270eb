use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write as _};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use envflag_parser::{Arg, ArgAccess, ArgumentsParser, Visitor};

use crate::binding::{Binding, EnvDirective, Flag, Source};
use crate::duration::Duration;
use crate::env::{EnvSource, StdEnv};
use crate::errors::{Error, RegisterError};
use crate::naming::normalize_prefix;
use crate::string_list::StringList;
use crate::usage;
use crate::value::{FlagType, Value};

static NEXT_SET_ID: AtomicUsize = AtomicUsize::new(0);

/// What a [`FlagSet`] does when parsing or resolution fails. The error is
/// always written to the set's output first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorHandling {
    /// Return the error to the caller
    ContinueOnError,

    /// Exit the process: status 0 if help was requested, 2 otherwise
    ExitOnError,

    /// Panic with the error message
    PanicOnError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unparsed,
    Parsed,
}

/// The outcome of resolving one binding against the environment, computed
/// for every binding before any of them are modified.
enum Resolution {
    /// Set on the command line; the environment isn't consulted
    Pinned,

    /// No usable variable; the value is left as it is
    Unchanged { env_name: Option<String> },

    Environment { env_name: String, value: Value },
}

/**
A set of flags, resolved from the command line, then the environment, then
their defaults.

Flags are registered with [`var`][FlagSet::var] (or one of the typed helpers
like [`int`][FlagSet::int]) before the set is parsed; each registration
returns a [`Flag`] handle for reading the value back with
[`get`][FlagSet::get]. [`parse`][FlagSet::parse] then assigns every flag
that appears on the command line, and fills in every other flag from its
environment variable, if that variable is set and non-empty. Flags that
appear on the command line stay pinned to that value; calling
[`reresolve`][FlagSet::reresolve] later re-reads the environment for
everything else.

```
use envflag::{ErrorHandling, FlagSet, MockEnv};

let env = MockEnv::from_pairs([("APP_PORT", "8080"), ("APP_VERBOSE", "true")]);
let mut flags = FlagSet::new("app", ErrorHandling::ContinueOnError).with_env(env);

let port = flags.uint("port", 80, "port to listen on", "")?;
let verbose = flags.bool("verbose", false, "chatty logging", "")?;
let host = flags.string("host", "localhost", "address to bind", "-")?;

flags.set_prefix("app");
flags.parse(["-port", "9000"])?;

assert_eq!(*flags.get(port), 9000);
assert!(*flags.get(verbose));
assert_eq!(flags.get(host), "localhost");
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub struct FlagSet<E = StdEnv> {
    id: usize,
    name: String,
    error_handling: ErrorHandling,
    bindings: Vec<Binding>,
    index: HashMap<String, usize>,
    prefix: String,
    state: State,
    args: Vec<String>,
    env: E,
    output: Option<Box<dyn io::Write>>,
}

impl FlagSet<StdEnv> {
    /// Create an empty flag set that reads the process environment. `name`
    /// is used in usage messages.
    #[must_use]
    pub fn new(name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            error_handling,
            bindings: Vec::new(),
            index: HashMap::new(),
            prefix: String::new(),
            state: State::Unparsed,
            args: Vec::new(),
            env: StdEnv,
            output: None,
        }
    }
}

impl<E: EnvSource> FlagSet<E> {
    /// Replace the environment this set reads from.
    #[must_use]
    pub fn with_env<F: EnvSource>(self, env: F) -> FlagSet<F> {
        FlagSet {
            id: self.id,
            name: self.name,
            error_handling: self.error_handling,
            bindings: self.bindings,
            index: self.index,
            prefix: self.prefix,
            state: self.state,
            args: self.args,
            env,
            output: self.output,
        }
    }

    #[inline]
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment source, for sources like
    /// [`MockEnv`][crate::MockEnv] that can change between resolutions.
    #[inline]
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Send error and usage messages somewhere other than stderr.
    pub fn set_output(&mut self, output: impl io::Write + 'static) {
        self.output = Some(Box::new(output));
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    /// The normalized environment prefix, like `APP_`. Empty if unset.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.state == State::Parsed
    }

    /// The arguments left over after flag parsing ended
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[inline]
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// All the bindings, in registration order
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<&Binding> {
        self.index
            .get(identifier)
            .map(|&index| &self.bindings[index])
    }

    /**
    Register a flag.

    `env` selects the environment variable: `""` derives it from the
    identifier (`myInt` reads `MY_INT`), `"-"` never reads the environment,
    and any other name is used as given, upper-cased. The set's prefix is
    applied to derived and explicit names alike, unless the name already
    starts with it.

    Flags must be registered before the first [`parse`][FlagSet::parse].
    Registering an identifier twice is an error; the first registration is
    kept.
    */
    pub fn var<T: FlagType>(
        &mut self,
        identifier: &str,
        default: T,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<T>, RegisterError> {
        if identifier.is_empty() || identifier.starts_with('-') || identifier.contains('=') {
            return Err(RegisterError::InvalidIdentifier(identifier.to_owned()));
        }

        if self.state == State::Parsed {
            return Err(RegisterError::AlreadyParsed(identifier.to_owned()));
        }

        if self.index.contains_key(identifier) {
            return Err(RegisterError::Duplicate(identifier.to_owned()));
        }

        let index = self.bindings.len();
        let binding = Binding::new(
            identifier.to_owned(),
            default.into_value(),
            usage.to_owned(),
            env.into(),
        );

        tracing::trace!(
            set = %self.name,
            flag = identifier,
            kind = ?binding.kind(),
            directive = ?binding.directive(),
            "registered flag"
        );

        self.bindings.push(binding);
        self.index.insert(identifier.to_owned(), index);

        Ok(Flag::new(self.id, index))
    }

    pub fn bool(
        &mut self,
        identifier: &str,
        default: bool,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<bool>, RegisterError> {
        self.var(identifier, default, usage, env)
    }

    pub fn int(
        &mut self,
        identifier: &str,
        default: i64,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<i64>, RegisterError> {
        self.var(identifier, default, usage, env)
    }

    pub fn uint(
        &mut self,
        identifier: &str,
        default: u64,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<u64>, RegisterError> {
        self.var(identifier, default, usage, env)
    }

    pub fn float(
        &mut self,
        identifier: &str,
        default: f64,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<f64>, RegisterError> {
        self.var(identifier, default, usage, env)
    }

    pub fn duration(
        &mut self,
        identifier: &str,
        default: Duration,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<Duration>, RegisterError> {
        self.var(identifier, default, usage, env)
    }

    pub fn string(
        &mut self,
        identifier: &str,
        default: impl Into<String>,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<String>, RegisterError> {
        self.var(identifier, default.into(), usage, env)
    }

    /// Register a comma-separated list flag. `default` is the raw list
    /// text, like `"a,b"`.
    pub fn string_list(
        &mut self,
        identifier: &str,
        default: impl Into<String>,
        usage: &str,
        env: impl Into<EnvDirective>,
    ) -> Result<Flag<StringList>, RegisterError> {
        self.var(identifier, StringList::new(default), usage, env)
    }

    /// Set the environment prefix used by later resolutions. The prefix is
    /// upper-cased and given a trailing `_`. Values that were already
    /// resolved aren't touched until the next [`parse`][FlagSet::parse] or
    /// [`reresolve`][FlagSet::reresolve].
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = normalize_prefix(prefix);
        tracing::debug!(set = %self.name, prefix = %self.prefix, "set environment prefix");
    }

    /// Get the current value of a flag.
    ///
    /// # Panics
    ///
    /// Panics if `flag` was registered with a different flag set.
    #[must_use]
    pub fn get<T: FlagType>(&self, flag: Flag<T>) -> &T {
        match self.try_get(flag) {
            Some(value) => value,
            None => panic!("{flag:?} doesn't belong to the flag set {:?}", self.name),
        }
    }

    /// Get the current value of a flag, or `None` if `flag` was registered
    /// with a different flag set.
    #[must_use]
    pub fn try_get<T: FlagType>(&self, flag: Flag<T>) -> Option<&T> {
        if flag.set != self.id {
            return None;
        }

        self.bindings
            .get(flag.index)
            .and_then(|binding| T::from_value(&binding.value))
    }

    /**
    Parse command-line arguments (excluding the program name), then resolve
    every flag that wasn't given from the environment.

    Every flag is reset to its default first, so parsing again starts over.
    Flag parsing stops at the first non-flag argument or at `--`; the rest
    of the arguments are available from [`args`][FlagSet::args].
    */
    pub fn parse<A>(&mut self, args: impl IntoIterator<Item = A>) -> Result<(), Error>
    where
        A: AsRef<[u8]>,
    {
        let args: Vec<A> = args.into_iter().collect();

        self.state = State::Parsed;
        self.args.clear();
        self.bindings.iter_mut().for_each(Binding::reset);

        tracing::debug!(set = %self.name, count = args.len(), "parsing arguments");

        let result = self
            .parse_arguments(args.iter().map(|arg| arg.as_ref()))
            .and_then(|()| self.resolve_environment());

        result.or_else(|error| self.fail(error))
    }

    /// Parse the process's own command line.
    pub fn parse_env_args(&mut self) -> Result<(), Error> {
        let args: Vec<Vec<u8>> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.into_encoded_bytes())
            .collect();

        self.parse(args)
    }

    /// Re-read the environment for every flag that wasn't set on the command
    /// line, using the current prefix. The arguments aren't parsed again.
    /// Flags whose variable is now unset or empty keep their current value.
    ///
    /// If the pass fails, no flag is modified.
    pub fn reresolve(&mut self) -> Result<(), Error> {
        self.resolve_environment().or_else(|error| self.fail(error))
    }

    /// Write the usage message for this set to `out`.
    pub fn write_usage(&self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        usage::write_usage(out, &self.name, &self.prefix, &self.bindings)
    }

    /// Write the usage message for this set to its output.
    pub fn print_usage(&mut self) -> io::Result<()> {
        let mut message = Vec::new();
        self.write_usage(&mut message)?;
        self.emit(&message)
    }

    fn emit(&mut self, message: &[u8]) -> io::Result<()> {
        match self.output {
            Some(ref mut output) => output.write_all(message),
            None => io::stderr().lock().write_all(message),
        }
    }

    fn parse_arguments<'arg>(
        &mut self,
        args: impl Iterator<Item = &'arg [u8]>,
    ) -> Result<(), Error> {
        let mut parser = ArgumentsParser::new(args);

        while let Some(step) = parser.next_arg(ArgumentVisitor { set: &mut *self }) {
            step?;
        }

        Ok(())
    }

    fn resolve_binding(&self, binding: &Binding) -> Result<Resolution, Error> {
        if binding.explicitly_set {
            tracing::trace!(flag = binding.identifier(), "set on the command line");
            return Ok(Resolution::Pinned);
        }

        let Some(env_name) = binding.env_name_for(&self.prefix) else {
            tracing::trace!(flag = binding.identifier(), "environment lookup suppressed");
            return Ok(Resolution::Unchanged { env_name: None });
        };

        let text = match self.env.get(&env_name) {
            Some(text) if !text.is_empty() => text,
            _ => {
                tracing::trace!(
                    flag = binding.identifier(),
                    variable = %env_name,
                    "environment variable absent"
                );
                return Ok(Resolution::Unchanged {
                    env_name: Some(env_name),
                });
            }
        };

        match Value::parse(binding.kind(), &text) {
            Ok(value) => {
                tracing::debug!(
                    flag = binding.identifier(),
                    variable = %env_name,
                    "value set from the environment"
                );
                Ok(Resolution::Environment { env_name, value })
            }
            Err(source) => Err(Error::InvalidEnvironment {
                flag: binding.identifier().to_owned(),
                variable: env_name,
                text,
                source,
            }),
        }
    }

    fn resolve_environment(&mut self) -> Result<(), Error> {
        tracing::debug!(set = %self.name, prefix = %self.prefix, "resolving environment");

        let resolutions = self
            .bindings
            .iter()
            .map(|binding| self.resolve_binding(binding))
            .collect::<Result<Vec<_>, Error>>()?;

        for (binding, resolution) in self.bindings.iter_mut().zip(resolutions) {
            match resolution {
                Resolution::Pinned => {}
                Resolution::Unchanged { env_name } => binding.resolved_env_name = env_name,
                Resolution::Environment { env_name, value } => {
                    binding.value = value;
                    binding.resolved_env_name = Some(env_name);
                    binding.source = Source::Environment;
                }
            }

            binding.value.materialize();
        }

        Ok(())
    }

    fn report(&mut self, error: &Error) -> io::Result<()> {
        let mut message = Vec::new();

        match error {
            Error::HelpRequested => self.write_usage(&mut message)?,
            error if error.is_usage_error() => {
                writeln!(message, "{error}")?;
                self.write_usage(&mut message)?;
            }
            error => writeln!(message, "{error}")?,
        }

        self.emit(&message)
    }

    fn fail(&mut self, error: Error) -> Result<(), Error> {
        tracing::debug!(set = %self.name, %error, "flag resolution failed");

        if let Err(io_error) = self.report(&error) {
            tracing::warn!(error = %io_error, "failed to write flag error message");
        }

        match self.error_handling {
            ErrorHandling::ContinueOnError => Err(error),
            ErrorHandling::ExitOnError => process::exit(error.exit_code()),
            ErrorHandling::PanicOnError => panic!("{error}"),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for FlagSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("error_handling", &self.error_handling)
            .field("bindings", &self.bindings)
            .field("prefix", &self.prefix)
            .field("state", &self.state)
            .field("args", &self.args)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

/// Feeds tokens from the [`ArgumentsParser`] into the bindings of a set
struct ArgumentVisitor<'a, E> {
    set: &'a mut FlagSet<E>,
}

fn arg_as_str(arg: &Arg) -> Result<&str, Error> {
    arg.as_str()
        .ok_or_else(|| Error::InvalidUtf8(String::from_utf8_lossy(arg.bytes()).into_owned()))
}

impl<E> ArgumentVisitor<'_, E> {
    fn find(&mut self, name: &str) -> Result<&mut Binding, Error> {
        match self.set.index.get(name) {
            Some(&index) => Ok(&mut self.set.bindings[index]),
            None if name == "help" || name == "h" => Err(Error::HelpRequested),
            None => Err(Error::UnknownFlag(name.to_owned())),
        }
    }
}

fn assign(binding: &mut Binding, value: Value) {
    tracing::debug!(flag = binding.identifier(), "value set from the command line");

    binding.value = value;
    binding.explicitly_set = true;
    binding.source = Source::CommandLine;
}

fn assign_text(binding: &mut Binding, text: &str) -> Result<(), Error> {
    let value = Value::parse(binding.kind(), text).map_err(|source| Error::InvalidArgument {
        flag: binding.identifier().to_owned(),
        text: text.to_owned(),
        source,
    })?;

    assign(binding, value);
    Ok(())
}

impl<'arg, E> Visitor<'arg> for ArgumentVisitor<'_, E> {
    type Value = Result<(), Error>;

    fn visit_positional(self, argument: &'arg Arg) -> Self::Value {
        self.set
            .args
            .push(String::from_utf8_lossy(argument.bytes()).into_owned());
        Ok(())
    }

    fn visit_option(mut self, name: &'arg Arg, argument: &'arg Arg) -> Self::Value {
        let binding = self.find(arg_as_str(name)?)?;
        assign_text(binding, arg_as_str(argument)?)
    }

    fn visit_flag(mut self, name: &'arg Arg, argument: impl ArgAccess<'arg>) -> Self::Value {
        let name = arg_as_str(name)?;
        let binding = self.find(name)?;

        match binding.kind().takes_argument() {
            false => {
                assign(binding, Value::Bool(true));
                Ok(())
            }
            true => match argument.take() {
                Some(argument) => assign_text(binding, arg_as_str(argument)?),
                None => Err(Error::MissingArgument(name.to_owned())),
            },
        }
    }

    fn visit_malformed(self, argument: &'arg Arg) -> Self::Value {
        Err(Error::BadSyntax(
            String::from_utf8_lossy(argument.bytes()).into_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::env::MockEnv;

    const NO_ARGS: [&str; 0] = [];

    fn flag_set(env: &[(&str, &str)]) -> FlagSet<MockEnv> {
        let mut flags = FlagSet::new("test", ErrorHandling::ContinueOnError)
            .with_env(MockEnv::from_pairs(env.iter().copied()));
        flags.set_output(io::sink());
        flags
    }

    #[test]
    fn registration_rejects_duplicates() {
        let mut flags = flag_set(&[]);
        let first = flags.int("port", 1, "", "").unwrap();

        assert_eq!(
            flags.int("port", 2, "", ""),
            Err(RegisterError::Duplicate("port".into()))
        );
        assert_eq!(*flags.get(first), 1);
    }

    #[test]
    fn registration_rejects_bad_identifiers() {
        let mut flags = flag_set(&[]);

        for identifier in ["", "-port", "a=b"] {
            assert_eq!(
                flags.bool(identifier, false, "", "").map(|_| ()),
                Err(RegisterError::InvalidIdentifier(identifier.into()))
            );
        }
    }

    #[test]
    fn registration_after_parse() {
        let mut flags = flag_set(&[]);
        flags.parse(NO_ARGS).unwrap();

        assert_eq!(
            flags.bool("late", false, "", "").map(|_| ()),
            Err(RegisterError::AlreadyParsed("late".into()))
        );
    }

    #[test]
    fn defaults_before_parse() {
        let mut flags = flag_set(&[]);
        let name = flags.string("name", "default", "", "").unwrap();
        let tags = flags.string_list("tags", "x, y", "", "").unwrap();

        assert!(!flags.is_parsed());
        assert_eq!(flags.get(name), "default");
        assert_eq!(flags.get(tags).value(), ["x", "y"]);
    }

    #[test]
    fn bool_flags_do_not_consume_arguments() {
        let mut flags = flag_set(&[]);
        let verbose = flags.bool("verbose", false, "", "").unwrap();

        flags.parse(["-verbose", "false"]).unwrap();

        assert!(*flags.get(verbose));
        assert_eq!(flags.args(), ["false"]);
    }

    #[test]
    fn bool_flags_with_attached_values() {
        let mut flags = flag_set(&[("VERBOSE", "true")]);
        let verbose = flags.bool("verbose", true, "", "").unwrap();

        flags.parse(["-verbose=false"]).unwrap();

        assert!(!*flags.get(verbose));
        assert!(flags.lookup("verbose").unwrap().is_explicit());
    }

    #[test]
    fn last_occurrence_wins() {
        let mut flags = flag_set(&[]);
        let count = flags.uint("count", 0, "", "").unwrap();

        flags.parse(["-count", "1", "--count=2"]).unwrap();

        assert_eq!(*flags.get(count), 2);
    }

    #[test]
    fn positional_arguments() {
        let mut flags = flag_set(&[]);
        let quiet = flags.bool("quiet", false, "", "").unwrap();

        flags.parse(["-quiet", "--", "-x", "tail"]).unwrap();

        assert!(*flags.get(quiet));
        assert_eq!(flags.args(), ["-x", "tail"]);
        assert_eq!(flags.arg(1), Some("tail"));
        assert_eq!(flags.arg(2), None);
    }

    #[test]
    fn argument_errors() {
        let mut flags = flag_set(&[]);
        flags.int("count", 0, "", "").unwrap();

        assert_eq!(
            flags.parse(["-missing"]),
            Err(Error::UnknownFlag("missing".into()))
        );
        assert_eq!(
            flags.parse(["-count"]),
            Err(Error::MissingArgument("count".into()))
        );
        assert_eq!(
            flags.parse(["---count"]),
            Err(Error::BadSyntax("---count".into()))
        );
        assert!(matches!(
            flags.parse(["-count", "many"]),
            Err(Error::InvalidArgument { flag, text, .. }) if flag == "count" && text == "many"
        ));
        assert_eq!(flags.parse(["-help"]), Err(Error::HelpRequested));
        assert_eq!(flags.parse(["-h"]), Err(Error::HelpRequested));
    }

    #[test]
    fn invalid_utf8_arguments() {
        let mut flags = flag_set(&[]);
        flags.string("name", "", "", "").unwrap();

        let args: [&[u8]; 2] = [b"-name", b"\xff"];
        assert_eq!(
            flags.parse(args),
            Err(Error::InvalidUtf8("\u{fffd}".into()))
        );
    }

    #[test]
    fn help_can_be_a_real_flag() {
        let mut flags = flag_set(&[]);
        let help = flags.bool("help", false, "", "").unwrap();

        flags.parse(["-help"]).unwrap();

        assert!(*flags.get(help));
    }

    #[test]
    fn failed_environment_pass_changes_nothing() {
        let mut flags = flag_set(&[("NAME", "from-env"), ("COUNT", "3")]);
        let name = flags.string("name", "default", "", "").unwrap();
        let count = flags.int("count", 0, "", "").unwrap();

        flags.parse(NO_ARGS).unwrap();
        assert_eq!(flags.get(name), "from-env");

        flags.env_mut().set("NAME", "changed");
        flags.env_mut().set("COUNT", "three");

        assert!(matches!(
            flags.reresolve(),
            Err(Error::InvalidEnvironment { ref variable, .. }) if variable == "COUNT"
        ));
        assert_eq!(flags.get(name), "from-env");
        assert_eq!(*flags.get(count), 3);
    }

    #[test]
    fn parse_again_starts_over() {
        let mut flags = flag_set(&[]);
        let count = flags.int("count", 7, "", "-").unwrap();

        flags.parse(["-count", "1"]).unwrap();
        assert_eq!(*flags.get(count), 1);

        flags.parse(NO_ARGS).unwrap();
        assert_eq!(*flags.get(count), 7);
        assert!(!flags.lookup("count").unwrap().is_explicit());
    }

    #[test]
    fn handles_from_other_sets() {
        let mut first = flag_set(&[]);
        let mut second = flag_set(&[]);

        let flag = first.bool("shared", false, "", "").unwrap();
        second.bool("shared", false, "", "").unwrap();

        assert_eq!(second.try_get(flag), None);
        assert_eq!(first.try_get(flag), Some(&false));
    }

    #[test]
    #[should_panic(expected = "doesn't belong")]
    fn get_with_foreign_handle_panics() {
        let mut first = flag_set(&[]);
        let second = flag_set(&[]);

        let flag = first.bool("shared", false, "", "").unwrap();
        let _ = second.get(flag);
    }

    #[test]
    #[should_panic(expected = "flag provided but not defined: -nope")]
    fn panic_on_error() {
        let mut flags = FlagSet::new("test", ErrorHandling::PanicOnError)
            .with_env(MockEnv::new());
        flags.set_output(io::sink());

        let _ = flags.parse(["-nope"]);
    }
}
