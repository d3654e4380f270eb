/*!
Typed command-line flags that fall back to environment variables, and then
to compiled-in defaults.

A program declares each flag once on a [`FlagSet`], with a default, a usage
string, and an environment directive. When the set is parsed, every flag
gets its value from the first of these that has one:

1. the command line (`-port 9000`, `--port=9000`),
2. the flag's environment variable (`APP_PORT=9000`), if it's set and
   non-empty,
3. the flag's default.

Environment variable names are derived from the flag identifier
(`myMixedCaps` reads `MY_MIXED_CAPS`) unless an explicit name is given, and
every name is placed under the set's [prefix][FlagSet::set_prefix]. A flag can
also opt out of the environment entirely.

Flags can hold exactly the types in [`Value`]: `bool`, `i64`, `u64`, `f64`,
[`Duration`], [`String`] and [`StringList`]. Registering a flag gives back a
typed [`Flag`] handle, which is used to read the resolved value:

```
use envflag::{Duration, ErrorHandling, FlagSet, MockEnv};

let env = MockEnv::from_pairs([("DEMO_TIMEOUT", "1m30s"), ("DEMO_TAGS", "a, b")]);
let mut flags = FlagSet::new("demo", ErrorHandling::ContinueOnError).with_env(env);
flags.set_prefix("demo");

let timeout = flags.duration("timeout", Duration::from_secs(10), "request timeout", "")?;
let tags = flags.string_list("tags", "", "tags to attach", "")?;
let name = flags.string("name", "anonymous", "who to greet", "-")?;

flags.parse(["-name", "ferris", "extra"])?;

assert_eq!(*flags.get(timeout), Duration::from_secs(90));
assert_eq!(flags.get(tags).value(), ["a", "b"]);
assert_eq!(flags.get(name), "ferris");
assert_eq!(flags.args(), ["extra"]);
# Ok::<(), Box<dyn std::error::Error>>(())
```

On the command line, `-name` and `--name` are equivalent, boolean flags never
take the following argument (use `-name=false`), and flag parsing ends at the
first positional argument or at `--`.
*/

mod binding;
mod duration;
pub mod env;
pub mod errors;
mod flag_set;
pub mod naming;
mod string_list;
pub mod usage;
pub mod value;

pub use binding::{Binding, EnvDirective, Flag, SUPPRESS, Source};
pub use duration::{Duration, ParseDurationError};
pub use env::{EnvSource, MockEnv, StdEnv};
pub use envflag_parser::Arg;
pub use errors::{Error, RegisterError};
pub use flag_set::{ErrorHandling, FlagSet};
pub use string_list::{StringList, split_with, split_with_comma};
pub use value::{FlagType, Kind, ParseValueError, Value};
