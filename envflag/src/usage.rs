/*!
Rendering of usage messages.

```text
Usage of server:
  -port uint
        port to listen on (default 8080) [env SERVER_PORT]
  -verbose
        chatty logging [env SERVER_VERBOSE]
```
*/

use std::borrow::Cow;
use std::fmt::Display;
use std::io::{self, Write as _};

use indent_write::io::IndentWriter;
use lazy_format::lazy_format;

use crate::binding::Binding;
use crate::value::Kind;

const INDENT: &str = "  ";
const DESCRIPTION_INDENT: &str = "      ";
const WIDTH: usize = 80;

/**
Extract the argument placeholder from a flag's usage text.

The first back-quoted word in the usage is the placeholder, and is unquoted
in the returned description. Without one, the placeholder is the
[name][Kind::name] of the flag's kind.

```
use envflag::usage::unquote_usage;
use envflag::Kind;

assert_eq!(
    unquote_usage("load a `path` at startup", Kind::String),
    ("path".into(), "load a path at startup".into()),
);
assert_eq!(
    unquote_usage("port to listen on", Kind::Uint),
    ("uint".into(), "port to listen on".into()),
);
```
*/
#[must_use]
pub fn unquote_usage(usage: &str, kind: Kind) -> (Cow<'_, str>, Cow<'_, str>) {
    if let Some((before, rest)) = usage.split_once('`')
        && let Some((placeholder, after)) = rest.split_once('`')
    {
        return (
            Cow::Borrowed(placeholder),
            Cow::Owned(format!("{before}{placeholder}{after}")),
        );
    }

    (Cow::Borrowed(kind.name()), Cow::Borrowed(usage))
}

fn description<'a>(binding: &'a Binding, prefix: &str, usage: &'a str) -> impl Display + 'a {
    let default = binding.default_value();
    let default = lazy_format!(match (default.is_zero()) {
        true => "",
        false => " (default {default})",
    });

    let env = binding.env_name_for(prefix);
    let env = lazy_format!(match (env) {
        None => "",
        Some(ref name) => " [env {name}]",
    });

    lazy_format!("{usage}{default}{env}")
}

fn print_binding(
    out: &mut (impl io::Write + ?Sized),
    prefix: &str,
    binding: &Binding,
) -> io::Result<()> {
    let (placeholder, usage) = unquote_usage(binding.usage(), binding.kind());
    let identifier = binding.identifier();

    match placeholder.is_empty() {
        true => writeln!(out, "-{identifier}")?,
        false => writeln!(out, "-{identifier} {placeholder}")?,
    }

    let description = description(binding, prefix, &usage).to_string();
    let description = description.trim_start();

    if description.is_empty() {
        return Ok(());
    }

    let width = WIDTH - INDENT.len() - DESCRIPTION_INDENT.len();
    let mut out = IndentWriter::new(DESCRIPTION_INDENT, out);
    writeln!(out, "{}", textwrap::fill(description, width))
}

/// Write the usage message for a flag set called `name`, listing its
/// bindings in registration order.
pub fn write_usage(
    out: &mut (impl io::Write + ?Sized),
    name: &str,
    prefix: &str,
    bindings: &[Binding],
) -> io::Result<()> {
    match name.is_empty() {
        true => writeln!(out, "Usage:")?,
        false => writeln!(out, "Usage of {name}:")?,
    }

    let mut out = IndentWriter::new(INDENT, out);
    bindings
        .iter()
        .try_for_each(|binding| print_binding(&mut out, prefix, binding))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::binding::EnvDirective;
    use crate::duration::Duration;
    use crate::string_list::StringList;
    use crate::value::Value;

    fn binding(identifier: &str, default: Value, usage: &str, env: &str) -> Binding {
        Binding::new(
            identifier.to_owned(),
            default,
            usage.to_owned(),
            EnvDirective::from(env),
        )
    }

    fn render(prefix: &str, bindings: &[Binding]) -> String {
        let mut out = Vec::new();
        write_usage(&mut out, "app", prefix, bindings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn placeholders() {
        assert_eq!(
            unquote_usage("a `file` and a `dir`", Kind::String),
            ("file".into(), "a file and a `dir`".into())
        );
        assert_eq!(
            unquote_usage("unbalanced `quote", Kind::Int),
            ("int".into(), "unbalanced `quote".into())
        );
        assert_eq!(
            unquote_usage("enable", Kind::Bool),
            ("".into(), "enable".into())
        );
    }

    #[test]
    fn full_listing() {
        let bindings = [
            binding("verbose", Value::Bool(false), "chatty logging", ""),
            binding("port", Value::Uint(8080), "port to listen on", "LISTEN_PORT"),
            binding("config", Value::String("app.toml".into()), "load `path`", "-"),
            binding("timeout", Value::Duration(Duration::from_secs(90)), "", "-"),
            binding("tags", Value::StringList(StringList::from("")), "", ""),
        ];

        assert_eq!(
            render("app", &bindings),
            "\
Usage of app:
  -verbose
        chatty logging [env APP_VERBOSE]
  -port uint
        port to listen on (default 8080) [env APP_LISTEN_PORT]
  -config path
        load path (default \"app.toml\")
  -timeout duration
        (default 1m30s)
  -tags list
        [env APP_TAGS]
"
        );
    }

    #[test]
    fn long_descriptions_wrap() {
        let usage = "a very long description of what this flag does, which goes on well past the \
            point where it should have been wrapped onto another line";
        let rendered = render("", &[binding("long", Value::Bool(false), usage, "-")]);

        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines.len() > 3, "{rendered}");
        assert!(lines.iter().all(|line| line.len() <= WIDTH), "{rendered}");
        assert!(
            lines[2..].iter().all(|line| line.starts_with("        ")),
            "{rendered}"
        );
    }

    #[test]
    fn unnamed_set() {
        let mut out = Vec::new();
        write_usage(&mut out, "", "", &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Usage:\n");
    }
}
