use std::fmt::Display;

use anyhow::Context;
use envflag::{Binding, Duration, ErrorHandling, FlagSet, Source};
use lazy_format::lazy_format;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn describe(binding: &Binding) -> impl Display + '_ {
    let identifier = binding.identifier();
    let value = binding.value();

    let source = lazy_format!(match (binding.source()) {
        Source::Default => "default",
        Source::CommandLine => "command line",
        Source::Environment => ("env {name}", name = binding.env_name().unwrap_or("?")),
    });

    lazy_format!("{identifier:>12} = {value} ({source})")
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut flags = FlagSet::new("envflag-demo", ErrorHandling::ExitOnError);
    flags.set_prefix("demo");

    let host = flags
        .string("host", "localhost", "`address` to bind", "")
        .context("failed to register -host")?;
    let port = flags
        .uint("port", 8080, "port to listen on", "")
        .context("failed to register -port")?;
    let verbose = flags
        .bool("verbose", false, "log every request", "")
        .context("failed to register -verbose")?;
    let timeout = flags
        .duration("timeout", Duration::from_secs(30), "request timeout", "")
        .context("failed to register -timeout")?;
    let sample_rate = flags
        .float("sampleRate", 0.0, "fraction of requests to trace", "")
        .context("failed to register -sampleRate")?;
    let upstreams = flags
        .string_list("upstreams", "", "comma-separated upstream `hosts`", "BACKENDS")
        .context("failed to register -upstreams")?;
    let motd = flags
        .string("motd", "", "message of the day; never read from the environment", "-")
        .context("failed to register -motd")?;

    flags
        .parse_env_args()
        .context("failed to resolve configuration")?;

    tracing::info!(
        flags = flags.bindings().count(),
        from_environment = flags
            .bindings()
            .filter(|binding| binding.source() == Source::Environment)
            .count(),
        args = flags.args().len(),
        "resolved configuration"
    );

    println!("listening on {}:{}", flags.get(host), flags.get(port));
    println!("request timeout {}", flags.get(timeout));

    if *flags.get(verbose) {
        println!("tracing {}% of requests", flags.get(sample_rate) * 100.0);
    }

    flags
        .get(upstreams)
        .value()
        .iter()
        .for_each(|upstream| println!("upstream {upstream}"));

    let motd = flags.get(motd);
    if !motd.is_empty() {
        println!("{motd}");
    }

    println!();
    flags
        .bindings()
        .for_each(|binding| println!("{}", describe(binding)));

    if !flags.args().is_empty() {
        println!("{:>12} = {:?}", "args", flags.args());
    }

    Ok(())
}
