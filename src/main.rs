// SPDX-License-Identifier: MPL-2.0
use messenger_locales::config::{self, Config};
use messenger_locales::i18n::{self, Catalog, FluentArgs, LoadOptions, Localizer};
use messenger_locales::logging;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "\
Usage: messenger-locales [OPTIONS] <COMMAND>

Commands:
  get <KEY> [NAME=VALUE ...]  Print the text for KEY
  chain <TAG>                 Print the fallback chain for TAG
  locales                     List the supported locales
  check                       Report completeness; fails on orphaned keys
                              or untranslated required keys

Options:
  --dir <DIR>       Read locale files from DIR instead of the embedded set
  --config <FILE>   Settings file (default: user config directory)
  --lang <TAG>      Locale to use for `get` (default: settings, then OS)
  -v, --verbose     Log debug output to stderr
  -h, --help        Print this help
";

struct Flags {
    dir: Option<PathBuf>,
    config: Option<PathBuf>,
    lang: Option<String>,
    command: Option<String>,
    rest: Vec<String>,
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    let verbose = args.contains(["-v", "--verbose"]);
    logging::init(if verbose { "debug" } else { "warn" });

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(flags) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let dir = args.opt_value_from_str("--dir")?;
    let config = args.opt_value_from_str("--config")?;
    let lang = args.opt_value_from_str("--lang")?;
    let mut free = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok());

    Ok(Flags {
        dir,
        config,
        lang,
        command: free.next(),
        rest: free.collect(),
    })
}

fn run(flags: Flags) -> messenger_locales::Result<ExitCode> {
    let mut settings = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if flags.dir.is_some() {
        settings.resources_dir = flags.dir.clone();
    }

    let lenient = flags.command.as_deref() == Some("check");
    let catalog = Arc::new(load_catalog(&settings, lenient)?);
    execute(&flags, catalog, &settings, &mut io::stdout().lock())
}

/// Runs one command against a loaded catalog, writing results to `out`.
fn execute(
    flags: &Flags,
    catalog: Arc<Catalog>,
    settings: &Config,
    out: &mut impl Write,
) -> messenger_locales::Result<ExitCode> {
    match flags.command.as_deref() {
        Some("get") => {
            let Some((key, pairs)) = flags.rest.split_first() else {
                eprintln!("get: missing KEY\n\n{USAGE}");
                return Ok(ExitCode::from(2));
            };
            let mut args = FluentArgs::new();
            for pair in pairs {
                let Some((name, value)) = pair.split_once('=') else {
                    continue;
                };
                match value.parse::<f64>() {
                    Ok(number) => args.set(name, number),
                    Err(_) => args.set(name, value),
                }
            }
            // An explicit tag is looked up as given, even when unsupported.
            let text = match &flags.lang {
                Some(lang) => catalog.lookup_with_args(lang, key, &args),
                None => Localizer::new(catalog, None, settings).tr_with_args(key, &args),
            };
            writeln!(out, "{text}")?;
        }
        Some("chain") => {
            let Some(tag) = flags.rest.first() else {
                eprintln!("chain: missing TAG\n\n{USAGE}");
                return Ok(ExitCode::from(2));
            };
            for locale in catalog.fallback_chain(tag) {
                let marker = if catalog.table(&locale).is_some() {
                    ""
                } else {
                    " (not loaded)"
                };
                writeln!(out, "{locale}{marker}")?;
            }
        }
        Some("locales") => {
            for locale in catalog.supported_locales() {
                writeln!(out, "{locale}")?;
            }
        }
        Some("check") => {
            let report = catalog.completeness_report();
            write!(out, "{report}")?;
            if !report.is_complete() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(other) => {
            eprintln!("unknown command '{other}'\n\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
        None => {
            write!(out, "{USAGE}")?;
            return Ok(ExitCode::from(2));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// A resource directory is loaded as-is, without the embedded fallback, so
/// `check` reports on the files actually given. With `lenient`, orphaned
/// keys are kept for the report instead of aborting the load.
fn load_catalog(settings: &Config, lenient: bool) -> messenger_locales::Result<Catalog> {
    let mut options = LoadOptions::from_config(settings)?;
    if lenient {
        options.strict = false;
    }
    match &settings.resources_dir {
        Some(dir) => i18n::load_dir(dir, &options),
        None => i18n::load_embedded(&options),
    }
}
