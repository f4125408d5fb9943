use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::Path;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use reflag::config::Config;
use reflag::dispatch;
use reflag::shell::{self, Shell};
use reflag::{ReflagError, Registry, Translator};

const LOG_ENV: &str = "REFLAG_LOG";

/// reflag - translate command-line flags between tools
///
/// Prints the target command for `eval`; nothing is executed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// List the available translators
    #[arg(short, long, conflicts_with = "init")]
    list: bool,

    /// Print shell functions for the enabled translators
    #[arg(long, value_enum, value_name = "SHELL")]
    init: Option<Option<Shell>>,

    /// Add a translator to the --init output
    #[arg(long, value_name = "NAME", requires = "init")]
    include: Vec<String>,

    /// Dialect of the source tool (e.g. bsd or gnu)
    #[arg(short, long)]
    mode: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// <source> <target> [flags...]
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let mut argv = std::env::args();
    let binary = argv
        .next()
        .as_deref()
        .and_then(|path| Path::new(path).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let registry = Registry::with_builtins();

    // Invoked through a `<source>2<target>` symlink: every argument is a source flag
    if dispatch::split_binary_name(&binary).is_some() {
        init_logging(false)?;
        let translator = dispatch::from_binary_name(&registry, &binary)?;
        let config = Config::load_default()?;
        return run_symlinked(translator.as_ref(), &argv.collect::<Vec<_>>(), &config);
    }

    let args = Args::parse();
    init_logging(args.debug)?;

    let config = if let Some(config_path) = &args.config {
        Config::load_from_file(config_path)?
    } else {
        Config::load_default()?
    };

    if args.list {
        print!("{}", shell::translator_table(&registry, &config.init));
        return Ok(());
    }

    if let Some(requested) = args.init {
        let shell = requested
            .or_else(|| config.init.shell.as_deref().and_then(Shell::from_name))
            .unwrap_or(Shell::Bash);
        let translators = dispatch::init_selection(&registry, &config.init, &args.include);
        print!("{}", shell::init_script(shell, &translators));
        return Ok(());
    }

    let (source, target, rest) = match args.command.as_slice() {
        [] => {
            Args::command()
                .print_help()
                .context("Failed to print help")?;
            return Ok(());
        }
        [_] => return Err(ReflagError::MissingPair.into()),
        [source, target, rest @ ..] => (source, target, rest),
    };

    let translator = match dispatch::lookup(&registry, source, target) {
        Ok(translator) => translator,
        Err(e) => {
            eprintln!("use 'reflag --list' to see available translators");
            return Err(e.into());
        }
    };

    let mode = dispatch::resolve_mode(translator.name(), args.mode.as_deref(), &config);
    println!("{}", dispatch::run(translator.as_ref(), rest, &mode));
    Ok(())
}

fn run_symlinked(translator: &dyn Translator, args: &[String], config: &Config) -> Result<()> {
    if args.iter().any(|a| a == "-V" || a == "--version") {
        println!("{} {}", translator.name(), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mode = dispatch::resolve_mode(translator.name(), None, config);
    println!("{}", dispatch::run(translator, args, &mode));
    Ok(())
}

/// Log to stderr so stdout carries only the translated command
fn init_logging(debug: bool) -> Result<()> {
    if std::env::var_os(LOG_ENV).is_some() {
        let filter = EnvFilter::try_from_env(LOG_ENV).context("Invalid REFLAG_LOG filter")?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set global default subscriber")?;
    } else {
        let log_level = if debug { Level::DEBUG } else { Level::INFO };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set global default subscriber")?;
    }

    debug!("Logging initialised");
    Ok(())
}
