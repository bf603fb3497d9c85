use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pmx_cli::{commands, load_base, load_matrix, sample_matrix, Settings};
use pmx_core::{Engine, MatrixSpec};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let matrix_arg = || {
        Arg::new("matrix")
            .value_name("MATRIX")
            .value_parser(value_parser!(PathBuf))
            .help("Matrix file (YAML or JSON); the bundled sample if omitted")
    };
    let base_arg = |long: bool| {
        let arg = Arg::new("base")
            .value_name("FILE")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Base configuration (YAML or JSON)");
        if long {
            arg.long("base")
        } else {
            arg
        }
    };

    Command::new("pmx")
        .version(pmx_cli::VERSION)
        .about("Parameter-path overrides and matrix expansion for persona configurations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (TOML, [engine] table)"),
        )
        .arg(
            Arg::new("max-combinations")
                .long("max-combinations")
                .global(true)
                .value_parser(value_parser!(usize))
                .help("Refuse matrices with more combinations than this"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more to stderr (repeat for debug)"),
        )
        .subcommand(
            Command::new("combos")
                .about("Print the matrix summary and one JSON line per combination")
                .arg(matrix_arg()),
        )
        .subcommand(
            Command::new("expand")
                .about("Print one JSON line per variant of a base configuration")
                .arg(base_arg(true))
                .arg(matrix_arg()),
        )
        .subcommand(
            Command::new("paths")
                .about("List every addressable path of a configuration")
                .arg(base_arg(false)),
        )
        .subcommand(
            Command::new("check")
                .about("Report matrix parameters that do not resolve on a base configuration")
                .arg(base_arg(true))
                .arg(matrix_arg()),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn matrix_from(args: &ArgMatches) -> Result<MatrixSpec> {
    let Some(path) = args.get_one::<PathBuf>("matrix") else {
        return sample_matrix().context("loading bundled sample matrix");
    };
    load_matrix(path).with_context(|| format!("loading matrix {}", path.display()))
}

fn base_from(args: &ArgMatches) -> Result<Value> {
    let Some(path) = args.get_one::<PathBuf>("base") else {
        bail!("no base configuration given");
    };
    load_base(path).with_context(|| format!("loading base {}", path.display()))
}

fn engine_from(args: &ArgMatches) -> Result<Engine> {
    let settings = Settings::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("loading settings")?
        .with_max_combinations(args.get_one::<usize>("max-combinations").copied());
    tracing::debug!(?settings.engine, "resolved engine settings");
    Ok(Engine::try_new(settings.engine)?)
}

/// Returns whether the command succeeded
fn run(command: &str, args: &ArgMatches) -> Result<bool> {
    let engine = engine_from(args)?;
    let mut out = io::stdout().lock();

    match command {
        "combos" => {
            let matrix = matrix_from(args)?;
            commands::combos(&engine, &matrix, &mut out)?;
            Ok(true)
        }
        "expand" => {
            let base = base_from(args)?;
            let matrix = matrix_from(args)?;
            commands::expand(&engine, &base, &matrix, &mut out)?;
            Ok(true)
        }
        "paths" => {
            let base = base_from(args)?;
            commands::paths(&base, &mut out)?;
            Ok(true)
        }
        "check" => {
            let base = base_from(args)?;
            let matrix = matrix_from(args)?;
            commands::check(&base, &matrix, &mut out)
        }
        other => bail!("unknown command '{other}'"),
    }
}

fn main() {
    let matches = cli().get_matches();
    let Some((command, args)) = matches.subcommand() else {
        eprintln!("error: no command given");
        std::process::exit(1);
    };

    init_tracing(args.get_count("verbose"));

    match run(command, args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            tracing::error!(command, "{err:#}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn combos_defaults_to_sample() {
        let matches = cli().try_get_matches_from(["pmx", "combos"]).unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<PathBuf>("matrix"), None);
        assert_eq!(matrix_from(args).unwrap().combination_count(), Some(12));
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let matches = cli()
            .try_get_matches_from(["pmx", "-vv", "combos", "--max-combinations", "5"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_count("verbose"), 2);
        assert_eq!(args.get_one::<usize>("max-combinations"), Some(&5));
    }

    #[test]
    fn engine_honours_flag() {
        let matches = cli()
            .try_get_matches_from(["pmx", "combos", "--max-combinations", "3"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let engine = engine_from(args).unwrap();
        assert_eq!(engine.config().max_combinations, 3);
    }

    #[test]
    fn expand_requires_base() {
        assert!(cli().try_get_matches_from(["pmx", "expand"]).is_err());
    }
}
