//! `cadtrail` binary

use anyhow::{Context, Result};
use cadtrail_cli::{
    count, coverage, describe, export, logging, CliConfig, ExportFormat, Overrides,
};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("cadtrail")
        .version(cadtrail_cli::VERSION)
        .about("Classify and count CAD audit-trail actions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log level (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("count")
                .about("Aggregate every audit trail in a directory")
                .arg(
                    Arg::new("dir")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory searched recursively for .csv files"),
                )
                .arg(
                    Arg::new("separate-users")
                        .long("separate-users")
                        .action(ArgAction::SetTrue)
                        .help("One record per user within each file"),
                )
                .arg(
                    Arg::new("best-effort")
                        .long("best-effort")
                        .action(ArgAction::SetTrue)
                        .help("Skip malformed files instead of aborting"),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .action(ArgAction::SetTrue)
                        .help("Aggregate files in parallel"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output path, - for stdout [default: Counts.csv]"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(ExportFormat::NAMES)
                        .help("Output format [default: csv]"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Print the classification of each description")
                .arg(
                    Arg::new("description")
                        .required(true)
                        .num_args(1..)
                        .help("Action descriptions"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file with extra rules"),
                ),
        )
        .subcommand(
            Command::new("coverage")
                .about("List descriptions no rule recognises")
                .arg(
                    Arg::new("dir")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory searched recursively for .csv files"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .default_value("20")
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of descriptions to print"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file with extra rules"),
                ),
        )
}

fn load_config(args: &ArgMatches) -> Result<CliConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(CliConfig::default()),
    }
}

fn required_dir(args: &ArgMatches) -> Result<&Path> {
    args.get_one::<PathBuf>("dir")
        .map(PathBuf::as_path)
        .context("missing directory argument")
}

fn run_count(args: &ArgMatches) -> Result<ExitCode> {
    let dir = required_dir(args)?;
    let format = args
        .get_one::<String>("format")
        .map(|name| name.parse::<ExportFormat>())
        .transpose()?;
    let overrides = Overrides {
        separate_users: args.get_flag("separate-users"),
        best_effort: args.get_flag("best-effort"),
        parallel: args.get_flag("parallel"),
        output: args.get_one::<PathBuf>("output").cloned(),
        format,
    };
    let config = load_config(args)?.with_overrides(&overrides);

    let run = count(dir, &config)
        .with_context(|| format!("counting audit trails in {}", dir.display()))?;
    let output = config.output();
    export(&run.report.table, config.format(), &output)
        .with_context(|| format!("writing counts to {}", output.display()))?;

    for failure in &run.report.failures {
        eprintln!("skipped {}: {}", failure.source_id, failure.error);
    }
    for path in &run.unreadable {
        eprintln!("skipped unreadable {}", path.display());
    }

    Ok(if run.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn run_classify(args: &ArgMatches) -> Result<ExitCode> {
    let classifier = load_config(args)?.classifier();
    for description in args.get_many::<String>("description").into_iter().flatten() {
        println!("{}", describe(&classifier, description));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_coverage(args: &ArgMatches) -> Result<ExitCode> {
    let dir = required_dir(args)?;
    let limit = args.get_one::<usize>("limit").copied().unwrap_or(20);
    let classifier = load_config(args)?.classifier();

    let tally = coverage(dir, &classifier)
        .with_context(|| format!("scanning audit trails in {}", dir.display()))?;

    println!(
        "{} of {} rows unclassified",
        tally.unclassified_rows(),
        tally.rows_seen()
    );
    for (description, count) in tally.gaps().into_iter().take(limit) {
        println!("{count:>8}  {description}");
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();
    logging::init(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("count", args)) => run_count(args),
        Some(("classify", args)) => run_classify(args),
        Some(("coverage", args)) => run_coverage(args),
        _ => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn count_flags_parse() {
        let matches = cli()
            .try_get_matches_from([
                "cadtrail",
                "count",
                "logs",
                "--separate-users",
                "--format",
                "json",
                "-o",
                "-",
                "-vv",
            ])
            .unwrap();

        assert_eq!(matches.get_count("verbose"), 2);
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "count");
        assert!(args.get_flag("separate-users"));
        assert!(!args.get_flag("parallel"));
        assert_eq!(args.get_one::<String>("format").unwrap(), "json");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(cli()
            .try_get_matches_from(["cadtrail", "count", "logs", "--format", "xml"])
            .is_err());
    }
}
