use bifurcate::cli::{Cli, Commands, ConfigCommands, PointFormat};
use bifurcate::DisplayMode;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "bifurcate",
        "run",
        "--range-start",
        "2.8",
        "--range-end",
        "4.0",
        "--step-size",
        "0.0005",
        "-k",
        "8",
        "--output",
        "points.ndjson",
        "--format",
        "ndjson",
        "--screen",
        "--mode",
        "polar",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.range_start, Some(2.8));
            assert_eq!(args.range_end, Some(4.0));
            assert_eq!(args.step_size, Some(0.0005));
            assert_eq!(args.max_concurrency, Some(8));
            assert_eq!(args.output, Some(PathBuf::from("points.ndjson")));
            assert_eq!(args.format, PointFormat::Ndjson);
            assert!(args.screen);
            assert_eq!(args.mode, Some(DisplayMode::Polar));
            assert!(args.max_iterations.is_none());
        }
        Commands::Config(_) => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["bifurcate", "run"]).unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert!(args.range_start.is_none());
            assert_eq!(args.format, PointFormat::Csv);
            assert!(!args.screen);
            assert!(!args.no_progress);
            assert!(args.mode.is_none());
        }
        Commands::Config(_) => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_parse_negative_range_start() {
    let cli = Cli::try_parse_from(["bifurcate", "run", "--range-start", "-1.5"]).unwrap();

    match cli.command {
        Commands::Run(args) => assert_eq!(args.range_start, Some(-1.5)),
        Commands::Config(_) => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "bifurcate",
        "config",
        "show",
        "--json",
        "-vv",
        "--config",
        "sweep.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config, Some(PathBuf::from("sweep.yaml")));
    assert!(matches!(
        cli.command,
        Commands::Config(ConfigCommands::Show)
    ));
}

#[test]
fn test_parse_config_validate() {
    let cli = Cli::try_parse_from(["bifurcate", "config", "validate"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config(ConfigCommands::Validate)
    ));
}

#[test]
fn test_rejects_unknown_format() {
    let result = Cli::try_parse_from(["bifurcate", "run", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_rejects_non_numeric_step() {
    let result = Cli::try_parse_from(["bifurcate", "run", "--step-size", "tiny"]);
    assert!(result.is_err());
}

#[test]
fn test_requires_subcommand() {
    assert!(Cli::try_parse_from(["bifurcate"]).is_err());
}
