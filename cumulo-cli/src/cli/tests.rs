//! Unit tests for CLI parsing, execution, and rendering.

use super::commands::derive_data_source_name;
use super::{Cli, CliError, ExecutionSummary, render_summary, run_cli};

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use cumulo_core::ClusterError;
use cumulo_providers_points::PointsProviderError;
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TWO_CLUSTERS: &str = "0,0,0\n1,0,0\n2,0,0\n10,10,10\n11,10,10\n";

fn temp_dir() -> TempDir {
    TempDir::new().expect("temporary directory must be created")
}

fn create_points_file(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf, std::io::Error> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn run_cli_expecting_error(cli: Cli, message: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{message}"),
        Err(err) => err,
    }
}

#[test]
fn parse_defaults_to_the_input_file() {
    let cli = Cli::parse_from(["cumulo"]);
    assert_eq!(cli.input, Path::new("input"));
    assert_eq!(cli.connections, None);
    assert!(!cli.debug);
}

#[test]
fn parse_accepts_positional_path_and_flags() {
    let cli = Cli::parse_from(["cumulo", "points.txt", "--connections", "7", "--debug"]);
    assert_eq!(cli.input, Path::new("points.txt"));
    assert_eq!(cli.connections, Some(7));
    assert!(cli.debug);
}

#[rstest]
#[case::with_extension("/tmp/points.txt", "points")]
#[case::without_extension("/tmp/input", "input")]
#[case::missing_stem("", "points")]
fn derive_data_source_name_selects_expected_name(#[case] raw_path: &str, #[case] expected: &str) {
    let name = derive_data_source_name(Path::new(raw_path));
    assert_eq!(name, expected);
}

#[rstest]
#[case::explicit_budget(Some(2), 2, 3)]
#[case::derived_budget(None, 2, 3)]
fn run_solves_both_traversals(
    #[case] connections: Option<usize>,
    #[case] expected_budget: usize,
    #[case] expected_size_product: u64,
) -> TestResult {
    let dir = temp_dir();
    let path = create_points_file(&dir, "points.txt", TWO_CLUSTERS)?;
    let cli = Cli {
        input: path,
        connections,
        debug: false,
    };
    let summary = run_cli(cli)?;
    assert_eq!(summary.data_source, "points");
    assert_eq!(summary.point_count, 5);
    assert_eq!(summary.connection_budget, expected_budget);
    assert_eq!(summary.size_product, expected_size_product);
    assert_eq!(summary.unification_product, Some(20));
    Ok(())
}

#[test]
fn run_rejects_missing_files() {
    let dir = temp_dir();
    let cli = Cli {
        input: dir.path().join("does-not-exist"),
        connections: None,
        debug: false,
    };
    let err = run_cli_expecting_error(cli, "missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));
}

#[test]
fn run_rejects_malformed_input() -> TestResult {
    let dir = temp_dir();
    let path = create_points_file(&dir, "points.txt", "1,2,3\nnot-a-point\n")?;
    let cli = Cli {
        input: path,
        connections: None,
        debug: false,
    };
    let err = run_cli_expecting_error(cli, "malformed input must fail");
    assert!(matches!(
        err,
        CliError::Points(PointsProviderError::Malformed { line: 2, .. })
    ));
    Ok(())
}

#[test]
fn run_rejects_empty_input() -> TestResult {
    let dir = temp_dir();
    let path = create_points_file(&dir, "points.txt", "\n\n")?;
    let cli = Cli {
        input: path,
        connections: None,
        debug: false,
    };
    let err = run_cli_expecting_error(cli, "empty input must fail");
    assert!(matches!(
        err,
        CliError::Points(PointsProviderError::EmptyInput)
    ));
    Ok(())
}

#[test]
fn run_rejects_budgets_beyond_the_pair_count() -> TestResult {
    let dir = temp_dir();
    let path = create_points_file(&dir, "points.txt", TWO_CLUSTERS)?;
    let cli = Cli {
        input: path,
        connections: Some(1_000),
        debug: false,
    };
    let err = run_cli_expecting_error(cli, "oversized budget must fail");
    assert!(matches!(
        err,
        CliError::Core(ClusterError::BudgetExceedsPairs {
            budget: 1_000,
            pair_count: 10
        })
    ));
    Ok(())
}

#[test]
fn run_surfaces_too_few_components() -> TestResult {
    // Two points collapse to one component after a single connection, so the
    // three-way size ranking cannot be computed.
    let dir = temp_dir();
    let path = create_points_file(&dir, "points.txt", "0,0,0\n1,1,1\n")?;
    let cli = Cli {
        input: path,
        connections: Some(1),
        debug: false,
    };
    let err = run_cli_expecting_error(cli, "two points must fail the ranking");
    assert!(matches!(
        err,
        CliError::Core(ClusterError::TooFewComponents {
            required: 3,
            remaining: 1
        })
    ));
    Ok(())
}

#[rstest]
#[case::unified(Some(20), "Part 1: 3\nPart 2: 20\n")]
#[case::vacuous(None, "Part 1: 3\nPart 2: already unified\n")]
fn render_summary_emits_two_result_lines(
    #[case] unification_product: Option<i64>,
    #[case] expected: &str,
) -> TestResult {
    let summary = ExecutionSummary {
        data_source: "points".into(),
        point_count: 5,
        connection_budget: 2,
        size_product: 3,
        unification_product,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(String::from_utf8(buffer)?, expected);
    Ok(())
}
