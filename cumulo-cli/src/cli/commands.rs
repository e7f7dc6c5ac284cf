//! Command implementation and argument parsing for the cumulo CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use cumulo_core::{
    ClusterError, pairwise_distances, prefix_cluster, scan_until_unified, sort_by_distance,
};
use cumulo_providers_points::{PointsProvider, PointsProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// How many of the largest components feed the size product.
const RANKED_COMPONENTS: usize = 3;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cumulo",
    about = "Cluster 3-D coordinates by ascending pairwise distance."
)]
pub struct Cli {
    /// Input file with one `x,y,z` coordinate per line.
    #[arg(default_value = "input")]
    pub input: PathBuf,

    /// Number of shortest pairs to connect before ranking component sizes
    /// (defaults to half the point count).
    #[arg(long)]
    pub connections: Option<usize>,

    /// Emit verbose tracing while solving; results are unaffected.
    #[arg(long)]
    pub debug: bool,
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Point ingestion failed.
    #[error(transparent)]
    Points(#[from] PointsProviderError),
    /// A clustering traversal failed.
    #[error(transparent)]
    Core(#[from] ClusterError),
}

/// Summarises the outcome of a solver run.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name derived for the input data.
    pub data_source: String,
    /// Number of points parsed from the input.
    pub point_count: usize,
    /// Connection budget applied to the bounded-prefix traversal.
    pub connection_budget: usize,
    /// Product of the three largest component sizes after the prefix walk.
    pub size_product: u64,
    /// Product of the unifying pair's x-coordinates, or `None` when the set
    /// was vacuously unified (at most one point).
    pub unification_product: Option<i64>,
}

/// Executes the solver pipeline described by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be read or parsed, or when a
/// traversal fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cumulo_cli::cli::{Cli, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0,0\n1,0,0\n2,0,0\n10,10,10\n11,10,10\n")?;
/// let cli = Cli {
///     input: file.path().to_path_buf(),
///     connections: Some(2),
///     debug: false,
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.size_product, 3);
/// assert_eq!(summary.unification_product, Some(20));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(input = field::Empty, connections = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("input", field::display(cli.input.display()));
    span.record(
        "connections",
        field::display(
            cli.connections
                .map_or_else(|| "<derived>".to_owned(), |value| value.to_string()),
        ),
    );

    let name = derive_data_source_name(&cli.input);
    let reader = open_points_reader(&cli.input)?;
    let provider = PointsProvider::try_from_reader(name, reader)?;
    let points = provider.points();

    let connection_budget = cli.connections.unwrap_or(points.len() / 2);

    let mut pairs = pairwise_distances(points);
    sort_by_distance(&mut pairs);

    let clustering = prefix_cluster(points.len(), &pairs, connection_budget)?;
    let size_product = clustering.largest_product(RANKED_COMPONENTS)?;

    let unification_product = scan_until_unified(points.len(), &pairs)?
        .map(|unification| unification.x_product(points))
        .transpose()?;

    let summary = ExecutionSummary {
        data_source: provider.name().to_owned(),
        point_count: points.len(),
        connection_budget,
        size_product,
        unification_product,
    };

    info!(
        data_source = summary.data_source.as_str(),
        points = summary.point_count,
        connection_budget = summary.connection_budget,
        "solver run completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.open_points_reader", err, fields(path = field::Empty))]
fn open_points_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "points".to_owned())
}

/// Renders `summary` to `writer` as the two result lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use cumulo_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     point_count: 5,
///     connection_budget: 2,
///     size_product: 3,
///     unification_product: Some(20),
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer.into_inner())?, "Part 1: 3\nPart 2: 20\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "Part 1: {}", summary.size_product)?;
    match summary.unification_product {
        Some(product) => writeln!(writer, "Part 2: {product}")?,
        None => writeln!(writer, "Part 2: already unified")?,
    }
    Ok(())
}
