//! Ingestion for line-based `x,y,z` coordinate files.

use std::io::{self, BufRead};

use cumulo_core::{Point, PointParseError};
use thiserror::Error;

/// Errors produced while loading a point set.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PointsProviderError {
    /// Reading from the underlying source failed.
    #[error("failed to read input line {line}: {source}")]
    Io {
        /// 1-based number of the line being read when the failure occurred.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line did not parse as an `x,y,z` coordinate.
    #[error("line {line}: {source}")]
    Malformed {
        /// 1-based number of the offending line.
        line: usize,
        /// Underlying coordinate parse failure.
        #[source]
        source: PointParseError,
    },
    /// The source contained no points.
    #[error("input contains no points")]
    EmptyInput,
}

/// A named, fully parsed point set.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use cumulo_providers_points::PointsProvider;
///
/// let provider = PointsProvider::try_from_reader("demo", Cursor::new("1,2,3\n4,5,6\n"))?;
/// assert_eq!(provider.len(), 2);
/// assert_eq!(provider.points()[1].z(), 6);
/// # Ok::<(), cumulo_providers_points::PointsProviderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PointsProvider {
    name: String,
    points: Vec<Point>,
}

impl PointsProvider {
    /// Creates a provider from already-parsed points.
    ///
    /// # Errors
    /// Returns [`PointsProviderError::EmptyInput`] when `points` is empty.
    pub fn new(
        name: impl Into<String>,
        points: Vec<Point>,
    ) -> Result<Self, PointsProviderError> {
        if points.is_empty() {
            return Err(PointsProviderError::EmptyInput);
        }
        Ok(Self {
            name: name.into(),
            points,
        })
    }

    /// Reads and parses one `x,y,z` coordinate per line.
    ///
    /// Blank lines are skipped; every other line must parse. Line numbers in
    /// errors are 1-based and count skipped lines too, so they match what an
    /// editor shows.
    ///
    /// # Errors
    /// Returns [`PointsProviderError::Io`] when reading fails,
    /// [`PointsProviderError::Malformed`] for the first unparseable line, and
    /// [`PointsProviderError::EmptyInput`] when no line yields a point.
    pub fn try_from_reader(
        name: impl Into<String>,
        reader: impl BufRead,
    ) -> Result<Self, PointsProviderError> {
        let mut points = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let raw = line.map_err(|source| PointsProviderError::Io {
                line: line_number,
                source,
            })?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let point =
                trimmed
                    .parse::<Point>()
                    .map_err(|source| PointsProviderError::Malformed {
                        line: line_number,
                        source,
                    })?;
            points.push(point);
        }

        Self::new(name, points)
    }

    /// Returns the provider's human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed points in input order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the provider holds no points.
    ///
    /// Always `false` for a successfully constructed provider; present for
    /// API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
