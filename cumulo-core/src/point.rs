//! Point type and the `x,y,z` line format.

use std::{fmt, num::ParseIntError, str::FromStr};

use thiserror::Error;

/// An immutable 3-D coordinate with signed integer components.
///
/// Points are identified by their index in the input-ordered list; the type
/// itself carries no identity.
///
/// # Examples
/// ```
/// use cumulo_core::Point;
///
/// let point: Point = "7,-3,12".parse()?;
/// assert_eq!(point.x(), 7);
/// assert_eq!(point.y(), -3);
/// assert_eq!(point.z(), 12);
/// # Ok::<(), cumulo_core::PointParseError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Point {
    x: i64,
    y: i64,
    z: i64,
}

impl Point {
    /// Creates a point from its components.
    #[must_use]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> i64 { self.x }

    /// Returns the y component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> i64 { self.y }

    /// Returns the z component.
    #[must_use]
    #[rustfmt::skip]
    pub const fn z(&self) -> i64 { self.z }

    /// Computes the Euclidean distance to `other`.
    ///
    /// The squared differences accumulate in `f64` before the square root, so
    /// the result is exact for the coordinate magnitudes this crate targets.
    ///
    /// # Examples
    /// ```
    /// use cumulo_core::Point;
    ///
    /// let origin = Point::new(0, 0, 0);
    /// let unit = Point::new(1, 0, 0);
    /// assert_eq!(origin.distance_to(&unit), 1.0);
    /// assert_eq!(origin.distance_to(&origin), 0.0);
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        let dz = self.z as f64 - other.z as f64;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Errors produced while parsing a point from its `x,y,z` text form.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PointParseError {
    /// The line did not contain exactly three comma-separated fields.
    #[error("expected 3 comma-separated coordinates, found {found}")]
    FieldCount {
        /// Number of fields the line actually contained.
        found: usize,
    },
    /// One of the fields was not a valid signed integer.
    #[error("invalid {axis} coordinate: {source}")]
    Coordinate {
        /// Axis label for the offending field (`x`, `y`, or `z`).
        axis: &'static str,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for Point {
    type Err = PointParseError;

    /// Parses `x,y,z` with optional surrounding whitespace per field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').collect();
        let [x, y, z] = fields.as_slice() else {
            return Err(PointParseError::FieldCount {
                found: fields.len(),
            });
        };

        let parse_axis = |raw: &str, axis: &'static str| {
            raw.trim()
                .parse::<i64>()
                .map_err(|source| PointParseError::Coordinate { axis, source })
        };

        Ok(Self {
            x: parse_axis(x, "x")?,
            y: parse_axis(y, "y")?,
            z: parse_axis(z, "z")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("0,0,0", Point::new(0, 0, 0))]
    #[case("7,-3,12", Point::new(7, -3, 12))]
    #[case(" 1 , 2 , 3 ", Point::new(1, 2, 3))]
    #[case("-9223372036854775808,0,9223372036854775807", Point::new(i64::MIN, 0, i64::MAX))]
    fn parses_valid_lines(#[case] raw: &str, #[case] expected: Point) {
        let point: Point = raw.parse().expect("line must parse");
        assert_eq!(point, expected);
    }

    #[rstest]
    #[case("1,2", 2)]
    #[case("1,2,3,4", 4)]
    #[case("", 1)]
    fn rejects_wrong_field_count(#[case] raw: &str, #[case] found: usize) {
        let err = raw.parse::<Point>().expect_err("line must not parse");
        assert_eq!(err, PointParseError::FieldCount { found });
    }

    #[rstest]
    #[case("a,2,3", "x")]
    #[case("1,2.5,3", "y")]
    #[case("1,2,", "z")]
    fn rejects_non_integer_coordinates(#[case] raw: &str, #[case] expected_axis: &str) {
        let err = raw.parse::<Point>().expect_err("line must not parse");
        assert!(matches!(
            err,
            PointParseError::Coordinate { axis, .. } if axis == expected_axis
        ));
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Point::new(1, 2, 3);
        let b = Point::new(-4, 0, 9);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn distance_matches_known_value() {
        let a = Point::new(0, 0, 0);
        let b = Point::new(2, 3, 6);
        assert_eq!(a.distance_to(&b), 7.0);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let point = Point::new(-1, 0, 42);
        let parsed: Point = point.to_string().parse().expect("display form must parse");
        assert_eq!(parsed, point);
    }
}
