//! Fixture record to shape conversion.
//!
//! Each fixture's discriminator is checked against its shape data once, then
//! the geometry is built with every coordinate and radius multiplied by the
//! scale factor. Density, friction and restitution are never scaled.

use std::sync::LazyLock;

use nalgebra::Point2;
use regex::Regex;

use crate::error::{BodyDefError, Result};
use crate::shape::{FixtureDef, Shape};
use crate::types::{FixtureType, RawCircle, RawFixture};

/// Shape data of a fixture whose discriminator has been checked.
#[derive(Debug, Clone, Copy)]
enum FixtureGeometry<'a> {
    Polygon(&'a [String]),
    Circle(&'a RawCircle),
}

impl<'a> FixtureGeometry<'a> {
    /// Match the fixture's discriminator with the shape data it selects.
    fn classify(fixture: &'a RawFixture, body_name: &str) -> Result<Self> {
        match FixtureType::from_str(&fixture.fixture_type) {
            Some(FixtureType::Polygon) => Ok(Self::Polygon(&fixture.polygons)),
            Some(FixtureType::Circle) => match fixture.circle.as_ref() {
                Some(circle) => Ok(Self::Circle(circle)),
                None => {
                    tracing::warn!(
                        body = body_name,
                        "circle element missing from fixture of type CIRCLE"
                    );
                    Err(BodyDefError::invalid_fixture_type(
                        body_name,
                        &fixture.fixture_type,
                        "circle element is missing",
                    ))
                }
            },
            None => {
                tracing::warn!(
                    body = body_name,
                    fixture_type = %fixture.fixture_type,
                    "invalid fixture type"
                );
                Err(BodyDefError::invalid_fixture_type(
                    body_name,
                    &fixture.fixture_type,
                    "expected POLYGON or CIRCLE",
                ))
            }
        }
    }
}

/// Build a fixture definition from a fixture record.
///
/// `body_name` is only used for diagnostics.
///
/// # Errors
///
/// Returns [`BodyDefError::InvalidFixtureType`] if the discriminator is not
/// `POLYGON`/`CIRCLE` or a `CIRCLE` fixture has no circle element, and
/// [`BodyDefError::NumericFormat`] if a polygon coordinate is not a number.
pub fn build_fixture(fixture: &RawFixture, body_name: &str, scale: f64) -> Result<FixtureDef> {
    let shape = build_shape(fixture, body_name, scale)?;
    Ok(FixtureDef::new(shape).with_material(
        fixture.density,
        fixture.friction,
        fixture.restitution,
    ))
}

/// Build the scaled geometry of a fixture record.
///
/// # Errors
///
/// See [`build_fixture`].
pub fn build_shape(fixture: &RawFixture, body_name: &str, scale: f64) -> Result<Shape> {
    match FixtureGeometry::classify(fixture, body_name)? {
        FixtureGeometry::Polygon(polygons) => build_chain(polygons, scale),
        FixtureGeometry::Circle(circle) => Ok(build_circle(circle, scale)),
    }
}

/// Concatenate the vertices of every polygon into one chain.
fn build_chain(polygons: &[String], scale: f64) -> Result<Shape> {
    let mut vertices = Vec::new();
    for polygon in polygons {
        for point in parse_vertices(polygon)? {
            vertices.push(Point2::new(point.x * scale, point.y * scale));
        }
    }
    Ok(Shape::chain(vertices))
}

fn build_circle(circle: &RawCircle, scale: f64) -> Shape {
    Shape::circle(
        Point2::new(circle.x * scale, circle.y * scale),
        circle.radius * scale,
    )
}

/// Parse a `<polygon>` vertex string into unscaled points.
///
/// Pairs are separated by a comma with whitespace on both sides
/// (`"1, 2  ,  3, 4"`); within a pair, x and y are separated by a comma
/// with optional whitespace.
///
/// # Errors
///
/// Returns [`BodyDefError::NumericFormat`] carrying the offending token if a
/// coordinate is not a number, or carrying the whole pair if it does not
/// have exactly two coordinates.
pub fn parse_vertices(polygon: &str) -> Result<Vec<Point2<f64>>> {
    split_pairs(polygon).into_iter().map(parse_pair).collect()
}

/// Separator between vertex pairs: a comma with ASCII whitespace on both sides.
#[allow(clippy::expect_used)]
static PAIR_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\n\f\r ]+,[\t\n\f\r ]+").expect("pair separator pattern is valid")
});

fn split_pairs(s: &str) -> Vec<&str> {
    PAIR_SEPARATOR.split(s).collect()
}

fn parse_pair(pair: &str) -> Result<Point2<f64>> {
    let pair = pair.trim();
    let mut coords = pair.split(',');
    match (coords.next(), coords.next(), coords.next()) {
        (Some(x), Some(y), None) => Ok(Point2::new(parse_coordinate(x)?, parse_coordinate(y)?)),
        _ => {
            tracing::warn!(token = pair, "polygon vertex is not an x, y pair");
            Err(BodyDefError::numeric_format(pair))
        }
    }
}

fn parse_coordinate(token: &str) -> Result<f64> {
    let token = token.trim();
    token.parse().map_err(|_| {
        tracing::warn!(token, "invalid polygon coordinate");
        BodyDefError::numeric_format(token)
    })
}
