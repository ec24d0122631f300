//! Body definition loading: decode, build shapes, group by body.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::{parse_bodydef, parse_bodydef_str};
use crate::shape::ParsedBody;
use crate::transform::build_fixture;
use crate::types::{BodyDefDocument, RawBody};

/// Body definition loader with configuration options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyDefLoader {
    /// Factor applied to every coordinate and radius (default: 1.0).
    ///
    /// Zero and negative values are accepted; a negative scale mirrors the
    /// geometry through the origin.
    pub scale: f64,
}

impl Default for BodyDefLoader {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl BodyDefLoader {
    /// Create a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Load bodies from raw XML bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or any fixture is invalid. No
    /// bodies are returned on failure.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Vec<ParsedBody>> {
        let document = parse_bodydef(bytes)?;
        self.load_document(&document)
    }

    /// Load bodies from an XML string.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or any fixture is invalid.
    pub fn load_str(&self, xml: &str) -> Result<Vec<ParsedBody>> {
        let document = parse_bodydef_str(xml)?;
        self.load_document(&document)
    }

    /// Build bodies from an already decoded document.
    ///
    /// # Errors
    ///
    /// Returns an error if any fixture is invalid.
    pub fn load_document(&self, document: &BodyDefDocument) -> Result<Vec<ParsedBody>> {
        let bodies = document
            .bodies
            .iter()
            .map(|body| self.load_body(body))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            bodies = bodies.len(),
            fixtures = document.fixture_count(),
            scale = self.scale,
            "loaded body definitions"
        );

        Ok(bodies)
    }

    /// Build one body, keeping fixture order.
    fn load_body(&self, body: &RawBody) -> Result<ParsedBody> {
        let shapes = body
            .fixtures
            .iter()
            .map(|fixture| build_fixture(fixture, &body.name, self.scale))
            .collect::<Result<Vec<_>>>()?;

        Ok(ParsedBody {
            name: body.name.clone(),
            shapes,
        })
    }
}

/// Parse a body definition at unit scale.
///
/// Equivalent to `parse_scaled(bytes, 1.0)`.
///
/// # Errors
///
/// Returns an error if decoding fails or any fixture is invalid.
pub fn parse(bytes: &[u8]) -> Result<Vec<ParsedBody>> {
    BodyDefLoader::default().load_bytes(bytes)
}

/// Parse a body definition, multiplying every coordinate and radius by
/// `scale`.
///
/// # Errors
///
/// Returns an error if decoding fails or any fixture is invalid.
pub fn parse_scaled(bytes: &[u8], scale: f64) -> Result<Vec<ParsedBody>> {
    BodyDefLoader::new().with_scale(scale).load_bytes(bytes)
}
