//! Intermediate representation types for body definition data.
//!
//! These types mirror the PhysicsEditor `bodydef` XML schema one-to-one and
//! hold raw, unscaled values. The fixture discriminator is kept as written;
//! matching it against the shape data is done when building shapes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Fixture type
// ============================================================================

/// Shape kind selected by a fixture's `<fixture_type>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixtureType {
    /// Vertex data in `<polygons>`, built as a chain.
    Polygon,
    /// Center and radius in `<circle>`.
    Circle,
}

impl FixtureType {
    /// Parse a fixture type, ignoring case. Surrounding whitespace is not
    /// stripped.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "POLYGON" => Some(Self::Polygon),
            "CIRCLE" => Some(Self::Circle),
            _ => None,
        }
    }

    /// Canonical spelling used by PhysicsEditor.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polygon => "POLYGON",
            Self::Circle => "CIRCLE",
        }
    }
}

// ============================================================================
// Circle
// ============================================================================

/// The `<circle r=".." x=".." y=".."/>` element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawCircle {
    /// Radius (`r` attribute).
    pub radius: f64,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
}

impl RawCircle {
    /// Create a circle record.
    #[must_use]
    pub fn new(radius: f64, x: f64, y: f64) -> Self {
        Self { radius, x, y }
    }
}

// ============================================================================
// Fixture
// ============================================================================

/// A `<fixture>` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFixture {
    /// Density (0 if absent).
    pub density: f64,
    /// Friction coefficient (0 if absent).
    pub friction: f64,
    /// Restitution (0 if absent).
    pub restitution: f64,
    /// Discriminator text as written, e.g. `POLYGON`.
    pub fixture_type: String,
    /// Text of every `<polygon>` element, in document order.
    pub polygons: Vec<String>,
    /// The `<circle>` element, if present.
    pub circle: Option<RawCircle>,
}

impl RawFixture {
    /// Create a fixture with the given discriminator and no shape data.
    #[must_use]
    pub fn new(fixture_type: impl Into<String>) -> Self {
        Self {
            fixture_type: fixture_type.into(),
            ..Default::default()
        }
    }

    /// Set density, friction and restitution.
    #[must_use]
    pub fn with_material(mut self, density: f64, friction: f64, restitution: f64) -> Self {
        self.density = density;
        self.friction = friction;
        self.restitution = restitution;
        self
    }

    /// Append a `<polygon>` vertex string.
    #[must_use]
    pub fn with_polygon(mut self, polygon: impl Into<String>) -> Self {
        self.polygons.push(polygon.into());
        self
    }

    /// Set the circle element.
    #[must_use]
    pub fn with_circle(mut self, circle: RawCircle) -> Self {
        self.circle = Some(circle);
        self
    }
}

// ============================================================================
// Body
// ============================================================================

/// A `<body name="..">` element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawBody {
    /// Body name (empty if the attribute is absent).
    pub name: String,
    /// Fixtures in document order.
    pub fixtures: Vec<RawFixture>,
}

impl RawBody {
    /// Create a body with no fixtures.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixtures: Vec::new(),
        }
    }

    /// Add a fixture.
    #[must_use]
    pub fn with_fixture(mut self, fixture: RawFixture) -> Self {
        self.fixtures.push(fixture);
        self
    }
}

// ============================================================================
// Document
// ============================================================================

/// A decoded `<bodydef>` document.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyDefDocument {
    /// Bodies in document order. Names may repeat.
    pub bodies: Vec<RawBody>,
}

impl BodyDefDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body.
    #[must_use]
    pub fn with_body(mut self, body: RawBody) -> Self {
        self.bodies.push(body);
        self
    }

    /// Number of `<body>` elements.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of `<fixture>` elements across all bodies.
    #[must_use]
    pub fn fixture_count(&self) -> usize {
        self.bodies.iter().map(|b| b.fixtures.len()).sum()
    }

    /// Get all body names, duplicates included.
    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.name.as_str())
    }
}
