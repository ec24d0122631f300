//! Scaled shape descriptors produced from a body definition.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of a [`Shape`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeType {
    /// Open vertex chain.
    Chain,
    /// Circle.
    Circle,
}

/// Geometry of a single fixture, already scaled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// Open polyline through `vertices` in order. The last vertex is not
    /// joined back to the first.
    Chain {
        /// Chain vertices.
        vertices: Vec<Point2<f64>>,
    },
    /// Circle with the given center and radius.
    Circle {
        /// Circle center.
        center: Point2<f64>,
        /// Circle radius.
        radius: f64,
    },
}

impl Shape {
    /// Create a chain shape.
    #[must_use]
    pub fn chain(vertices: Vec<Point2<f64>>) -> Self {
        Self::Chain { vertices }
    }

    /// Create a circle shape.
    #[must_use]
    pub fn circle(center: Point2<f64>, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    /// Get the shape kind.
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Chain { .. } => ShapeType::Chain,
            Self::Circle { .. } => ShapeType::Circle,
        }
    }

    /// Chain vertices, or `None` for a circle.
    #[must_use]
    pub fn as_chain(&self) -> Option<&[Point2<f64>]> {
        match self {
            Self::Chain { vertices } => Some(vertices),
            Self::Circle { .. } => None,
        }
    }

    /// Center and radius, or `None` for a chain.
    #[must_use]
    pub fn as_circle(&self) -> Option<(Point2<f64>, f64)> {
        match self {
            Self::Circle { center, radius } => Some((*center, *radius)),
            Self::Chain { .. } => None,
        }
    }
}

/// A fixture ready to attach to a physics body: material properties plus
/// geometry.
///
/// Material properties are copied from the document unscaled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixtureDef {
    /// Density.
    pub density: f64,
    /// Friction coefficient.
    pub friction: f64,
    /// Restitution (bounciness).
    pub restitution: f64,
    /// Scaled geometry.
    pub shape: Shape,
}

impl FixtureDef {
    /// Create a fixture with zero material properties.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            density: 0.0,
            friction: 0.0,
            restitution: 0.0,
            shape,
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
}

/// A named body and its fixtures, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsedBody {
    /// Body name as written in the document. Not required to be unique.
    pub name: String,
    /// Fixtures in document order.
    pub shapes: Vec<FixtureDef>,
}

impl ParsedBody {
    /// Create a body with no fixtures.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
        }
    }

    /// Number of fixtures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the body has no fixtures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
