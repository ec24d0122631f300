//! PhysicsEditor body definition loader for 2D physics simulation.
//!
//! This crate parses the `bodydef` XML exported by
//! [PhysicsEditor](https://www.codeandweb.com/physicseditor) and converts it
//! into scaled shape descriptors grouped by body, ready to be turned into
//! fixtures of a 2D rigid-body engine.
//!
//! # Features
//!
//! - Decode `bodydef` XML from bytes or strings
//! - Polygon fixtures as open vertex chains
//! - Circle fixtures as center + radius
//! - Uniform scale factor applied to every coordinate and radius
//! - Optional `serde` support for all records and descriptors
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies** and no physics
//! engine dependency. Each call is independent: no global state, no I/O
//! beyond the buffer passed in.
//!
//! # Example
//!
//! ```
//! use sim_bodydef::{parse_scaled, ShapeType};
//!
//! let xml = r#"
//!     <bodydef version="1.0">
//!         <bodies>
//!             <body name="ball">
//!                 <fixtures>
//!                     <fixture>
//!                         <density>1</density>
//!                         <friction>0.5</friction>
//!                         <restitution>0.2</restitution>
//!                         <fixture_type>CIRCLE</fixture_type>
//!                         <circle r="16" x="0" y="8"/>
//!                     </fixture>
//!                 </fixtures>
//!             </body>
//!         </bodies>
//!     </bodydef>
//! "#;
//!
//! // PhysicsEditor works in pixels; 32 pixels per meter.
//! let bodies = parse_scaled(xml.as_bytes(), 1.0 / 32.0).expect("should parse");
//! assert_eq!(bodies.len(), 1);
//!
//! let fixture = &bodies[0].shapes[0];
//! assert_eq!(fixture.shape.shape_type(), ShapeType::Circle);
//! let (center, radius) = fixture.shape.as_circle().expect("circle");
//! assert_eq!(radius, 0.5);
//! assert_eq!(center.y, 0.25);
//! assert_eq!(fixture.friction, 0.5);
//! ```
//!
//! # Supported Elements
//!
//! - `<bodydef>` / `<bodies>` / `<body name="...">` / `<fixtures>` / `<fixture>`
//! - `<density>`, `<friction>`, `<restitution>` - copied unscaled
//! - `<fixture_type>` - `POLYGON` or `CIRCLE`, case-insensitive
//! - `<polygons>` / `<polygon>` - vertex pairs, `"x, y  ,  x, y"`
//! - `<circle r="..." x="..." y="..."/>`
//!
//! `<anchorpoint>`, `<filter_*>` and `<metadata>` are ignored, as is any
//! other unknown element.

#![doc(html_root_url = "https://docs.rs/sim-bodydef/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::should_implement_trait,
    clippy::float_cmp
)]

mod error;
mod loader;
mod parser;
mod shape;
mod transform;
mod types;

// Re-export main types
pub use error::{BodyDefError, Result};
pub use loader::{BodyDefLoader, parse, parse_scaled};
pub use parser::{parse_bodydef, parse_bodydef_str};
pub use shape::{FixtureDef, ParsedBody, Shape, ShapeType};
pub use transform::{build_fixture, build_shape, parse_vertices};
pub use types::{BodyDefDocument, FixtureType, RawBody, RawCircle, RawFixture};

/// Re-export of the point type used for vertices and circle centers.
pub use nalgebra::Point2;
