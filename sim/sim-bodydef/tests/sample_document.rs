//! End-to-end tests against a PhysicsEditor export.
//!
//! The sample has two bodies: the first with a polygon, a circle and a second
//! polygon fixture; the second with no fixtures at all.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use sim_bodydef::{BodyDefError, ShapeType, parse, parse_bodydef, parse_scaled};

const SAMPLE_XML: &str = r#"
<?xml version="1.0" encoding="UTF-8"?>
<!-- created with http://www.physicseditor.de -->
<bodydef version="1.0">
	<bodies>

		<body name="Zrzut ekranu 2020-08-18 o 15">
            <anchorpoint>0.5000,0.5000</anchorpoint>
			<fixtures>

				<fixture>
					<density>2</density>
					<friction>0</friction>
					<restitution>0</restitution>
					<filter_categoryBits>1</filter_categoryBits>
					<filter_groupIndex>0</filter_groupIndex>
					<filter_maskBits>65535</filter_maskBits>
					<fixture_type>POLYGON</fixture_type>


					<polygons>

                        <polygon>  788.5000, -76.0000  ,  788.5000, 76.0000  ,  -788.5000, 76.0000  ,  -344.5000, 7.0000 </polygon>

					</polygons>

				</fixture>

				<fixture>
					<density>3</density>
					<friction>1</friction>
					<restitution>1</restitution>
					<filter_categoryBits>1</filter_categoryBits>
					<filter_groupIndex>0</filter_groupIndex>
					<filter_maskBits>65535</filter_maskBits>
					<fixture_type>CIRCLE</fixture_type>


                    <circle r="20.000" x="-687.500" y="-12.000"/>

				</fixture>

				<fixture>
					<density>2</density>
					<friction>0</friction>
					<restitution>0</restitution>
					<filter_categoryBits>1</filter_categoryBits>
					<filter_groupIndex>0</filter_groupIndex>
					<filter_maskBits>65535</filter_maskBits>
					<fixture_type>POLYGON</fixture_type>


					<polygons>

                        <polygon>  -356.5000, -14.0000  ,  -396.5000, -14.0000  ,  -396.5000, -54.0000 </polygon>

					</polygons>

				</fixture>

			</fixtures>
		</body>

		<body name="Zrzut ekranu 2020-09-2 o 11">
            <anchorpoint>0.5000,0.5040</anchorpoint>
			<fixtures>

			</fixtures>
		</body>

	</bodies>
	<metadata>
		<format>1</format>
		<ptm_ratio>32</ptm_ratio>
	</metadata>
</bodydef>
"#;

#[test]
fn parses_body_data() {
    let bodies = parse(SAMPLE_XML.as_bytes()).expect("parse should be successful");

    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0].name, "Zrzut ekranu 2020-08-18 o 15");
    assert_eq!(bodies[0].shapes.len(), 3);

    assert_eq!(bodies[1].name, "Zrzut ekranu 2020-09-2 o 11");
    assert_eq!(bodies[1].shapes.len(), 0);
}

#[test]
fn parses_fixture_data() {
    let bodies = parse(SAMPLE_XML.as_bytes()).expect("parse should be successful");

    let first = &bodies[0].shapes[0];
    assert_eq!(first.restitution, 0.0);
    assert_eq!(first.friction, 0.0);
    assert_eq!(first.density, 2.0);
    assert_eq!(first.shape.shape_type(), ShapeType::Chain);

    let second = &bodies[0].shapes[1];
    assert_eq!(second.restitution, 1.0);
    assert_eq!(second.friction, 1.0);
    assert_eq!(second.density, 3.0);
    assert_eq!(second.shape.shape_type(), ShapeType::Circle);

    assert_eq!(bodies[0].shapes[2].shape.shape_type(), ShapeType::Chain);
}

#[test]
fn parses_polygon_data() {
    let bodies = parse(SAMPLE_XML.as_bytes()).expect("parse should be successful");

    let chain = bodies[0].shapes[0].shape.as_chain().expect("chain");
    assert_eq!(chain.len(), 4);

    assert_eq!(chain[0].x, 788.5);
    assert_eq!(chain[0].y, -76.0);
    assert_eq!(chain[1].x, 788.5);
    assert_eq!(chain[1].y, 76.0);
    assert_eq!(chain[2].x, -788.5);
    assert_eq!(chain[2].y, 76.0);
    assert_eq!(chain[3].x, -344.5);
    assert_eq!(chain[3].y, 7.0);

    let chain = bodies[0].shapes[2].shape.as_chain().expect("chain");
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[2].x, -396.5);
    assert_eq!(chain[2].y, -54.0);
}

#[test]
fn parses_circle_data() {
    let bodies = parse(SAMPLE_XML.as_bytes()).expect("parse should be successful");

    let (center, radius) = bodies[0].shapes[1].shape.as_circle().expect("circle");
    assert_eq!(radius, 20.0);
    assert_eq!(center.x, -687.5);
    assert_eq!(center.y, -12.0);
}

#[test]
fn scales_fixtures() {
    let bodies = parse_scaled(SAMPLE_XML.as_bytes(), 2.0).expect("parse should be successful");

    let chain = bodies[0].shapes[0].shape.as_chain().expect("chain");
    assert_relative_eq!(chain[0].x, 788.5 * 2.0);
    assert_relative_eq!(chain[0].y, -76.0 * 2.0);

    let (center, radius) = bodies[0].shapes[1].shape.as_circle().expect("circle");
    assert_relative_eq!(radius, 20.0 * 2.0);
    assert_relative_eq!(center.x, -687.5 * 2.0);
    assert_relative_eq!(center.y, -12.0 * 2.0);

    // Material is never scaled
    assert_eq!(bodies[0].shapes[1].density, 3.0);
}

#[test]
fn mirrors_with_negative_scale() {
    let bodies = parse_scaled(SAMPLE_XML.as_bytes(), -1.0).expect("parse should be successful");

    let chain = bodies[0].shapes[0].shape.as_chain().expect("chain");
    assert_eq!(chain[0].x, -788.5);
    assert_eq!(chain[0].y, 76.0);

    let (_, radius) = bodies[0].shapes[1].shape.as_circle().expect("circle");
    assert_eq!(radius, -20.0);
}

#[test]
fn decodes_sample_document() {
    let document = parse_bodydef(SAMPLE_XML.as_bytes()).expect("decode should be successful");
    assert_eq!(document.body_count(), 2);
    assert_eq!(document.fixture_count(), 3);
    assert_eq!(document.bodies[0].fixtures[1].fixture_type, "CIRCLE");
}

#[test]
fn rejects_invalid_xml() {
    let result = parse(b"<xml> this in invalid xml </xml>");
    assert!(result.is_err());
}

#[test]
fn rejects_unclosed_root() {
    let truncated = SAMPLE_XML.replace("</bodydef>", "");
    let result = parse(truncated.as_bytes());
    assert!(matches!(result, Err(BodyDefError::XmlParse(_))));
}

#[test]
fn rejects_unknown_fixture_type() {
    let xml = SAMPLE_XML.replacen(
        "<fixture_type>CIRCLE</fixture_type>",
        "<fixture_type>CAPSULE</fixture_type>",
        1,
    );
    let err = parse(xml.as_bytes()).expect_err("should fail");

    match err {
        BodyDefError::InvalidFixtureType {
            body, fixture_type, ..
        } => {
            assert_eq!(body, "Zrzut ekranu 2020-08-18 o 15");
            assert_eq!(fixture_type, "CAPSULE");
        }
        other => panic!("expected InvalidFixtureType, got {other:?}"),
    }
}

#[test]
fn rejects_circle_fixture_without_circle() {
    let xml = SAMPLE_XML.replace(r#"<circle r="20.000" x="-687.500" y="-12.000"/>"#, "");
    let result = parse(xml.as_bytes());
    assert!(matches!(result, Err(BodyDefError::InvalidFixtureType { .. })));
}

#[test]
fn rejects_non_numeric_coordinate() {
    let xml = SAMPLE_XML.replace("-344.5000, 7.0000", "-344.5000, abc");
    let err = parse(xml.as_bytes()).expect_err("should fail");
    assert!(matches!(err, BodyDefError::NumericFormat { ref token } if token == "abc"));
}

#[test]
fn rejects_padded_fixture_type() {
    let xml = SAMPLE_XML.replacen(
        "<fixture_type>POLYGON</fixture_type>",
        "<fixture_type>  POLYGON  </fixture_type>",
        1,
    );
    let err = parse(xml.as_bytes()).expect_err("should fail");

    match err {
        BodyDefError::InvalidFixtureType { fixture_type, .. } => {
            assert_eq!(fixture_type, "  POLYGON  ");
        }
        other => panic!("expected InvalidFixtureType, got {other:?}"),
    }
}

#[test]
fn accepts_unicode_case_fixture_type() {
    let xml = SAMPLE_XML.replacen(
        "<fixture_type>CIRCLE</fixture_type>",
        "<fixture_type>c\u{131}rcle</fixture_type>",
        1,
    );
    let bodies = parse(xml.as_bytes()).expect("parse should be successful");
    assert_eq!(bodies[0].shapes[1].shape.shape_type(), ShapeType::Circle);
}
