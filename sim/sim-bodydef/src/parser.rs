//! Body definition XML parser.
//!
//! Decodes PhysicsEditor `bodydef` XML into the intermediate representation
//! types. Elements outside the geometry schema (filter bits, anchor point,
//! metadata) are skipped together with their children.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

use crate::error::{BodyDefError, Result};
use crate::types::{BodyDefDocument, RawBody, RawCircle, RawFixture};

/// Parse body definition XML from raw bytes.
///
/// # Errors
///
/// Returns an error if the input is not UTF-8, the XML is malformed, the root
/// element is not `<bodydef>`, or a numeric field cannot be decoded.
pub fn parse_bodydef(bytes: &[u8]) -> Result<BodyDefDocument> {
    let xml = std::str::from_utf8(bytes).map_err(|e| {
        tracing::warn!(error = %e, "unable to parse bodydef XML: input is not UTF-8");
        BodyDefError::from(e)
    })?;
    parse_bodydef_str(xml)
}

/// Parse body definition XML from a string.
///
/// # Errors
///
/// Returns an error if the XML is malformed, the root element is not
/// `<bodydef>`, or a numeric field cannot be decoded.
pub fn parse_bodydef_str(xml: &str) -> Result<BodyDefDocument> {
    // Text is kept verbatim; numeric fields trim their own value and the
    // fixture type must match without padding.
    let mut reader = Reader::from_str(xml);
    parse_bodydef_reader(&mut reader).inspect_err(|e| {
        tracing::warn!(error = %e, "unable to parse bodydef XML");
    })
}

/// Parse a body definition from a reader, stopping after the root element.
fn parse_bodydef_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<BodyDefDocument> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"bodydef" {
                    return parse_document(reader);
                }
                return Err(unexpected_root(e));
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"bodydef" {
                    return Ok(BodyDefDocument::new());
                }
                return Err(unexpected_root(e));
            }
            Ok(Event::Eof) => {
                return Err(BodyDefError::missing_element("bodydef", "empty document"));
            }
            // Declaration, comments, doctype
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }
}

/// Parse the children of `<bodydef>`.
fn parse_document<R: BufRead>(reader: &mut Reader<R>) -> Result<BodyDefDocument> {
    let mut document = BodyDefDocument::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"bodies" => parse_bodies(reader, &mut document.bodies)?,
                    // metadata/format/ptm_ratio
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"bodydef" => break,
            Ok(Event::Eof) => return Err(BodyDefError::XmlParse("unexpected EOF in bodydef".into())),
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(document)
}

/// Parse a `<bodies>` element, appending to `bodies`.
fn parse_bodies<R: BufRead>(reader: &mut Reader<R>, bodies: &mut Vec<RawBody>) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"body" => {
                        let body = parse_body(reader, e)?;
                        bodies.push(body);
                    }
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"body" {
                    // Body with neither anchor point nor fixtures
                    let name = get_attribute_opt(e, "name")?.unwrap_or_default();
                    bodies.push(RawBody::new(name));
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"bodies" => break,
            Ok(Event::Eof) => return Err(BodyDefError::XmlParse("unexpected EOF in bodies".into())),
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}

/// Parse a `<body>` element.
fn parse_body<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<RawBody> {
    let name = get_attribute_opt(start, "name")?.unwrap_or_default();
    let mut body = RawBody::new(name);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"fixtures" => parse_fixtures(reader, &mut body.fixtures)?,
                    // anchorpoint
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"body" => break,
            Ok(Event::Eof) => return Err(BodyDefError::XmlParse("unexpected EOF in body".into())),
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(body)
}

/// Parse a `<fixtures>` element, appending to `fixtures`.
fn parse_fixtures<R: BufRead>(reader: &mut Reader<R>, fixtures: &mut Vec<RawFixture>) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"fixture" => fixtures.push(parse_fixture(reader)?),
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"fixture" {
                    fixtures.push(RawFixture::default());
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"fixtures" => break,
            Ok(Event::Eof) => return Err(BodyDefError::XmlParse("unexpected EOF in fixtures".into())),
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}

/// Parse a `<fixture>` element.
fn parse_fixture<R: BufRead>(reader: &mut Reader<R>) -> Result<RawFixture> {
    let mut fixture = RawFixture::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"density" => {
                        let text = read_text(reader, b"density")?;
                        fixture.density = parse_float(&text, "density", "fixture")?;
                    }
                    b"friction" => {
                        let text = read_text(reader, b"friction")?;
                        fixture.friction = parse_float(&text, "friction", "fixture")?;
                    }
                    b"restitution" => {
                        let text = read_text(reader, b"restitution")?;
                        fixture.restitution = parse_float(&text, "restitution", "fixture")?;
                    }
                    b"fixture_type" => {
                        fixture.fixture_type = read_text(reader, b"fixture_type")?;
                    }
                    b"polygons" => parse_polygons(reader, &mut fixture.polygons)?,
                    b"circle" => {
                        fixture.circle = Some(parse_circle(e)?);
                        skip_element(reader, &elem_name)?;
                    }
                    // filter_categoryBits, filter_groupIndex, filter_maskBits
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"density" => fixture.density = 0.0,
                b"friction" => fixture.friction = 0.0,
                b"restitution" => fixture.restitution = 0.0,
                b"fixture_type" => fixture.fixture_type.clear(),
                b"circle" => fixture.circle = Some(parse_circle(e)?),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"fixture" => break,
            Ok(Event::Eof) => return Err(BodyDefError::XmlParse("unexpected EOF in fixture".into())),
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(fixture)
}

/// Parse a `<polygons>` element, appending each `<polygon>` text to `polygons`.
fn parse_polygons<R: BufRead>(reader: &mut Reader<R>, polygons: &mut Vec<String>) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"polygon" => polygons.push(read_text(reader, b"polygon")?),
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"polygon" {
                    polygons.push(String::new());
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"polygons" => break,
            Ok(Event::Eof) => return Err(BodyDefError::XmlParse("unexpected EOF in polygons".into())),
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}

/// Parse `<circle>` attributes. Absent attributes decode as 0.
fn parse_circle(e: &BytesStart) -> Result<RawCircle> {
    Ok(RawCircle {
        radius: parse_float_attr(e, "r")?,
        x: parse_float_attr(e, "x")?,
        y: parse_float_attr(e, "y")?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get an optional attribute value, unescaped.
fn get_attribute_opt(e: &BytesStart, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| BodyDefError::XmlParse(err.to_string()))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| BodyDefError::XmlParse(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a float attribute, returning 0 if not present.
fn parse_float_attr(e: &BytesStart, name: &'static str) -> Result<f64> {
    match get_attribute_opt(e, name)? {
        Some(value) => parse_float(&value, name, element_name(e)),
        None => Ok(0.0),
    }
}

/// Parse a numeric field. Surrounding whitespace is ignored and an empty
/// value decodes as 0.
fn parse_float(value: &str, field: &'static str, element: impl Into<String>) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse().map_err(|_| {
        BodyDefError::invalid_value(field, element, format!("expected a number, got '{value}'"))
    })
}

/// Read the character data of the current element up to its end tag.
///
/// Nested elements are skipped; only direct text and CDATA are collected.
fn read_text<R: BufRead>(reader: &mut Reader<R>, end: &[u8]) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let value = t
                    .unescape()
                    .map_err(|e| BodyDefError::XmlParse(e.to_string()))?;
                text.push_str(&value);
            }
            Ok(Event::CData(ref c)) => {
                text.push_str(&String::from_utf8_lossy(c));
            }
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                skip_element(reader, &elem_name)?;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == end => break,
            Ok(Event::Eof) => {
                return Err(BodyDefError::XmlParse(format!(
                    "unexpected EOF in {}",
                    String::from_utf8_lossy(end)
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(text)
}

/// Get element name as string for error messages.
fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Error for a document whose first element is not `<bodydef>`.
fn unexpected_root(e: &BytesStart) -> BodyDefError {
    BodyDefError::missing_element("bodydef", format!("document root (found <{}>)", element_name(e)))
}

/// Skip an element and all its children.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<()> {
    tracing::debug!(
        element = %String::from_utf8_lossy(name),
        "skipping element outside the bodydef geometry schema"
    );

    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(BodyDefError::XmlParse(format!(
                    "unexpected EOF in {}",
                    String::from_utf8_lossy(name)
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(BodyDefError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}
