//! Error types for body definition parsing and loading.

use thiserror::Error;

/// Errors that can occur while decoding or transforming a body definition.
#[derive(Debug, Error)]
pub enum BodyDefError {
    /// XML syntax error (unterminated tags, mismatched nesting, early EOF).
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The input buffer is not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Missing required element.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// A numeric field of the document could not be decoded.
    #[error("invalid value for {field} on {element}: {message}")]
    InvalidValue {
        /// The attribute or child element holding the value.
        field: &'static str,
        /// The element containing the field.
        element: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// Fixture type is neither `POLYGON` nor `CIRCLE`, or does not match the
    /// shape data present in the fixture.
    #[error("invalid fixture type '{fixture_type}' in body '{body}': {message}")]
    InvalidFixtureType {
        /// Name of the body owning the fixture.
        body: String,
        /// The raw discriminator as written in the document.
        fixture_type: String,
        /// Description of the mismatch.
        message: String,
    },

    /// A polygon coordinate token is not a number.
    #[error("invalid coordinate: '{token}'")]
    NumericFormat {
        /// The offending token.
        token: String,
    },
}

impl BodyDefError {
    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        field: &'static str,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field,
            element: element.into(),
            message: message.into(),
        }
    }

    /// Create an invalid fixture type error.
    pub fn invalid_fixture_type(
        body: impl Into<String>,
        fixture_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidFixtureType {
            body: body.into(),
            fixture_type: fixture_type.into(),
            message: message.into(),
        }
    }

    /// Create a numeric format error.
    pub fn numeric_format(token: impl Into<String>) -> Self {
        Self::NumericFormat {
            token: token.into(),
        }
    }

    /// Whether this error was raised while decoding the XML structure,
    /// before any shape was built.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::XmlParse(_)
                | Self::InvalidUtf8(_)
                | Self::MissingElement { .. }
                | Self::InvalidValue { .. }
        )
    }
}

/// Result type for body definition operations.
pub type Result<T> = std::result::Result<T, BodyDefError>;
