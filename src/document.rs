//! Project document round-tripping
//!
//! The response builder treats the project file as opaque text unless a
//! version has to be injected, in which case the content is parsed,
//! mutated, and serialized back through the [`DocumentCodec`] interface.
//! Keeping the round trip behind a trait means the decision logic never
//! touches a concrete document format.

use crate::GeneratorError;

/// Parse/mutate/serialize interface for the project configuration document
pub trait DocumentCodec {
    /// Parsed representation of the document
    type Document;

    /// Parse raw document text
    fn parse(&self, text: &str) -> Result<Self::Document, GeneratorError>;

    /// Overwrite a top-level field with a string value
    fn set_field(&self, document: &mut Self::Document, name: &str, value: &str);

    /// Serialize the document back to text
    fn serialize(&self, document: &Self::Document) -> Result<String, GeneratorError>;
}

/// TOML implementation of [`DocumentCodec`] used for `pyproject.toml`
///
/// Serialization does not preserve the input's formatting or key order;
/// the document is rewritten from the parsed value.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlCodec;

impl DocumentCodec for TomlCodec {
    type Document = toml::Value;

    fn parse(&self, text: &str) -> Result<toml::Value, GeneratorError> {
        text.parse::<toml::Value>()
            .map_err(|e| GeneratorError::DocumentError(e.to_string()))
    }

    fn set_field(&self, document: &mut toml::Value, name: &str, value: &str) {
        if let toml::Value::Table(table) = document {
            table.insert(name.to_string(), toml::Value::String(value.to_string()));
        }
    }

    fn serialize(&self, document: &toml::Value) -> Result<String, GeneratorError> {
        toml::to_string(document).map_err(|e| GeneratorError::DocumentError(e.to_string()))
    }
}
