//! protoc-gen-pyproject library
//!
//! This crate provides the generation logic for emitting a Python project
//! file (`pyproject.toml`) and an optional `py.typed` marker file from a
//! protoc CodeGeneratorRequest.

#![deny(warnings)]
#![deny(missing_docs)]

pub mod document;
pub mod generator;
pub mod params;
pub mod vcs;

use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use thiserror::Error;

/// Errors that can occur during project file generation
///
/// These are the fatal tier: anything that ends up here aborts the whole
/// invocation instead of travelling in the response `error` field.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Failed to decode the CodeGeneratorRequest
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Reading the project file failed for a reason other than absence
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        /// Path the read was attempted at
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The project file could not be parsed or re-serialized as a document
    #[error("Invalid project document: {0}")]
    DocumentError(String),

    /// No version could be derived from version control metadata
    #[error("Failed to derive version from VCS: {0}")]
    VcsError(String),
}

/// Generate the project file response from a decoded CodeGeneratorRequest
///
/// This is the main entry point for the generator. The returned response
/// either carries the output files or a reported error message, never both.
pub fn generate(request: CodeGeneratorRequest) -> Result<CodeGeneratorResponse, GeneratorError> {
    generator::generate(request)
}

/// Generate the project file response from raw request bytes
///
/// Decodes the CodeGeneratorRequest with prost before delegating to
/// [`generate`]. A decode failure is a fatal fault.
pub fn generate_from_bytes(bytes: &[u8]) -> Result<CodeGeneratorResponse, GeneratorError> {
    generator::generate_from_bytes(bytes)
}
