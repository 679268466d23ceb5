//! Response construction for the pyproject generation request
//!
//! Decides which output files to emit based on the parsed plugin
//! parameters and the state of the project file on disk: the project file
//! itself (optionally with its `version` rewritten from VCS metadata) and,
//! unless suppressed, a `py.typed` marker inside the generated package.

use std::fs;
use std::path::PathBuf;

use prost::Message;
use prost_types::compiler::code_generator_response::File;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::document::{DocumentCodec, TomlCodec};
use crate::params::{parse_params, Params};
use crate::vcs::{GitVersion, VersionSource};
use crate::GeneratorError;

/// Project file consumed when `gen_pyproject` does not override the path
const DEFAULT_PROJECT_FILE: &str = "pyproject.toml";

/// Name of the emitted project file, regardless of the source path it was
/// read from
const OUTPUT_PROJECT_FILE: &str = "pyproject.toml";

/// Marker file signalling that the generated package supports static type
/// checking
const PY_TYPED_FILE: &str = "py.typed";

/// Builds a CodeGeneratorResponse from parsed parameters and the
/// filesystem state under a root directory
///
/// The document codec and version source are injected so the decision
/// logic has no dependency on a concrete document format or VCS.
pub struct ResponseBuilder<D = TomlCodec, V = GitVersion> {
    codec: D,
    versions: V,
    root: PathBuf,
}

impl ResponseBuilder {
    /// Builder over the process working directory with the default TOML
    /// codec and git-derived versions
    pub fn new() -> Self {
        ResponseBuilder {
            codec: TomlCodec,
            versions: GitVersion,
            root: PathBuf::from("."),
        }
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, V> ResponseBuilder<D, V> {
    /// Replace the directory the project file is resolved against
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Replace the document codec
    pub fn with_codec<C: DocumentCodec>(self, codec: C) -> ResponseBuilder<C, V> {
        ResponseBuilder {
            codec,
            versions: self.versions,
            root: self.root,
        }
    }

    /// Replace the version source
    pub fn with_version_source<W: VersionSource>(self, versions: W) -> ResponseBuilder<D, W> {
        ResponseBuilder {
            codec: self.codec,
            versions,
            root: self.root,
        }
    }
}

impl<D: DocumentCodec, V: VersionSource> ResponseBuilder<D, V> {
    /// Decide which output files to emit for the given parameters
    ///
    /// Returns a response carrying either the output files or a reported
    /// error message, never both. Environment faults (unreadable project
    /// file, broken document, no VCS metadata) surface as `Err` instead of
    /// a reported error.
    pub fn build(&self, params: &Params) -> Result<CodeGeneratorResponse, GeneratorError> {
        // The override key is trusted verbatim as a filesystem path; the
        // invoking build pipeline owns what it points at.
        let project_path = params
            .get("gen_pyproject")
            .and_then(|p| p.key())
            .unwrap_or(DEFAULT_PROJECT_FILE);

        let resolved = self.root.join(project_path);
        if !resolved.exists() {
            return Ok(error_response(format!(
                "No project file found at '{}'",
                project_path
            )));
        }

        let mut content =
            fs::read_to_string(&resolved).map_err(|e| GeneratorError::ReadError {
                path: project_path.to_string(),
                source: e,
            })?;

        // Presence alone triggers the rewrite; any key or value attached
        // to the option is ignored.
        if params.contains_key("set_version_from_vcs") {
            let version = self.versions.version(&self.root)?;
            let mut document = self.codec.parse(&content)?;
            self.codec.set_field(&mut document, "version", &version);
            content = self.codec.serialize(&document)?;
        }

        let mut files = vec![File {
            name: Some(OUTPUT_PROJECT_FILE.to_string()),
            content: Some(content),
            ..Default::default()
        }];

        // The marker is emitted unless the key is the literal "False":
        // absence, a bare flag, and any other key all enable it.
        let marker_disabled = params
            .get("include_py_typed")
            .is_some_and(|p| p.key() == Some("False"));
        if !marker_disabled {
            let package_name = match params.get("package_name").and_then(|p| p.key()) {
                Some(name) => name,
                None => {
                    return Ok(error_response(
                        "package_name must be set if 'include_py_typed' is True.".to_string(),
                    ))
                }
            };

            files.push(File {
                name: Some(format!("{}/{}", package_name, PY_TYPED_FILE)),
                content: Some(String::new()),
                ..Default::default()
            });
        }

        Ok(CodeGeneratorResponse {
            file: files,
            ..Default::default()
        })
    }
}

/// Wrap a reported error message in an otherwise empty response
fn error_response(message: String) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(message),
        ..Default::default()
    }
}

/// Generate the response for a decoded request over the process working
/// directory
pub fn generate(request: CodeGeneratorRequest) -> Result<CodeGeneratorResponse, GeneratorError> {
    let params = parse_params(request.parameter());
    ResponseBuilder::new().build(&params)
}

/// Decode a raw request and generate the response
pub fn generate_from_bytes(bytes: &[u8]) -> Result<CodeGeneratorResponse, GeneratorError> {
    let request = CodeGeneratorRequest::decode(bytes)
        .map_err(|e| GeneratorError::DecodeError(e.to_string()))?;
    generate(request)
}
