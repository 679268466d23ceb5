//! protoc-gen-pyproject - A protoc plugin for emitting Python project files
//!
//! This binary reads a CodeGeneratorRequest from stdin and writes a
//! CodeGeneratorResponse to stdout, following the protoc plugin protocol.

use prost::Message;
use std::io::{self, Read, Write};

fn main() {
    if let Err(e) = run() {
        eprintln!("protoc-gen-pyproject: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Read raw bytes from stdin
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;

    // Reported errors (missing project file, missing package_name) travel
    // inside the response; anything else is an environment fault and aborts
    // the invocation through the error path above.
    let response = protoc_gen_pyproject::generate_from_bytes(&buf)?;

    // Debug: print what we generated
    if std::env::var("PYPROJECT_DEBUG").is_ok() {
        eprintln!(
            "[protoc-gen-pyproject] Generated {} files",
            response.file.len()
        );
        for f in &response.file {
            eprintln!(
                "[protoc-gen-pyproject]   - {}",
                f.name.as_deref().unwrap_or("<unnamed>")
            );
        }
        if let Some(ref err) = response.error {
            eprintln!("[protoc-gen-pyproject] Error: {}", err);
        }
    }

    // Write CodeGeneratorResponse to stdout
    let mut out = Vec::new();
    response.encode(&mut out)?;
    io::stdout().write_all(&out)?;

    Ok(())
}
