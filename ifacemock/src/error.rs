//! Command-line errors

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("refusing to generate a mock for {interface}: an added import clashes with an existing name")]
    #[diagnostic(
        code(ifacemock::cli::import_collision),
        help("{details}\nImport the package in the file declaring {interface} under a free name")
    )]
    ImportCollision { interface: String, details: String },

    #[error("failed to render the mock for {interface}")]
    #[diagnostic(code(ifacemock::cli::render))]
    Render {
        interface: String,
        #[source]
        source: std::fmt::Error,
    },

    #[error("failed to serialize the description of {interface}")]
    #[diagnostic(code(ifacemock::cli::json))]
    Json {
        interface: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}")]
    #[diagnostic(code(ifacemock::cli::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
