//! Error types for the restproxy generator.

use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to parse a proxy definition
    #[error("Failed to parse proxy definition '{path}': {reason}")]
    ParseError { path: String, reason: String },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output directory does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirNotFound(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A path template placeholder has no binding.
    #[error("Method '{method}': placeholder '{{{placeholder}}}' has no path parameter binding")]
    UnboundPlaceholder {
        /// The method whose template contains the placeholder.
        method: String,
        /// The placeholder name.
        placeholder: String,
    },

    /// A binding refers to a value the method does not declare.
    #[error("Method '{method}': '{value}' is not a parameter of the method")]
    UnknownValueRef { method: String, value: String },

    /// Two methods on one proxy share a name.
    #[error("Proxy '{proxy}' declares method '{method}' more than once")]
    DuplicateMethod { proxy: String, method: String },

    /// A name cannot be used as an identifier in generated code.
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    /// A name collides with a local or method the generated code defines itself.
    #[error("Method '{method}': '{name}' is reserved by the generated code")]
    ReservedName { method: String, name: String },

    /// A type cannot be parsed.
    #[error("'{ty}' is not a valid type: {reason}")]
    InvalidType { ty: String, reason: String },
}
