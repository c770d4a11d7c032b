//! Error types.
//!
//! Nothing inside the frame loop can fail; errors only come from startup
//! (missing DOM, WebGL setup) and from config overrides.

/// A malformed configuration override.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for config key `{key}`")]
    InvalidValue { key: &'static str, value: String },
}

/// Failures while bringing the scene up.
#[derive(Clone, Debug, thiserror::Error)]
pub enum SceneError {
    /// A DOM element the page must provide is missing.
    #[error("required element not found: {0}")]
    MissingElement(String),

    /// The canvas could not hand out a WebGL2 context.
    #[error("WebGL2 not supported")]
    WebGlUnsupported,

    #[error("shader compile failed: {0}")]
    ShaderCompile(String),

    #[error("program link failed: {0}")]
    ProgramLink(String),

    /// A GPU object (buffer, texture, vertex array) could not be created.
    #[error("failed to create {0}")]
    Resource(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An exception thrown by a browser API.
    #[error("javascript error: {0}")]
    Js(String),
}
