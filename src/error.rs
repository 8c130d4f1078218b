use glsteps_core::{Stage, settings::SettingsError};

/// Everything that stops a stage from running.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to initialize OpenGL, your system may not support it: {0}")]
    Context(String),
    #[error("an error occurred compiling the {kind} shader: {log}")]
    ShaderCompile { kind: &'static str, log: String },
    #[error("unable to initialize the shader program: {0}")]
    ShaderLink(String),
    #[error("missing shader source {path}")]
    ShaderSource {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error("stage {stage} expects a shader attribute named `{name}`")]
    MissingAttribute { stage: Stage, name: &'static str },
    #[error("OpenGL call failed: {0}")]
    Gl(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to set up logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}
