use crate::input::InputError;
use replica_layout::LayoutError;
use replica_render_core::RenderError;
use thiserror::Error;

/// Everything that can go wrong turning a statement file into a document.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Reading records failed: {0}")]
    Input(#[from] InputError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration is invalid: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Config(e.to_string())
    }
}
