use thiserror::Error;

/// Failures reported by a [`Shaper`](crate::Shaper).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("no layout available for text {0:?}")]
    NoLayout(String),

    #[error("shaping failed: {0}")]
    Failed(String),
}

/// Errors that abort a layout request.
///
/// An empty input text is not an error; the pipeline returns `Ok(None)`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TextPathError {
    #[error("shaping engine failure: {0}")]
    Shaping(#[from] ShapeError),

    #[error(
        "line {line} run {run}: {glyphs} glyphs but {positions} positions and {advances} advances"
    )]
    InconsistentRun {
        line: usize,
        run: usize,
        glyphs: usize,
        positions: usize,
        advances: usize,
    },

    #[error("line {line} run {run}: more glyphs than characters in the source text")]
    TextOverrun { line: usize, run: usize },

    #[error("path worker is not running")]
    WorkerUnavailable,

    #[error("invalid recording: {0}")]
    Recording(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
