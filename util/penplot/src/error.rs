use thiserror::Error;

/// Errors raised while post-processing a plotter program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotterError {
    #[error("line has no X/Y coordinate: {line:?}")]
    CoordinateMissing { line: String },

    #[error("command stream is empty")]
    EmptyStream,

    /// The pen was lifted and lowered again without any travel in between.
    #[error("pen lift without any travel move: {line:?}")]
    EmptyLiftBracket { line: String },

    #[error("malformed stroke:\n{}", .lines.join("\n"))]
    MalformedStroke { lines: Vec<String> },

    #[error("start index {index} is out of range for {len} strokes")]
    StartIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, PlotterError>;
