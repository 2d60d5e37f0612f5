use std::path::PathBuf;

pub type Result<T, E = NarrowError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum NarrowError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed model catalog; `path` is the JSON path of the offending node.
    #[error("invalid model catalog at JSON path {path} → {message}")]
    Catalog { path: String, message: String },

    #[error("failed to set up the TypeScript parser: {0}")]
    Parser(String),

    #[error("replacement {next_start}..{next_end} overlaps the previous one ending at {prev_end}")]
    OverlappingReplacement {
        prev_end: usize,
        next_start: usize,
        next_end: usize,
    },

    #[error("replacement {start}..{end} is outside of a {len} byte buffer")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}
