use std::path::PathBuf;

/// Errors that can stop a run. No output file exists after any of them.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The batch text is malformed.
    #[error(transparent)]
    Spec(#[from] clockwork_core::SpecError),

    /// A spec names a machine that is neither registered nor a raw type path.
    #[error(transparent)]
    Adjust(#[from] clockwork_core::AdjustError),

    /// Decoding or encoding the blueprint failed.
    #[error("blueprint codec error: {0}")]
    Codec(#[from] clockwork_blueprint::CodecError),

    /// The machine table file could not be loaded.
    #[error(transparent)]
    Data(#[from] clockwork_data::DataLoadError),

    /// No spec matched any machine, so the output would equal the input.
    #[error("no machines matched any of the specs in '{blueprint}'; nothing written")]
    NothingMatched { blueprint: String },

    /// The output name would overwrite the input files.
    #[error("output name '{0}' is the same as the input; refusing to overwrite")]
    OutputIsInput(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
