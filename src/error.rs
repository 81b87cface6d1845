
// error types shared by every stage of the preprocessing pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Word2VecError {

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid or inconsistent configuration, reported once at construction.
    #[error("{0}")]
    Config(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("vocabulary hash index is full ({size} slots)")]
    HashIndexFull { size: usize },

    #[error("huffman encoding needs at least 2 vocabulary entries, got {size}")]
    VocabTooSmall { size: usize },

    #[error("code for word '{word}' exceeds the maximum code length {max}")]
    CodeTooLong { word: String, max: usize },

    #[error("cannot build a unigram table from an empty distribution")]
    EmptyDistribution,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("npy: {0}")]
    Npy(String),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

impl From<ndarray_npy::WriteNpyError> for Word2VecError {
    fn from(e: ndarray_npy::WriteNpyError) -> Self {
        Word2VecError::Npy(e.to_string())
    }
}

impl From<ndarray_npy::ReadNpyError> for Word2VecError {
    fn from(e: ndarray_npy::ReadNpyError) -> Self {
        Word2VecError::Npy(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Word2VecError>;
