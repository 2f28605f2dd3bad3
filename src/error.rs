use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading puzzle inputs. Unsolvable puzzles are not errors; see `FillFailure`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file {1}, more details: {0}")]
    FileReadingError(std::io::Error, String),
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Structure has no cells")]
    EmptyStructure,
    #[error("Word list has no words")]
    EmptyWordList,
    #[error("Failed to parse font {0}")]
    InvalidFont(String),
    #[error("Image error, more details: {0}")]
    ImageError(#[from] image::ImageError),
}
