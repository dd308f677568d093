use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog row at line {line}")]
    MalformedRow { line: usize },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
