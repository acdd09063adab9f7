use thiserror::Error;

pub(crate) type SaplingResult<T> = Result<T, SaplingError>;

#[derive(Error, Debug)]
pub(crate) enum SaplingError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The {problem} problem needs a size of at least {minimum}, got {size}.")]
    InvalidSize {
        problem: String,
        minimum: usize,
        size: usize,
    },
    #[error("A size of {0} does not fit in the range of a domain.")]
    SizeTooLarge(usize),
}
