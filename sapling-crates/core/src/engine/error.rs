use thiserror::Error;

/// Indicates that an operation would have removed every value from a domain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the domain became empty")]
pub struct EmptyDomain;

/// Errors related to creating variables.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// The bounds of a derived domain do not fit in an `i32`.
    #[error("the view {scale} * x + {offset} over x in [{lower_bound}, {upper_bound}] overflows")]
    IntegerOverflow {
        scale: i64,
        offset: i64,
        lower_bound: i32,
        upper_bound: i32,
    },
    /// The domain has more values than a variable can hold.
    #[error("the domain [{lower_bound}, {upper_bound}] has more than {max_size} values")]
    DomainTooLarge {
        lower_bound: i32,
        upper_bound: i32,
        max_size: u32,
    },
    /// An affine view with a scale of zero would collapse the domain to a single value.
    #[error("an affine view cannot have a scale of zero")]
    ZeroScale,
}
