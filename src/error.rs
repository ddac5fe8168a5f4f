use std::{
    error::Error,
    fmt::{Display, Formatter},
};

/// Result type used by the command line tools where many error types are mixed together.
pub type DamageMapResult<T> = Result<T, Box<dyn Error>>;

/**
 * The input to one of the core operations violated its contract.
 *
 * This covers bad parameters (e.g. a non-positive neighborhood distance) and out of range
 * latitude / longitude values. The core fails fast with this error and computes nothing partial.
 */
#[derive(Debug, Clone)]
pub struct InvalidInputError {
    pub msg: String,
}

impl InvalidInputError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        InvalidInputError { msg: msg.into() }
    }
}

impl Display for InvalidInputError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "invalid input: {}", self.msg)
    }
}

impl Error for InvalidInputError {}
