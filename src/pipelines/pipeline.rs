//! Pipeline trait.
use crate::error::Error;

/// Implemented by each conversion pipeline.
///
/// Generic over the return type so that each pipeline can report
/// what it did (document counts, detected schema...).
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
