//! Result alias and aggregation helpers.

use crate::error::ChatError;

/// A specialized `Result` type for ChatKit operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Folds a sequence of unit results into one.
///
/// The outcome is the first failure in iteration order, or `Ok(())` when
/// every element succeeded. An empty sequence is a success. The whole
/// sequence is consumed even after a failure has been found.
pub fn fold_results<I>(results: I) -> ChatResult<()>
where
    I: IntoIterator<Item = ChatResult<()>>,
{
    results
        .into_iter()
        .fold(Ok(()), |acc, next| match acc {
            Ok(()) => next,
            Err(first) => Err(first),
        })
}
