use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Upper bound for a single repository call.
pub const REPOSITORY_DEADLINE: Duration = Duration::from_secs(5);

/// A repository call did not complete within its deadline.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("repository call exceeded its {0:?} deadline")]
pub struct DeadlineExceeded(pub Duration);

/// Run a repository call, failing with `DeadlineExceeded` once `deadline` elapses.
///
/// The call is dropped on timeout, which cancels it at its next await point.
pub async fn within<F, T, E>(deadline: Duration, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| E::from(DeadlineExceeded(deadline)))?
}
