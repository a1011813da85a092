//! Bounded concurrent execution of repeated operations.
//!
//! Used for batch commands such as creating several contacts at once.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Type alias for boxed futures used in bounded runs
type TaskFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<T>)> + Send>>;

/// Run `task(0..count)` with at most `max_concurrent` in flight.
///
/// Results come back in completion order. The first error aborts the run
/// and is returned; tasks still in flight are dropped.
///
/// # Example
///
/// ```ignore
/// let created = run_bounded(5, |_| {
///     let c = client.clone();
///     async move { c.create_contact(ContactRequest::default()).await }
/// }, 2).await?;
/// ```
pub async fn run_bounded<T, F, Fut>(count: usize, task: F, max_concurrent: usize) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if count == 0 {
        return Ok(Vec::new());
    }

    let max_concurrent = max_concurrent.max(1);
    debug!("Running {} tasks with max {} concurrent", count, max_concurrent);

    let mut results = Vec::with_capacity(count);
    let mut in_flight: FuturesUnordered<TaskFuture<T>> = FuturesUnordered::new();
    let mut pending = 0..count;

    let make_future = |index: usize, f: &F| -> TaskFuture<T> {
        let fut = f(index);
        Box::pin(async move { (index, fut.await) })
    };

    for index in pending.by_ref().take(max_concurrent) {
        in_flight.push(make_future(index, &task));
    }

    while let Some((index, result)) = in_flight.next().await {
        results.push(result?);
        debug!("Task {} finished ({}/{})", index, results.len(), count);

        if let Some(next) = pending.next() {
            in_flight.push(make_future(next, &task));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_run_bounded_empty() {
        let result: Result<Vec<usize>> = run_bounded(0, |i| async move { Ok(i) }, 4).await;
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_bounded_runs_every_index() {
        let mut items = run_bounded(5, |i| async move { Ok(i * 10) }, 2)
            .await
            .unwrap();
        items.sort();
        assert_eq!(items, vec![0, 10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn test_run_bounded_respects_concurrency() {
        let current = Arc::new(AtomicUsize::new(0));
        let max_observed = Arc::new(AtomicUsize::new(0));

        let cc = current.clone();
        let mo = max_observed.clone();

        let result = run_bounded(
            6,
            move |i| {
                let cc = cc.clone();
                let mo = mo.clone();
                async move {
                    let now = cc.fetch_add(1, Ordering::SeqCst) + 1;
                    mo.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
                    cc.fetch_sub(1, Ordering::SeqCst);
                    Ok(i)
                }
            },
            2,
        )
        .await;

        assert_eq!(result.unwrap().len(), 6);
        assert!(max_observed.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_progresses() {
        let items = run_bounded(3, |i| async move { Ok(i) }, 0).await.unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_run_bounded_propagates_errors() {
        let result: Result<Vec<usize>> = run_bounded(
            3,
            |i| async move {
                if i == 1 {
                    Err(crate::error::ApiError::BadRequest("boom".to_string()).into())
                } else {
                    Ok(i)
                }
            },
            4,
        )
        .await;

        assert!(result.is_err());
    }
}
