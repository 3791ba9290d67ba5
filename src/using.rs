//! Scoped resource batches: acquire concurrently, run a handler, release
//! in order.
//!
//! This module provides:
//!
//! - [`using`] - homogeneous batch, handler receives the values as a slice
//! - [`using2`], [`using3`], [`using4`] - heterogeneous batches, handler
//!   receives the values positionally
//!
//! All forms share the same lifecycle:
//!
//! 1. **Acquire**: every item's value source starts resolving at once, and
//!    every item is allowed to settle even when another has already failed.
//! 2. **Execute**: the handler runs only when every item acquired.
//! 3. **Release**: each successfully acquired disposer is cleaned up, one
//!    at a time, in the order the items were given - never in completion
//!    order, and regardless of how the handler fared.
//!
//! The batch settles with the handler's result, or with the error of the
//! lowest-index item that failed acquisition, only after release finishes.
//!
//! Cleanup failures never abort the remaining disposals and never replace
//! the batch outcome; they are logged and the release loop moves on.

use std::fmt::Debug;
use std::future::Future;

use futures::future::join_all;

use crate::acquirable::{Acquirable, Acquired};

/// Run a handler against a batch of resources, guaranteeing release.
///
/// Every item's value source is resolved concurrently; the handler sees the
/// resolved values as a slice in item order. After the handler settles, each
/// item that was a disposer is cleaned up sequentially in item order.
///
/// If any item fails acquisition the handler is never called, the items
/// that did acquire are still released, and the batch fails with the error
/// of the lowest-index failing item.
///
/// # Example
///
/// ```
/// use breakwater::{using, Acquirable, DisposerExt};
///
/// # tokio_test::block_on(async {
/// let conn = async { Ok::<_, String>("conn-1".to_string()) }
///     .disposer_sync(|conn| {
///         drop(conn);
///         Ok(())
///     });
///
/// let result = using(
///     vec![Acquirable::from(conn), Acquirable::value("plain".to_string())],
///     |values: &[String]| {
///         let joined = values.join(" + ");
///         async move { Ok(joined) }
///     },
/// )
/// .await;
///
/// assert_eq!(result, Ok("conn-1 + plain".to_string()));
/// # });
/// ```
pub async fn using<T, E, R, H, Fut>(items: Vec<Acquirable<T, E>>, handler: H) -> Result<R, E>
where
    T: Send + 'static,
    E: Send + Debug + 'static,
    H: FnOnce(&[T]) -> Fut + Send,
    Fut: Future<Output = Result<R, E>> + Send,
{
    let outcomes = join_all(items.into_iter().map(Acquirable::acquire)).await;

    let mut acquired = Vec::with_capacity(outcomes.len());
    let mut first_error = None;
    for outcome in outcomes {
        match outcome {
            Ok(item) => acquired.push(item),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    // Acquisition failure: release the subset that did acquire, then fail.
    if let Some(error) = first_error {
        for item in acquired {
            dispose(item).await;
        }
        return Err(error);
    }

    // Values stay in place so the handler can borrow them; the cleanups
    // get each value back once the handler has settled.
    let mut values = Vec::with_capacity(acquired.len());
    let mut cleanups = Vec::with_capacity(acquired.len());
    for item in acquired {
        values.push(item.value);
        cleanups.push(item.cleanup);
    }

    let result = handler(&values).await;

    for (value, cleanup) in values.into_iter().zip(cleanups) {
        dispose(Acquired { value, cleanup }).await;
    }

    result
}

/// Two-resource batch with positional handler arguments.
///
/// Equivalent to [`using`] after normalization; the handler receives the
/// resolved values as `(&T1, &T2)` instead of a slice.
///
/// # Example
///
/// ```
/// use breakwater::{using2, Acquirable, DisposerExt};
///
/// # tokio_test::block_on(async {
/// let conn = async { Ok::<_, String>("conn".to_string()) }
///     .disposer_sync(|_| Ok(()));
///
/// let result = using2(
///     Acquirable::from(conn),
///     Acquirable::value(3usize),
///     |conn: &String, n: &usize| {
///         let line = format!("{} x{}", conn, n);
///         async move { Ok(line) }
///     },
/// )
/// .await;
///
/// assert_eq!(result, Ok("conn x3".to_string()));
/// # });
/// ```
pub async fn using2<T1, T2, E, R, H, Fut>(
    first: Acquirable<T1, E>,
    second: Acquirable<T2, E>,
    handler: H,
) -> Result<R, E>
where
    T1: Send + 'static,
    T2: Send + 'static,
    E: Send + Debug + 'static,
    H: FnOnce(&T1, &T2) -> Fut + Send,
    Fut: Future<Output = Result<R, E>> + Send,
{
    let (o1, o2) = futures::join!(first.acquire(), second.acquire());

    match (o1, o2) {
        (Ok(a1), Ok(a2)) => {
            let result = handler(&a1.value, &a2.value).await;
            dispose(a1).await;
            dispose(a2).await;
            result
        }
        (o1, o2) => {
            let mut first_error = None;
            settle(o1, &mut first_error).await;
            settle(o2, &mut first_error).await;
            Err(first_error.expect("acquisition failure already observed"))
        }
    }
}

/// Three-resource batch with positional handler arguments.
pub async fn using3<T1, T2, T3, E, R, H, Fut>(
    first: Acquirable<T1, E>,
    second: Acquirable<T2, E>,
    third: Acquirable<T3, E>,
    handler: H,
) -> Result<R, E>
where
    T1: Send + 'static,
    T2: Send + 'static,
    T3: Send + 'static,
    E: Send + Debug + 'static,
    H: FnOnce(&T1, &T2, &T3) -> Fut + Send,
    Fut: Future<Output = Result<R, E>> + Send,
{
    let (o1, o2, o3) = futures::join!(first.acquire(), second.acquire(), third.acquire());

    match (o1, o2, o3) {
        (Ok(a1), Ok(a2), Ok(a3)) => {
            let result = handler(&a1.value, &a2.value, &a3.value).await;
            dispose(a1).await;
            dispose(a2).await;
            dispose(a3).await;
            result
        }
        (o1, o2, o3) => {
            let mut first_error = None;
            settle(o1, &mut first_error).await;
            settle(o2, &mut first_error).await;
            settle(o3, &mut first_error).await;
            Err(first_error.expect("acquisition failure already observed"))
        }
    }
}

/// Four-resource batch with positional handler arguments.
pub async fn using4<T1, T2, T3, T4, E, R, H, Fut>(
    first: Acquirable<T1, E>,
    second: Acquirable<T2, E>,
    third: Acquirable<T3, E>,
    fourth: Acquirable<T4, E>,
    handler: H,
) -> Result<R, E>
where
    T1: Send + 'static,
    T2: Send + 'static,
    T3: Send + 'static,
    T4: Send + 'static,
    E: Send + Debug + 'static,
    H: FnOnce(&T1, &T2, &T3, &T4) -> Fut + Send,
    Fut: Future<Output = Result<R, E>> + Send,
{
    let (o1, o2, o3, o4) = futures::join!(
        first.acquire(),
        second.acquire(),
        third.acquire(),
        fourth.acquire()
    );

    match (o1, o2, o3, o4) {
        (Ok(a1), Ok(a2), Ok(a3), Ok(a4)) => {
            let result = handler(&a1.value, &a2.value, &a3.value, &a4.value).await;
            dispose(a1).await;
            dispose(a2).await;
            dispose(a3).await;
            dispose(a4).await;
            result
        }
        (o1, o2, o3, o4) => {
            let mut first_error = None;
            settle(o1, &mut first_error).await;
            settle(o2, &mut first_error).await;
            settle(o3, &mut first_error).await;
            settle(o4, &mut first_error).await;
            Err(first_error.expect("acquisition failure already observed"))
        }
    }
}

/// Release one acquired item, awaiting its cleanup to completion.
///
/// Items without a cleanup (plain values, bare futures) are simply dropped.
async fn dispose<T, E: Debug>(item: Acquired<T, E>) {
    let Acquired { value, cleanup } = item;
    if let Some(cleanup) = cleanup {
        if let Err(cleanup_err) = cleanup(value).await {
            #[cfg(feature = "tracing")]
            tracing::warn!("Resource cleanup failed: {:?}", cleanup_err);
            #[cfg(not(feature = "tracing"))]
            eprintln!("Resource cleanup failed: {:?}", cleanup_err);
        }
    }
}

/// Fold one acquisition outcome on the failure path: release it if it
/// acquired, otherwise keep the lowest-index error.
async fn settle<T, E: Debug>(outcome: Result<Acquired<T, E>, E>, first_error: &mut Option<E>) {
    match outcome {
        Ok(item) => dispose(item).await,
        Err(e) => {
            if first_error.is_none() {
                *first_error = Some(e);
            }
        }
    }
}
