//! Disposers bind a value source to a cleanup action.
//!
//! A [`Disposer`] pairs a future producing a value with the closure that
//! releases that value. Nothing runs at construction time: the source is
//! polled and the cleanup invoked only once the disposer is consumed by
//! [`using`](crate::using::using) or one of its arity variants.
//!
//! Create disposers with [`Disposer::new`], [`Disposer::sync`], the
//! [`disposer`] free function, or by calling [`DisposerExt::disposer`] on
//! any `Result`-producing future.

use std::future::Future;

use crate::boxed::{BoxCleanup, BoxFuture};

/// A value source paired with a not-yet-executed cleanup action.
///
/// The cleanup receives the resolved value by ownership and runs after the
/// batch handler completes (or after acquisition fails elsewhere in the
/// batch). If the source itself fails, the cleanup is never invoked.
///
/// A disposer is single-use by construction: it is moved into the batch
/// that consumes it, so reusing one across batches is a compile error
/// rather than a runtime contract.
///
/// # Example
///
/// ```
/// use breakwater::Disposer;
///
/// let handle = Disposer::new(
///     async { Ok::<_, String>("db-connection".to_string()) },
///     |conn| async move {
///         drop(conn);
///         Ok(())
///     },
/// );
/// # let _ = handle;
/// ```
pub struct Disposer<T, E> {
    source: BoxFuture<'static, Result<T, E>>,
    cleanup: BoxCleanup<T, E>,
}

impl<T, E> std::fmt::Debug for Disposer<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("source", &"<future>")
            .field("cleanup", &"<function>")
            .finish()
    }
}

impl<T, E> Disposer<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a disposer with an asynchronous cleanup action.
    ///
    /// The cleanup future is awaited to completion before the next item in
    /// the batch is released.
    pub fn new<Src, C, Fut>(source: Src, cleanup: C) -> Self
    where
        Src: Future<Output = Result<T, E>> + Send + 'static,
        C: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        Disposer {
            source: Box::pin(source),
            cleanup: Box::new(move |value| Box::pin(cleanup(value))),
        }
    }

    /// Create a disposer with a synchronous cleanup action.
    ///
    /// # Example
    ///
    /// ```
    /// use breakwater::Disposer;
    ///
    /// let lock = Disposer::sync(async { Ok::<_, String>(7) }, |_guard| Ok(()));
    /// # let _ = lock;
    /// ```
    pub fn sync<Src, C>(source: Src, cleanup: C) -> Self
    where
        Src: Future<Output = Result<T, E>> + Send + 'static,
        C: FnOnce(T) -> Result<(), E> + Send + 'static,
    {
        Disposer {
            source: Box::pin(source),
            cleanup: Box::new(move |value| Box::pin(async move { cleanup(value) })),
        }
    }

    /// Split into the value source and the cleanup closure.
    ///
    /// Acquisition awaits the source first; the cleanup is dropped
    /// unused when the source fails.
    pub(crate) fn into_parts(self) -> (BoxFuture<'static, Result<T, E>>, BoxCleanup<T, E>) {
        (self.source, self.cleanup)
    }
}

/// Create a [`Disposer`] from a value source and an async cleanup action.
///
/// Free-function form of [`Disposer::new`].
///
/// # Example
///
/// ```
/// use breakwater::{disposer, using, Acquirable};
///
/// # tokio_test::block_on(async {
/// let file = disposer(
///     async { Ok::<_, String>("handle".to_string()) },
///     |handle| async move {
///         drop(handle);
///         Ok(())
///     },
/// );
///
/// let result = using(vec![Acquirable::from(file)], |handles: &[String]| {
///     let handle = handles[0].clone();
///     async move { Ok(handle.len()) }
/// })
/// .await;
///
/// assert_eq!(result, Ok(6));
/// # });
/// ```
pub fn disposer<T, E, Src, C, Fut>(source: Src, cleanup: C) -> Disposer<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    Src: Future<Output = Result<T, E>> + Send + 'static,
    C: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    Disposer::new(source, cleanup)
}

/// Extension trait attaching a cleanup action to any `Result`-producing
/// future.
///
/// Automatically implemented; do not implement it yourself.
///
/// # Example
///
/// ```
/// use breakwater::DisposerExt;
///
/// let conn = async { Ok::<_, String>("connection".to_string()) }
///     .disposer_sync(|conn| {
///         drop(conn);
///         Ok(())
///     });
/// # let _ = conn;
/// ```
pub trait DisposerExt<T, E>: Future<Output = Result<T, E>> + Send + Sized + 'static
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Pair this future with an asynchronous cleanup action.
    fn disposer<C, Fut>(self, cleanup: C) -> Disposer<T, E>
    where
        C: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        Disposer::new(self, cleanup)
    }

    /// Pair this future with a synchronous cleanup action.
    fn disposer_sync<C>(self, cleanup: C) -> Disposer<T, E>
    where
        C: FnOnce(T) -> Result<(), E> + Send + 'static,
    {
        Disposer::sync(self, cleanup)
    }
}

impl<F, T, E> DisposerExt<T, E> for F
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
}
