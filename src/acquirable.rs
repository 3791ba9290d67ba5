//! Classification of batch items into an explicit tagged form.
//!
//! Each item handed to [`using`](crate::using::using) is one of four
//! shapes: an already-available value, a future still producing its value,
//! a [`Disposer`], or a future that resolves to a `Disposer`. The
//! [`Acquirable`] enum makes that classification a single explicit step at
//! the batch boundary instead of ad hoc probing inside the acquisition
//! logic.

use std::future::Future;

use crate::boxed::{BoxCleanup, BoxFuture};
use crate::disposer::Disposer;

/// One item of a resource batch, classified by shape.
///
/// Only the `Disposer` shapes participate in release; plain values and
/// pending futures are delivered to the handler unchanged and dropped
/// afterwards.
///
/// # Example
///
/// ```
/// use breakwater::{Acquirable, DisposerExt};
///
/// let greeting: Acquirable<String, String> = Acquirable::value("hello".to_string());
/// let pending = Acquirable::pending(async { Ok::<_, String>("world".to_string()) });
/// let scoped = Acquirable::from(
///     async { Ok::<_, String>("resource".to_string()) }.disposer_sync(|_| Ok(())),
/// );
/// # let _ = (greeting, pending, scoped);
/// ```
pub enum Acquirable<T, E> {
    /// An already-available value.
    Value(T),
    /// A value still being produced.
    Pending(BoxFuture<'static, Result<T, E>>),
    /// A value source with an attached cleanup action.
    Disposer(Disposer<T, E>),
    /// A future resolving to a disposer; unwrapped transparently during
    /// acquisition, then treated identically to [`Acquirable::Disposer`].
    PendingDisposer(BoxFuture<'static, Result<Disposer<T, E>, E>>),
}

impl<T, E> std::fmt::Debug for Acquirable<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Acquirable::Value(_) => f.write_str("Acquirable::Value"),
            Acquirable::Pending(_) => f.write_str("Acquirable::Pending"),
            Acquirable::Disposer(_) => f.write_str("Acquirable::Disposer"),
            Acquirable::PendingDisposer(_) => f.write_str("Acquirable::PendingDisposer"),
        }
    }
}

impl<T, E> Acquirable<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wrap an already-available value.
    pub fn value(value: T) -> Self {
        Acquirable::Value(value)
    }

    /// Wrap a future producing a value with no cleanup action.
    pub fn pending<Src>(source: Src) -> Self
    where
        Src: Future<Output = Result<T, E>> + Send + 'static,
    {
        Acquirable::Pending(Box::pin(source))
    }

    /// Wrap a future that resolves to a [`Disposer`].
    pub fn pending_disposer<Src>(source: Src) -> Self
    where
        Src: Future<Output = Result<Disposer<T, E>, E>> + Send + 'static,
    {
        Acquirable::PendingDisposer(Box::pin(source))
    }

    /// Resolve this item's value source to completion.
    ///
    /// For the disposer shapes the cleanup closure is carried along with
    /// the value; when the source fails, the closure is dropped without
    /// ever being invoked.
    pub(crate) async fn acquire(self) -> Result<Acquired<T, E>, E> {
        match self {
            Acquirable::Value(value) => Ok(Acquired {
                value,
                cleanup: None,
            }),
            Acquirable::Pending(source) => {
                let value = source.await?;
                Ok(Acquired {
                    value,
                    cleanup: None,
                })
            }
            Acquirable::Disposer(disposer) => {
                let (source, cleanup) = disposer.into_parts();
                let value = source.await?;
                Ok(Acquired {
                    value,
                    cleanup: Some(cleanup),
                })
            }
            Acquirable::PendingDisposer(outer) => {
                let (source, cleanup) = outer.await?.into_parts();
                let value = source.await?;
                Ok(Acquired {
                    value,
                    cleanup: Some(cleanup),
                })
            }
        }
    }
}

impl<T, E> From<Disposer<T, E>> for Acquirable<T, E> {
    fn from(disposer: Disposer<T, E>) -> Self {
        Acquirable::Disposer(disposer)
    }
}

/// A successfully acquired item: the resolved value plus the cleanup
/// closure for items that were disposers.
pub(crate) struct Acquired<T, E> {
    pub(crate) value: T,
    pub(crate) cleanup: Option<BoxCleanup<T, E>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disposer::DisposerExt;

    #[tokio::test]
    async fn plain_value_acquires_without_cleanup() {
        let acquired = Acquirable::<_, String>::value(5).acquire().await.unwrap();
        assert_eq!(acquired.value, 5);
        assert!(acquired.cleanup.is_none());
    }

    #[tokio::test]
    async fn pending_future_acquires_without_cleanup() {
        let acquired = Acquirable::pending(async { Ok::<_, String>(6) })
            .acquire()
            .await
            .unwrap();
        assert_eq!(acquired.value, 6);
        assert!(acquired.cleanup.is_none());
    }

    #[tokio::test]
    async fn disposer_acquires_with_cleanup() {
        let d = async { Ok::<_, String>(7) }.disposer_sync(|_| Ok(()));
        let acquired = Acquirable::from(d).acquire().await.unwrap();
        assert_eq!(acquired.value, 7);
        assert!(acquired.cleanup.is_some());
    }

    #[tokio::test]
    async fn pending_disposer_unwraps_to_same_shape() {
        let acquired = Acquirable::pending_disposer(async {
            Ok::<_, String>(async { Ok(8) }.disposer_sync(|_| Ok(())))
        })
        .acquire()
        .await
        .unwrap();
        assert_eq!(acquired.value, 8);
        assert!(acquired.cleanup.is_some());
    }

    #[tokio::test]
    async fn failing_disposer_source_drops_cleanup_unused() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let cleaned = Arc::new(AtomicBool::new(false));
        let cleaned_clone = cleaned.clone();

        let d = async { Err::<i32, _>("acquire failed".to_string()) }
            .disposer_sync(move |_| {
                cleaned_clone.store(true, Ordering::SeqCst);
                Ok(())
            });

        let outcome = Acquirable::from(d).acquire().await;
        assert_eq!(outcome.err(), Some("acquire failed".to_string()));
        assert!(
            !cleaned.load(Ordering::SeqCst),
            "cleanup must not run when the source fails"
        );
    }
}
