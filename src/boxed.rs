//! Boxed future aliases used throughout the crate.
//!
//! Resources in a batch are heterogeneous at runtime (a plain value, a
//! pending future, a disposer), so their value sources and cleanup closures
//! are stored type-erased. Boxing happens once per item at construction
//! time, following the `futures` crate pattern.

use std::future::Future;
use std::pin::Pin;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed cleanup closure: consumes the resolved value, returns the
/// disposal future.
pub(crate) type BoxCleanup<T, E> =
    Box<dyn FnOnce(T) -> BoxFuture<'static, Result<(), E>> + Send>;
