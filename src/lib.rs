//! # Breakwater
//!
//! > *Calm water inside, whatever the sea does outside*
//!
//! Deterministic async resource scoping for Rust: acquire a batch of
//! resources concurrently, run a handler against them, and guarantee their
//! release in a fixed order - regardless of what fails along the way.
//!
//! ## Guarantees
//!
//! - **Concurrent acquisition**: every item's value source starts at once;
//!   batch latency is bounded by the slowest item, not their sum.
//! - **Full settlement**: acquisition never short-circuits - every item
//!   settles, so cleanup always knows which items actually acquired.
//! - **Guaranteed release**: every successfully acquired disposer is
//!   cleaned up exactly once, whether acquisition partially failed, the
//!   handler failed, or everything succeeded.
//! - **Deterministic order**: disposals run sequentially in item order,
//!   each awaited to completion before the next starts, independent of
//!   cleanup latency.
//!
//! ## Quick Example
//!
//! ```
//! use breakwater::{using, Acquirable, DisposerExt};
//!
//! # tokio_test::block_on(async {
//! // A connection that must be returned to its pool.
//! let conn = async { Ok::<_, String>("conn-7".to_string()) }
//!     .disposer_sync(|conn| {
//!         println!("returning {conn} to the pool");
//!         Ok(())
//!     });
//!
//! let report = using(vec![Acquirable::from(conn)], |conns: &[String]| {
//!     let conn = conns[0].clone();
//!     async move { Ok(format!("queried over {conn}")) }
//! })
//! .await;
//!
//! assert_eq!(report, Ok("queried over conn-7".to_string()));
//! // the cleanup has already run by the time `using` returns
//! # });
//! ```
//!
//! ## Batch items
//!
//! A batch mixes four shapes of item, classified once up front by
//! [`Acquirable`]:
//!
//! | Shape | Participates in release? |
//! |-------|--------------------------|
//! | plain value | no |
//! | pending future | no |
//! | [`Disposer`] | yes |
//! | future resolving to a `Disposer` | yes |
//!
//! Heterogeneous batches use [`using2`]/[`using3`]/[`using4`], which hand
//! the handler its values positionally.
//!
//! ## Error policy
//!
//! - Acquisition failure: the batch fails with the error of the
//!   lowest-index failing item, after the acquired subset is released.
//! - Handler failure: captured, released, then propagated.
//! - Cleanup failure: logged (via `tracing` when the `tracing` feature is
//!   enabled, stderr otherwise), never aborts remaining disposals, never
//!   replaces the batch outcome.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod acquirable;
pub mod boxed;
pub mod disposer;
pub mod testing;
pub mod using;

// Re-exports
pub use acquirable::Acquirable;
pub use boxed::BoxFuture;
pub use disposer::{disposer, Disposer, DisposerExt};
pub use using::{using, using2, using3, using4};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::acquirable::Acquirable;
    pub use crate::disposer::{disposer, Disposer, DisposerExt};
    pub use crate::using::{using, using2, using3, using4};
}
