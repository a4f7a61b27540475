//! # rivulet: composable push-based observable sequences
//!
//! A source ([`Observable`]) pushes values into a sink ([`Observer`]);
//! operators compose between the two by wrapping the downstream observer at
//! subscribe time, and every activation hands back a [`Subscription`] to
//! cancel it.
//!
//! ```
//! use rivulet::prelude::*;
//!
//! let mut out = vec![];
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| out.push(v));
//! assert_eq!(out, vec![0, 4, 8, 12, 16]);
//! ```
//!
//! Chains are inert values: nothing runs until a terminal `subscribe`, and
//! subscribing a clone of a chain re-runs it from scratch with fresh
//! operator state. The error channel is a type parameter; `on_error` is the
//! single place it is discharged, and a bare `subscribe` only exists for
//! pipelines whose error type is `Infallible`.
//!
//! ## Feature flags
//!
//! - **`futures-scheduler`** (default): thread-pool scheduler via the
//!   `futures` executor, plus the lazy process-wide [`shared_pool`].
//! - **`timer`** (default): the timing operators (`delay`, `observe_on`,
//!   `subscribe_on`) and their sleep support.
//! - **`tokio-scheduler`**: scheduler implementation for a `tokio` runtime
//!   handle.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`shared_pool`]: scheduler::shared_pool

pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
#[cfg(feature = "timer")]
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;
pub mod type_hint;

pub use prelude::*;
