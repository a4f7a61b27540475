//! Operator implementations.
//!
//! Each module pairs an inert operator value (what the [`ObservableExt`]
//! methods return) with the observer adapter it wraps around its downstream
//! at subscribe time.
//!
//! [`ObservableExt`]: crate::observable::ObservableExt

pub mod collect;
pub mod distinct_until_changed;
pub mod filter;
pub mod flatten;
pub mod group_by;
pub mod last;
pub mod map;
pub mod merge;
pub mod on_complete;
pub mod on_error;
pub mod pairwise;
pub mod scan;
pub mod skip;
pub mod take;
pub mod zip;

#[cfg(feature = "timer")]
pub mod delay;
#[cfg(feature = "timer")]
pub mod observe_on;
#[cfg(feature = "timer")]
pub mod subscribe_on;
