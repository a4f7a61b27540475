//! The source-side contract and the fluent operator vocabulary.
//!
//! An observable is generic over the *concrete* observer type it will be
//! subscribed with. Operators exploit this to lift: each operator's
//! `actual_subscribe` wraps the downstream observer in its own adapter type
//! and subscribes that to its source, so a chain
//! `source.filter(p).map(f).subscribe(n)` assembles, right to left, a
//! `FilterObserver` around a `MapObserver` around the terminal closure and
//! hands the composite to `source`. Nothing runs until the terminal
//! subscribe; re-running a chain is done by cloning it, and every
//! activation owns fresh operator state.

use std::convert::Infallible;
#[cfg(feature = "timer")]
use std::time::Duration;

use crate::observer::{FnObserver, Observer};
#[cfg(feature = "timer")]
use crate::ops::{delay::DelayOp, observe_on::ObserveOnOp, subscribe_on::SubscribeOnOp};
use crate::ops::{
  collect::CollectOp,
  distinct_until_changed::{DistinctUntilChangedOp, DistinctUntilKeyChangedOp},
  filter::{FilterOp, FilterWithErrOp},
  flatten::{FlatMapOp, FlattenOp},
  group_by::GroupByOp,
  last::LastOp,
  map::{MapOp, MapWithErrOp},
  merge::MergeOp,
  on_complete::OnCompleteOp,
  on_error::OnErrorOp,
  pairwise::PairwiseOp,
  scan::ScanOp,
  skip::SkipOp,
  take::TakeOp,
  zip::ZipOp,
};
use crate::subscription::Subscription;
use crate::type_hint::TypeHint;

mod create;
mod from_iter;
mod of;

pub use create::{create, Create};
pub use from_iter::{from_iter, repeat, ObservableIter};
pub use of::{empty, of, throw, Empty, Of, Throw};

/// A push-based source of `Item` values that may fail with `Err`, wired to
/// the concrete observer type `O` at subscribe time.
///
/// `actual_subscribe` starts one independent activation and returns its
/// cancellation handle. A synchronous source may deliver every notification
/// before returning; the handle is then already spent.
pub trait Observable<Item, Err, O: Observer<Item, Err>>: Sized {
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// The operator vocabulary, available uniformly on sources and on already
/// composed chains.
///
/// Implementations carry no behavior of their own: every method is lazy and
/// just wraps `self` in an operator value. Recognized options are explicit
/// method parameters; overload-style variants get their own names
/// (`scan`/`scan_initial`, `last`/`last_or`).
pub trait ObservableExt<Item, Err>: Sized {
  /// Transform every value with `f`.
  ///
  /// ```
  /// use rivulet::prelude::*;
  ///
  /// let mut doubled = vec![];
  /// observable::from_iter(1..4)
  ///   .map(|v| v * 2)
  ///   .subscribe(|v| doubled.push(v));
  /// assert_eq!(doubled, vec![2, 4, 6]);
  /// ```
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp { source: self, func: f, _marker: TypeHint::new() }
  }

  /// Transform every value with a fallible selector. The first `Err` the
  /// selector returns is delivered downstream as the activation's single
  /// `error`, and nothing further is forwarded.
  fn map_with_err<B, F>(self, f: F) -> MapWithErrOp<Self, F, Item>
  where
    F: FnMut(Item) -> Result<B, Err>,
  {
    MapWithErrOp { source: self, func: f, _marker: TypeHint::new() }
  }

  /// Keep only the values satisfying `predicate`.
  ///
  /// ```
  /// use rivulet::prelude::*;
  ///
  /// let mut evens = vec![];
  /// observable::from_iter(0..6)
  ///   .filter(|v| v % 2 == 0)
  ///   .subscribe(|v| evens.push(v));
  /// assert_eq!(evens, vec![0, 2, 4]);
  /// ```
  fn filter<F>(self, predicate: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp { source: self, predicate }
  }

  /// Keep only the values satisfying a fallible predicate; a returned `Err`
  /// becomes the activation's single `error`.
  fn filter_with_err<F>(self, predicate: F) -> FilterWithErrOp<Self, F>
  where
    F: FnMut(&Item) -> Result<bool, Err>,
  {
    FilterWithErrOp { source: self, predicate }
  }

  /// Emit the running fold of `binary_op` over the sequence, starting from
  /// `initial`. One output per input.
  fn scan_initial<B, F>(self, initial: B, binary_op: F) -> ScanOp<Self, F, B, Item>
  where
    B: Clone,
    F: FnMut(B, Item) -> B,
  {
    ScanOp { source: self, binary_op, initial, _marker: TypeHint::new() }
  }

  /// `scan_initial` seeded with `B::default()`.
  fn scan<B, F>(self, binary_op: F) -> ScanOp<Self, F, B, Item>
  where
    B: Clone + Default,
    F: FnMut(B, Item) -> B,
  {
    self.scan_initial(B::default(), binary_op)
  }

  /// Pass through the first `count` values, then complete and detach from
  /// the source.
  fn take(self, count: usize) -> TakeOp<Self> {
    TakeOp { source: self, count }
  }

  /// Discard the first `count` values.
  fn skip(self, count: usize) -> SkipOp<Self> {
    SkipOp { source: self, count }
  }

  /// Emit only the final value, at completion time.
  fn last(self) -> LastOp<Self, Item> {
    LastOp { source: self, last: None }
  }

  /// Emit the final value at completion, or `default` if the sequence was
  /// empty.
  fn last_or(self, default: Item) -> LastOp<Self, Item> {
    LastOp { source: self, last: Some(default) }
  }

  /// Emit each value together with its predecessor. The first value opens
  /// the window and produces nothing.
  fn pairwise(self) -> PairwiseOp<Self> {
    PairwiseOp { source: self }
  }

  /// Suppress a value that equals the value emitted immediately before it.
  /// One-step deduplication, not a global uniqueness filter.
  ///
  /// ```
  /// use rivulet::prelude::*;
  ///
  /// let mut seen = vec![];
  /// observable::from_iter([1, 1, 2, 2, 2, 3, 1])
  ///   .distinct_until_changed()
  ///   .subscribe(|v| seen.push(v));
  /// assert_eq!(seen, vec![1, 2, 3, 1]);
  /// ```
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self> {
    DistinctUntilChangedOp { source: self }
  }

  /// Like `distinct_until_changed`, but compares keys derived by
  /// `key_selector` instead of the values themselves.
  fn distinct_until_key_changed<Key, F>(self, key_selector: F) -> DistinctUntilKeyChangedOp<Self, F>
  where
    F: FnMut(&Item) -> Key,
    Key: PartialEq,
  {
    DistinctUntilKeyChangedOp { source: self, key_selector }
  }

  /// Interleave this sequence with `other`. Completes once both inputs have
  /// completed; the first `error` on either side closes the activation.
  fn merge<S>(self, other: S) -> MergeOp<Self, S> {
    MergeOp { source1: self, source2: other }
  }

  /// Pair this sequence with `other` by position, buffering whichever side
  /// runs ahead. Completes when an already completed side has no buffered
  /// values left to pair.
  fn zip<S>(self, other: S) -> ZipOp<Self, S> {
    ZipOp { source1: self, source2: other }
  }

  /// Flatten a sequence whose items are themselves observables, subscribing
  /// each inner sequence as it arrives and interleaving their outputs.
  /// Only defined when `Item` is an observable.
  fn flatten<'a>(self) -> FlattenOp<'a, Self, Item> {
    FlattenOp { source: self, _marker: TypeHint::new() }
  }

  /// Map every value to an inner observable and flatten the result.
  fn flat_map<'a, V, F>(self, f: F) -> FlatMapOp<'a, Self, F, Item, V>
  where
    F: FnMut(Item) -> V,
  {
    self.map(f).flatten()
  }

  /// Demultiplex the sequence into keyed groups. Each first-seen key emits
  /// one grouped observable (tagged with the key) that replays nothing and
  /// receives every later value with the same key. The subject flavour
  /// backing the groups is chosen at the call site, e.g.
  /// `group_by::<_, _, Subject<_, _>>(..)`.
  fn group_by<KeySelector, Key, Subject>(
    self, key_selector: KeySelector,
  ) -> GroupByOp<Self, KeySelector, Subject>
  where
    KeySelector: FnMut(&Item) -> Key,
  {
    GroupByOp { source: self, key_selector, _marker: TypeHint::new() }
  }

  /// Gather the whole sequence into a container, emitted as a single value
  /// at completion time.
  fn collect<C>(self) -> CollectOp<Self, C, Item>
  where
    C: Default + Extend<Item>,
  {
    CollectOp { source: self, _marker: TypeHint::new() }
  }

  /// Observe the activation's failure, discharging the error channel: the
  /// result is infallible and a bare `subscribe` becomes available.
  fn on_error<F>(self, f: F) -> OnErrorOp<Self, F, Err>
  where
    F: FnOnce(Err),
  {
    OnErrorOp { source: self, func: f, _marker: TypeHint::new() }
  }

  /// Observe the activation's successful completion.
  fn on_complete<F>(self, f: F) -> OnCompleteOp<Self, F>
  where
    F: FnOnce(),
  {
    OnCompleteOp { source: self, func: f }
  }

  /// Re-emit every notification `dur` later, through `scheduler`. Errors
  /// are not delayed; they overtake queued values and close the activation.
  #[cfg(feature = "timer")]
  fn delay<SD>(self, dur: Duration, scheduler: SD) -> DelayOp<Self, SD> {
    DelayOp { source: self, delay: dur, scheduler }
  }

  /// Move notification delivery onto `scheduler`, preserving order.
  #[cfg(feature = "timer")]
  fn observe_on<SD>(self, scheduler: SD) -> ObserveOnOp<Self, SD> {
    ObserveOnOp { source: self, scheduler }
  }

  /// Run the subscription itself (and therefore a synchronous source's
  /// emission loop) on `scheduler`.
  #[cfg(feature = "timer")]
  fn subscribe_on<SD>(self, scheduler: SD) -> SubscribeOnOp<Self, SD> {
    SubscribeOnOp { source: self, scheduler }
  }

  /// Activate the chain with a next-handler. Only defined once the error
  /// channel is `Infallible`: the source cannot fail, or every
  /// failure path has been discharged with `on_error`.
  fn subscribe<N>(self, next: N) -> <Self as Observable<Item, Infallible, FnObserver<N>>>::Unsub
  where
    N: FnMut(Item),
    Self: Observable<Item, Infallible, FnObserver<N>>,
  {
    self.actual_subscribe(FnObserver::new(next))
  }
}
