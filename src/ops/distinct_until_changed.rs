//! Consecutive-duplicate suppression.
//!
//! `distinct_until_changed` compares each value against the one emitted
//! immediately before it: a one-step dedup, not a global uniqueness
//! filter. `distinct_until_key_changed` compares selector-derived keys
//! instead, and so works for item types that are neither `PartialEq` nor
//! `Clone`.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S> {
  pub(crate) source: S,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for DistinctUntilChangedOp<S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, DistinctUntilChangedObserver<O, Item>>,
  Item: PartialEq + Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(DistinctUntilChangedObserver { observer, remembered: None })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for DistinctUntilChangedOp<S> where
  S: ObservableExt<Item, Err>
{
}

/// One remembered value per activation; never shared, dropped with the
/// activation on any terminal event.
pub struct DistinctUntilChangedObserver<O, Item> {
  observer: O,
  remembered: Option<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for DistinctUntilChangedObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: PartialEq + Clone,
{
  fn next(&mut self, value: Item) {
    if self.remembered.as_ref() != Some(&value) {
      self.remembered = Some(value.clone());
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[derive(Clone)]
pub struct DistinctUntilKeyChangedOp<S, F> {
  pub(crate) source: S,
  pub(crate) key_selector: F,
}

impl<Item, Err, Key, O, S, F> Observable<Item, Err, O> for DistinctUntilKeyChangedOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, DistinctUntilKeyChangedObserver<O, F, Key>>,
  F: FnMut(&Item) -> Key,
  Key: PartialEq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(DistinctUntilKeyChangedObserver {
      observer,
      key_selector: self.key_selector,
      remembered: None,
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for DistinctUntilKeyChangedOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct DistinctUntilKeyChangedObserver<O, F, Key> {
  observer: O,
  key_selector: F,
  remembered: Option<Key>,
}

impl<Item, Err, Key, O, F> Observer<Item, Err> for DistinctUntilKeyChangedObserver<O, F, Key>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> Key,
  Key: PartialEq,
{
  fn next(&mut self, value: Item) {
    let key = (self.key_selector)(&value);
    if self.remembered.as_ref() != Some(&key) {
      self.remembered = Some(key);
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
