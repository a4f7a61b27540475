//! The push-side contract: a sink for `next`, `error` and `complete`
//! notifications.
//!
//! Terminal notifications consume the observer, so "nothing is delivered
//! after a terminal event" is enforced by ownership instead of by runtime
//! guards. Where sharing or type erasure forces an observer behind a
//! pointer, the slot is an `Option` that is taken on terminal delivery and
//! every later notification finds it empty.

use std::convert::Infallible;

use crate::rc::{InnerDeref, InnerDerefMut, MutArc, MutRc};

/// The consumer half of an observable activation.
pub trait Observer<Item, Err> {
  /// Deliver the next value.
  fn next(&mut self, value: Item);

  /// Deliver the failure terminal event. Consumes the observer; no further
  /// notification can be issued to it.
  fn error(self, err: Err);

  /// Deliver the successful terminal event. Consumes the observer.
  fn complete(self);

  /// `true` once this observer can no longer accept values. Synchronous
  /// sources poll this to stop emitting early, e.g. when a downstream
  /// `take` has seen its fill.
  fn is_closed(&self) -> bool;
}

/// Closure adapter used by the plain `subscribe` terminal.
///
/// Defined only for `Err = Infallible`: a pipeline that can still fail must
/// discharge its error channel (see `on_error`) before a bare next-handler
/// may be attached.
#[derive(Clone)]
pub struct FnObserver<N>(N);

impl<N> FnObserver<N> {
  #[inline]
  pub fn new(next: N) -> Self { FnObserver(next) }
}

impl<Item, N> Observer<Item, Infallible> for FnObserver<N>
where
  N: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(value) }

  #[inline]
  fn error(self, _err: Infallible) {}

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// `None` is a drained observer: it swallows everything and reports closed.
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(inner) = self {
      inner.error(err);
    }
  }

  fn complete(self) {
    if let Some(inner) = self {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Observer::is_closed) }
}

// Shared observer slots. Terminal events take the inner observer out, so
// sibling holders of the same slot observe it closed afterwards.
macro_rules! shared_slot_observer_impl {
  ($rc: ident) => {
    impl<O, Item, Err> Observer<Item, Err> for $rc<Option<O>>
    where
      O: Observer<Item, Err>,
    {
      fn next(&mut self, value: Item) { self.inner_deref_mut().next(value) }

      fn error(self, err: Err) {
        let inner = self.inner_deref_mut().take();
        if let Some(inner) = inner {
          inner.error(err);
        }
      }

      fn complete(self) {
        let inner = self.inner_deref_mut().take();
        if let Some(inner) = inner {
          inner.complete();
        }
      }

      fn is_closed(&self) -> bool {
        self
          .inner_deref()
          .as_ref()
          .map_or(true, Observer::is_closed)
      }
    }
  };
}

shared_slot_observer_impl!(MutRc);
shared_slot_observer_impl!(MutArc);

/// Object-safe mirror of [`Observer`].
///
/// `Observer` itself is not object-safe because its terminal methods take
/// `self` by value; this trait adapts them to boxed receivers so subjects
/// can hold heterogeneous subscribers.
pub trait DynObserver<Item, Err> {
  fn dyn_next(&mut self, value: Item);
  fn dyn_error(self: Box<Self>, err: Err);
  fn dyn_complete(self: Box<Self>);
  fn dyn_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  #[inline]
  fn dyn_next(&mut self, value: Item) { self.next(value) }

  #[inline]
  fn dyn_error(self: Box<Self>, err: Err) { (*self).error(err) }

  #[inline]
  fn dyn_complete(self: Box<Self>) { (*self).complete() }

  #[inline]
  fn dyn_is_closed(&self) -> bool { self.is_closed() }
}

/// Type-erased observer for single-threaded fan-out.
pub type BoxObserver<'a, Item, Err> = Box<dyn DynObserver<Item, Err> + 'a>;

/// Type-erased observer that may cross threads.
pub type BoxObserverThreads<Item, Err> = Box<dyn DynObserver<Item, Err> + Send>;

macro_rules! box_observer_impl {
  ($ty: ty $(,$lf: lifetime)?) => {
    impl<$($lf,)? Item, Err> Observer<Item, Err> for $ty {
      #[inline]
      fn next(&mut self, value: Item) { (**self).dyn_next(value) }

      #[inline]
      fn error(self, err: Err) { self.dyn_error(err) }

      #[inline]
      fn complete(self) { self.dyn_complete() }

      #[inline]
      fn is_closed(&self) -> bool { (**self).dyn_is_closed() }
    }
  };
}

box_observer_impl!(BoxObserver<'a, Item, Err>, 'a);
box_observer_impl!(BoxObserverThreads<Item, Err>);

#[cfg(test)]
mod tests {
  use super::*;

  struct Collect {
    values: Vec<i32>,
    done: bool,
  }

  impl Observer<i32, ()> for &mut Collect {
    fn next(&mut self, value: i32) { self.values.push(value) }

    fn error(self, _err: ()) {}

    fn complete(self) { self.done = true }

    fn is_closed(&self) -> bool { self.done }
  }

  #[test]
  fn closure_observer_forwards_next() {
    let mut sum = 0;
    let mut observer = FnObserver::new(|v: i32| sum += v);
    observer.next(1);
    observer.next(2);
    observer.complete();
    assert_eq!(sum, 3);
  }

  #[test]
  fn drained_slot_reports_closed() {
    let mut collect = Collect { values: vec![], done: false };
    let slot = MutRc::own(Some(&mut collect));
    let other = slot.clone();

    other.complete();
    let closed = slot.is_closed();
    drop(slot);
    assert!(closed);
    assert!(collect.done);
  }

  #[test]
  fn boxed_observer_round_trip() {
    let mut sum = 0;
    {
      let mut boxed: BoxObserver<'_, i32, Infallible> =
        Box::new(FnObserver::new(|v: i32| sum += v));
      boxed.next(20);
      boxed.complete();
    }
    assert_eq!(sum, 20);
  }
}
