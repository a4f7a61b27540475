//! Cancellation handles for observable activations.
//!
//! `unsubscribe` consumes the handle, so disposing the same handle twice is
//! unrepresentable. Cloneable composite handles (`MultiSubscription`,
//! `MultiSubscriptionThreads`) guard with an internal closed flag instead:
//! disposal through any clone happens at most once and is visible through
//! every clone.

use smallvec::SmallVec;

use crate::rc::{InnerDeref, InnerDerefMut, MutArc, MutRc};

/// A disposable handle for one activation of an observable.
pub trait Subscription {
  /// Stop the activation this handle was returned from. All notifications
  /// scheduled after this call returns are suppressed.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

/// Synchronous sources finish delivering before `actual_subscribe` returns;
/// their handle is the unit value and there is nothing left to cancel.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

/// Wraps a teardown closure, e.g. returned from a `create` callback to
/// release a resource the emitter holds.
pub struct ClosureSubscription<F: FnOnce()>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  #[inline]
  fn unsubscribe(self) { (self.0)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Object-safe bridge: `Subscription::unsubscribe` takes `self` by value,
/// which a `dyn` object cannot do directly.
trait SubscriptionInner {
  fn inner_unsubscribe(self: Box<Self>);
  fn inner_is_closed(&self) -> bool;
}

impl<T: Subscription> SubscriptionInner for T {
  #[inline]
  fn inner_unsubscribe(self: Box<Self>) { (*self).unsubscribe() }

  #[inline]
  fn inner_is_closed(&self) -> bool { self.is_closed() }
}

/// Type-erased subscription for single-threaded teardown lists.
pub struct BoxSubscription<'a>(Box<dyn SubscriptionInner + 'a>);

impl<'a> BoxSubscription<'a> {
  #[inline]
  pub fn new<S: Subscription + 'a>(subscription: S) -> Self { Self(Box::new(subscription)) }
}

impl<'a> Subscription for BoxSubscription<'a> {
  #[inline]
  fn unsubscribe(self) { self.0.inner_unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.inner_is_closed() }
}

/// Type-erased subscription that may be disposed from another thread.
pub struct BoxSubscriptionThreads(Box<dyn SubscriptionInner + Send>);

impl BoxSubscriptionThreads {
  #[inline]
  pub fn new<S: Subscription + Send + 'static>(subscription: S) -> Self {
    Self(Box::new(subscription))
  }
}

impl Subscription for BoxSubscriptionThreads {
  #[inline]
  fn unsubscribe(self) { self.0.inner_unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.inner_is_closed() }
}

/// Composite of exactly two children, both disposed together. Used by
/// two-source operators (merge, zip) and by operators that pair an upstream
/// handle with their own bookkeeping.
pub struct TupleSubscription<U1, U2>(U1, U2);

impl<U1, U2> TupleSubscription<U1, U2> {
  #[inline]
  pub fn new(first: U1, second: U2) -> Self { TupleSubscription(first, second) }
}

impl<U1, U2> Subscription for TupleSubscription<U1, U2>
where
  U1: Subscription,
  U2: Subscription,
{
  fn unsubscribe(self) {
    self.0.unsubscribe();
    self.1.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.is_closed() && self.1.is_closed() }
}

struct MultiInner<T> {
  closed: bool,
  teardown: SmallVec<[T; 1]>,
}

impl<T> Default for MultiInner<T> {
  fn default() -> Self { MultiInner { closed: false, teardown: SmallVec::new() } }
}

macro_rules! multi_subscription {
  ($(#[$doc: meta])* $name: ident, $rc: ident, $box: ty $(,$lf: lifetime)?) => {
    $(#[$doc])*
    pub struct $name<$($lf)?>($rc<MultiInner<$box>>);

    impl<$($lf)?> Default for $name<$($lf)?> {
      #[inline]
      fn default() -> Self { Self(<_>::default()) }
    }

    impl<$($lf)?> Clone for $name<$($lf)?> {
      #[inline]
      fn clone(&self) -> Self { Self(self.0.clone()) }
    }

    impl<$($lf)?> $name<$($lf)?> {
      /// Adopt a child. A child appended after disposal is disposed on the
      /// spot.
      pub fn append(&mut self, subscription: $box) {
        {
          let mut inner = self.0.inner_deref_mut();
          if !inner.closed {
            inner.teardown.push(subscription);
            return;
          }
        }
        subscription.unsubscribe();
      }

      /// Drop children that are already closed, so a long-lived activation
      /// does not accumulate spent handles.
      pub fn retain(&mut self) {
        self
          .0
          .inner_deref_mut()
          .teardown
          .retain(|s| !s.is_closed());
      }
    }

    impl<$($lf)?> Subscription for $name<$($lf)?> {
      fn unsubscribe(self) {
        // Move the teardown list out before running it: a child's teardown
        // may re-enter this handle through a clone.
        let teardown = {
          let mut inner = self.0.inner_deref_mut();
          if inner.closed {
            return;
          }
          inner.closed = true;
          std::mem::take(&mut inner.teardown)
        };
        for subscription in teardown {
          subscription.unsubscribe();
        }
      }

      #[inline]
      fn is_closed(&self) -> bool { self.0.inner_deref().closed }
    }
  };
}

multi_subscription!(
  /// Growable teardown list for single-threaded activations. Cloning yields
  /// another handle to the same list.
  MultiSubscription, MutRc, BoxSubscription<'a>, 'a
);
multi_subscription!(
  /// Growable teardown list whose handles may be disposed from any thread.
  MultiSubscriptionThreads, MutArc, BoxSubscriptionThreads
);
