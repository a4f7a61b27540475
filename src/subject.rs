//! Hot, multicasting sources.
//!
//! A subject is both an [`Observer`] fed by the caller and an
//! [`Observable`] multicasting to every registered subscriber. Subscribers
//! live in an id-keyed registry; dispatch walks a snapshot taken outside
//! the registry borrow, so a callback may subscribe, unsubscribe or emit on
//! the same subject re-entrantly. Terminal events are sticky: they drain
//! the registry, later `next` calls are dropped, and a late subscriber is
//! completed on the spot.

use smallvec::SmallVec;

use crate::observable::{Observable, ObservableExt};
use crate::observer::{BoxObserver, BoxObserverThreads, Observer};
use crate::rc::{InnerDeref, InnerDerefMut, MutArc, MutRc};
use crate::subscription::Subscription;

struct SubjectCore<P> {
  next_id: usize,
  stopped: bool,
  observers: SmallVec<[(usize, P); 2]>,
}

impl<P> Default for SubjectCore<P> {
  fn default() -> Self { SubjectCore { next_id: 0, stopped: false, observers: SmallVec::new() } }
}

impl<P> SubjectCore<P> {
  fn reserve_id(&mut self) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    id
  }

  fn register(&mut self, slot: P) -> usize {
    let id = self.reserve_id();
    self.observers.push((id, slot));
    id
  }

  fn remove(&mut self, id: usize) -> Option<P> {
    self
      .observers
      .iter()
      .position(|(slot_id, _)| *slot_id == id)
      .map(|index| self.observers.remove(index).1)
  }

  fn contains(&self, id: usize) -> bool { self.observers.iter().any(|(slot_id, _)| *slot_id == id) }
}

type LocalSlot<'a, Item, Err> = MutRc<Option<BoxObserver<'a, Item, Err>>>;
type ThreadsSlot<Item, Err> = MutArc<Option<BoxObserverThreads<Item, Err>>>;

/// Single-threaded subject.
pub struct Subject<'a, Item, Err> {
  core: MutRc<SubjectCore<LocalSlot<'a, Item, Err>>>,
}

/// Subject whose subscribers may be fed and disposed from other threads.
pub struct SubjectThreads<Item, Err> {
  core: MutArc<SubjectCore<ThreadsSlot<Item, Err>>>,
}

macro_rules! subject_common_impl {
  ($subject: ident $(,$lf: lifetime)?) => {
    impl<$($lf,)? Item, Err> Default for $subject<$($lf,)? Item, Err> {
      #[inline]
      fn default() -> Self { Self { core: <_>::default() } }
    }

    impl<$($lf,)? Item, Err> Clone for $subject<$($lf,)? Item, Err> {
      #[inline]
      fn clone(&self) -> Self { Self { core: self.core.clone() } }
    }

    impl<$($lf,)? Item, Err> $subject<$($lf,)? Item, Err> {
      /// Number of currently registered subscribers.
      pub fn subscriber_count(&self) -> usize { self.core.inner_deref().observers.len() }
    }

    impl<$($lf,)? Item, Err> Observer<Item, Err> for $subject<$($lf,)? Item, Err>
    where
      Item: Clone,
      Err: Clone,
    {
      fn next(&mut self, value: Item) {
        // Snapshot outside the borrow: a callback may re-enter this subject.
        let snapshot: SmallVec<[_; 2]> = {
          let mut core = self.core.inner_deref_mut();
          if core.stopped {
            return;
          }
          core.observers.retain(|(_, slot)| !slot.is_closed());
          core.observers.iter().map(|(_, slot)| slot.clone()).collect()
        };
        for mut slot in snapshot {
          slot.next(value.clone());
        }
      }

      fn error(self, err: Err) {
        let drained = {
          let mut core = self.core.inner_deref_mut();
          if core.stopped {
            return;
          }
          core.stopped = true;
          std::mem::take(&mut core.observers)
        };
        for (_, slot) in drained {
          slot.error(err.clone());
        }
      }

      fn complete(self) {
        let drained = {
          let mut core = self.core.inner_deref_mut();
          if core.stopped {
            return;
          }
          core.stopped = true;
          std::mem::take(&mut core.observers)
        };
        for (_, slot) in drained {
          slot.complete();
        }
      }

      #[inline]
      fn is_closed(&self) -> bool { self.core.inner_deref().stopped }
    }

    impl<$($lf,)? Item, Err> ObservableExt<Item, Err> for $subject<$($lf,)? Item, Err> {}
  };
}

subject_common_impl!(Subject, 'a);
subject_common_impl!(SubjectThreads);

impl<'a, Item, Err, O> Observable<Item, Err, O> for Subject<'a, Item, Err>
where
  O: Observer<Item, Err> + 'a,
{
  type Unsub = SubjectSubscription<'a, Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut core = self.core.inner_deref_mut();
    if core.stopped {
      let id = core.reserve_id();
      drop(core);
      observer.complete();
      return SubjectSubscription { core: self.core, id };
    }
    let boxed: BoxObserver<'a, Item, Err> = Box::new(observer);
    let id = core.register(MutRc::own(Some(boxed)));
    drop(core);
    SubjectSubscription { core: self.core, id }
  }
}

impl<Item, Err, O> Observable<Item, Err, O> for SubjectThreads<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
{
  type Unsub = SubjectSubscriptionThreads<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut core = self.core.inner_deref_mut();
    if core.stopped {
      let id = core.reserve_id();
      drop(core);
      observer.complete();
      return SubjectSubscriptionThreads { core: self.core, id };
    }
    let boxed: BoxObserverThreads<Item, Err> = Box::new(observer);
    let id = core.register(MutArc::own(Some(boxed)));
    drop(core);
    SubjectSubscriptionThreads { core: self.core, id }
  }
}

/// Handle for one subscriber of a [`Subject`]; disposing it detaches that
/// subscriber only.
pub struct SubjectSubscription<'a, Item, Err> {
  core: MutRc<SubjectCore<LocalSlot<'a, Item, Err>>>,
  id: usize,
}

/// Handle for one subscriber of a [`SubjectThreads`].
pub struct SubjectSubscriptionThreads<Item, Err> {
  core: MutArc<SubjectCore<ThreadsSlot<Item, Err>>>,
  id: usize,
}

macro_rules! subject_subscription_impl {
  ($subscription: ident $(,$lf: lifetime)?) => {
    impl<$($lf,)? Item, Err> Subscription for $subscription<$($lf,)? Item, Err> {
      fn unsubscribe(self) {
        let removed = self.core.inner_deref_mut().remove(self.id);
        if let Some(slot) = removed {
          // Empty the slot as well: an in-flight dispatch snapshot may still
          // hold a clone of it.
          slot.inner_deref_mut().take();
        }
      }

      fn is_closed(&self) -> bool { !self.core.inner_deref().contains(self.id) }
    }
  };
}

subject_subscription_impl!(SubjectSubscription, 'a);
subject_subscription_impl!(SubjectSubscriptionThreads);
