//! Two-source pairing by position.
//!
//! Each side queues what the other has not yet matched. A side that
//! completes with an empty queue ends the pairing; a side that completes
//! with queued values lets the other side drain them first.

use std::collections::VecDeque;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{InnerDeref, InnerDerefMut, MutRc};
use crate::subscription::TupleSubscription;

#[derive(Clone)]
pub struct ZipOp<S1, S2> {
  pub(crate) source1: S1,
  pub(crate) source2: S2,
}

struct ZipState<O, A, B> {
  observer: O,
  left: VecDeque<A>,
  right: VecDeque<B>,
  left_done: bool,
  right_done: bool,
}

impl<O, A, B> ZipState<O, A, B> {
  fn drained(&self) -> bool {
    self.left_done && self.left.is_empty() || self.right_done && self.right.is_empty()
  }
}

pub struct ZipObserverLeft<O, A, B>(MutRc<Option<ZipState<O, A, B>>>);
pub struct ZipObserverRight<O, A, B>(MutRc<Option<ZipState<O, A, B>>>);

impl<ItemA, ItemB, Err, O, S1, S2> Observable<(ItemA, ItemB), Err, O> for ZipOp<S1, S2>
where
  O: Observer<(ItemA, ItemB), Err>,
  S1: Observable<ItemA, Err, ZipObserverLeft<O, ItemA, ItemB>>,
  S2: Observable<ItemB, Err, ZipObserverRight<O, ItemA, ItemB>>,
{
  type Unsub = TupleSubscription<S1::Unsub, S2::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let state = MutRc::own(Some(ZipState {
      observer,
      left: VecDeque::new(),
      right: VecDeque::new(),
      left_done: false,
      right_done: false,
    }));
    let first = self.source1.actual_subscribe(ZipObserverLeft(state.clone()));
    let second = self.source2.actual_subscribe(ZipObserverRight(state));
    TupleSubscription::new(first, second)
  }
}

impl<ItemA, ItemB, Err, S1, S2> ObservableExt<(ItemA, ItemB), Err> for ZipOp<S1, S2>
where
  S1: ObservableExt<ItemA, Err>,
  S2: ObservableExt<ItemB, Err>,
{
}

macro_rules! zip_observer_impl {
  ($observer: ident, $item: ident, $queue: ident, $done: ident) => {
    impl<ItemA, ItemB, Err, O> Observer<$item, Err> for $observer<O, ItemA, ItemB>
    where
      O: Observer<(ItemA, ItemB), Err>,
    {
      fn next(&mut self, value: $item) {
        let finished = {
          let mut slot = self.0.inner_deref_mut();
          let Some(state) = slot.as_mut() else { return };
          state.$queue.push_back(value);
          if !state.left.is_empty() && !state.right.is_empty() {
            if let (Some(a), Some(b)) = (state.left.pop_front(), state.right.pop_front()) {
              state.observer.next((a, b));
            }
          }
          state.drained()
        };
        if finished {
          let state = self.0.inner_deref_mut().take();
          if let Some(state) = state {
            state.observer.complete();
          }
        }
      }

      fn error(self, err: Err) {
        let state = self.0.inner_deref_mut().take();
        if let Some(state) = state {
          state.observer.error(err);
        }
      }

      fn complete(self) {
        let state = {
          let mut slot = self.0.inner_deref_mut();
          let finished = slot.as_mut().map_or(false, |state| {
            state.$done = true;
            state.$queue.is_empty()
          });
          if finished { slot.take() } else { None }
        };
        if let Some(state) = state {
          state.observer.complete();
        }
      }

      fn is_closed(&self) -> bool {
        self
          .0
          .inner_deref()
          .as_ref()
          .map_or(true, |state| state.observer.is_closed())
      }
    }
  };
}

zip_observer_impl!(ZipObserverLeft, ItemA, left, left_done);
zip_observer_impl!(ZipObserverRight, ItemB, right, right_done);
