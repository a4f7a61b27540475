//! Two-source interleave.
//!
//! Both upstream halves feed one downstream observer through a shared slot.
//! The first `error` on either side takes the slot, so anything the other
//! side still delivers finds it drained. Completion needs both sides: the
//! first one only latches `completed_one`.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{InnerDeref, InnerDerefMut, MutRc};
use crate::subscription::TupleSubscription;

#[derive(Clone)]
pub struct MergeOp<S1, S2> {
  pub(crate) source1: S1,
  pub(crate) source2: S2,
}

struct MergeState<O> {
  observer: O,
  completed_one: bool,
}

pub struct MergeObserver<O>(MutRc<Option<MergeState<O>>>);

impl<O> Clone for MergeObserver<O> {
  fn clone(&self) -> Self { MergeObserver(self.0.clone()) }
}

impl<Item, Err, O, S1, S2> Observable<Item, Err, O> for MergeOp<S1, S2>
where
  O: Observer<Item, Err>,
  S1: Observable<Item, Err, MergeObserver<O>>,
  S2: Observable<Item, Err, MergeObserver<O>>,
{
  type Unsub = TupleSubscription<S1::Unsub, S2::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let state = MutRc::own(Some(MergeState { observer, completed_one: false }));
    let half = MergeObserver(state.clone());
    let first = self.source1.actual_subscribe(half);
    let second = self.source2.actual_subscribe(MergeObserver(state));
    TupleSubscription::new(first, second)
  }
}

impl<Item, Err, S1, S2> ObservableExt<Item, Err> for MergeOp<S1, S2>
where
  S1: ObservableExt<Item, Err>,
  S2: ObservableExt<Item, Err>,
{
}

impl<Item, Err, O> Observer<Item, Err> for MergeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(state) = self.0.inner_deref_mut().as_mut() {
      state.observer.next(value);
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
      let both_done = slot
        .as_mut()
        .map_or(false, |state| std::mem::replace(&mut state.completed_one, true));
      if both_done { slot.take() } else { None }
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
