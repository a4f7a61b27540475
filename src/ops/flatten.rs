//! Select-many for sequences whose items are themselves observables.
//!
//! The outer activation subscribes every inner observable as it arrives and
//! interleaves their outputs into one downstream. `flatten` is only defined
//! when the item type implements [`Observable`], so flattening a sequence
//! of non-sequences fails to compile rather than being left undefined.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::ops::map::MapOp;
use crate::rc::{InnerDeref, InnerDerefMut, MutRc};
use crate::subscription::{BoxSubscription, MultiSubscription, TupleSubscription};
use crate::type_hint::TypeHint;

/// `map` into an inner observable, then `flatten`.
pub type FlatMapOp<'a, S, F, Item, V> = FlattenOp<'a, MapOp<S, F, Item>, V>;

pub struct FlattenOp<'a, S, V> {
  pub(crate) source: S,
  pub(crate) _marker: TypeHint<&'a V>,
}

impl<'a, S: Clone, V> Clone for FlattenOp<'a, S, V> {
  fn clone(&self) -> Self { FlattenOp { source: self.source.clone(), _marker: TypeHint::new() } }
}

struct FlattenState<O> {
  observer: O,
  active: usize,
  outer_done: bool,
}

pub struct FlattenOuterObserver<'a, O, Item> {
  state: MutRc<Option<FlattenState<O>>>,
  subscription: MultiSubscription<'a>,
  _marker: TypeHint<Item>,
}

pub struct FlattenInnerObserver<O>(MutRc<Option<FlattenState<O>>>);

impl<'a, Item, Err, O, S, V> Observable<Item, Err, O> for FlattenOp<'a, S, V>
where
  O: Observer<Item, Err> + 'a,
  S: Observable<V, Err, FlattenOuterObserver<'a, O, Item>>,
  V: Observable<Item, Err, FlattenInnerObserver<O>>,
  V::Unsub: 'a,
{
  type Unsub = TupleSubscription<S::Unsub, MultiSubscription<'a>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscription::default();
    let outer = FlattenOuterObserver {
      state: MutRc::own(Some(FlattenState { observer, active: 0, outer_done: false })),
      subscription: subscription.clone(),
      _marker: TypeHint::new(),
    };
    let unsub = self.source.actual_subscribe(outer);
    TupleSubscription::new(unsub, subscription)
  }
}

impl<'a, Item, Err, S, V> ObservableExt<Item, Err> for FlattenOp<'a, S, V>
where
  S: ObservableExt<V, Err>,
  V: ObservableExt<Item, Err>,
{
}

impl<'a, Item, Err, O, V> Observer<V, Err> for FlattenOuterObserver<'a, O, Item>
where
  O: Observer<Item, Err>,
  V: Observable<Item, Err, FlattenInnerObserver<O>>,
  V::Unsub: 'a,
{
  fn next(&mut self, value: V) {
    {
      let mut slot = self.state.inner_deref_mut();
      let Some(state) = slot.as_mut() else { return };
      state.active += 1;
    }
    self.subscription.retain();
    let unsub = value.actual_subscribe(FlattenInnerObserver(self.state.clone()));
    self.subscription.append(BoxSubscription::new(unsub));
  }

  fn error(self, err: Err) {
    let state = self.state.inner_deref_mut().take();
    if let Some(state) = state {
      state.observer.error(err);
    }
  }

  fn complete(self) {
    let state = {
      let mut slot = self.state.inner_deref_mut();
      let finished = slot.as_mut().map_or(false, |state| {
        state.outer_done = true;
        state.active == 0
      });
      if finished { slot.take() } else { None }
    };
    if let Some(state) = state {
      state.observer.complete();
    }
  }

  fn is_closed(&self) -> bool {
    self
      .state
      .inner_deref()
      .as_ref()
      .map_or(true, |state| state.observer.is_closed())
  }
}

impl<Item, Err, O> Observer<Item, Err> for FlattenInnerObserver<O>
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
      let finished = slot.as_mut().map_or(false, |state| {
        state.active -= 1;
        state.active == 0 && state.outer_done
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
