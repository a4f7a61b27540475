use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::type_hint::TypeHint;

pub struct MapOp<S, F, Item> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) _marker: TypeHint<Item>,
}

// Clone by hand: a derive would demand `Item: Clone` for the marker.
impl<S: Clone, F: Clone, Item> Clone for MapOp<S, F, Item> {
  fn clone(&self) -> Self {
    MapOp { source: self.source.clone(), func: self.func.clone(), _marker: TypeHint::new() }
  }
}

impl<Item, B, Err, O, S, F> Observable<B, Err, O> for MapOp<S, F, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, MapObserver<O, F>>,
  F: FnMut(Item) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(MapObserver { observer, func: self.func })
  }
}

impl<Item, B, Err, S, F> ObservableExt<B, Err> for MapOp<S, F, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(Item) -> B,
{
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, B, Err, O, F> Observer<Item, Err> for MapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

/// `map` with a fallible selector. The first `Err` the selector returns is
/// forwarded as the activation's single `error`; afterwards the adapter is
/// closed and upstream values are dropped.
pub struct MapWithErrOp<S, F, Item> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) _marker: TypeHint<Item>,
}

impl<S: Clone, F: Clone, Item> Clone for MapWithErrOp<S, F, Item> {
  fn clone(&self) -> Self {
    MapWithErrOp { source: self.source.clone(), func: self.func.clone(), _marker: TypeHint::new() }
  }
}

impl<Item, B, Err, O, S, F> Observable<B, Err, O> for MapWithErrOp<S, F, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, MapWithErrObserver<O, F>>,
  F: FnMut(Item) -> Result<B, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(MapWithErrObserver { observer: Some(observer), func: self.func })
  }
}

impl<Item, B, Err, S, F> ObservableExt<B, Err> for MapWithErrOp<S, F, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(Item) -> Result<B, Err>,
{
}

pub struct MapWithErrObserver<O, F> {
  observer: Option<O>,
  func: F,
}

impl<Item, B, Err, O, F> Observer<Item, Err> for MapWithErrObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_some() {
      match (self.func)(value) {
        Ok(mapped) => self.observer.next(mapped),
        Err(err) => {
          if let Some(observer) = self.observer.take() {
            observer.error(err);
          }
        }
      }
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
