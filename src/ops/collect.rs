use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::type_hint::TypeHint;

/// Gathers the whole sequence into any `Default + Extend` container and
/// emits it as a single value at completion time.
pub struct CollectOp<S, C, Item> {
  pub(crate) source: S,
  pub(crate) _marker: TypeHint<(C, Item)>,
}

impl<S: Clone, C, Item> Clone for CollectOp<S, C, Item> {
  fn clone(&self) -> Self { CollectOp { source: self.source.clone(), _marker: TypeHint::new() } }
}

impl<Item, Err, O, S, C> Observable<C, Err, O> for CollectOp<S, C, Item>
where
  O: Observer<C, Err>,
  S: Observable<Item, Err, CollectObserver<O, C>>,
  C: Default + Extend<Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(CollectObserver { observer, collection: C::default() })
  }
}

impl<Item, Err, S, C> ObservableExt<C, Err> for CollectOp<S, C, Item>
where
  S: ObservableExt<Item, Err>,
  C: Default + Extend<Item>,
{
}

pub struct CollectObserver<O, C> {
  observer: O,
  collection: C,
}

impl<Item, Err, O, C> Observer<Item, Err> for CollectObserver<O, C>
where
  O: Observer<C, Err>,
  C: Default + Extend<Item>,
{
  fn next(&mut self, value: Item) { self.collection.extend(std::iter::once(value)) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    let collection = std::mem::take(&mut self.collection);
    self.observer.next(collection);
    self.observer.complete();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn into_vec() {
    let mut out = None;
    observable::from_iter(0..5).collect::<Vec<_>>().subscribe(|v| out = Some(v));
    assert_eq!(out, Some(vec![0, 1, 2, 3, 4]));
  }

  #[test]
  fn into_string() {
    let mut out = String::new();
    observable::from_iter(vec!['r', 'x']).collect::<String>().subscribe(|v| out = v);
    assert_eq!(out, "rx");
  }

  #[test]
  fn empty_source_yields_empty_container() {
    let mut out = None;
    observable::empty::<i32>().collect::<Vec<_>>().subscribe(|v| out = Some(v));
    assert_eq!(out, Some(vec![]));
  }
}
