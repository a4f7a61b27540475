use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Remembers the freshest value and emits it when the source completes.
/// Constructed by `last` (empty sources emit nothing) or `last_or` (empty
/// sources emit the default the slot was seeded with).
#[derive(Clone)]
pub struct LastOp<S, Item> {
  pub(crate) source: S,
  pub(crate) last: Option<Item>,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for LastOp<S, Item>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, LastObserver<O, Item>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(LastObserver { observer, last: self.last })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for LastOp<S, Item> where S: ObservableExt<Item, Err> {}

pub struct LastObserver<O, Item> {
  observer: O,
  last: Option<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for LastObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.last = Some(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if let Some(value) = self.last.take() {
      self.observer.next(value);
    }
    self.observer.complete();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn emits_the_final_value() {
    let mut completed = 0;
    let mut last = None;
    observable::from_iter(0..100)
      .last()
      .on_complete(|| completed += 1)
      .subscribe(|v| last = Some(v));

    assert_eq!(completed, 1);
    assert_eq!(last, Some(99));
  }

  #[test]
  fn empty_source_emits_nothing() {
    let mut last = None;
    observable::empty::<i32>().last().subscribe(|v| last = Some(v));
    assert_eq!(last, None);
  }

  #[test]
  fn default_for_empty_source() {
    let mut last = None;
    observable::empty().last_or(100).subscribe(|v| last = Some(v));
    assert_eq!(last, Some(100));
  }

  #[test]
  fn default_is_overridden_by_values() {
    let mut last = None;
    observable::from_iter(0..2).last_or(100).subscribe(|v| last = Some(v));
    assert_eq!(last, Some(1));
  }
}
