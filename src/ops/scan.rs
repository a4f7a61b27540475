use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::type_hint::TypeHint;

pub struct ScanOp<S, F, B, Item> {
  pub(crate) source: S,
  pub(crate) binary_op: F,
  pub(crate) initial: B,
  pub(crate) _marker: TypeHint<Item>,
}

impl<S: Clone, F: Clone, B: Clone, Item> Clone for ScanOp<S, F, B, Item> {
  fn clone(&self) -> Self {
    ScanOp {
      source: self.source.clone(),
      binary_op: self.binary_op.clone(),
      initial: self.initial.clone(),
      _marker: TypeHint::new(),
    }
  }
}

impl<Item, B, Err, O, S, F> Observable<B, Err, O> for ScanOp<S, F, B, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, ScanObserver<O, F, B>>,
  F: FnMut(B, Item) -> B,
  B: Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ScanObserver {
      observer,
      binary_op: self.binary_op,
      acc: self.initial,
    })
  }
}

impl<Item, B, Err, S, F> ObservableExt<B, Err> for ScanOp<S, F, B, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(B, Item) -> B,
{
}

pub struct ScanObserver<O, F, B> {
  observer: O,
  binary_op: F,
  acc: B,
}

impl<Item, B, Err, O, F> Observer<Item, Err> for ScanObserver<O, F, B>
where
  O: Observer<B, Err>,
  F: FnMut(B, Item) -> B,
  B: Clone,
{
  fn next(&mut self, value: Item) {
    self.acc = (self.binary_op)(self.acc.clone(), value);
    self.observer.next(self.acc.clone());
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn running_total() {
    let mut totals = vec![];
    observable::from_iter(vec![1, 1, 1, 1, 1])
      .scan(|acc: i32, v| acc + v)
      .subscribe(|v| totals.push(v));
    assert_eq!(totals, vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn seeded_fold() {
    let mut last = 0;
    observable::from_iter(vec![1, 1, 1])
      .scan_initial(100, |acc, v| acc + v)
      .subscribe(|v| last = v);
    assert_eq!(last, 103);
  }

  #[test]
  fn empty_source_emits_nothing() {
    let mut hit = false;
    observable::empty::<i32>()
      .scan(|acc: i32, v| acc + v)
      .subscribe(|_| hit = true);
    assert!(!hit);
  }
}
