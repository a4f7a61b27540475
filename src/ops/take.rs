use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Passes through the first `count` values, then completes, regardless of
/// whether the source ever does. Once the quota is reached the adapter
/// reports itself closed, so synchronous sources stop pulling.
#[derive(Clone)]
pub struct TakeOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for TakeOp<S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TakeObserver<O>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = if self.count == 0 {
      observer.complete();
      None
    } else {
      Some(observer)
    };
    self.source.actual_subscribe(TakeObserver {
      observer,
      count: self.count,
      hits: 0,
    })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for TakeOp<S> where S: ObservableExt<Item, Err> {}

pub struct TakeObserver<O> {
  observer: Option<O>,
  count: usize,
  hits: usize,
}

impl<Item, Err, O> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.observer {
      if self.hits < self.count {
        self.hits += 1;
        observer.next(value);
        if self.hits == self.count {
          if let Some(observer) = self.observer.take() {
            observer.complete();
          }
        }
      }
    }
  }

  fn error(mut self, err: Err) {
    if let Some(observer) = self.observer.take() {
      observer.error(err);
    }
  }

  fn complete(mut self) {
    if let Some(observer) = self.observer.take() {
      observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.as_ref().map_or(true, Observer::is_closed) }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn quota_then_complete() {
    let mut hits = 0;
    let mut completed = false;
    observable::from_iter(0..100)
      .take(5)
      .on_complete(|| completed = true)
      .subscribe(|_| hits += 1);

    assert_eq!(hits, 5);
    assert!(completed);
  }

  #[test]
  fn shorter_source_completes_naturally() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter(0..3)
      .take(10)
      .on_complete(|| completed = true)
      .subscribe(|v| values.push(v));

    assert_eq!(values, vec![0, 1, 2]);
    assert!(completed);
  }

  #[test]
  fn take_zero() {
    let mut hit = false;
    let mut completed = false;
    observable::from_iter(0..100)
      .take(0)
      .on_complete(|| completed = true)
      .subscribe(|_| hit = true);

    assert!(!hit);
    assert!(completed);
  }

  #[test]
  fn completes_exactly_once() {
    let mut completions = 0;
    observable::from_iter(0..5)
      .take(5)
      .on_complete(|| completions += 1)
      .subscribe(|_| {});
    assert_eq!(completions, 1);
  }
}
