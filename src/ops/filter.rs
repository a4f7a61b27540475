use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct FilterOp<S, F> {
  pub(crate) source: S,
  pub(crate) predicate: F,
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for FilterOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, FilterObserver<O, F>>,
  F: FnMut(&Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(FilterObserver { observer, predicate: self.predicate })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for FilterOp<S, F>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(&Item) -> bool,
{
}

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for FilterObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

/// `filter` with a fallible predicate; a returned `Err` is forwarded as the
/// activation's single `error` and the adapter closes.
#[derive(Clone)]
pub struct FilterWithErrOp<S, F> {
  pub(crate) source: S,
  pub(crate) predicate: F,
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for FilterWithErrOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, FilterWithErrObserver<O, F>>,
  F: FnMut(&Item) -> Result<bool, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(FilterWithErrObserver {
      observer: Some(observer),
      predicate: self.predicate,
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for FilterWithErrOp<S, F>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(&Item) -> Result<bool, Err>,
{
}

pub struct FilterWithErrObserver<O, F> {
  observer: Option<O>,
  predicate: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for FilterWithErrObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> Result<bool, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_some() {
      match (self.predicate)(&value) {
        Ok(true) => self.observer.next(value),
        Ok(false) => {}
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

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn keeps_matching_values() {
    let mut evens = vec![];
    observable::from_iter(0..10)
      .filter(|v| v % 2 == 0)
      .subscribe(|v| evens.push(v));
    assert_eq!(evens, vec![0, 2, 4, 6, 8]);
  }

  #[test]
  fn predicate_failure_is_contained() {
    let mut seen = vec![];
    let mut errors = 0;
    observable::create(|mut subscriber: Subscriber<_>| {
      subscriber.next(2);
      subscriber.next(3);
      subscriber.next(4);
      subscriber.complete();
    })
    .filter_with_err(|v: &i32| if v % 2 == 0 { Ok(true) } else { Err("odd") })
    .on_error(|_| errors += 1)
    .subscribe(|v| seen.push(v));

    assert_eq!(seen, vec![2]);
    assert_eq!(errors, 1);
  }
}
