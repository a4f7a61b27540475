use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::type_hint::TypeHint;

/// Discharges the error channel: the failure, if any, is handed to the
/// callback, and the rest of the chain is typed infallible, which is what
/// makes a bare `subscribe` available downstream. An activation that never
/// fails never invokes the callback.
pub struct OnErrorOp<S, F, Err> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) _marker: TypeHint<Err>,
}

impl<S: Clone, F: Clone, Err> Clone for OnErrorOp<S, F, Err> {
  fn clone(&self) -> Self {
    OnErrorOp { source: self.source.clone(), func: self.func.clone(), _marker: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F> Observable<Item, Infallible, O> for OnErrorOp<S, F, Err>
where
  O: Observer<Item, Infallible>,
  S: Observable<Item, Err, OnErrorObserver<O, F>>,
  F: FnOnce(Err),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(OnErrorObserver { observer, func: self.func })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Infallible> for OnErrorOp<S, F, Err> where
  S: ObservableExt<Item, Err>
{
}

pub struct OnErrorObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for OnErrorObserver<O, F>
where
  O: Observer<Item, Infallible>,
  F: FnOnce(Err),
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { (self.func)(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn handler_sees_the_failure() {
    let mut failure = None;
    observable::throw::<i32, _>("oops")
      .on_error(|e| failure = Some(e))
      .subscribe(|_| {});
    assert_eq!(failure, Some("oops"));
  }

  #[test]
  fn untouched_on_success() {
    let mut errors = 0;
    let mut sum = 0;
    observable::from_iter(0..4)
      .on_error(|_| errors += 1)
      .subscribe(|v| sum += v);
    assert_eq!(errors, 0);
    assert_eq!(sum, 6);
  }
}
