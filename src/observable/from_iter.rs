use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Create an observable that pushes every value of an iterator, then
/// completes. Never errors. Emission stops early if the downstream chain
/// reports itself closed (e.g. a `take` that has seen its fill).
///
/// ```
/// use rivulet::prelude::*;
///
/// let mut total = 0;
/// observable::from_iter(vec![1, 2, 3]).subscribe(|v| total += v);
/// assert_eq!(total, 6);
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

/// Create an observable that pushes `value` `n` times, then completes.
pub fn repeat<Item>(value: Item, n: usize) -> ObservableIter<std::iter::Take<std::iter::Repeat<Item>>>
where
  Item: Clone,
{
  from_iter(std::iter::repeat(value).take(n))
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<Iter, O> Observable<Iter::Item, Infallible, O> for ObservableIter<Iter>
where
  Iter: IntoIterator,
  O: Observer<Iter::Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for value in self.0 {
      if observer.is_closed() {
        return;
      }
      observer.next(value);
    }
    if !observer.is_closed() {
      observer.complete();
    }
  }
}

impl<Iter> ObservableExt<Iter::Item, Infallible> for ObservableIter<Iter> where Iter: IntoIterator {}
