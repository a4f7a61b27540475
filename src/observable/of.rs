use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::type_hint::TypeHint;

/// Create an observable that pushes a single value, then completes.
pub fn of<Item>(value: Item) -> Of<Item> { Of(value) }

/// Create an observable that completes without pushing anything.
pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

/// Create an observable that fails immediately with `err`. The item type is
/// free; pin it at the call site when the chain does not,
/// e.g. `observable::throw::<i32, _>("oops")`.
pub fn throw<Item, Err>(err: Err) -> Throw<Err, Item> {
  Throw { err, _marker: TypeHint::new() }
}

#[derive(Clone)]
pub struct Of<Item>(Item);

impl<Item, O> Observable<Item, Infallible, O> for Of<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    if !observer.is_closed() {
      observer.next(self.0);
      observer.complete();
    }
  }
}

impl<Item> ObservableExt<Item, Infallible> for Of<Item> {}

pub struct Empty<Item>(TypeHint<Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Empty(TypeHint::new()) }
}

impl<Item, O> Observable<Item, Infallible, O> for Empty<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    if !observer.is_closed() {
      observer.complete();
    }
  }
}

impl<Item> ObservableExt<Item, Infallible> for Empty<Item> {}

pub struct Throw<Err, Item> {
  err: Err,
  _marker: TypeHint<Item>,
}

impl<Err: Clone, Item> Clone for Throw<Err, Item> {
  fn clone(&self) -> Self { Throw { err: self.err.clone(), _marker: TypeHint::new() } }
}

impl<Item, Err, O> Observable<Item, Err, O> for Throw<Err, Item>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.err) }
}

impl<Item, Err> ObservableExt<Item, Err> for Throw<Err, Item> {}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn of_emits_once() {
    let mut seen = vec![];
    let mut completed = false;
    observable::of(42)
      .on_complete(|| completed = true)
      .subscribe(|v| seen.push(v));
    assert_eq!(seen, vec![42]);
    assert!(completed);
  }

  #[test]
  fn empty_only_completes() {
    let mut hit = false;
    let mut completed = false;
    observable::empty::<i32>()
      .on_complete(|| completed = true)
      .subscribe(|_| hit = true);
    assert!(!hit);
    assert!(completed);
  }

  #[test]
  fn throw_delivers_exactly_one_error() {
    let mut errors = 0;
    let mut completed = false;
    observable::throw::<i32, _>("oops")
      .on_complete(|| completed = true)
      .on_error(|_| errors += 1)
      .subscribe(|_| {});
    assert_eq!(errors, 1);
    assert!(!completed);
  }
}
