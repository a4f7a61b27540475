use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::subscriber::Subscriber;
use crate::subscription::Subscription;

/// Create an observable from scratch. Each activation invokes `subscribe`
/// once with a fresh [`Subscriber`] guarding the downstream observer; the
/// closure's return value becomes the activation's teardown (return `()`
/// when there is nothing to release, or a
/// [`ClosureSubscription`](crate::subscription::ClosureSubscription)
/// otherwise).
///
/// ```
/// use rivulet::prelude::*;
///
/// let mut sum = 0;
/// observable::create(|mut subscriber: Subscriber<_>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
/// })
/// .subscribe(|v: i32| sum += v);
/// assert_eq!(sum, 3);
/// ```
pub fn create<F>(subscribe: F) -> Create<F> { Create(subscribe) }

#[derive(Clone)]
pub struct Create<F>(F);

impl<F, Item, Err, O, U> Observable<Item, Err, O> for Create<F>
where
  O: Observer<Item, Err>,
  F: FnOnce(Subscriber<O>) -> U,
  U: Subscription,
{
  type Unsub = U;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { (self.0)(Subscriber::new(observer)) }
}

impl<F, Item, Err> ObservableExt<Item, Err> for Create<F> {}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn emits_then_completes() {
    let mut seen = vec![];
    let mut completed = false;
    observable::create(|mut subscriber: Subscriber<_>| {
      subscriber.next(1);
      subscriber.next(2);
      subscriber.next(3);
      subscriber.complete();
    })
    .on_complete(|| completed = true)
    .subscribe(|v: i32| seen.push(v));

    assert_eq!(seen, vec![1, 2, 3]);
    assert!(completed);
  }

  #[test]
  fn error_reaches_the_handler() {
    let mut failure = None;
    observable::create(|subscriber: Subscriber<_>| {
      subscriber.error("boom");
    })
    .on_error(|e| failure = Some(e))
    .subscribe(|_: i32| {});

    assert_eq!(failure, Some("boom"));
  }

  #[test]
  fn teardown_runs_on_unsubscribe() {
    let released = Rc::new(Cell::new(false));
    let inner = released.clone();

    let subscription = observable::create(move |mut subscriber: Subscriber<_>| {
      subscriber.next(1);
      ClosureSubscription(move || inner.set(true))
    })
    .subscribe(|_: i32| {});

    assert!(!released.get());
    subscription.unsubscribe();
    assert!(released.get());
  }

  #[test]
  fn each_activation_reruns_the_closure() {
    let runs = Rc::new(Cell::new(0));
    let runs_in = runs.clone();
    let source = observable::create(move |mut subscriber: Subscriber<_>| {
      runs_in.set(runs_in.get() + 1);
      subscriber.next(runs_in.get());
      subscriber.complete();
    });

    source.clone().subscribe(|_: i32| {});
    source.subscribe(|_: i32| {});
    assert_eq!(runs.get(), 2);
  }
}
