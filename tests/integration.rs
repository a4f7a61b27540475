//! End-to-end tests for composed operator chains: the contract properties
//! (laziness, terminal stickiness, disposal idempotence, per-activation
//! state) and representative multi-operator pipelines.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use rivulet::prelude::*;

#[test]
fn chain_construction_is_lazy() {
  let predicate_calls = Rc::new(Cell::new(0));
  let selector_calls = Rc::new(Cell::new(0));
  let p = predicate_calls.clone();
  let s = selector_calls.clone();

  let chain = observable::from_iter(0..100)
    .filter(move |_| {
      p.set(p.get() + 1);
      true
    })
    .map(move |v: i32| {
      s.set(s.get() + 1);
      v
    });

  assert_eq!(predicate_calls.get(), 0);
  assert_eq!(selector_calls.get(), 0);

  chain.subscribe(|_| {});
  assert_eq!(predicate_calls.get(), 100);
  assert_eq!(selector_calls.get(), 100);
}

#[test]
fn each_activation_owns_fresh_operator_state() {
  let chain = observable::from_iter([1, 1, 2, 2, 2, 3, 1]).distinct_until_changed();

  let mut first = vec![];
  let mut second = vec![];
  chain.clone().subscribe(|v| first.push(v));
  chain.subscribe(|v| second.push(v));

  // Had the remembered value leaked between activations, the second run
  // would have suppressed its leading 1.
  assert_eq!(first, vec![1, 2, 3, 1]);
  assert_eq!(second, vec![1, 2, 3, 1]);
}

#[test]
fn distinct_until_changed_dedup_endpoints() {
  let mut out = vec![];
  observable::from_iter([1, 1, 2, 2, 2, 3, 1])
    .distinct_until_changed()
    .subscribe(|v| out.push(v));
  assert_eq!(out, vec![1, 2, 3, 1]);

  let mut empty_out: Vec<i32> = vec![];
  let mut completed = false;
  observable::empty()
    .distinct_until_changed()
    .on_complete(|| completed = true)
    .subscribe(|v| empty_out.push(v));
  assert_eq!(empty_out, vec![]);
  assert!(completed);

  let mut single = vec![];
  observable::of(5).distinct_until_changed().subscribe(|v| single.push(v));
  assert_eq!(single, vec![5]);
}

#[test]
fn disposal_is_idempotent() {
  let mut subject = Subject::default();
  let hits = Rc::new(Cell::new(0));
  let h = hits.clone();

  let subscription = subject.clone().subscribe(move |_: i32| h.set(h.get() + 1));

  let mut composite = MultiSubscription::default();
  composite.append(BoxSubscription::new(subscription));
  let twin = composite.clone();

  composite.unsubscribe();
  assert!(twin.is_closed());
  // Second disposal through the surviving handle is a no-op.
  twin.unsubscribe();

  subject.next(1);
  assert_eq!(hits.get(), 0);
  assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn terminal_stickiness_across_the_chain() {
  let out = Rc::new(RefCell::new(vec![]));
  let completions = Rc::new(Cell::new(0));
  let sink = out.clone();
  let c = completions.clone();

  let mut subject = Subject::default();
  subject
    .clone()
    .map(|v: i32| v * 2)
    .on_complete(move || c.set(c.get() + 1))
    .subscribe(move |v| sink.borrow_mut().push(v));

  subject.next(1);
  subject.clone().complete();
  subject.next(2);
  subject.clone().complete();

  assert_eq!(*out.borrow(), vec![2]);
  assert_eq!(completions.get(), 1);
}

#[test]
fn callback_failure_is_contained() {
  let out = Rc::new(RefCell::new(vec![]));
  let errors = Rc::new(Cell::new(0));
  let sink = out.clone();
  let e = errors.clone();

  let mut subject: Subject<'_, i32, &str> = Subject::default();
  subject
    .clone()
    .map_with_err(|v| if v < 3 { Ok(v) } else { Err("selector failed") })
    .on_error(move |_| e.set(e.get() + 1))
    .subscribe(move |v| sink.borrow_mut().push(v));

  subject.next(1);
  subject.next(2);
  subject.next(3);
  subject.next(1);

  assert_eq!(*out.borrow(), vec![1, 2]);
  assert_eq!(errors.get(), 1);
}

#[test]
fn multi_operator_pipeline() {
  let mut out = vec![];
  observable::from_iter(1..=20)
    .filter(|v| v % 2 == 0)
    .map(|v| v * v)
    .scan(|acc: i32, v| acc + v)
    .skip(2)
    .take(3)
    .subscribe(|v| out.push(v));

  // Squares of evens: 4 16 36 64 100 ...; running sums: 4 20 56 120 220 ...
  assert_eq!(out, vec![56, 120, 220]);
}

#[test]
fn merge_then_distinct() {
  let out = Rc::new(RefCell::new(vec![]));
  let sink = out.clone();

  let mut left = Subject::default();
  let right = Subject::default();
  left
    .clone()
    .merge(right.clone())
    .distinct_until_changed()
    .subscribe(move |v: i32| sink.borrow_mut().push(v));

  left.next(1);
  left.next(1);
  right.clone().next(1);
  right.clone().next(2);
  left.next(2);
  left.next(3);

  assert_eq!(*out.borrow(), vec![1, 2, 3]);
}

#[test]
fn zip_pairs_two_cold_sources() {
  let mut out = vec![];
  observable::from_iter([1, 2, 3])
    .zip(observable::from_iter(['a', 'b', 'c']))
    .subscribe(|pair| out.push(pair));
  assert_eq!(out, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
}

#[test]
fn group_by_routes_and_completes() {
  let evens = Rc::new(RefCell::new(vec![]));
  let odds = Rc::new(RefCell::new(vec![]));
  let completions = Rc::new(Cell::new(0));

  observable::from_iter(0..8)
    .group_by::<_, _, Subject<_, _>>(|v| v % 2 == 0)
    .subscribe(|group| {
      let sink = if group.key { evens.clone() } else { odds.clone() };
      let c = completions.clone();
      group
        .on_complete(move || c.set(c.get() + 1))
        .subscribe(move |v| sink.borrow_mut().push(v));
    });

  assert_eq!(*evens.borrow(), vec![0, 2, 4, 6]);
  assert_eq!(*odds.borrow(), vec![1, 3, 5, 7]);
  assert_eq!(completions.get(), 2);
}

#[test]
fn flat_map_then_collect() {
  let mut out = vec![];
  observable::from_iter([1, 1, 2, 2, 3])
    .flat_map(|v| observable::repeat(v, 2))
    .collect::<Vec<_>>()
    .subscribe(|v| out.push(v));

  assert_eq!(out, vec![vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3]]);
}

#[test]
fn source_failure_reaches_only_the_error_handler() {
  let out = Rc::new(RefCell::new(vec![]));
  let errors = Rc::new(Cell::new(0));
  let completions = Rc::new(Cell::new(0));
  let sink = out.clone();
  let e = errors.clone();
  let c = completions.clone();

  observable::create(|mut subscriber: Subscriber<_>| {
    subscriber.next(1);
    subscriber.next(2);
    subscriber.error("source failed");
  })
  .map(|v: i32| v * 10)
  .on_complete(move || c.set(c.get() + 1))
  .on_error(move |_| e.set(e.get() + 1))
  .subscribe(move |v| sink.borrow_mut().push(v));

  assert_eq!(*out.borrow(), vec![10, 20]);
  assert_eq!(errors.get(), 1);
  assert_eq!(completions.get(), 0);
}

#[cfg(feature = "timer")]
mod scheduled {
  use super::*;
  use futures::executor::LocalPool;

  #[test]
  fn chain_spanning_an_executor_hop() {
    let out = Rc::new(RefCell::new(vec![]));
    let sink = out.clone();
    let mut pool = LocalPool::new();

    observable::from_iter(0..6)
      .filter(|v| v % 2 == 0)
      .observe_on(pool.spawner())
      .subscribe(move |v| sink.borrow_mut().push(v));

    assert!(out.borrow().is_empty());
    pool.run();
    assert_eq!(*out.borrow(), vec![0, 2, 4]);
  }

  #[test]
  fn disposed_activation_delivers_nothing_scheduled() {
    let out = Rc::new(RefCell::new(vec![]));
    let sink = out.clone();
    let mut pool = LocalPool::new();

    observable::from_iter(0..6)
      .delay(Duration::from_millis(1), pool.spawner())
      .subscribe(move |v: i32| sink.borrow_mut().push(v))
      .unsubscribe();

    pool.run();
    assert!(out.borrow().is_empty());
  }
}
