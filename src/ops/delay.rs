//! Shifts delivery `dur` into the future.
//!
//! Values and completion are scheduled with the delay; an error is not
//! delayed; it takes the shared slot immediately, so queued values that
//! have not yet fired find it drained and the failure overtakes them.

use std::time::Duration;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::ops::observe_on::{complete_task, next_task};
use crate::rc::MutArc;
use crate::scheduler::{OnceTask, Scheduler};
use crate::subscription::{
  BoxSubscriptionThreads, MultiSubscriptionThreads, Subscription, TupleSubscription,
};

#[derive(Clone)]
pub struct DelayOp<S, SD> {
  pub(crate) source: S,
  pub(crate) delay: Duration,
  pub(crate) scheduler: SD,
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DelayOp<S, SD>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, DelayObserver<O, SD>>,
  SD: Scheduler<OnceTask<(MutArc<Option<O>>, Item)>> + Scheduler<OnceTask<MutArc<Option<O>>>>,
{
  type Unsub = TupleSubscription<S::Unsub, MultiSubscriptionThreads>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscriptionThreads::default();
    let observer = DelayObserver {
      observer: MutArc::own(Some(observer)),
      delay: self.delay,
      scheduler: self.scheduler,
      subscription: subscription.clone(),
    };
    let unsub = self.source.actual_subscribe(observer);
    TupleSubscription::new(unsub, subscription)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DelayOp<S, SD> where S: ObservableExt<Item, Err>
{
}

pub struct DelayObserver<O, SD> {
  observer: MutArc<Option<O>>,
  delay: Duration,
  scheduler: SD,
  subscription: MultiSubscriptionThreads,
}

impl<Item, Err, O, SD> Observer<Item, Err> for DelayObserver<O, SD>
where
  O: Observer<Item, Err>,
  SD: Scheduler<OnceTask<(MutArc<Option<O>>, Item)>> + Scheduler<OnceTask<MutArc<Option<O>>>>,
{
  fn next(&mut self, value: Item) {
    if self.subscription.is_closed() {
      return;
    }
    self.subscription.retain();
    let task = OnceTask::new(next_task, (self.observer.clone(), value));
    let handle = self.scheduler.schedule(task, Some(self.delay));
    self.subscription.append(BoxSubscriptionThreads::new(handle));
  }

  // Failures jump the queue.
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if self.subscription.is_closed() {
      return;
    }
    let task = OnceTask::new(complete_task, self.observer.clone());
    let handle = self.scheduler.schedule(task, Some(self.delay));
    self.subscription.append(BoxSubscriptionThreads::new(handle));
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use futures::executor::LocalPool;

  use super::*;
  use crate::prelude::*;

  #[test]
  fn values_arrive_after_the_delay() {
    let values = Rc::new(RefCell::new(vec![]));
    let sink = values.clone();
    let mut pool = LocalPool::new();

    observable::from_iter(0..3)
      .delay(Duration::from_millis(5), pool.spawner())
      .subscribe(move |v| sink.borrow_mut().push(v));

    assert!(values.borrow().is_empty());
    pool.run();
    assert_eq!(*values.borrow(), vec![0, 1, 2]);
  }

  #[test]
  fn completion_is_delayed_too() {
    let completed = Rc::new(RefCell::new(false));
    let flag = completed.clone();
    let mut pool = LocalPool::new();

    observable::of(1)
      .delay(Duration::from_millis(1), pool.spawner())
      .on_complete(move || *flag.borrow_mut() = true)
      .subscribe(|_| {});

    assert!(!*completed.borrow());
    pool.run();
    assert!(*completed.borrow());
  }

  #[cfg(feature = "futures-scheduler")]
  #[test]
  fn unsubscribe_cancels_queued_deliveries() {
    use std::sync::{Arc, Mutex};

    let values = Arc::new(Mutex::new(vec![]));
    let sink = values.clone();

    observable::from_iter(0..10)
      .delay(Duration::from_millis(10), shared_pool().clone())
      .subscribe(move |v| sink.lock().unwrap().push(v))
      .unsubscribe();

    std::thread::sleep(Duration::from_millis(60));
    assert!(values.lock().unwrap().is_empty());
  }

  #[cfg(feature = "tokio-scheduler")]
  #[test]
  fn runs_on_a_tokio_runtime() {
    use std::sync::{Arc, Mutex};

    let runtime = tokio::runtime::Builder::new_current_thread()
      .enable_time()
      .build()
      .unwrap();
    let values = Arc::new(Mutex::new(vec![]));
    let sink = values.clone();

    observable::from_iter(0..3)
      .delay(Duration::from_millis(1), runtime.handle().clone())
      .subscribe(move |v| sink.lock().unwrap().push(v));

    runtime.block_on(async { tokio::time::sleep(Duration::from_millis(20)).await });
    assert_eq!(*values.lock().unwrap(), vec![0, 1, 2]);
  }
}
