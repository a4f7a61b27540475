//! Moves notification delivery onto a scheduler.
//!
//! Every notification becomes one scheduled task targeting a shared
//! observer slot; the slot's lock serializes delivery, and the terminal
//! task drains it. Task handles are collected in the activation's
//! subscription, so disposing it suppresses everything not yet run. With a
//! single-threaded executor the delivery order is the emission order; a
//! multi-worker pool only guarantees serialized, non-overlapping delivery.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::MutArc;
use crate::scheduler::{OnceTask, Scheduler};
use crate::subscription::{
  BoxSubscriptionThreads, MultiSubscriptionThreads, Subscription, TupleSubscription,
};

#[derive(Clone)]
pub struct ObserveOnOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for ObserveOnOp<S, SD>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, ObserveOnObserver<O, SD>>,
  SD: Scheduler<OnceTask<(MutArc<Option<O>>, Item)>>
    + Scheduler<OnceTask<(MutArc<Option<O>>, Err)>>
    + Scheduler<OnceTask<MutArc<Option<O>>>>,
{
  type Unsub = TupleSubscription<S::Unsub, MultiSubscriptionThreads>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subscription = MultiSubscriptionThreads::default();
    let observer = ObserveOnObserver {
      observer: MutArc::own(Some(observer)),
      scheduler: self.scheduler,
      subscription: subscription.clone(),
    };
    let unsub = self.source.actual_subscribe(observer);
    TupleSubscription::new(unsub, subscription)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for ObserveOnOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct ObserveOnObserver<O, SD> {
  observer: MutArc<Option<O>>,
  scheduler: SD,
  subscription: MultiSubscriptionThreads,
}

pub(crate) fn next_task<Item, Err, O: Observer<Item, Err>>(
  (mut observer, value): (MutArc<Option<O>>, Item),
) {
  observer.next(value);
}

pub(crate) fn error_task<Item, Err, O: Observer<Item, Err>>(
  (observer, err): (MutArc<Option<O>>, Err),
) {
  observer.error(err);
}

pub(crate) fn complete_task<Item, Err, O: Observer<Item, Err>>(observer: MutArc<Option<O>>) {
  observer.complete();
}

impl<Item, Err, O, SD> Observer<Item, Err> for ObserveOnObserver<O, SD>
where
  O: Observer<Item, Err>,
  SD: Scheduler<OnceTask<(MutArc<Option<O>>, Item)>>
    + Scheduler<OnceTask<(MutArc<Option<O>>, Err)>>
    + Scheduler<OnceTask<MutArc<Option<O>>>>,
{
  fn next(&mut self, value: Item) {
    if self.subscription.is_closed() {
      return;
    }
    self.subscription.retain();
    let task = OnceTask::new(next_task, (self.observer.clone(), value));
    let handle = self.scheduler.schedule(task, None);
    self.subscription.append(BoxSubscriptionThreads::new(handle));
  }

  fn error(mut self, err: Err) {
    if self.subscription.is_closed() {
      return;
    }
    let task = OnceTask::new(error_task, (self.observer.clone(), err));
    let handle = self.scheduler.schedule(task, None);
    self.subscription.append(BoxSubscriptionThreads::new(handle));
  }

  fn complete(mut self) {
    if self.subscription.is_closed() {
      return;
    }
    let task = OnceTask::new(complete_task, self.observer.clone());
    let handle = self.scheduler.schedule(task, None);
    self.subscription.append(BoxSubscriptionThreads::new(handle));
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
