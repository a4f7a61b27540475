//! Runs the subscription itself on a scheduler.
//!
//! For a synchronous source that means the whole emission loop happens on
//! the scheduler's thread. Disposing the returned handle before the task
//! runs cancels the subscription outright; afterwards it tears down
//! whatever the deferred subscribe produced.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::scheduler::{OnceTask, Scheduler};
use crate::subscription::{BoxSubscriptionThreads, MultiSubscriptionThreads};

#[derive(Clone)]
pub struct SubscribeOnOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

fn subscribe_task<Item, Err, O, S>(
  (source, observer, mut subscription): (S, O, MultiSubscriptionThreads),
) where
  S: Observable<Item, Err, O>,
  O: Observer<Item, Err>,
  S::Unsub: Send + 'static,
{
  let unsub = source.actual_subscribe(observer);
  subscription.append(BoxSubscriptionThreads::new(unsub));
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for SubscribeOnOp<S, SD>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, O>,
  S::Unsub: Send + 'static,
  SD: Scheduler<OnceTask<(S, O, MultiSubscriptionThreads)>>,
{
  type Unsub = MultiSubscriptionThreads;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut subscription = MultiSubscriptionThreads::default();
    let task = OnceTask::new(subscribe_task, (self.source, observer, subscription.clone()));
    let handle = self.scheduler.schedule(task, None);
    subscription.append(BoxSubscriptionThreads::new(handle));
    subscription
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for SubscribeOnOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}
